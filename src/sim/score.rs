//! Match score

use serde::{Deserialize, Serialize};

use super::side::Side;

/// Points won by each side. Only reset by a full match reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    left: u32,
    right: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit one point to `scored_by`
    pub fn point_scored(&mut self, scored_by: Side) {
        match scored_by {
            Side::Left => {
                self.left += 1;
                log::info!("Point scored by left bat. Score: {}", self.left);
            }
            Side::Right => {
                self.right += 1;
                log::info!("Point scored by right bat. Score: {}", self.right);
            }
        }
    }

    /// Snapshot as `(left, right)`
    pub fn score(&self) -> (u32, u32) {
        (self.left, self.right)
    }

    pub fn points(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// The side that has reached `points_to_win`, if any
    pub fn winner(&self, points_to_win: u32) -> Option<Side> {
        Side::BOTH
            .into_iter()
            .find(|&side| self.points(side) >= points_to_win)
    }
}
