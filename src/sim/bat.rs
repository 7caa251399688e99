//! Bats (paddles)
//!
//! A bat sits at a fixed x near its own side of the board and slides
//! vertically. Its centre y is kept in `[0, maximum_y]`. The face is split
//! into three bands; which band the ball touches decides how much extra angle
//! the rebound gets.

use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use super::rect::Rect;
use super::side::{Side, VerticalDirection};
use crate::consts::*;
use crate::normalize_angle;

/// Which third of the bat face was struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatZone {
    Top,
    Middle,
    Bottom,
}

impl BatZone {
    /// Angle added to a rebound off this band, in radians.
    ///
    /// Defined for the right-hand bat (top -20°, bottom +20°) and mirrored
    /// for the left-hand bat.
    pub fn angle_modifier(self, side: Side) -> f32 {
        let base = match self {
            BatZone::Top => -BAT_ANGLE_MODIFIER_DEG.to_radians(),
            BatZone::Middle => 0.0,
            BatZone::Bottom => BAT_ANGLE_MODIFIER_DEG.to_radians(),
        };
        match side {
            Side::Right => base,
            Side::Left => -base,
        }
    }
}

/// Result of a bat being touched by the ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatContact {
    pub zone: BatZone,
    /// Radians, already mirrored for the bat's side
    pub angle_modifier: f32,
}

/// A player's bat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bat {
    pub side: Side,
    centre: IVec2,
    maximum_y: i32,
    /// Pixels moved per movement command
    pub speed: i32,
}

impl Bat {
    /// Create a bat centred vertically on its side of a `board_width` x `board_height` board
    pub fn new(side: Side, board_width: i32, board_height: i32, speed: i32) -> Self {
        let x = match side {
            Side::Left => BAT_MARGIN + BAT_WIDTH / 2,
            Side::Right => board_width - BAT_MARGIN - BAT_WIDTH / 2,
        };
        Self {
            side,
            centre: IVec2::new(x, board_height / 2),
            maximum_y: board_height,
            speed,
        }
    }

    #[inline]
    pub fn centre(&self) -> IVec2 {
        self.centre
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.centre.y
    }

    #[inline]
    pub fn maximum_y(&self) -> i32 {
        self.maximum_y
    }

    /// Place the bat's centre at `y`.
    ///
    /// Panics if `y` is outside `[0, maximum_y]`.
    pub fn set_y(&mut self, y: i32) {
        assert!(
            (0..=self.maximum_y).contains(&y),
            "bat y {} outside [0, {}]",
            y,
            self.maximum_y
        );
        self.centre.y = y;
    }

    pub fn move_up(&mut self) {
        self.centre.y = (self.centre.y - self.speed).max(0);
    }

    pub fn move_down(&mut self) {
        self.centre.y = (self.centre.y + self.speed).min(self.maximum_y);
    }

    pub fn move_in(&mut self, direction: VerticalDirection) {
        match direction {
            VerticalDirection::Up => self.move_up(),
            VerticalDirection::Down => self.move_down(),
        }
    }

    pub fn top_left(&self) -> IVec2 {
        self.centre - IVec2::new(BAT_WIDTH / 2, BAT_HEIGHT / 2)
    }

    pub fn rect(&self) -> Rect {
        Rect {
            top_left: self.top_left(),
            size: IVec2::new(BAT_WIDTH, BAT_HEIGHT),
        }
    }

    /// Midpoint of the face pointing into the field; a served ball sits here
    pub fn front_centre(&self) -> IVec2 {
        let top_left = self.top_left();
        match self.side {
            Side::Left => IVec2::new(top_left.x + BAT_WIDTH, self.centre.y),
            Side::Right => IVec2::new(top_left.x, self.centre.y),
        }
    }

    /// Direction a human serve leaves this bat, given the movement key held.
    ///
    /// No key (or both) serves straight across the board.
    pub fn serve_angle(&self, movement: Option<VerticalDirection>) -> f32 {
        let tilt = SERVE_ANGLE_DEG.to_radians();
        let angle = match (self.side, movement) {
            (Side::Left, None) => 0.0,
            (Side::Left, Some(VerticalDirection::Up)) => -tilt,
            (Side::Left, Some(VerticalDirection::Down)) => tilt,
            (Side::Right, None) => PI,
            (Side::Right, Some(VerticalDirection::Up)) => PI + tilt,
            (Side::Right, Some(VerticalDirection::Down)) => PI - tilt,
        };
        normalize_angle(angle)
    }

    /// Test the ball's bounding rectangle against the three bands of the face.
    ///
    /// Bands are checked top, bottom, then middle; the first overlap wins.
    /// Direction of travel is not considered here.
    pub fn test_collision_with_ball(&self, ball_rect: &Rect) -> Option<BatContact> {
        let rect = self.rect();
        let band = BAT_HEIGHT / 3;

        let top = Rect::new(rect.left(), rect.top(), BAT_WIDTH, band);
        let bottom = Rect::new(rect.left(), rect.bottom() - band, BAT_WIDTH, band);
        let middle = Rect::new(rect.left(), rect.top() + band, BAT_WIDTH, BAT_HEIGHT - 2 * band);

        let zone = if ball_rect.overlaps(&top) {
            BatZone::Top
        } else if ball_rect.overlaps(&bottom) {
            BatZone::Bottom
        } else if ball_rect.overlaps(&middle) {
            BatZone::Middle
        } else {
            return None;
        };

        Some(BatContact {
            zone,
            angle_modifier: zone.angle_modifier(self.side),
        })
    }
}
