//! The ball: movement, serve state, and collision response
//!
//! Direction is measured in radians anticlockwise from +x and kept in
//! [0, 2π). Position advances by whole pixels, rounding each component of
//! the per-tick displacement.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use super::bat::{Bat, BatContact};
use super::rect::Rect;
use super::side::Side;
use crate::consts::*;
use crate::{direction_step, normalize_angle};

/// Horizontal velocity components smaller than this count as zero
const HORIZONTAL_EPSILON: f32 = 1e-6;

/// Ball state - attached to a bat or free-moving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallState {
    /// Position follows the serving bat's front centre; velocity is ignored
    Serving,
    /// Ball advances along its direction every tick
    Moving,
}

/// A rebound off a bat
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatHit {
    pub side: Side,
    pub contact: BatContact,
    pub direction: f32,
    pub speed: f32,
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: IVec2,
    pub radius: i32,
    direction: f32,
    speed: f32,
    pub state: BallState,
}

impl Ball {
    /// Create a ball at `pos` with a random start direction: within ±30° of
    /// the horizontal, toward either side with equal probability.
    pub fn new<R: Rng>(pos: IVec2, state: BallState, rng: &mut R) -> Self {
        Self {
            pos,
            radius: BALL_RADIUS,
            direction: random_start_direction(rng),
            speed: BALL_START_SPEED,
            state,
        }
    }

    /// Create a ball with an explicit direction and speed
    pub fn with_velocity(pos: IVec2, direction: f32, speed: f32) -> Self {
        debug_assert!(speed > 0.0);
        Self {
            pos,
            radius: BALL_RADIUS,
            direction: normalize_angle(direction),
            speed,
            state: BallState::Moving,
        }
    }

    #[inline]
    pub fn direction(&self) -> f32 {
        self.direction
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn is_serving(&self) -> bool {
        self.state == BallState::Serving
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.state == BallState::Moving
    }

    /// Bounding square used for collision, derived from the current position
    pub fn rect(&self) -> Rect {
        Rect::from_centre(self.pos, IVec2::splat(2 * self.radius + 1))
    }

    /// Advance one tick along the current direction
    pub fn move_ball(&mut self) {
        debug_assert!(self.is_moving(), "move_ball called on a serving ball");
        self.pos += direction_step(self.speed, self.direction);
    }

    /// Pin a serving ball to the bat that is serving it
    pub fn follow(&mut self, bat: &Bat) {
        self.pos = bat.front_centre();
    }

    /// Serve: leave the bat along `angle`. Speed is unchanged.
    pub fn start_moving(&mut self, angle: f32) {
        self.direction = normalize_angle(angle);
        self.state = BallState::Moving;
    }

    /// Sign of the horizontal velocity; 0 when travelling vertically
    pub fn horizontal_sign(&self) -> i32 {
        let dx = self.direction.cos();
        if dx > HORIZONTAL_EPSILON {
            1
        } else if dx < -HORIZONTAL_EPSILON {
            -1
        } else {
            0
        }
    }

    /// Rebound off `bat` if the ball overlaps it and is travelling toward
    /// the side that bat defends.
    pub fn test_collision_with_bat(&mut self, bat: &Bat) -> Option<BatHit> {
        let contact = bat.test_collision_with_ball(&self.rect())?;

        // A ball overlapping a bat it is already leaving must not bounce again
        if self.horizontal_sign() != bat.side.sign() {
            return None;
        }

        let reflected = normalize_angle(PI - self.direction + contact.angle_modifier);
        self.direction = clamp_rebound(reflected, bat.side);
        self.speed = (self.speed + BALL_ACCELERATION).min(BALL_MAX_SPEED);

        log::debug!(
            "Ball hit {} bat ({:?} band): direction {:.1}°, speed {}",
            bat.side,
            contact.zone,
            self.direction.to_degrees(),
            self.speed
        );

        Some(BatHit {
            side: bat.side,
            contact,
            direction: self.direction,
            speed: self.speed,
        })
    }

    /// Bounce off the top or bottom edge. Returns true if the ball bounced.
    ///
    /// The vertical component only flips while the ball is still heading
    /// out of the board, so a ball that stays past an edge for more than one
    /// tick does not oscillate.
    pub fn test_collision_with_game_edge(&mut self, board_height: i32) -> bool {
        let dy = self.direction.sin();
        let past_top = self.pos.y <= 0 && dy < 0.0;
        let past_bottom = self.pos.y >= board_height && dy > 0.0;

        if past_top || past_bottom {
            self.direction = normalize_angle(-self.direction);
            log::debug!("Ball bounced off edge at {:?}", self.pos);
            true
        } else {
            false
        }
    }

    /// Which side, if any, scored because the ball left the board horizontally
    pub fn test_point_scored(&self, board_width: i32) -> Option<Side> {
        if self.pos.x < 0 {
            Some(Side::Right)
        } else if self.pos.x > board_width {
            Some(Side::Left)
        } else {
            None
        }
    }
}

/// Random kick-off direction: uniform within ±30° of +x, then flipped to -x
/// with probability one half.
pub fn random_start_direction<R: Rng>(rng: &mut R) -> f32 {
    let mut degrees = rng.random_range(-START_SPREAD_DEG..=START_SPREAD_DEG);
    if rng.random_bool(0.5) {
        degrees += 180.0;
    }
    normalize_angle(degrees.to_radians())
}

/// Clamp a rebound off `side`'s bat into the cone around the horizontal axis
/// pointing away from that bat.
pub fn clamp_rebound(direction: f32, side: Side) -> f32 {
    let cone = REBOUND_CONE_DEG.to_radians();
    let direction = normalize_angle(direction);
    match side {
        Side::Right => direction.clamp(PI - cone, PI + cone),
        Side::Left => {
            // Signed angle in (-π, π] so the cone around 0 is contiguous
            let signed = if direction > PI { direction - 2.0 * PI } else { direction };
            normalize_angle(signed.clamp(-cone, cone))
        }
    }
}
