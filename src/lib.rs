//! Bat Tennis - a two-player bat-and-ball arcade game
//!
//! Core modules:
//! - `sim`: Deterministic fixed-tick simulation (ball, bats, score, match flow)
//! - `renderer`: Drawing-surface abstraction and the match painter
//! - `platform`: Input sources and the frame-rate limiter
//! - `settings`: JSON configuration

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{PlayerKind, Settings, SettingsError};

use glam::IVec2;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second
    pub const TICK_RATE: u32 = 50;

    /// Board dimensions (pixels)
    pub const BOARD_WIDTH: i32 = 640;
    pub const BOARD_HEIGHT: i32 = 480;

    /// Bat geometry
    pub const BAT_WIDTH: i32 = 20;
    pub const BAT_HEIGHT: i32 = 70;
    /// Gap between a bat's outer edge and its side of the board
    pub const BAT_MARGIN: i32 = 10;
    /// Pixels moved per movement command
    pub const BAT_SPEED: i32 = 6;
    /// Angle added to a rebound off the top or bottom third of a bat (degrees)
    pub const BAT_ANGLE_MODIFIER_DEG: f32 = 20.0;
    /// Half-width of the rebound cone around the horizontal axis (degrees)
    pub const REBOUND_CONE_DEG: f32 = 20.0;
    /// Serve angle away from the horizontal when a movement key is held (degrees)
    pub const SERVE_ANGLE_DEG: f32 = 15.0;

    /// Ball defaults
    pub const BALL_RADIUS: i32 = 3;
    pub const BALL_START_SPEED: f32 = 5.0;
    /// Speed gained on every bat hit
    pub const BALL_ACCELERATION: f32 = 1.0;
    /// Maximum ball speed: one bat width per tick, so the ball can't skip a bat
    pub const BALL_MAX_SPEED: f32 = BAT_WIDTH as f32;
    /// Kick-off spread either side of the horizontal axis (degrees)
    pub const START_SPREAD_DEG: f32 = 30.0;

    /// Match rules
    pub const POINTS_TO_WIN: u32 = 5;
    /// Victory banner hold before a key press can reset the match
    pub const MATCH_OVER_PAUSE_SECS: f32 = 3.0;
}

/// Normalize an angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::TAU;
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Whole-pixel displacement for one tick at `speed` along `direction`
#[inline]
pub fn direction_step(speed: f32, direction: f32) -> IVec2 {
    IVec2::new(
        (speed * direction.cos()).round() as i32,
        (speed * direction.sin()).round() as i32,
    )
}
