//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only
//! - Seeded RNG only
//! - Stable iteration order (left side first)
//! - No rendering or platform dependencies

pub mod ball;
pub mod bat;
pub mod pilot;
pub mod rect;
pub mod score;
pub mod side;
pub mod state;
pub mod tick;

pub use ball::{Ball, BallState, BatHit, clamp_rebound, random_start_direction};
pub use bat::{Bat, BatContact, BatZone};
pub use pilot::{AutoPilot, BatCommand, Pilot, auto_serve_angle};
pub use rect::Rect;
pub use score::Score;
pub use side::{Side, VerticalDirection};
pub use state::{GameEvent, MatchConfig, MatchPhase, MatchState, Snapshot};
pub use tick::{Buttons, TickInput, tick};
