//! Match state and lifecycle
//!
//! The match owns both bats, the ball, the score and the pilots. Nothing
//! else holds references into it; the tick mutates it in place.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, BallState};
use super::bat::Bat;
use super::pilot::{AutoPilot, Pilot};
use super::rect::Rect;
use super::score::Score;
use super::side::Side;
use crate::consts::*;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Normal play: ball serving or moving
    InPoint,
    /// Someone reached the winning score. The banner is held for
    /// `hold_ticks` before any key press resets the match.
    MatchOver { winner: Side, hold_ticks: u32 },
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Served { side: Side, angle: f32 },
    BatHit { side: Side, direction: f32, speed: f32 },
    EdgeBounce,
    PointScored { by: Side, score: (u32, u32) },
    MatchWon { winner: Side, score: (u32, u32) },
    MatchReset,
    QuitRequested,
}

/// Match rules and board size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub board_width: i32,
    pub board_height: i32,
    pub bat_speed: i32,
    pub points_to_win: u32,
    /// Ticks the victory banner stays up before input is accepted
    pub match_over_ticks: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            bat_speed: BAT_SPEED,
            points_to_win: POINTS_TO_WIN,
            match_over_ticks: (MATCH_OVER_PAUSE_SECS * TICK_RATE as f32).round() as u32,
        }
    }
}

/// Geometry handed to renderers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: IVec2,
    pub left_bat: Rect,
    pub right_bat: Rect,
    pub ball_centre: IVec2,
    pub ball_radius: i32,
    pub score: (u32, u32),
    pub phase: MatchPhase,
}

/// Complete match state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct MatchState {
    pub seed: u64,
    pub config: MatchConfig,
    pub phase: MatchPhase,
    pub left_bat: Bat,
    pub right_bat: Bat,
    pub ball: Ball,
    pub score: Score,
    /// The bat holding the ball while it is being served
    pub serving: Option<Side>,
    pub time_ticks: u64,
    left_pilot: Pilot,
    right_pilot: Pilot,
    rng: Pcg32,
}

impl MatchState {
    /// Create a match. `automated` selects which sides the computer plays.
    pub fn new(config: MatchConfig, seed: u64, automated: [bool; 2]) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let pilot = |on: bool, stream: u64| {
            if on {
                Pilot::Automated(AutoPilot::new(seed.wrapping_add(stream)))
            } else {
                Pilot::Human
            }
        };
        let ball = Ball::new(board_centre(&config), BallState::Moving, &mut rng);

        let state = Self {
            seed,
            config,
            phase: MatchPhase::InPoint,
            left_bat: Bat::new(Side::Left, config.board_width, config.board_height, config.bat_speed),
            right_bat: Bat::new(Side::Right, config.board_width, config.board_height, config.bat_speed),
            ball,
            score: Score::new(),
            serving: None,
            time_ticks: 0,
            left_pilot: pilot(automated[0], 1),
            right_pilot: pilot(automated[1], 2),
            rng,
        };
        log::info!(
            "New match (seed {}): kick-off from centre at {:.1}°",
            seed,
            state.ball.direction().to_degrees()
        );
        state
    }

    pub fn bat(&self, side: Side) -> &Bat {
        match side {
            Side::Left => &self.left_bat,
            Side::Right => &self.right_bat,
        }
    }

    pub fn bat_mut(&mut self, side: Side) -> &mut Bat {
        match side {
            Side::Left => &mut self.left_bat,
            Side::Right => &mut self.right_bat,
        }
    }

    pub fn pilot(&self, side: Side) -> &Pilot {
        match side {
            Side::Left => &self.left_pilot,
            Side::Right => &self.right_pilot,
        }
    }

    /// Borrow a pilot alongside the read-only pieces it decides from
    pub(crate) fn pilot_parts(&mut self, side: Side) -> (&mut Pilot, &Bat, &Ball) {
        match side {
            Side::Left => (&mut self.left_pilot, &self.left_bat, &self.ball),
            Side::Right => (&mut self.right_pilot, &self.right_bat, &self.ball),
        }
    }

    /// True while `side`'s bat holds the ball
    pub fn is_serving(&self, side: Side) -> bool {
        self.ball.is_serving() && self.serving == Some(side)
    }

    /// Recentre the bats and put a fresh ball on the bat of the side that
    /// just conceded
    pub fn start_new_point(&mut self, serving: Side) {
        log::info!(
            "Starting new point: bats recentred, {} bat serves",
            serving
        );
        self.recentre_bats();
        let mut ball = Ball::new(IVec2::ZERO, BallState::Serving, &mut self.rng);
        ball.follow(self.bat(serving));
        self.ball = ball;
        self.serving = Some(serving);
    }

    /// Zero the score and start again with the loser of the last match serving
    pub fn reset(&mut self, serving: Side) {
        log::info!("Resetting match");
        self.score = Score::new();
        self.phase = MatchPhase::InPoint;
        self.start_new_point(serving);
    }

    fn recentre_bats(&mut self) {
        let c = self.config;
        self.left_bat = Bat::new(Side::Left, c.board_width, c.board_height, c.bat_speed);
        self.right_bat = Bat::new(Side::Right, c.board_width, c.board_height, c.bat_speed);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: IVec2::new(self.config.board_width, self.config.board_height),
            left_bat: self.left_bat.rect(),
            right_bat: self.right_bat.rect(),
            ball_centre: self.ball.pos,
            ball_radius: self.ball.radius,
            score: self.score.score(),
            phase: self.phase,
        }
    }
}

fn board_centre(config: &MatchConfig) -> IVec2 {
    IVec2::new(config.board_width / 2, config.board_height / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_match_kicks_off_from_centre() {
        let state = MatchState::new(MatchConfig::default(), 42, [false, false]);
        assert_eq!(state.phase, MatchPhase::InPoint);
        assert_eq!(state.ball.pos, IVec2::new(320, 240));
        assert!(state.ball.is_moving());
        assert_eq!(state.serving, None);
        assert_eq!(state.score.score(), (0, 0));
        assert_eq!(state.config.match_over_ticks, 150);
    }

    #[test]
    fn test_new_point_attaches_ball_to_server() {
        let mut state = MatchState::new(MatchConfig::default(), 42, [false, true]);
        state.right_bat.move_up();
        state.start_new_point(Side::Right);

        assert!(state.is_serving(Side::Right));
        assert!(!state.is_serving(Side::Left));
        assert_eq!(state.right_bat.y(), BOARD_HEIGHT / 2);
        assert_eq!(state.ball.pos, state.right_bat.front_centre());
        assert_eq!(state.ball.speed(), BALL_START_SPEED);
        assert!(state.pilot(Side::Right).is_automated());
    }

    #[test]
    fn test_reset_clears_score() {
        let mut state = MatchState::new(MatchConfig::default(), 1, [false, false]);
        state.score.point_scored(Side::Left);
        state.phase = MatchPhase::MatchOver {
            winner: Side::Left,
            hold_ticks: 0,
        };
        state.reset(Side::Right);
        assert_eq!(state.score.score(), (0, 0));
        assert_eq!(state.phase, MatchPhase::InPoint);
        assert!(state.is_serving(Side::Right));
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = MatchState::new(MatchConfig::default(), 5, [true, true]);
        let snap = state.snapshot();
        assert_eq!(snap.board, IVec2::new(BOARD_WIDTH, BOARD_HEIGHT));
        assert_eq!(snap.left_bat, state.left_bat.rect());
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("InPoint"));
    }
}
