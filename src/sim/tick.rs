//! Fixed timestep simulation tick
//!
//! Order within a tick is fixed: quit check, bat commands (including serves),
//! ball advance, collisions, scoring, victory.

use super::side::Side;
use super::state::{GameEvent, MatchPhase, MatchState};

/// Logical buttons for one side, as held this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons {
    pub up: bool,
    pub down: bool,
    pub serve: bool,
}

impl Buttons {
    pub fn any(&self) -> bool {
        self.up || self.down || self.serve
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: Buttons,
    pub right: Buttons,
    /// Some key outside the game buttons is held
    pub any_key: bool,
    /// Window closed or Escape pressed
    pub quit: bool,
}

impl TickInput {
    pub fn buttons(&self, side: Side) -> Buttons {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn any_pressed(&self) -> bool {
        self.any_key || self.left.any() || self.right.any()
    }
}

/// Advance the match by one tick and report what happened
pub fn tick(state: &mut MatchState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.quit {
        events.push(GameEvent::QuitRequested);
        return events;
    }

    if let MatchPhase::MatchOver { winner, hold_ticks } = state.phase {
        if hold_ticks > 0 {
            state.phase = MatchPhase::MatchOver {
                winner,
                hold_ticks: hold_ticks - 1,
            };
        } else if input.any_pressed() {
            state.reset(winner.opponent());
            events.push(GameEvent::MatchReset);
        }
        return events;
    }

    state.time_ticks += 1;

    // Bat movement and serving
    for side in Side::BOTH {
        let serving = state.is_serving(side);
        let (pilot, bat, ball) = state.pilot_parts(side);
        let command = pilot.command(bat, ball, serving, input.buttons(side));

        if let Some(direction) = command.movement {
            state.bat_mut(side).move_in(direction);
        }

        if let (true, Some(angle)) = (serving, command.serve_angle) {
            let bat = match side {
                Side::Left => &state.left_bat,
                Side::Right => &state.right_bat,
            };
            state.ball.follow(bat);
            state.ball.start_moving(angle);
            state.serving = None;
            log::info!("Ball served by {} bat at {:.1}°", side, angle.to_degrees());
            events.push(GameEvent::Served { side, angle });
        }
    }

    // Ball movement
    if state.ball.is_moving() {
        state.ball.move_ball();
    } else if let Some(side) = state.serving {
        let bat = match side {
            Side::Left => &state.left_bat,
            Side::Right => &state.right_bat,
        };
        state.ball.follow(bat);
    }

    // Collisions
    if state.ball.is_moving() {
        for side in Side::BOTH {
            let bat = match side {
                Side::Left => &state.left_bat,
                Side::Right => &state.right_bat,
            };
            if let Some(hit) = state.ball.test_collision_with_bat(bat) {
                events.push(GameEvent::BatHit {
                    side: hit.side,
                    direction: hit.direction,
                    speed: hit.speed,
                });
            }
        }
        if state
            .ball
            .test_collision_with_game_edge(state.config.board_height)
        {
            events.push(GameEvent::EdgeBounce);
        }
    }

    // Scoring
    if let Some(by) = state.ball.test_point_scored(state.config.board_width) {
        state.score.point_scored(by);
        events.push(GameEvent::PointScored {
            by,
            score: state.score.score(),
        });
        state.start_new_point(by.opponent());
    }

    // Victory
    if let Some(winner) = state.score.winner(state.config.points_to_win) {
        let score = state.score.score();
        log::info!("{} wins with score {}-{}", winner, score.0, score.1);
        state.phase = MatchPhase::MatchOver {
            winner,
            hold_ticks: state.config.match_over_ticks,
        };
        events.push(GameEvent::MatchWon { winner, score });
    }

    events
}
