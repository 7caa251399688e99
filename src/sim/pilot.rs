//! Who drives a bat: a human on the keyboard or the automated pilot
//!
//! Both variants answer the same question each tick: which way does the bat
//! move, and does it serve (and at what angle)?

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ball::Ball;
use super::bat::Bat;
use super::side::{Side, VerticalDirection};
use super::tick::Buttons;
use crate::consts::{BAT_HEIGHT, SERVE_ANGLE_DEG};
use crate::normalize_angle;
use std::f32::consts::PI;

/// Per-tick chance the automated server flips its walk direction
pub const AUTO_REVERSE_CHANCE: f64 = 0.05;
/// Per-tick chance the automated server releases the ball
pub const AUTO_SERVE_CHANCE: f64 = 0.02;

/// What a bat does this tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BatCommand {
    pub movement: Option<VerticalDirection>,
    /// Present only when the bat serves this tick
    pub serve_angle: Option<f32>,
}

/// Reactive computer player
#[derive(Debug, Clone)]
pub struct AutoPilot {
    rng: Pcg32,
    heading: VerticalDirection,
    /// Where on its face the bat means to take the incoming ball
    aim_offset: i32,
    incoming: bool,
}

impl AutoPilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            heading: VerticalDirection::Up,
            aim_offset: 0,
            incoming: false,
        }
    }

    fn command(&mut self, bat: &Bat, ball: &Ball, serving: bool) -> BatCommand {
        if serving {
            return self.serve_walk(bat);
        }

        // Pick a fresh spot on the face each time the ball turns toward us
        let incoming = ball.horizontal_sign() == bat.side.sign();
        if incoming && !self.incoming {
            let reach = BAT_HEIGHT / 2 - 2;
            self.aim_offset = self.rng.random_range(-reach..=reach);
        }
        self.incoming = incoming;
        let aim = if incoming { self.aim_offset } else { 0 };

        // Follow the ball, holding still once within one step of the target
        let dy = ball.pos.y - aim - bat.y();
        let movement = if dy <= -bat.speed {
            Some(VerticalDirection::Up)
        } else if dy >= bat.speed {
            Some(VerticalDirection::Down)
        } else {
            None
        };
        BatCommand {
            movement,
            serve_angle: None,
        }
    }

    /// Wander up and down while holding the ball, then serve at random
    fn serve_walk(&mut self, bat: &Bat) -> BatCommand {
        let pinned = match self.heading {
            VerticalDirection::Up => bat.y() == 0,
            VerticalDirection::Down => bat.y() == bat.maximum_y(),
        };
        if pinned || self.rng.random_bool(AUTO_REVERSE_CHANCE) {
            self.heading = self.heading.reversed();
        }

        let serve_angle = self
            .rng
            .random_bool(AUTO_SERVE_CHANCE)
            .then(|| auto_serve_angle(bat.side, self.heading));

        BatCommand {
            movement: Some(self.heading),
            serve_angle,
        }
    }
}

/// Serve angle for the automated pilot: an acute angle signed by the last
/// movement (Up positive, Down negative), mirrored to face the opponent.
pub fn auto_serve_angle(side: Side, heading: VerticalDirection) -> f32 {
    let tilt = SERVE_ANGLE_DEG.to_radians();
    let base = match heading {
        VerticalDirection::Up => tilt,
        VerticalDirection::Down => -tilt,
    };
    match side {
        Side::Left => normalize_angle(base),
        Side::Right => normalize_angle(PI - base),
    }
}

/// Bat controller, chosen when the match is built
#[derive(Debug, Clone)]
pub enum Pilot {
    Human,
    Automated(AutoPilot),
}

impl Pilot {
    pub fn is_automated(&self) -> bool {
        matches!(self, Pilot::Automated(_))
    }

    /// Decide this tick's command.
    ///
    /// `serving` is true when this bat holds the ball. `buttons` are ignored
    /// by the automated pilot.
    pub fn command(&mut self, bat: &Bat, ball: &Ball, serving: bool, buttons: Buttons) -> BatCommand {
        match self {
            Pilot::Human => {
                let movement = match (buttons.up, buttons.down) {
                    (true, false) => Some(VerticalDirection::Up),
                    (false, true) => Some(VerticalDirection::Down),
                    _ => None,
                };
                let serve_angle = (serving && buttons.serve).then(|| bat.serve_angle(movement));
                BatCommand {
                    movement,
                    serve_angle,
                }
            }
            Pilot::Automated(auto) => auto.command(bat, ball, serving),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::ball::BallState;
    use glam::IVec2;

    fn bat(side: Side) -> Bat {
        Bat::new(side, BOARD_WIDTH, BOARD_HEIGHT, BAT_SPEED)
    }

    #[test]
    fn test_human_movement_keys() {
        let bat = bat(Side::Left);
        let ball = Ball::with_velocity(IVec2::new(320, 240), 0.0, 5.0);
        let mut pilot = Pilot::Human;

        let up = Buttons { up: true, ..Default::default() };
        assert_eq!(pilot.command(&bat, &ball, false, up).movement, Some(VerticalDirection::Up));

        let both = Buttons { up: true, down: true, serve: false };
        assert_eq!(pilot.command(&bat, &ball, false, both).movement, None);
    }

    #[test]
    fn test_human_serve_requires_serving_and_key() {
        let bat = bat(Side::Right);
        let mut ball = Ball::with_velocity(bat.front_centre(), 0.0, 5.0);
        ball.state = BallState::Serving;
        let mut pilot = Pilot::Human;

        let serve = Buttons { serve: true, ..Default::default() };
        assert_eq!(pilot.command(&bat, &ball, false, serve).serve_angle, None);
        let angle = pilot.command(&bat, &ball, true, serve).serve_angle.unwrap();
        assert!((angle - PI).abs() < 1e-6);

        let serve_down = Buttons { down: true, serve: true, up: false };
        let angle = pilot.command(&bat, &ball, true, serve_down).serve_angle.unwrap();
        assert!((angle - (PI - SERVE_ANGLE_DEG.to_radians())).abs() < 1e-6);
    }

    #[test]
    fn test_auto_pilot_tracks_departing_ball() {
        let bat = bat(Side::Right);
        let mut pilot = Pilot::Automated(AutoPilot::new(3));

        // Heading left, away from the right bat
        let above = Ball::with_velocity(IVec2::new(320, 20), PI, 5.0);
        let cmd = pilot.command(&bat, &above, false, Buttons::default());
        assert_eq!(cmd.movement, Some(VerticalDirection::Up));
        assert_eq!(cmd.serve_angle, None);

        let below = Ball::with_velocity(IVec2::new(320, 460), PI, 5.0);
        let cmd = pilot.command(&bat, &below, false, Buttons::default());
        assert_eq!(cmd.movement, Some(VerticalDirection::Down));

        let level = Ball::with_velocity(IVec2::new(320, bat.y() + 1), PI, 5.0);
        assert_eq!(pilot.command(&bat, &level, false, Buttons::default()).movement, None);
    }

    #[test]
    fn test_auto_pilot_lines_up_incoming_ball() {
        let mut bat = bat(Side::Left);
        let mut pilot = Pilot::Automated(AutoPilot::new(9));
        let ball = Ball::with_velocity(IVec2::new(320, 100), PI, 5.0);

        for _ in 0..100 {
            if let Some(direction) = pilot.command(&bat, &ball, false, Buttons::default()).movement {
                bat.move_in(direction);
            }
        }
        // Ball lands somewhere on the face
        assert!((ball.pos.y - bat.y()).abs() < BAT_HEIGHT / 2 + bat.speed);
    }

    #[test]
    fn test_auto_pilot_eventually_serves_toward_opponent() {
        for side in Side::BOTH {
            let mut bat = bat(side);
            let mut ball = Ball::with_velocity(bat.front_centre(), 0.0, 5.0);
            ball.state = BallState::Serving;
            let mut pilot = Pilot::Automated(AutoPilot::new(11));

            let mut served = None;
            for _ in 0..5_000 {
                let cmd = pilot.command(&bat, &ball, true, Buttons::default());
                assert!(cmd.movement.is_some(), "serving pilot always walks");
                if let Some(direction) = cmd.movement {
                    bat.move_in(direction);
                }
                if let Some(angle) = cmd.serve_angle {
                    served = Some(angle);
                    break;
                }
            }
            let angle = served.expect("pilot should serve within 5000 ticks");
            assert_eq!(angle.cos().signum() as i32, side.opponent().sign());
        }
    }

    #[test]
    fn test_auto_serve_angle_sign() {
        let tilt = SERVE_ANGLE_DEG.to_radians();
        assert!((auto_serve_angle(Side::Left, VerticalDirection::Up) - tilt).abs() < 1e-6);
        assert!(
            (auto_serve_angle(Side::Left, VerticalDirection::Down) - (2.0 * PI - tilt)).abs() < 1e-5
        );
        assert!((auto_serve_angle(Side::Right, VerticalDirection::Up) - (PI - tilt)).abs() < 1e-6);
    }
}
