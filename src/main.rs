//! Bat Tennis entry point
//!
//! Loads settings, builds a match and runs the fixed-tick loop. The native
//! build has no window or keyboard backend, so every bat is played by the
//! computer and frames go to the log as text.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use bat_tennis::Settings;

    let path = std::env::args().nth(1);
    let loaded = match &path {
        Some(path) => Settings::load(path),
        None => Ok(Settings::default()),
    };

    // The config picks the log level, so the logger waits for it
    let level = loaded
        .as_ref()
        .map_or(log::LevelFilter::Error, |settings| settings.general.log_level);
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
    log::info!("Bat Tennis (native) starting...");

    let settings = match loaded {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    };
    match &path {
        Some(path) => log::info!("Loaded settings from {}", path),
        None => log::info!("No config file given, using defaults"),
    }

    native::run(&settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No web frontend for this build
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use bat_tennis::platform::{FrameLimiter, IdleInput, InputSource};
    use bat_tennis::renderer::{Palette, TextSurface, draw_match};
    use bat_tennis::sim::{GameEvent, MatchPhase, MatchState, Side, tick};
    use bat_tennis::{PlayerKind, Settings};
    use glam::IVec2;

    /// Pixels per character when printing frames
    const TEXT_CELL: IVec2 = IVec2::new(16, 32);

    pub fn run(settings: &Settings) {
        let mut automated = settings.automated_sides();
        for (slot, side) in automated.iter_mut().zip(Side::BOTH) {
            if !*slot {
                log::warn!(
                    "{} bat configured as {} but there is no keyboard backend; the computer plays it",
                    side,
                    PlayerKind::Human.as_str()
                );
                *slot = true;
            }
        }

        let seed = settings.general.seed.unwrap_or_else(rand::random);
        let mut state = MatchState::new(settings.match_config(), seed, automated);
        let mut limiter = FrameLimiter::new(settings.general.fps);

        play(&mut state, &settings.palette(), &mut IdleInput, &mut limiter);
    }

    /// Tick until quit, or until the victory banner is done and nobody can
    /// press a key to restart
    fn play(
        state: &mut MatchState,
        palette: &Palette,
        input: &mut dyn InputSource,
        limiter: &mut FrameLimiter,
    ) {
        let mut surface = TextSurface::new(
            state.config.board_width,
            state.config.board_height,
            TEXT_CELL,
        );

        loop {
            let events = tick(state, &input.poll());

            for event in &events {
                match event {
                    GameEvent::QuitRequested => {
                        log::info!("Quit requested - exiting");
                        return;
                    }
                    GameEvent::PointScored { .. } => {
                        draw_match(state, palette, &mut surface);
                        log::debug!("\n{}", surface.render());
                    }
                    GameEvent::MatchWon { winner, score } => {
                        draw_match(state, palette, &mut surface);
                        log::info!(
                            "{} won {}-{} after {} ticks\n{}",
                            winner,
                            score.0,
                            score.1,
                            state.time_ticks,
                            surface.render()
                        );
                    }
                    _ => {}
                }
            }

            if let MatchPhase::MatchOver { hold_ticks: 0, .. } = state.phase {
                log::info!("Match finished - exiting");
                return;
            }

            limiter.wait();
        }
    }
}
