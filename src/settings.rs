//! Game settings
//!
//! Read from a JSON file with three sections, `general`, `game` and
//! `screen`. Missing fields fall back to the defaults in `consts`.

use std::path::Path;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

use crate::consts::*;
use crate::renderer::{Color, Palette};
use crate::sim::MatchConfig;

/// Configuration errors; all of them are fatal at startup
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Who controls a bat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    #[default]
    Human,
    Automated,
}

impl PlayerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerKind::Human => "human",
            PlayerKind::Automated => "automated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Simulation ticks per second
    pub fps: u32,
    /// Match seed; random when absent
    pub seed: Option<u64>,
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`; `RUST_LOG` overrides it
    pub log_level: LevelFilter,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            fps: TICK_RATE,
            seed: None,
            log_level: LevelFilter::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub points_to_win: u32,
    pub board_width: i32,
    pub board_height: i32,
    pub bat_speed: i32,
    /// How long the victory banner is held before a key press restarts
    pub match_over_pause_secs: f32,
    pub left: PlayerKind,
    pub right: PlayerKind,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            points_to_win: POINTS_TO_WIN,
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            bat_speed: BAT_SPEED,
            match_over_pause_secs: MATCH_OVER_PAUSE_SECS,
            left: PlayerKind::Human,
            right: PlayerKind::Human,
        }
    }
}

/// Screen colours, each either `"r, g, b"` or `[r, g, b]`.
///
/// Entries are kept raw so that a bad colour only costs the custom palette,
/// not the whole config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenSettings {
    #[serde(default)]
    pub background: Option<Value>,
    #[serde(default)]
    pub foreground: Option<Value>,
}

impl Default for ScreenSettings {
    fn default() -> Self {
        Self {
            background: Some(json!([0, 0, 0])),
            foreground: Some(json!([255, 255, 255])),
        }
    }
}

impl ScreenSettings {
    /// Resolve the configured colours. Any bad or missing entry logs a
    /// warning and the default palette is used for both.
    pub fn palette(&self) -> Palette {
        match self.try_palette() {
            Ok(palette) => palette,
            Err(reason) => {
                log::warn!("{}; using default screen colours", reason);
                Palette::default()
            }
        }
    }

    fn try_palette(&self) -> Result<Palette, String> {
        Ok(Palette {
            background: parse_colour("background", self.background.as_ref())?,
            foreground: parse_colour("foreground", self.foreground.as_ref())?,
        })
    }
}

fn parse_colour(name: &str, entry: Option<&Value>) -> Result<Color, String> {
    let entry = entry.ok_or_else(|| format!("screen.{} colour not set", name))?;
    let not_channels = || format!("screen.{} colour {} is not a list of integers in 0..=255", name, entry);

    let channels: Vec<u8> = match entry {
        Value::String(text) => text
            .split(',')
            .map(|channel| channel.trim().parse::<u8>())
            .collect::<Result<_, _>>()
            .map_err(|_| not_channels())?,
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_u64().and_then(|n| u8::try_from(n).ok()))
            .collect::<Option<_>>()
            .ok_or_else(not_channels)?,
        _ => return Err(not_channels()),
    };

    match channels.as_slice() {
        &[r, g, b] => Ok(Color::rgb(r, g, b)),
        _ => Err(format!(
            "screen.{} colour {} needs 3 channels, got {}",
            name,
            entry,
            channels.len()
        )),
    }
}

/// Game settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub game: GameSettings,
    pub screen: ScreenSettings,
}

impl Settings {
    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let game = &self.game;
        if self.general.fps == 0 {
            return Err(SettingsError::Invalid("fps must be positive".into()));
        }
        if game.points_to_win == 0 {
            return Err(SettingsError::Invalid("points_to_win must be positive".into()));
        }
        if game.bat_speed <= 0 {
            return Err(SettingsError::Invalid("bat_speed must be positive".into()));
        }
        if game.board_height < BAT_HEIGHT || game.board_width < 4 * (BAT_MARGIN + BAT_WIDTH) {
            return Err(SettingsError::Invalid(format!(
                "board {}x{} is too small for the bats",
                game.board_width, game.board_height
            )));
        }
        if game.match_over_pause_secs.is_nan() || game.match_over_pause_secs < 0.0 {
            return Err(SettingsError::Invalid(
                "match_over_pause_secs must not be negative".into(),
            ));
        }
        Ok(())
    }

    /// Simulation rules derived from these settings
    pub fn match_config(&self) -> MatchConfig {
        let game = &self.game;
        MatchConfig {
            board_width: game.board_width,
            board_height: game.board_height,
            bat_speed: game.bat_speed,
            points_to_win: game.points_to_win,
            match_over_ticks: (game.match_over_pause_secs * self.general.fps as f32).round() as u32,
        }
    }

    /// Colours to paint frames in
    pub fn palette(&self) -> Palette {
        self.screen.palette()
    }

    /// `[left, right]`: true where the computer plays
    pub fn automated_sides(&self) -> [bool; 2] {
        [
            self.game.left == PlayerKind::Automated,
            self.game.right == PlayerKind::Automated,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.match_config(), MatchConfig::default());
        assert_eq!(settings.automated_sides(), [false, false]);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(
            r#"{ "general": { "fps": 25, "seed": 7 }, "game": { "right": "automated" } }"#,
        )
        .unwrap();
        assert_eq!(settings.general.seed, Some(7));
        assert_eq!(settings.game.points_to_win, POINTS_TO_WIN);
        assert_eq!(settings.automated_sides(), [false, true]);
        assert_eq!(settings.match_config().match_over_ticks, 75);
    }

    #[test]
    fn test_round_trip() {
        let mut settings = Settings::default();
        settings.game.left = PlayerKind::Automated;
        let json = settings.to_json().unwrap();
        assert!(json.contains("\"automated\""));
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Settings::from_json(r#"{ "game": { "points_to_win": 0 } }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_json(r#"{ "game": { "board_height": 20 } }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_log_level_from_config() {
        let settings = Settings::from_json(r#"{ "general": { "log_level": "debug" } }"#).unwrap();
        assert_eq!(settings.general.log_level, LevelFilter::Debug);
        let settings = Settings::from_json(r#"{ "general": { "log_level": "WARN" } }"#).unwrap();
        assert_eq!(settings.general.log_level, LevelFilter::Warn);

        assert_eq!(Settings::default().general.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let err = Settings::from_json(r#"{ "general": { "log_level": "Not a valid value" } }"#)
            .unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    fn screen(background: Value, foreground: Value) -> ScreenSettings {
        ScreenSettings {
            background: Some(background),
            foreground: Some(foreground),
        }
    }

    #[test]
    fn test_valid_colours() {
        let palette = screen(json!("31,122,11"), json!([254, 190, 97])).palette();
        assert_eq!(palette.background, Color::rgb(31, 122, 11));
        assert_eq!(palette.foreground, Color::rgb(254, 190, 97));

        let palette = screen(json!("255,255,255"), json!("0,0,0")).palette();
        assert_eq!(palette.background, Color::WHITE);
        assert_eq!(palette.foreground, Color::BLACK);

        assert_eq!(Settings::default().palette(), Palette::default());
    }

    #[test]
    fn test_spaces_in_colours() {
        for text in [" 1,2,3", "1 ,2,3", "1, 2,3", "1,2 ,3", "1,2, 3", "1,2,3 ", " 1,   2 ,3   "] {
            let palette = screen(json!("9,9,9"), json!(text)).palette();
            assert_eq!(palette.background, Color::rgb(9, 9, 9));
            assert_eq!(palette.foreground, Color::rgb(1, 2, 3));
        }
    }

    #[test]
    fn test_bad_colours_fall_back_to_defaults() {
        let bad = [
            // Channel count
            json!("0,0,0,0"),
            json!("0,0"),
            json!([0, 0]),
            json!([0, 0, 0, 0]),
            // Range
            json!("-1,0,0"),
            json!("0,256,0"),
            json!([0, 0, 256]),
            json!([0, -1, 0]),
            // Not integers
            json!("1.2"),
            json!("True"),
            json!("?"),
            json!("-0.3"),
            json!(""),
            json!(" "),
            json!([1.5, 2, 3]),
            json!(true),
            json!({ "r": 1 }),
        ];
        for entry in bad {
            assert_eq!(screen(entry.clone(), json!("5,5,5")).palette(), Palette::default());
            assert_eq!(screen(json!("5,5,5"), entry).palette(), Palette::default());
        }
    }

    #[test]
    fn test_missing_colour_keys() {
        let settings = Settings::from_json(r#"{ "screen": {} }"#).unwrap();
        assert_eq!(settings.screen.background, None);
        assert_eq!(settings.palette(), Palette::default());

        let settings = Settings::from_json(r#"{ "screen": { "background": "1,2,3" } }"#).unwrap();
        assert_eq!(settings.palette(), Palette::default());

        // A whole missing section is just the defaults
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings.screen, ScreenSettings::default());
    }
}
