//! Rendering module
//!
//! The simulation only produces geometry. A `Surface` is whatever can fill
//! rectangles and circles and print text; `draw_match` paints one frame of a
//! match onto it from the authoritative state.

pub mod text_surface;

pub use text_surface::TextSurface;

use glam::IVec2;

use crate::sim::{MatchPhase, MatchState, Rect};

/// Score text placement, measured from the top corners
const SCORE_X_MARGIN: i32 = 130;
const SCORE_Y_MARGIN: i32 = 100;
const SCORE_FONT_SIZE: i32 = 50;
/// Where the victory banner goes
const VICTORY_TEXT_POS: IVec2 = IVec2::new(200, 200);

/// An RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Colours a frame is painted in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    /// Bats, ball and text
    pub foreground: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            foreground: Color::WHITE,
        }
    }
}

/// Drawing target
pub trait Surface {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    fn fill(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_circle(&mut self, centre: IVec2, radius: i32, color: Color);
    fn draw_text(&mut self, pos: IVec2, text: &str, color: Color);
}

/// Paint the current frame: background, bats, ball, scores, and the victory
/// banner once the match is over
pub fn draw_match<S: Surface + ?Sized>(state: &MatchState, palette: &Palette, surface: &mut S) {
    let snapshot = state.snapshot();
    let ink = palette.foreground;

    surface.fill(palette.background);
    surface.fill_rect(snapshot.left_bat, ink);
    surface.fill_rect(snapshot.right_bat, ink);
    surface.fill_circle(snapshot.ball_centre, snapshot.ball_radius, ink);

    let (left, right) = snapshot.score;
    let width = surface.width();
    surface.draw_text(
        IVec2::new(SCORE_X_MARGIN, SCORE_Y_MARGIN),
        &left.to_string(),
        ink,
    );
    surface.draw_text(
        IVec2::new(width - SCORE_X_MARGIN - SCORE_FONT_SIZE, SCORE_Y_MARGIN),
        &right.to_string(),
        ink,
    );

    if let MatchPhase::MatchOver { winner, .. } = snapshot.phase {
        surface.draw_text(VICTORY_TEXT_POS, &format!("{} Wins!", winner), ink);
    }
}
