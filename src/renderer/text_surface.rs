//! Character-grid surface
//!
//! Each character cell covers `cell` pixels. `fill` sets the background and
//! clears the grid; anything drawn in another colour marks the cells it
//! touches, and drawing in the background colour clears them. Used by the native
//! binary to print frames to the log.

use glam::IVec2;

use super::{Color, Surface};
use crate::sim::Rect;

const BLANK: char = ' ';
const SOLID: char = '#';
const BALL: char = 'o';

pub struct TextSurface {
    size: IVec2,
    cell: IVec2,
    columns: usize,
    rows: usize,
    cells: Vec<char>,
    background: Color,
}

impl TextSurface {
    /// A surface of `width` x `height` pixels, `cell` pixels per character
    pub fn new(width: i32, height: i32, cell: IVec2) -> Self {
        let cell = cell.max(IVec2::ONE);
        let columns = (width.max(1) + cell.x - 1) / cell.x;
        let rows = (height.max(1) + cell.y - 1) / cell.y;
        Self {
            size: IVec2::new(width, height),
            cell,
            columns: columns as usize,
            rows: rows as usize,
            cells: vec![BLANK; (columns * rows) as usize],
            background: Color::BLACK,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Character at column `col`, row `row`
    pub fn at(&self, col: usize, row: usize) -> char {
        self.cells[row * self.columns + col]
    }

    /// The grid as text, one line per row, framed top and bottom
    pub fn render(&self) -> String {
        let border: String = std::iter::repeat_n('-', self.columns).collect();
        let mut out = String::with_capacity((self.columns + 3) * (self.rows + 2));
        out.push('+');
        out.push_str(&border);
        out.push_str("+\n");
        for row in self.cells.chunks(self.columns) {
            out.push('|');
            out.extend(row.iter());
            out.push_str("|\n");
        }
        out.push('+');
        out.push_str(&border);
        out.push('+');
        out
    }

    /// Cell containing pixel `p`, if on the surface
    fn cell_of(&self, p: IVec2) -> Option<(usize, usize)> {
        if p.x < 0 || p.y < 0 || p.x >= self.size.x || p.y >= self.size.y {
            return None;
        }
        let c = p / self.cell;
        Some((c.x as usize, c.y as usize))
    }

    fn set(&mut self, col: usize, row: usize, ch: char) {
        if col < self.columns && row < self.rows {
            self.cells[row * self.columns + col] = ch;
        }
    }

    fn glyph(&self, color: Color, ch: char) -> char {
        if color == self.background { BLANK } else { ch }
    }
}

impl Surface for TextSurface {
    fn width(&self) -> i32 {
        self.size.x
    }

    fn height(&self) -> i32 {
        self.size.y
    }

    fn fill(&mut self, color: Color) {
        self.background = color;
        self.cells.fill(BLANK);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let ch = self.glyph(color, SOLID);
        let min = rect.top_left.max(IVec2::ZERO);
        let max = (rect.top_left + rect.size - IVec2::ONE).min(self.size - IVec2::ONE);
        if min.x > max.x || min.y > max.y {
            return;
        }
        let first = min / self.cell;
        let last = max / self.cell;
        for row in first.y..=last.y {
            for col in first.x..=last.x {
                self.set(col as usize, row as usize, ch);
            }
        }
    }

    fn fill_circle(&mut self, centre: IVec2, _radius: i32, color: Color) {
        if let Some((col, row)) = self.cell_of(centre) {
            let ch = self.glyph(color, BALL);
            self.set(col, row, ch);
        }
    }

    fn draw_text(&mut self, pos: IVec2, text: &str, color: Color) {
        let Some((col, row)) = self.cell_of(pos) else {
            return;
        };
        for (i, ch) in text.chars().enumerate() {
            let ch = self.glyph(color, ch);
            self.set(col + i, row, ch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_size_rounds_up() {
        let surface = TextSurface::new(640, 480, IVec2::new(16, 32));
        assert_eq!(surface.columns(), 40);
        assert_eq!(surface.rows(), 15);
        let surface = TextSurface::new(641, 481, IVec2::new(16, 32));
        assert_eq!(surface.columns(), 41);
        assert_eq!(surface.rows(), 16);
    }

    #[test]
    fn test_rect_marks_covered_cells() {
        let mut surface = TextSurface::new(100, 100, IVec2::new(10, 10));
        surface.fill_rect(Rect::new(10, 20, 20, 15), Color::WHITE);
        assert_eq!(surface.at(1, 2), SOLID);
        assert_eq!(surface.at(2, 3), SOLID);
        assert_eq!(surface.at(3, 2), BLANK);
        assert_eq!(surface.at(0, 2), BLANK);

        // Off-surface rectangles are ignored
        surface.fill_rect(Rect::new(-50, -50, 10, 10), Color::WHITE);
        surface.fill(Color::BLACK);
        assert!(surface.render().lines().skip(1).take(10).all(|l| !l.contains(SOLID)));
    }

    #[test]
    fn test_text_and_ball() {
        let mut surface = TextSurface::new(100, 100, IVec2::new(10, 10));
        surface.draw_text(IVec2::new(20, 0), "3", Color::WHITE);
        surface.fill_circle(IVec2::new(55, 55), 3, Color::WHITE);
        surface.fill_circle(IVec2::new(-5, 55), 3, Color::WHITE);
        assert_eq!(surface.at(2, 0), '3');
        assert_eq!(surface.at(5, 5), BALL);

        let rendered = surface.render();
        assert_eq!(rendered.lines().count(), 12);
        assert!(rendered.lines().nth(1).unwrap().starts_with("|  3"));
    }

    #[test]
    fn test_background_colour_draws_blank() {
        let blue = Color::rgb(0, 0, 200);
        let mut surface = TextSurface::new(100, 100, IVec2::new(10, 10));
        surface.fill(blue);
        assert_eq!(surface.at(0, 0), BLANK);

        surface.fill_rect(Rect::new(0, 0, 30, 10), Color::BLACK);
        assert_eq!(surface.at(1, 0), SOLID);
        surface.fill_rect(Rect::new(0, 0, 10, 10), blue);
        assert_eq!(surface.at(0, 0), BLANK);
        assert_eq!(surface.at(1, 0), SOLID);
    }
}
