use std::io;
use tui::backend::CrosstermBackend;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::symbols::Marker;
use tui::widgets::canvas::{Canvas, Points};
use tui::widgets::{Block, Borders};
use tui::Terminal;

pub const CHIP8_SCREEN_WIDTH: usize = 64;
pub const CHIP8_SCREEN_HEIGHT: usize = 32;

/// the pixel grid as the renderer sees it: `screen[row][column]`
pub type Screen = [[bool; CHIP8_SCREEN_WIDTH]; CHIP8_SCREEN_HEIGHT];

/// The interpreter-side framebuffer: the pixel grid plus a dirty flag.
///
/// Only the draw and clear-screen instructions mutate the grid. The flag is
/// raised by those instructions and lowered by whoever presents the frame;
/// the interpreter itself never reads it.
pub struct FrameBuffer {
    cells: Screen,
    changed: bool,
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            cells: [[false; CHIP8_SCREEN_WIDTH]; CHIP8_SCREEN_HEIGHT],
            changed: false,
        }
    }

    /// blank every pixel and raise the dirty flag
    pub fn clear(&mut self) {
        self.cells = [[false; CHIP8_SCREEN_WIDTH]; CHIP8_SCREEN_HEIGHT];
        self.changed = true;
    }

    /// XOR one pixel; returns whether it was lit beforehand (a collision
    /// when drawing)
    pub fn flip(&mut self, x: usize, y: usize) -> bool {
        let was_lit = self.cells[y][x];
        self.cells[y][x] = !was_lit;
        was_lit
    }

    pub fn mark_changed(&mut self) {
        self.changed = true;
    }

    pub fn cells(&self) -> &Screen {
        &self.cells
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    pub fn clear_changed(&mut self) {
        self.changed = false;
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        FrameBuffer::new()
    }
}

/// Display is used by the run loop to present frames. It should abstract
/// the implementation details, so a variety of kinds of screen would work.
pub trait Display {
    /// present the whole pixel grid
    fn draw(&mut self, screen: &Screen) -> Result<(), io::Error>;
}

/// monochrome display in a terminal, rendered using TUI over crossterm
pub struct TermDisplay {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TermDisplay {
    pub fn new() -> Result<TermDisplay, io::Error> {
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        Ok(TermDisplay { terminal })
    }
}

impl Display for TermDisplay {
    fn draw(&mut self, screen: &Screen) -> Result<(), io::Error> {
        // one terminal cell per pixel, plus the border
        let lit: Vec<(f64, f64)> = screen
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .filter(|&(_, &on)| on)
                    .map(move |(x, _)| (x as f64, -(y as f64)))
            })
            .collect();

        self.terminal.draw(|f| {
            let wanted = Rect::new(
                0,
                0,
                2 + CHIP8_SCREEN_WIDTH as u16,
                2 + CHIP8_SCREEN_HEIGHT as u16,
            );
            let area = f.size().intersection(wanted);
            let canvas = Canvas::default()
                .block(
                    Block::default()
                        .title("CHIP-8")
                        .borders(Borders::ALL)
                        .style(Style::default().bg(Color::Black)),
                )
                .x_bounds([0.0, (CHIP8_SCREEN_WIDTH - 1) as f64])
                .y_bounds([-((CHIP8_SCREEN_HEIGHT - 1) as f64), 0.0])
                .marker(Marker::Block)
                .paint(|ctx| {
                    ctx.draw(&Points {
                        coords: &lit,
                        color: Color::White,
                    });
                });
            f.render_widget(canvas, area);
        })?;
        Ok(())
    }
}

/// useful for testing non-display routines and headless runs
pub struct DummyDisplay;

impl DummyDisplay {
    pub fn new() -> Self {
        DummyDisplay {}
    }
}

impl Display for DummyDisplay {
    fn draw(&mut self, _screen: &Screen) -> Result<(), io::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_blank_and_clean() {
        let fb = FrameBuffer::new();
        assert!(fb.cells().iter().all(|row| row.iter().all(|&c| !c)));
        assert!(!fb.changed());
    }

    #[test]
    fn test_flip_reports_prior_state() {
        let mut fb = FrameBuffer::new();
        assert!(!fb.flip(10, 5));
        assert!(fb.cells()[5][10]);
        assert!(fb.flip(10, 5));
        assert!(!fb.cells()[5][10]);
    }

    #[test]
    fn test_clear_blanks_and_marks() {
        let mut fb = FrameBuffer::new();
        fb.flip(0, 0);
        fb.clear_changed();
        fb.clear();
        assert!(!fb.cells()[0][0]);
        assert!(fb.changed());
    }

    #[test]
    fn test_changed_flag_lowered_by_consumer() {
        let mut fb = FrameBuffer::new();
        fb.mark_changed();
        assert!(fb.changed());
        fb.clear_changed();
        assert!(!fb.changed());
    }

    #[test]
    fn test_dummy_display_accepts_any_frame() {
        let mut d = DummyDisplay::new();
        let fb = FrameBuffer::new();
        d.draw(fb.cells()).unwrap();
    }
}
