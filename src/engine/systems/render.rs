//! Live terminal view.
//!
//! Draws the bounding box of a grid with plain characters and ANSI cursor
//! movement (through crossterm), and keeps program output on its own line
//! below the playfield while the view is active.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};

use crate::config::display::{OUTPUT_ROW, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::engine::grid::{display_char, Grid};
use crate::engine::port::{Emission, OutputSink};

/// Draws grids to a terminal.
pub struct Renderer<W: Write> {
    out: W,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Clear the screen before the first frame.
    pub fn begin(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All))?;
        self.out.flush()
    }

    /// Draw the bounding box of `grid`, clipped to the screen.
    pub fn draw(&mut self, grid: &Grid) -> io::Result<()> {
        queue!(self.out, MoveTo(0, 0))?;
        for row in grid.rows().take(SCREEN_HEIGHT + 1) {
            let line: String = row.iter().take(SCREEN_WIDTH + 1).copied().map(display_char).collect();
            queue!(self.out, Print(line), Print("\n"))?;
        }
        self.out.flush()
    }

    /// Leave the cursor under the playfield.
    pub fn finish(&mut self) -> io::Result<()> {
        queue!(self.out, MoveTo(0, SCREEN_HEIGHT as u16 - 1))?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Output sink for the live view: writes emissions on `OUTPUT_ROW`, wrapping
/// back to the first column (and clearing the line) when it runs out of
/// screen width.
pub struct OutputLine<W: Write> {
    out: W,
    /// 1-based column of the next character.
    column: usize,
    error: Option<io::Error>,
}

impl<W: Write> OutputLine<W> {
    pub fn new(out: W) -> Self {
        Self { out, column: 1, error: None }
    }

    fn move_to(&mut self, column: usize) -> io::Result<()> {
        queue!(self.out, MoveTo(column as u16 - 1, OUTPUT_ROW - 1))
    }

    fn restart_line(&mut self) -> io::Result<()> {
        self.column = 1;
        self.move_to(1)?;
        queue!(self.out, Clear(ClearType::UntilNewLine))
    }

    fn write(&mut self, emission: Emission) -> io::Result<()> {
        let text = emission.to_bytes();
        self.move_to(self.column)?;
        self.column += text.len();
        if self.column > SCREEN_WIDTH {
            self.restart_line()?;
            self.column += text.len();
        }
        self.out.write_all(&text)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutputSink for OutputLine<W> {
    fn emit(&mut self, emission: Emission) {
        if self.error.is_none() {
            if let Err(e) = self.write(emission) {
                self.error = Some(e);
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(grid: &Grid) -> String {
        let mut renderer = Renderer::new(Vec::new());
        renderer.draw(grid).unwrap();
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn draws_each_row_of_the_bounding_box() {
        let grid = Grid::from_rows(10, 10, &["1 (", "==="]);
        let out = rendered(&grid);
        assert!(out.contains("1 (\n===\n"));
    }

    #[test]
    fn clips_to_the_screen() {
        let wide = "=".repeat(SCREEN_WIDTH + 10);
        let grid = Grid::from_rows(SCREEN_WIDTH + 10, 40, &[wide.as_str(); 30]);
        let out = rendered(&grid);
        assert_eq!(out.matches('\n').count(), SCREEN_HEIGHT + 1);
        assert!(!out.contains(&"=".repeat(SCREEN_WIDTH + 2)));
    }

    #[test]
    fn output_line_wraps_and_keeps_text() {
        let mut line = OutputLine::new(Vec::new());
        for _ in 0..40 {
            line.emit(Emission::Number(100));
        }
        line.flush().unwrap();
        let out = String::from_utf8(line.into_inner()).unwrap();
        assert_eq!(out.matches("100 ").count(), 40);
        assert!(line_was_cleared(&out));
    }

    fn line_was_cleared(out: &str) -> bool {
        // crossterm's "clear until newline" sequence
        out.contains("\x1b[K")
    }
}
