//! In-place terminal animation of a running search.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use pathviz_core::{CellSnapshot, Grid, Step};

fn color(c: &CellSnapshot) -> Color {
    if c.is_start {
        Color::Green
    } else if c.is_end {
        Color::Red
    } else if c.is_wall {
        Color::DarkGrey
    } else if c.is_current {
        Color::Yellow
    } else if c.is_path {
        Color::Cyan
    } else if c.is_visited {
        Color::Blue
    } else {
        Color::Reset
    }
}

/// Draws the grid on the alternate screen and patches single cells as
/// [`Step`]s arrive. The terminal is restored on drop.
pub struct Animator {
    out: Stdout,
    rows: u16,
    /// Last cell drawn as current; repainted once the search moves on.
    current: Option<CellSnapshot>,
    steps: usize,
}

impl Animator {
    pub fn start(grid: &Grid) -> io::Result<Self> {
        let mut out = io::stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        let mut anim = Self {
            out,
            rows: u16::try_from(grid.rows()).unwrap_or(u16::MAX),
            current: None,
            steps: 0,
        };
        for cell in grid.iter() {
            anim.draw(&cell.snapshot())?;
        }
        anim.out.flush()?;
        Ok(anim)
    }

    pub fn apply(&mut self, step: &Step) -> io::Result<()> {
        self.steps += 1;
        match step {
            Step::Visit(cell) => {
                if let Some(mut prev) = self.current.take() {
                    prev.is_current = false;
                    self.draw(&prev)?;
                }
                self.draw(cell)?;
                self.current = Some(*cell);
            }
            Step::Path { cell, .. } => self.draw(cell)?,
            Step::Redraw => {
                if let Some(mut prev) = self.current.take() {
                    prev.is_current = false;
                    self.draw(&prev)?;
                }
            }
        }
        self.status(step)?;
        self.out.flush()
    }

    fn draw(&mut self, c: &CellSnapshot) -> io::Result<()> {
        let col = u16::try_from(c.pos.col).unwrap_or(u16::MAX);
        let row = u16::try_from(c.pos.row).unwrap_or(u16::MAX);
        queue!(
            self.out,
            cursor::MoveTo(col, row),
            SetForegroundColor(color(c)),
            Print(c.glyph()),
            ResetColor
        )
    }

    fn status(&mut self, step: &Step) -> io::Result<()> {
        let line = match step {
            Step::Visit(c) => format!("step {:>6}  distance {}", self.steps, c.distance),
            Step::Path { marked, .. } => format!("step {:>6}  path {marked}", self.steps),
            Step::Redraw => format!("step {:>6}  done", self.steps),
        };
        queue!(
            self.out,
            cursor::MoveTo(0, self.rows.saturating_add(1)),
            terminal::Clear(ClearType::CurrentLine),
            Print(line)
        )
    }
}

impl Drop for Animator {
    fn drop(&mut self) {
        let _ = execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen);
    }
}
