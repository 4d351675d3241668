//! In-place redraw of a task's text block.

use crossterm::{
    cursor::MoveToPreviousLine,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::io::Write;

/// Redraws a block of lines over the previous one on any writer.
pub struct Screen<W: Write> {
    out: W,
    /// Lines above the cursor belonging to the current block
    drawn: u16,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W) -> Self {
        Self { out, drawn: 0 }
    }

    /// Replace the current block with `text`.
    pub fn draw(&mut self, text: &str) -> anyhow::Result<()> {
        self.erase()?;
        let lines: Vec<&str> = text.lines().collect();
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                queue!(self.out, Print("\r\n"))?;
            }
            queue!(self.out, Print(line))?;
        }
        self.drawn = lines.len().saturating_sub(1) as u16;
        self.out.flush()?;
        Ok(())
    }

    /// Draw `text` one last time and leave it on screen.
    pub fn finish(&mut self, text: &str) -> anyhow::Result<()> {
        self.draw(text)?;
        queue!(self.out, Print("\r\n"))?;
        self.out.flush()?;
        self.drawn = 0;
        Ok(())
    }

    fn erase(&mut self) -> anyhow::Result<()> {
        if self.drawn > 0 {
            queue!(self.out, MoveToPreviousLine(self.drawn))?;
        } else {
            queue!(self.out, Print("\r"))?;
        }
        queue!(self.out, Clear(ClearType::FromCursorDown))?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
