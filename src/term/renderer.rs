//! TerminalRenderer: flushes framebuffers to the real terminal.
//!
//! Owns the raw-mode and alternate-screen lifecycle. Frames are diffed
//! against the previous one so a typical frame writes only the cells that
//! changed (the falling piece and particles), not the whole screen.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::term::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    prev: Option<FrameBuffer>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            prev: None,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next present to redraw everything, e.g. after a resize.
    pub fn invalidate(&mut self) {
        self.prev = None;
    }

    /// Flush a composed frame, then keep a copy to diff the next one against.
    pub fn present(&mut self, fb: &FrameBuffer) -> Result<()> {
        let full = match &self.prev {
            Some(prev) => prev.width() != fb.width() || prev.height() != fb.height(),
            None => true,
        };

        if full {
            self.stdout
                .queue(terminal::Clear(terminal::ClearType::All))?;
        }

        let mut style: Option<CellStyle> = None;
        for y in 0..fb.height() {
            let mut x = 0;
            while x < fb.width() {
                let run = self.dirty_run(fb, x, y, full);
                if run == 0 {
                    x += 1;
                    continue;
                }
                self.stdout.queue(cursor::MoveTo(x, y))?;
                for dx in 0..run {
                    let cell = fb.get(x + dx, y).unwrap_or_default();
                    if style != Some(cell.style) {
                        self.apply_style(cell.style)?;
                        style = Some(cell.style);
                    }
                    self.stdout.queue(Print(cell.ch))?;
                }
                x += run;
            }
        }

        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.flush()?;

        match &mut self.prev {
            Some(prev) => prev.clone_from(fb),
            None => self.prev = Some(fb.clone()),
        }
        Ok(())
    }

    /// Length of the changed run starting at (x, y), zero when unchanged.
    fn dirty_run(&self, fb: &FrameBuffer, x: u16, y: u16, full: bool) -> u16 {
        if full {
            return if x == 0 { fb.width() } else { 0 };
        }
        let prev = self.prev.as_ref().expect("diff without previous frame");
        let mut len = 0;
        while x + len < fb.width() {
            if fb.get(x + len, y) == prev.get(x + len, y) {
                break;
            }
            len += 1;
        }
        len
    }

    fn apply_style(&mut self, style: CellStyle) -> Result<()> {
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout
            .queue(SetForegroundColor(to_color(style.fg)))?;
        self.stdout
            .queue(SetBackgroundColor(to_color(style.bg)))?;
        if style.bold {
            self.stdout.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            self.stdout.queue(SetAttribute(Attribute::Dim))?;
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
