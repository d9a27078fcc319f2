//! TerminalRenderer: owns the terminal session and keeps the screen in step
//! with a [`FrameBuffer`].
//!
//! A frame is sent whole when nothing comparable is on screen (first frame,
//! a size change, [`TerminalRenderer::invalidate`]). Otherwise only glyphs that
//! differ from the previous frame are sent. The encoder remembers the cursor
//! and the active style, so contiguous glyphs skip the cursor move and a
//! style change resends only the fields that differ.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor::{self, MoveTo},
    queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal::{self, ClearType},
};

use crate::fb::{CellStyle, FrameBuffer, Glyph};
use crate::types::Rgb;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// What the terminal currently displays, if it is known.
    on_screen: Option<FrameBuffer>,
    bytes: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            on_screen: None,
            bytes: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor, no line wrap.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.bytes.clear();
        queue!(
            self.bytes,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap
        )?;
        self.write_out()
    }

    /// Undo [`TerminalRenderer::enter`]. Safe to call on an error path.
    pub fn exit(&mut self) -> Result<()> {
        self.bytes.clear();
        queue!(
            self.bytes,
            ResetColor,
            SetAttribute(Attribute::Reset),
            terminal::EnableLineWrap,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        self.write_out()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Forget the screen contents; the next draw repaints everything.
    pub fn invalidate(&mut self) {
        self.on_screen = None;
    }

    /// Bring the terminal up to `fb`, then trade buffers with the renderer.
    ///
    /// On return `fb` holds an older frame for the caller to draw over.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        let comparable = self
            .on_screen
            .take()
            .filter(|shown| shown.width() == fb.width() && shown.height() == fb.height());

        self.bytes.clear();
        encode_frame(comparable.as_ref(), fb, &mut self.bytes)?;
        self.write_out()?;

        let mut spare = comparable.unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
        std::mem::swap(&mut spare, fb);
        self.on_screen = Some(spare);
        Ok(())
    }

    fn write_out(&mut self) -> Result<()> {
        self.stdout.write_all(&self.bytes)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode the commands that turn `shown` into `next` on a terminal.
///
/// Without a same-sized `shown` frame the screen is cleared and repainted.
pub fn encode_frame(
    shown: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<()> {
    let mut pen = Pen::new(out);
    match shown.filter(|s| s.width() == next.width() && s.height() == next.height()) {
        Some(shown) => {
            for y in 0..next.height() {
                for x in 0..next.width() {
                    let glyph = next.get(x, y).unwrap_or_default();
                    if shown.get(x, y) != Some(glyph) {
                        pen.put(x, y, glyph)?;
                    }
                }
            }
        }
        None => {
            queue!(pen.out, terminal::Clear(ClearType::All))?;
            for y in 0..next.height() {
                for x in 0..next.width() {
                    pen.put(x, y, next.get(x, y).unwrap_or_default())?;
                }
            }
        }
    }
    pen.finish()
}

/// Write position and style state of the terminal while a frame is encoded.
struct Pen<'a> {
    out: &'a mut Vec<u8>,
    cursor: Option<(u16, u16)>,
    style: Option<CellStyle>,
}

impl<'a> Pen<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self {
            out,
            cursor: None,
            style: None,
        }
    }

    fn put(&mut self, x: u16, y: u16, glyph: Glyph) -> Result<()> {
        if self.cursor != Some((x, y)) {
            queue!(self.out, MoveTo(x, y))?;
        }
        self.restyle(glyph.style)?;
        queue!(self.out, Print(glyph.ch))?;
        self.cursor = Some((x.saturating_add(1), y));
        Ok(())
    }

    fn restyle(&mut self, to: CellStyle) -> Result<()> {
        let from = self.style;
        if from == Some(to) {
            return Ok(());
        }

        // NormalIntensity drops both bold and dim.
        if from.map_or(true, |s| s.bold != to.bold || s.dim != to.dim) {
            queue!(self.out, SetAttribute(Attribute::NormalIntensity))?;
            if to.bold {
                queue!(self.out, SetAttribute(Attribute::Bold))?;
            }
            if to.dim {
                queue!(self.out, SetAttribute(Attribute::Dim))?;
            }
        }
        if from.map_or(true, |s| s.fg != to.fg) {
            queue!(self.out, SetForegroundColor(color(to.fg)))?;
        }
        if from.map_or(true, |s| s.bg != to.bg) {
            queue!(self.out, SetBackgroundColor(color(to.bg)))?;
        }

        self.style = Some(to);
        Ok(())
    }

    /// Leave the terminal in its default style if anything was styled.
    fn finish(self) -> Result<()> {
        if self.style.is_some() {
            queue!(self.out, ResetColor, SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
