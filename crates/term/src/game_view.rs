//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Glyph};
use crate::types::{Cell, GamePhase, Rgb, COLUMNS, ROWS};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Modal text box drawn over the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay<'a> {
    pub title: &'a str,
    pub lines: &'a [&'a str],
    /// Printed as a final `SCORE n` line.
    pub score: Option<u32>,
}

impl<'a> Overlay<'a> {
    pub const fn new(title: &'a str, lines: &'a [&'a str]) -> Self {
        Self {
            title,
            lines,
            score: None,
        }
    }

    pub const fn with_score(mut self, score: u32) -> Self {
        self.score = Some(score);
        self
    }
}

/// Board origin and outer frame size for one render pass.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// Draws the board, the side panel and an optional overlay.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        overlay: Option<&Overlay<'_>>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Glyph::default());

        let board_w = COLUMNS as u16 * self.cell_w;
        let board_h = ROWS as u16 * self.cell_h;
        let frame = Frame {
            x: viewport.width.saturating_sub(board_w + 2) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(board_h + 2) / 2,
                AnchorY::Top => 0,
            },
            w: board_w + 2,
            h: board_h + 2,
        };

        self.draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG));

        // The snapshot grid already carries the active piece and the clearing highlight.
        for (y, row) in snap.grid.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                self.draw_cell(fb, frame, x as u16, y as u16, *cell);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        match overlay {
            Some(overlay) => self.draw_overlay(fb, frame, overlay),
            None if snap.paused() => self.draw_overlay(fb, frame, &Overlay::new("PAUSED", &[])),
            None => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        overlay: Option<&Overlay<'_>>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, overlay, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;
        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, cell: Cell) {
        let (ch, style) = if cell.taken {
            ('█', CellStyle::new(cell.color, BOARD_BG).bold())
        } else {
            ('·', CellStyle::new(cell.color, BOARD_BG).dim())
        };
        let px = frame.x + 1 + x * self.cell_w;
        let py = frame.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
        let hint = value.dim();

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(panel_x, y, "GAME", label);
        fb.put_u32(panel_x, y + 1, snap.game_id, value);
        y += 3;

        fb.put_str(panel_x, y, "PIECES", label);
        fb.put_u32(panel_x, y + 1, snap.pieces_spawned, value);
        y += 3;

        fb.put_str(panel_x, y, "STATE", label);
        fb.put_str(panel_x, y + 1, phase_label(snap.phase), value);
        y += 3;

        for line in ["←→↓ move", "R/↑ rotate", "P pause", "N new game", "Q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y += 1;
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, frame: Frame, overlay: &Overlay<'_>) {
        let text_rows = 1 + overlay.lines.len() as u16 + u16::from(overlay.score.is_some());
        let box_w = frame.w.saturating_sub(2);
        let box_h = text_rows + 2;
        let box_x = frame.x + 1;
        let box_y = frame.y + frame.h.saturating_sub(box_h) / 2;

        let panel = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG);
        fb.fill_rect(box_x, box_y, box_w, box_h, ' ', panel);

        let mut y = box_y + 1;
        put_centered(fb, box_x, box_w, y, overlay.title, panel.bold());
        for line in overlay.lines {
            y += 1;
            put_centered(fb, box_x, box_w, y, line, panel);
        }
        if let Some(score) = overlay.score {
            y += 1;
            let digits = decimal_width(score);
            let x = box_x + box_w.saturating_sub(6 + digits) / 2;
            let x = fb.put_str(x, y, "SCORE ", panel);
            fb.put_u32(x, y, score, panel.bold());
        }
    }
}

fn put_centered(fb: &mut FrameBuffer, x: u16, w: u16, y: u16, text: &str, style: CellStyle) {
    let text_w = text.chars().count() as u16;
    fb.put_str(x + w.saturating_sub(text_w) / 2, y, text, style);
}

fn decimal_width(mut n: u32) -> u16 {
    let mut width = 1;
    while n >= 10 {
        n /= 10;
        width += 1;
    }
    width
}

fn phase_label(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::Paused => "PAUSED",
        GamePhase::Running | GamePhase::Locking => "PLAYING",
        GamePhase::Clearing => "CLEARING",
        GamePhase::GameOver => "GAME OVER",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_width_counts_digits() {
        assert_eq!(decimal_width(0), 1);
        assert_eq!(decimal_width(9), 1);
        assert_eq!(decimal_width(10), 2);
        assert_eq!(decimal_width(u32::MAX), 10);
    }

    #[test]
    fn clearing_phase_has_its_own_label() {
        assert_eq!(phase_label(GamePhase::Clearing), "CLEARING");
        assert_eq!(phase_label(GamePhase::Locking), "PLAYING");
    }
}
