//! GameView: maps a `RoundSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! It also owns the inverse mapping, from terminal cells back to layout
//! coordinates, so pointer hit-testing and drawing always agree on where the
//! board sits.

use crate::core::RoundSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Phase, Point, TimeBand, GRID_COLS, GRID_ROWS, ROUND_SECONDS};

/// Number of slots in the side-panel time bar.
pub const TIME_BAR_SLOTS: u32 = 10;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const SELECTION_BG: Rgb = Rgb::new(110, 70, 30);
const MANDARIN: Rgb = Rgb::new(255, 167, 38);

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

/// Transient UI text drawn under the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudView<'a> {
    pub toast: Option<&'a str>,
    /// Draw the toast highlighted (new best, share result).
    pub highlight: bool,
}

/// A lightweight terminal renderer for the Mandarin 10 board.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

impl Default for GameView {
    fn default() -> Self {
        // 3x1 keeps tiles roughly square and puts each tile centre on a
        // character centre.
        Self {
            cell_w: 3,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    /// Tile sizes are clamped to at least one character.
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

    fn board_px(&self) -> (u16, u16) {
        (
            GRID_COLS as u16 * self.cell_w,
            GRID_ROWS as u16 * self.cell_h,
        )
    }

    /// Size of the board in layout units (one unit per terminal character).
    ///
    /// Pass this to `RoundController::new` so the grid geometry matches.
    pub fn layout_size(&self) -> (f32, f32) {
        let (w, h) = self.board_px();
        (w as f32, h as f32)
    }

    /// Top-left corner of the border frame.
    fn frame_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (board_w, board_h) = self.board_px();
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;
        let x = viewport.width.saturating_sub(frame_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        (x, y)
    }

    /// Top-left terminal cell of the board interior.
    pub fn board_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (x, y) = self.frame_origin(viewport);
        (x + 1, y + 1)
    }

    /// Map a terminal cell to the layout point at its centre.
    ///
    /// Points outside the board are still returned, so a drag can be
    /// dragged past the edge and keep updating.
    pub fn to_layout_point(&self, viewport: Viewport, column: u16, row: u16) -> Point {
        let (ox, oy) = self.board_origin(viewport);
        Point::new(
            column as f32 - ox as f32 + 0.5,
            row as f32 - oy as f32 + 0.5,
        )
    }

    /// Like [`to_layout_point`](Self::to_layout_point), but only for cells
    /// inside the board.
    pub fn hit_board(&self, viewport: Viewport, column: u16, row: u16) -> Option<Point> {
        let (ox, oy) = self.board_origin(viewport);
        let (w, h) = self.board_px();
        let inside = column >= ox && column < ox + w && row >= oy && row < oy + h;
        inside.then(|| self.to_layout_point(viewport, column, row))
    }

    /// Render the round into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(
        &self,
        snap: &RoundSnapshot,
        hud: Option<&HudView<'_>>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (board_w, board_h) = self.board_px();
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;
        let (start_x, start_y) = self.frame_origin(viewport);
        let (ox, oy) = (start_x + 1, start_y + 1);

        let bg = CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG);
        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        fb.fill_rect(ox, oy, board_w, board_h, ' ', bg);
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        let show_numbers = snap.playable();
        for cell in snap.grid.cells() {
            if cell.collected {
                continue;
            }
            let cx = ox + cell.col as u16 * self.cell_w + self.cell_w / 2;
            let cy = oy + cell.row as u16 * self.cell_h + self.cell_h / 2;
            if show_numbers {
                let style = CellStyle::new(Rgb::new(40, 20, 0), MANDARIN).bold();
                fb.put_char(cx, cy, (b'0' + cell.value) as char, style);
            } else {
                let style = CellStyle::new(Rgb::new(150, 150, 150), BOARD_BG).dim();
                fb.put_char(cx, cy, '●', style);
            }
        }

        if let Some(rect) = snap.selection {
            for dy in 0..board_h {
                for dx in 0..board_w {
                    let p = Point::new(dx as f32 + 0.5, dy as f32 + 0.5);
                    if rect.contains(p) {
                        fb.set_bg(ox + dx, oy + dy, SELECTION_BG);
                    }
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        match snap.phase {
            Phase::Idle => {
                self.draw_overlay_text(fb, start_x, start_y + frame_h / 2, frame_w, "ENTER TO START");
            }
            Phase::Ended => {
                let mid = start_y + frame_h / 2;
                self.draw_overlay_text(fb, start_x, mid.saturating_sub(1), frame_w, "TIME UP");
                self.draw_overlay_score(fb, start_x, mid, frame_w, snap.score);
            }
            Phase::Running => {}
        }

        if let Some(hud) = hud {
            if let Some(toast) = hud.toast {
                let style = if hud.highlight {
                    CellStyle::new(Rgb::new(255, 220, 80), Rgb::new(0, 0, 0)).bold()
                } else {
                    CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
                };
                let w = toast.chars().count() as u16;
                let x = start_x.saturating_add(frame_w.saturating_sub(w) / 2);
                fb.put_str(x, start_y.saturating_add(frame_h), toast, style);
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &RoundSnapshot,
        hud: Option<&HudView<'_>>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

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

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &RoundSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let dim = value.dim();

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "BEST", label);
        y = y.saturating_add(1);
        let w = fb.put_u32(panel_x, y, snap.best_score, value);
        if snap.persistence_degraded {
            // Best score is session-only.
            fb.put_char(panel_x + w, y, '*', dim);
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "TIME", label);
        y = y.saturating_add(1);
        let w = fb.put_u32(panel_x, y, snap.time_remaining, value);
        fb.put_char(panel_x + w, y, 's', value);
        y = y.saturating_add(1);
        self.draw_time_bar(fb, panel_x, y, snap.time_remaining);
        y = y.saturating_add(2);

        let hints: &[&str] = match snap.phase {
            Phase::Idle => &["ENTER start", "Q quit"],
            Phase::Running => &["drag to 10", "R restart", "Q quit"],
            Phase::Ended => &["ENTER again", "S share", "Q quit"],
        };
        for hint in hints {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, hint, dim);
            y = y.saturating_add(1);
        }
    }

    fn draw_time_bar(&self, fb: &mut FrameBuffer, x: u16, y: u16, time_remaining: u32) {
        let fg = match TimeBand::from_remaining(time_remaining) {
            TimeBand::Plenty => Rgb::new(46, 204, 113),
            TimeBand::Warning => Rgb::new(241, 196, 15),
            TimeBand::Critical => Rgb::new(231, 76, 60),
        };
        let filled = time_bar_slots(time_remaining);
        let on = CellStyle::new(fg, Rgb::new(0, 0, 0));
        let off = CellStyle::new(Rgb::new(70, 70, 70), Rgb::new(0, 0, 0)).dim();
        for i in 0..TIME_BAR_SLOTS {
            let (ch, style) = if i < filled { ('█', on) } else { ('░', off) };
            fb.put_char(x + i as u16, y, ch, style);
        }
    }

    fn overlay_style() -> CellStyle {
        CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold()
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, start_x: u16, y: u16, frame_w: u16, text: &str) {
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        fb.put_str(x, y, text, Self::overlay_style());
    }

    fn draw_overlay_score(&self, fb: &mut FrameBuffer, start_x: u16, y: u16, frame_w: u16, score: u32) {
        const LABEL: &str = "SCORE ";
        let text_w = LABEL.len() as u16 + digit_count(score);
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let w = fb.put_str(x, y, LABEL, Self::overlay_style());
        fb.put_u32(x + w, y, score, Self::overlay_style());
    }
}

/// Filled slots of the time bar; any time left keeps at least one slot lit.
pub fn time_bar_slots(time_remaining: u32) -> u32 {
    let t = time_remaining.min(ROUND_SECONDS);
    (t * TIME_BAR_SLOTS).div_ceil(ROUND_SECONDS)
}

fn digit_count(mut v: u32) -> u16 {
    let mut n = 1;
    while v >= 10 {
        v /= 10;
        n += 1;
    }
    n
}
