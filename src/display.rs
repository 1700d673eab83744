//! Rendering layer — all terminal output lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; this module only translates
//! world-space rectangles into terminal cells and queues the commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::entities::{GameState, Rect, Vec2};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BACKGROUND: Color = Color::Rgb { r: 97, g: 97, b: 97 };
const C_STAR: Color = Color::Rgb { r: 255, g: 244, b: 190 };
const C_METEOR: Color = Color::Rgb { r: 150, g: 110, b: 80 };
const C_PLAYER: Color = Color::White;
const C_LASER: Color = Color::Rgb { r: 120, g: 255, b: 120 };
const C_SCORE: Color = Color::White;
const C_GAME_OVER: Color = Color::Red;

// ── Sprites ───────────────────────────────────────────────────────────────────

const G_STAR: char = '*';
const G_METEOR: char = '▓';
const G_LASER: char = '┃';
const G_PLAYER_TIP: char = '▲';
const G_PLAYER_BODY: char = '█';

/// Margin of the score text from the top-right corner, in world units.
const SCORE_MARGIN: f32 = 10.0;

pub const GAME_OVER_TEXT: &str = "Game Over! Press R to Restart";

// ── World → terminal mapping ──────────────────────────────────────────────────

/// Scales the logical window onto a terminal grid of `cols` × `rows` cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    world_w: f32,
    world_h: f32,
}

/// A clipped, on-screen block of cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub col: u16,
    pub row: u16,
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, world_w: f32, world_h: f32) -> Self {
        Self { cols: cols.max(1), rows: rows.max(1), world_w, world_h }
    }

    fn col_of(&self, x: f32) -> i32 {
        (x * f32::from(self.cols) / self.world_w).floor() as i32
    }

    fn row_of(&self, y: f32) -> i32 {
        (y * f32::from(self.rows) / self.world_h).floor() as i32
    }

    /// Cell containing a world point, or `None` if it falls off the grid.
    pub fn cell(&self, p: Vec2) -> Option<(u16, u16)> {
        let (c, r) = (self.col_of(p.x), self.row_of(p.y));
        (c >= 0 && r >= 0 && c < i32::from(self.cols) && r < i32::from(self.rows))
            .then(|| (c as u16, r as u16))
    }

    /// Cells covered by a world rectangle, clipped to the grid.  Every
    /// on-screen rectangle covers at least one cell so small sprites stay
    /// visible on coarse terminals.
    pub fn cells(&self, rect: &Rect) -> Option<CellRect> {
        let c0 = self.col_of(rect.left()).max(0);
        let r0 = self.row_of(rect.top()).max(0);
        let c1 = self.col_of(rect.right()).max(c0 + 1).min(i32::from(self.cols));
        let r1 = self.row_of(rect.bottom()).max(r0 + 1).min(i32::from(self.rows));
        if c0 >= c1 || r0 >= r1 || rect.right() < 0.0 || rect.bottom() < 0.0 {
            return None;
        }
        Some(CellRect {
            col: c0 as u16,
            row: r0 as u16,
            cols: (c1 - c0) as u16,
            rows: (r1 - r0) as u16,
        })
    }

    fn rows_for(&self, world_units: f32) -> u16 {
        (world_units * f32::from(self.rows) / self.world_h).round() as u16
    }

    fn cols_for(&self, world_units: f32) -> u16 {
        (world_units * f32::from(self.cols) / self.world_w).round() as u16
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame, back to front.
pub fn render<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    out.queue(style::SetBackgroundColor(C_BACKGROUND))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_stars(out, state, view)?;
    for meteor in &state.meteors {
        fill(out, view, &meteor.rect, C_METEOR, G_METEOR)?;
    }
    draw_player(out, state, view)?;
    for laser in &state.lasers {
        fill(out, view, &laser.rect, C_LASER, G_LASER)?;
    }
    draw_score(out, state, view)?;

    if state.is_game_over() {
        draw_game_over(out, view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_stars<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_STAR))?;
    for star in &state.stars {
        if let Some((col, row)) = view.cell(star.pos) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print(G_STAR))?;
        }
    }
    Ok(())
}

fn fill<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: &Rect,
    color: Color,
    glyph: char,
) -> std::io::Result<()> {
    let Some(cells) = view.cells(rect) else {
        return Ok(());
    };
    let line: String = std::iter::repeat(glyph).take(usize::from(cells.cols)).collect();
    out.queue(style::SetForegroundColor(color))?;
    for row in cells.row..cells.row + cells.rows {
        out.queue(cursor::MoveTo(cells.col, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    // Sprite: a tip on the top row above a solid hull
    //     ▲
    //   █████
    let Some(cells) = view.cells(&state.player.rect) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(cursor::MoveTo(cells.col + cells.cols / 2, cells.row))?;
    out.queue(Print(G_PLAYER_TIP))?;

    let hull: String = std::iter::repeat(G_PLAYER_BODY).take(usize::from(cells.cols)).collect();
    for row in cells.row + 1..cells.row + cells.rows {
        out.queue(cursor::MoveTo(cells.col, row))?;
        out.queue(Print(&hull))?;
    }
    Ok(())
}

// ── Text ──────────────────────────────────────────────────────────────────────

fn draw_score<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let text = format!("Score: {}", state.score);
    let width = text.chars().count() as u16;
    let col = view
        .cols
        .saturating_sub(width)
        .saturating_sub(view.cols_for(SCORE_MARGIN));
    let row = view.rows_for(SCORE_MARGIN).min(view.rows.saturating_sub(1));
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_SCORE))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_game_over<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let width = GAME_OVER_TEXT.chars().count() as u16;
    let col = (view.cols / 2).saturating_sub(width / 2);
    out.queue(cursor::MoveTo(col, view.rows / 2))?;
    out.queue(style::SetForegroundColor(C_GAME_OVER))?;
    out.queue(Print(GAME_OVER_TEXT))?;
    Ok(())
}
