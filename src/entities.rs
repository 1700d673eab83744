//! All game entity types — pure data plus rectangle geometry, no game rules.

// ── Geometry ──────────────────────────────────────────────────────────────────

/// A 2-D vector in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(self, other: Vec2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Axis-aligned rectangle.  `x`/`y` is the top-left corner and y grows
/// downward, so `top < bottom`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size whose centre sits at `center`.
    pub fn from_center(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    /// Rectangle of the given size whose top edge midpoint sits at `point`.
    pub fn from_midtop(point: Vec2, w: f32, h: f32) -> Self {
        Self::new(point.x - w / 2.0, point.y, w, h)
    }

    /// Rectangle of the given size whose bottom edge midpoint sits at `point`.
    pub fn from_midbottom(point: Vec2, w: f32, h: f32) -> Self {
        Self::new(point.x - w / 2.0, point.y - h, w, h)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn midtop(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y)
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.w / 2.0;
        self.y = center.y - self.h / 2.0;
    }

    /// Strict overlap: rectangles that merely share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Whether `self` lies fully inside `bounds` (edges inclusive).
    pub fn is_within(&self, bounds: &Rect) -> bool {
        self.left() >= bounds.left()
            && self.right() <= bounds.right()
            && self.top() >= bounds.top()
            && self.bottom() <= bounds.bottom()
    }

    /// Move the rectangle the least distance needed to lie inside `bounds`.
    /// On an axis where it is larger than `bounds` it is centred instead.
    pub fn clamp_within(&mut self, bounds: &Rect) {
        self.x = clamp_axis(self.x, self.w, bounds.x, bounds.w);
        self.y = clamp_axis(self.y, self.h, bounds.y, bounds.h);
    }
}

fn clamp_axis(pos: f32, len: f32, min: f32, span: f32) -> f32 {
    if len >= span {
        min + (span - len) / 2.0
    } else if pos < min {
        min
    } else if pos + len > min + span {
        min + span - len
    } else {
        pos
    }
}

// ── Session status ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Player & projectiles ──────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Laser {
    pub rect: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Meteor {
    pub rect: Rect,
}

/// A decorative star; only its top-left corner matters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub pos: Vec2,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    /// Active lasers, oldest first.
    pub lasers: Vec<Laser>,
    /// Active meteors, oldest first.
    pub meteors: Vec<Meteor>,
    /// Generated once at startup and kept across resets.
    pub stars: Vec<Star>,
    pub score: u32,
    pub status: GameStatus,
    /// Logical window size in world units.
    pub width: f32,
    pub height: f32,
}

impl GameState {
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}
