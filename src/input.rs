//! Input mapping: raw terminal key events → a movement direction plus
//! discrete, edge-triggered actions.
//!
//! Terminals report keys in two ways:
//! * **Keyboard-enhancement capable** (kitty protocol): proper
//!   `Press` / `Repeat` / `Release` events, so keys are dropped on release.
//! * **Classic terminals**: only `Press` events, with OS key-repeat showing up
//!   as repeated presses.  A key is treated as held while it keeps being
//!   refreshed within `HOLD_WINDOW` frames.
//!
//! In both cases an action key fires on the press that starts a hold, never on
//! the repeats that keep it alive.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::{GameStatus, Vec2};

/// A key counts as held if it was refreshed within this many frames.
/// OS key-repeat runs at 15 Hz or more, well inside the window at 60 FPS.
pub const HOLD_WINDOW: u64 = 4;

/// Everything the rest of the frame needs from the keyboard.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Each component in {-1, 0, +1}; diagonals are deliberately not
    /// normalised.
    pub direction: Vec2,
    /// Fire-key presses this frame.  Always 0 while game over.
    pub fire: u32,
    /// Restart requested.  Always false while playing.
    pub restart: bool,
    pub quit: bool,
}

// ── Held-key tracking ─────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Each held key → the frame it was last seen (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
    /// The terminal reports releases, so only a release ends a hold.
    release_events: bool,
}

impl KeyTracker {
    /// Tracker for classic terminals: holds expire after `HOLD_WINDOW`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker for terminals with keyboard enhancement: holds last until
    /// the matching `Release` event.
    pub fn with_release_events() -> Self {
        Self { release_events: true, ..Self::default() }
    }

    pub fn begin_frame(&mut self) {
        self.frame += 1;
        if self.release_events {
            return;
        }
        let frame = self.frame;
        self.key_frame
            .retain(|_, last| frame.saturating_sub(*last) <= HOLD_WINDOW);
    }

    /// Record an event.  Returns `true` when it starts a new hold.
    pub fn record(&mut self, code: KeyCode, kind: KeyEventKind) -> bool {
        match kind {
            KeyEventKind::Press => {
                let fresh = !self.is_held(code);
                self.key_frame.insert(code, self.frame);
                fresh
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, self.frame);
                false
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
                false
            }
        }
    }

    pub fn is_held(&self, code: KeyCode) -> bool {
        self.key_frame
            .get(&code)
            .map(|&last| self.release_events || self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn any_held(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|&c| self.is_held(c))
    }
}

// ── Key bindings ──────────────────────────────────────────────────────────────

const LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];

fn is_fire(code: KeyCode) -> bool {
    code == KeyCode::Char(' ')
}

fn is_restart(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char('r') | KeyCode::Char('R'))
}

fn is_quit(event: &KeyEvent) -> bool {
    match event.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn axis(tracker: &KeyTracker, negative: &[KeyCode], positive: &[KeyCode]) -> f32 {
    let held = |codes: &[KeyCode]| f32::from(u8::from(tracker.any_held(codes)));
    held(positive) - held(negative)
}

// ── Mapper ────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct InputMapper {
    keys: KeyTracker,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// `release_events` is true when the terminal accepted keyboard
    /// enhancement and reports key releases.
    pub fn for_terminal(release_events: bool) -> Self {
        let keys = if release_events {
            KeyTracker::with_release_events()
        } else {
            KeyTracker::new()
        };
        Self { keys }
    }

    /// Consume this frame's key events and produce the frame's input.
    /// `status` gates the actions: fire only while playing, restart only
    /// while game over.
    pub fn sample<I>(&mut self, events: I, status: GameStatus) -> FrameInput
    where
        I: IntoIterator<Item = KeyEvent>,
    {
        self.keys.begin_frame();
        let mut input = FrameInput::default();

        for event in events {
            let started = self.keys.record(event.code, event.kind);
            // Quit is honoured on any press, even one inside an existing hold
            if event.kind == KeyEventKind::Press && is_quit(&event) {
                input.quit = true;
                continue;
            }
            if !started {
                continue;
            }
            if is_fire(event.code) && status == GameStatus::Playing {
                input.fire += 1;
            } else if is_restart(event.code) && status == GameStatus::GameOver {
                input.restart = true;
            }
        }

        input.direction = Vec2::new(
            axis(&self.keys, LEFT, RIGHT),
            axis(&self.keys, UP, DOWN),
        );
        input
    }
}
