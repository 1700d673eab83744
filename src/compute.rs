//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a brand-new
//! state.  Sound is not played here: the cues a transition wants played are
//! returned alongside the new state.

use rand::Rng;

use crate::audio::Cue;
use crate::config::GameConfig;
use crate::entities::{GameState, GameStatus, Laser, Meteor, Player, Rect, Star, Vec2};

// ── Tuning ────────────────────────────────────────────────────────────────────

/// The numbers the simulation runs on, lifted out of `GameConfig`.
#[derive(Clone, Debug, PartialEq)]
pub struct Rules {
    pub width: f32,
    pub height: f32,
    pub player_speed: f32,
    pub laser_speed: f32,
    pub meteor_speed: f32,
    pub player_start_offset: f32,
    pub collision_threshold: f32,
    pub spawn_batch: u32,
    pub star_count: u32,
    pub player_size: [f32; 2],
    pub laser_size: [f32; 2],
    pub meteor_size: [f32; 2],
}

impl From<&GameConfig> for Rules {
    fn from(config: &GameConfig) -> Self {
        let g = &config.gameplay;
        Self {
            width: config.window.width as f32,
            height: config.window.height as f32,
            player_speed: g.player_speed,
            laser_speed: g.laser_speed,
            meteor_speed: g.meteor_speed,
            player_start_offset: g.player_start_offset,
            collision_threshold: g.collision_threshold,
            spawn_batch: g.spawn_batch,
            star_count: g.star_count,
            player_size: config.sprites.player,
            laser_size: config.sprites.laser,
            meteor_size: config.sprites.meteor,
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::from(&GameConfig::default())
    }
}

impl Rules {
    pub fn player_start(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height - self.player_start_offset)
    }

    fn start_player(&self) -> Player {
        let [w, h] = self.player_size;
        Player { rect: Rect::from_center(self.player_start(), w, h) }
    }
}

/// A new state plus the cues the transition asked for.
#[derive(Clone, Debug)]
pub struct Transition {
    pub state: GameState,
    pub cues: Vec<Cue>,
}

impl Transition {
    fn silent(state: GameState) -> Self {
        Self { state, cues: Vec::new() }
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state, scattering the star field with `rng`.
pub fn init_state(rules: &Rules, rng: &mut impl Rng) -> GameState {
    let stars = (0..rules.star_count)
        .map(|_| Star {
            pos: Vec2::new(
                rng.gen_range(0..=rules.width as i32) as f32,
                rng.gen_range(0..=rules.height as i32) as f32,
            ),
        })
        .collect();

    GameState {
        player: rules.start_player(),
        lasers: Vec::new(),
        meteors: Vec::new(),
        stars,
        score: 0,
        status: GameStatus::Playing,
        width: rules.width,
        height: rules.height,
    }
}

/// Start a new round: empty the field, zero the score, recentre the player
/// and restart the music.  The star field is kept.
pub fn reset(state: &GameState, rules: &Rules) -> Transition {
    log::info!("new round (previous score {})", state.score);
    Transition {
        state: GameState {
            player: rules.start_player(),
            lasers: Vec::new(),
            meteors: Vec::new(),
            score: 0,
            status: GameStatus::Playing,
            ..state.clone()
        },
        cues: vec![Cue::MusicStart],
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Fire a laser from the player's top-centre.  No cap on live lasers.
pub fn fire_laser(state: &GameState, rules: &Rules) -> Transition {
    if state.is_game_over() {
        return Transition::silent(state.clone());
    }
    let [w, h] = rules.laser_size;
    let mut lasers = state.lasers.clone();
    lasers.push(Laser { rect: Rect::from_midbottom(state.player.rect.midtop(), w, h) });
    Transition {
        state: GameState { lasers, ..state.clone() },
        cues: vec![Cue::Laser],
    }
}

/// One spawn trigger: a batch of meteors along the top edge, each centred on
/// a random x.  Ignored while game over.
pub fn spawn_meteors(state: &GameState, rules: &Rules, rng: &mut impl Rng) -> GameState {
    if state.is_game_over() {
        return state.clone();
    }
    let [w, h] = rules.meteor_size;
    let mut meteors = state.meteors.clone();
    for _ in 0..rules.spawn_batch {
        let x = rng.gen_range(0..=state.width as i32) as f32;
        meteors.push(Meteor { rect: Rect::from_midtop(Vec2::new(x, 0.0), w, h) });
    }
    log::debug!("spawned {} meteors ({} live)", rules.spawn_batch, meteors.len());
    GameState { meteors, ..state.clone() }
}

// ── Per-frame tick ──────────────────────────────────────────────────────────

/// Advance the simulation by `dt` seconds.  A game-over state is returned
/// unchanged: nothing moves and nothing is pruned until the next reset.
pub fn tick(state: &GameState, rules: &Rules, direction: Vec2, dt: f32) -> Transition {
    if state.is_game_over() {
        return Transition::silent(state.clone());
    }
    let bounds = state.bounds();
    let mut cues = Vec::new();

    // ── 1. Move and clamp the player ─────────────────────────────────────────
    let mut player = state.player.clone();
    let center = player.rect.center();
    player.rect.set_center(Vec2::new(
        center.x + direction.x * rules.player_speed * dt,
        center.y + direction.y * rules.player_speed * dt,
    ));
    player.rect.clamp_within(&bounds);

    // ── 2. Move lasers up, drop those fully above the top ────────────────────
    let lasers: Vec<Laser> = state
        .lasers
        .iter()
        .map(|l| {
            let mut rect = l.rect;
            rect.y -= rules.laser_speed * dt;
            Laser { rect }
        })
        .filter(|l| l.rect.bottom() >= 0.0)
        .collect();

    // ── 3. Move meteors down, drop those fully below the bottom ──────────────
    let mut meteors: Vec<Meteor> = state
        .meteors
        .iter()
        .map(|m| {
            let mut rect = m.rect;
            rect.y += rules.meteor_speed * dt;
            Meteor { rect }
        })
        .filter(|m| m.rect.top() <= state.height)
        .collect();

    // ── 4. Collision: lasers ↔ meteors (first found wins) ───────────────────
    let mut score = state.score;
    let mut surviving_lasers = Vec::with_capacity(lasers.len());
    for laser in lasers {
        match meteors.iter().position(|m| laser.rect.overlaps(&m.rect)) {
            Some(hit) => {
                meteors.remove(hit);
                score += 1;
                cues.push(Cue::Explosion);
            }
            None => surviving_lasers.push(laser),
        }
    }
    if score > state.score {
        log::debug!("score {} -> {}", state.score, score);
    }

    // ── 5. Collision: meteors ↔ player (radial) ─────────────────────────────
    let player_center = player.rect.center();
    let threshold_sq = rules.collision_threshold * rules.collision_threshold;
    let player_hit = meteors
        .iter()
        .any(|m| m.rect.center().distance_squared(player_center) < threshold_sq);

    let status = if player_hit {
        cues.push(Cue::Explosion);
        log::info!("game over with score {score}");
        GameStatus::GameOver
    } else {
        GameStatus::Playing
    };

    Transition {
        state: GameState {
            player,
            lasers: surviving_lasers,
            meteors,
            score,
            status,
            ..state.clone()
        },
        cues,
    }
}
