use meteor_shooter::audio::Cue;
use meteor_shooter::compute::*;
use meteor_shooter::entities::*;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn rules() -> Rules {
    Rules::default()
}

fn make_state() -> GameState {
    let rules = rules();
    GameState {
        player: Player {
            rect: Rect::from_center(rules.player_start(), 112.0, 75.0),
        },
        lasers: Vec::new(),
        meteors: Vec::new(),
        stars: Vec::new(),
        score: 0,
        status: GameStatus::Playing,
        width: 1280.0,
        height: 720.0,
    }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn laser_at(x: f32, y: f32) -> Laser {
    Laser { rect: Rect::new(x, y, 9.0, 54.0) }
}

fn meteor_at(x: f32, y: f32) -> Meteor {
    Meteor { rect: Rect::new(x, y, 101.0, 84.0) }
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_player_position() {
    let s = init_state(&rules(), &mut seeded_rng());
    assert_eq!(s.player.rect.center(), Vec2::new(640.0, 670.0));
    assert!(s.player.rect.is_within(&s.bounds()));
}

#[test]
fn init_state_empty_collections() {
    let s = init_state(&rules(), &mut seeded_rng());
    assert!(s.lasers.is_empty());
    assert!(s.meteors.is_empty());
    assert_eq!(s.score, 0);
    assert_eq!(s.status, GameStatus::Playing);
}

#[test]
fn init_state_scatters_stars_inside_window() {
    let s = init_state(&rules(), &mut seeded_rng());
    assert_eq!(s.stars.len(), 40);
    for star in &s.stars {
        assert!((0.0..=1280.0).contains(&star.pos.x));
        assert!((0.0..=720.0).contains(&star.pos.y));
    }
}

#[test]
fn star_field_is_reproducible_with_seed() {
    let a = init_state(&rules(), &mut seeded_rng());
    let b = init_state(&rules(), &mut seeded_rng());
    assert_eq!(a.stars, b.stars);
}

// ── player movement ───────────────────────────────────────────────────────────

#[test]
fn player_moves_by_speed_times_dt() {
    let s = make_state();
    let t = tick(&s, &rules(), Vec2::new(-1.0, -1.0), 0.25);
    // 800 units/s for 0.25 s on both axes — diagonals are not normalised
    assert_eq!(t.state.player.rect.center(), Vec2::new(440.0, 470.0));
}

#[test]
fn player_is_clamped_to_window() {
    let s = make_state();
    let t = tick(&s, &rules(), Vec2::new(1.0, 1.0), 10.0);
    let rect = t.state.player.rect;
    assert_eq!(rect.right(), 1280.0);
    assert_eq!(rect.bottom(), 720.0);

    let t = tick(&s, &rules(), Vec2::new(-1.0, -1.0), 10.0);
    assert_eq!(t.state.player.rect.left(), 0.0);
    assert_eq!(t.state.player.rect.top(), 0.0);
}

#[test]
fn player_stays_in_bounds_under_random_input() {
    let mut rng = seeded_rng();
    let rules = rules();
    let mut s = make_state();
    for _ in 0..500 {
        let dir = Vec2::new(rng.gen_range(-1..=1) as f32, rng.gen_range(-1..=1) as f32);
        let dt = rng.gen_range(0.0..0.2);
        s = tick(&s, &rules, dir, dt).state;
        assert!(s.player.rect.is_within(&s.bounds()), "escaped: {:?}", s.player.rect);
    }
}

#[test]
fn tick_does_not_mutate_original() {
    let mut s = make_state();
    s.lasers.push(laser_at(100.0, 300.0));
    let _ = tick(&s, &rules(), Vec2::new(1.0, 0.0), 0.1);
    assert_eq!(s.lasers[0].rect.y, 300.0);
    assert_eq!(s.player.rect.center(), Vec2::new(640.0, 670.0));
}

// ── fire_laser ────────────────────────────────────────────────────────────────

#[test]
fn laser_spawns_at_player_top_centre() {
    let s = make_state();
    let t = fire_laser(&s, &rules());
    assert_eq!(t.state.lasers.len(), 1);
    let laser = t.state.lasers[0].rect;
    assert_eq!(laser.bottom(), s.player.rect.top());
    assert_eq!(laser.center().x, s.player.rect.center().x);
    assert_eq!(t.cues, vec![Cue::Laser]);
}

#[test]
fn lasers_are_not_capped() {
    let rules = rules();
    let mut s = make_state();
    for _ in 0..25 {
        s = fire_laser(&s, &rules).state;
    }
    assert_eq!(s.lasers.len(), 25);
}

#[test]
fn cannot_fire_while_game_over() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    let t = fire_laser(&s, &rules());
    assert!(t.state.lasers.is_empty());
    assert!(t.cues.is_empty());
}

// ── motion & pruning ──────────────────────────────────────────────────────────

#[test]
fn lasers_move_up_and_meteors_move_down() {
    let mut s = make_state();
    s.lasers.push(laser_at(100.0, 300.0));
    s.meteors.push(meteor_at(900.0, 100.0));
    let t = tick(&s, &rules(), Vec2::ZERO, 0.1);
    assert_eq!(t.state.lasers[0].rect.y, 200.0);
    assert_eq!(t.state.meteors[0].rect.y, 160.0);
}

#[test]
fn laser_above_top_is_pruned() {
    let mut s = make_state();
    s.lasers.push(laser_at(100.0, -60.0)); // bottom at -6
    s.lasers.push(laser_at(300.0, -54.0)); // bottom exactly on the edge
    let t = tick(&s, &rules(), Vec2::ZERO, 0.0);
    assert_eq!(t.state.lasers.len(), 1);
    assert_eq!(t.state.lasers[0].rect.x, 300.0);
}

#[test]
fn meteor_below_bottom_is_pruned() {
    let mut s = make_state();
    s.meteors.push(meteor_at(100.0, 721.0));
    s.meteors.push(meteor_at(300.0, 720.0));
    let t = tick(&s, &rules(), Vec2::ZERO, 0.0);
    assert_eq!(t.state.meteors.len(), 1);
    assert_eq!(t.state.meteors[0].rect.x, 300.0);
}

// ── collisions ────────────────────────────────────────────────────────────────

#[test]
fn laser_destroys_overlapping_meteor() {
    let mut s = make_state();
    s.lasers.push(laser_at(600.0, 300.0));
    s.meteors.push(meteor_at(580.0, 280.0));
    let t = tick(&s, &rules(), Vec2::ZERO, 0.0);
    assert!(t.state.lasers.is_empty());
    assert!(t.state.meteors.is_empty());
    assert_eq!(t.state.score, 1);
    assert_eq!(t.cues, vec![Cue::Explosion]);
    assert_eq!(t.state.status, GameStatus::Playing);
}

#[test]
fn one_meteor_absorbs_only_the_first_laser() {
    let mut s = make_state();
    s.lasers.push(laser_at(600.0, 300.0));
    s.lasers.push(laser_at(610.0, 300.0));
    s.meteors.push(meteor_at(580.0, 280.0));
    let t = tick(&s, &rules(), Vec2::ZERO, 0.0);
    assert_eq!(t.state.score, 1);
    assert!(t.state.meteors.is_empty());
    assert_eq!(t.state.lasers.len(), 1);
    assert_eq!(t.state.lasers[0].rect.x, 610.0);
}

#[test]
fn one_laser_destroys_at_most_one_meteor() {
    let mut s = make_state();
    s.lasers.push(laser_at(600.0, 300.0));
    s.meteors.push(meteor_at(580.0, 280.0));
    s.meteors.push(meteor_at(560.0, 290.0));
    let t = tick(&s, &rules(), Vec2::ZERO, 0.0);
    assert_eq!(t.state.score, 1);
    assert_eq!(t.state.meteors.len(), 1);
    assert_eq!(t.state.meteors[0].rect.x, 560.0);
}

#[test]
fn separate_hits_in_one_frame_each_score() {
    let mut s = make_state();
    s.lasers.push(laser_at(100.0, 300.0));
    s.lasers.push(laser_at(900.0, 300.0));
    s.meteors.push(meteor_at(60.0, 280.0));
    s.meteors.push(meteor_at(860.0, 280.0));
    let t = tick(&s, &rules(), Vec2::ZERO, 0.0);
    assert_eq!(t.state.score, 2);
    assert_eq!(t.cues, vec![Cue::Explosion, Cue::Explosion]);
}

#[test]
fn meteor_on_player_ends_the_game() {
    let mut s = make_state();
    let center = s.player.rect.center();
    s.meteors.push(Meteor { rect: Rect::from_center(center, 101.0, 84.0) });
    s.lasers.push(laser_at(100.0, 100.0));
    let t = tick(&s, &rules(), Vec2::ZERO, 0.0);
    assert_eq!(t.state.status, GameStatus::GameOver);
    assert_eq!(t.cues, vec![Cue::Explosion]);

    // Frozen: nothing moves or gets pruned until reset
    let frozen = tick(&t.state, &rules(), Vec2::new(1.0, 0.0), 1.0);
    assert_eq!(frozen.state.meteors, t.state.meteors);
    assert_eq!(frozen.state.lasers, t.state.lasers);
    assert_eq!(frozen.state.player, t.state.player);
    assert!(frozen.cues.is_empty());
}

#[test]
fn player_collision_is_radial_not_rectangular() {
    let mut s = make_state();
    let c = s.player.rect.center();
    // Rectangles overlap, but centres are 60 apart (> threshold 50)
    s.meteors.push(Meteor { rect: Rect::from_center(Vec2::new(c.x + 60.0, c.y), 101.0, 84.0) });
    let t = tick(&s, &rules(), Vec2::ZERO, 0.0);
    assert_eq!(t.state.status, GameStatus::Playing);

    // 49 apart is inside the threshold
    s.meteors[0].rect = Rect::from_center(Vec2::new(c.x + 49.0, c.y), 101.0, 84.0);
    let t = tick(&s, &rules(), Vec2::ZERO, 0.0);
    assert_eq!(t.state.status, GameStatus::GameOver);
}

#[test]
fn several_meteors_on_player_trigger_once() {
    let mut s = make_state();
    let c = s.player.rect.center();
    for _ in 0..3 {
        s.meteors.push(Meteor { rect: Rect::from_center(c, 101.0, 84.0) });
    }
    let t = tick(&s, &rules(), Vec2::ZERO, 0.0);
    assert_eq!(t.cues, vec![Cue::Explosion]);
    assert_eq!(t.state.meteors.len(), 3);
}

#[test]
fn score_frozen_while_game_over() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    s.lasers.push(laser_at(600.0, 300.0));
    s.meteors.push(meteor_at(580.0, 280.0));
    let t = tick(&s, &rules(), Vec2::ZERO, 0.1);
    assert_eq!(t.state.score, 0);
    assert_eq!(t.state.lasers.len(), 1);
}

// ── spawning ──────────────────────────────────────────────────────────────────

#[test]
fn spawn_creates_a_batch_along_the_top() {
    let s = make_state();
    let s2 = spawn_meteors(&s, &rules(), &mut seeded_rng());
    assert_eq!(s2.meteors.len(), 4);
    for m in &s2.meteors {
        assert_eq!(m.rect.top(), 0.0);
        assert!((0.0..=1280.0).contains(&m.rect.midtop().x));
    }
}

#[test]
fn spawn_is_reproducible_with_seed() {
    let s = make_state();
    let a = spawn_meteors(&s, &rules(), &mut seeded_rng());
    let b = spawn_meteors(&s, &rules(), &mut seeded_rng());
    assert_eq!(a.meteors, b.meteors);
}

#[test]
fn spawn_appends_after_existing_meteors() {
    let mut s = make_state();
    s.meteors.push(meteor_at(1.0, 200.0));
    let s2 = spawn_meteors(&s, &rules(), &mut seeded_rng());
    assert_eq!(s2.meteors.len(), 5);
    assert_eq!(s2.meteors[0].rect.x, 1.0);
}

#[test]
fn no_spawn_while_game_over() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    let s2 = spawn_meteors(&s, &rules(), &mut seeded_rng());
    assert!(s2.meteors.is_empty());
}

// ── reset ─────────────────────────────────────────────────────────────────────

#[test]
fn reset_restores_a_fresh_round() {
    let rules = rules();
    let mut s = init_state(&rules, &mut seeded_rng());
    let stars = s.stars.clone();
    s.score = 12;
    s.status = GameStatus::GameOver;
    s.lasers.push(laser_at(10.0, 10.0));
    s.meteors.push(meteor_at(10.0, 10.0));
    s.player.rect.x = 3.0;

    let t = reset(&s, &rules);
    assert_eq!(t.state.score, 0);
    assert_eq!(t.state.status, GameStatus::Playing);
    assert!(t.state.lasers.is_empty());
    assert!(t.state.meteors.is_empty());
    assert_eq!(t.state.player.rect.center(), rules.player_start());
    assert_eq!(t.state.stars, stars);
    assert_eq!(t.cues, vec![Cue::MusicStart]);
}

#[test]
fn reset_is_idempotent() {
    let rules = rules();
    let once = reset(&make_state(), &rules).state;
    let twice = reset(&once, &rules).state;
    let thrice = reset(&twice, &rules).state;
    for s in [&once, &twice, &thrice] {
        assert_eq!(s.score, 0);
        assert_eq!(s.status, GameStatus::Playing);
        assert!(s.lasers.is_empty() && s.meteors.is_empty());
        assert_eq!(s.player.rect.center(), rules.player_start());
    }
}
