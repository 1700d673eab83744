use meteor_shooter::entities::*;

fn make_state() -> GameState {
    GameState {
        player: Player { rect: Rect::from_center(Vec2::new(640.0, 670.0), 112.0, 75.0) },
        lasers: Vec::new(),
        meteors: Vec::new(),
        stars: vec![Star { pos: Vec2::new(3.0, 4.0) }],
        score: 0,
        status: GameStatus::Playing,
        width: 1280.0,
        height: 720.0,
    }
}

#[test]
fn status_eq() {
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);
    assert!(!make_state().is_game_over());
}

#[test]
fn game_state_clone_is_independent() {
    let original = make_state();
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.rect.x = 99.0;
    cloned.score = 999;
    cloned.meteors.push(Meteor { rect: Rect::new(5.0, 5.0, 10.0, 10.0) });
    cloned.stars.clear();

    assert_eq!(original.player.rect.center(), Vec2::new(640.0, 670.0));
    assert_eq!(original.score, 0);
    assert!(original.meteors.is_empty());
    assert_eq!(original.stars.len(), 1);
}

#[test]
fn bounds_cover_the_window() {
    let s = make_state();
    assert_eq!(s.bounds(), Rect::new(0.0, 0.0, 1280.0, 720.0));
    assert!(s.player.rect.is_within(&s.bounds()));
}

#[test]
fn squared_distance() {
    assert_eq!(Vec2::new(0.0, 0.0).distance_squared(Vec2::new(3.0, 4.0)), 25.0);
}
