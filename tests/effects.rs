use glam::Vec2;
use tilescroll::camera::Camera;
use tilescroll::canvas::{Color, SpriteSheet, TextureId};
use tilescroll::entity::{Drift, Effect, Entity, Fade, Gravity, Player, Text, TickContext, Wander};
use tilescroll::input::Controls;

fn player() -> Player {
    let sheet = SpriteSheet { texture: TextureId(1), width: 64, height: 128 };
    Player::new(sheet, Vec2::new(800.0, 600.0))
}

fn idle(entity: &mut dyn Entity) {
    let camera = Camera::new(800, 600, 0, 0, 8);
    entity.update(&TickContext { controls: Controls::NONE, camera: &camera, tick: 0 });
}

#[test]
fn test_gravity_falls_to_floor() {
    let mut p = player();
    p.add_effect(Box::new(Gravity { step: 4.0 }));
    idle(&mut p);
    assert_eq!(p.pos.y, 296.0);
    for _ in 0..200 {
        idle(&mut p);
    }
    assert_eq!(p.pos.y, 568.0);
    assert_eq!(p.pos.x, 396.0);
}

#[test]
fn test_gravity_is_monotonic() {
    let mut p = player();
    p.add_effect(Box::new(Gravity { step: 3.0 }));
    let mut last = p.pos.y;
    for _ in 0..150 {
        idle(&mut p);
        assert!(p.pos.y >= last);
        last = p.pos.y;
    }
}

#[test]
fn test_wander_zero_chance_never_moves() {
    let mut p = player();
    let mut w = Wander::new(0.0, 5);
    for _ in 0..100 {
        w.apply(&mut p);
    }
    assert_eq!(p.pos, Vec2::new(396.0, 292.0));
}

#[test]
fn test_wander_full_chance_steps_both_axes() {
    let mut p = player();
    let mut w = Wander::new(1.0, 5);
    w.apply(&mut p);
    assert_eq!((p.pos.x - 396.0).abs(), 4.0);
    assert_eq!((p.pos.y - 292.0).abs(), 4.0);
}

#[test]
fn test_wander_is_reproducible() {
    let run = |seed| {
        let mut p = player();
        p.add_effect(Box::new(Wander::new(0.3, seed)));
        for _ in 0..50 {
            idle(&mut p);
        }
        p.pos
    };
    assert_eq!(run(11), run(11));
}

#[test]
fn test_wander_stays_in_bounds() {
    let mut p = player();
    p.pos = Vec2::ZERO;
    let mut w = Wander::new(1.0, 99);
    for _ in 0..500 {
        w.apply(&mut p);
        assert!(p.pos.x >= 0.0 && p.pos.x <= 784.0);
        assert!(p.pos.y >= 0.0 && p.pos.y <= 568.0);
    }
}

#[test]
fn test_effects_run_in_order_before_input() {
    let mut p = player();
    p.add_effect(Box::new(Gravity { step: 10.0 }));
    assert_eq!(p.effect_count(), 1);
    let camera = Camera::new(800, 600, 0, 0, 8);
    p.update(&TickContext { controls: Controls::UP, camera: &camera, tick: 1 });
    // +10 from gravity, then -4 from walking up.
    assert_eq!(p.pos.y, 298.0);
}

#[test]
fn test_fade_pulses_alpha() {
    let mut text = Text::new("HI", Vec2::ZERO, 10.0, Color::WHITE);
    let mut fade = Fade::default();
    for _ in 0..8 {
        fade.apply(&mut text);
    }
    assert!((text.color.alpha() - 1.0).abs() < 1e-4);
    for _ in 0..8 {
        fade.apply(&mut text);
    }
    assert!(text.color.alpha() < 0.01);
    fade.apply(&mut text);
    assert!(text.color.alpha() < 0.5);
}

#[test]
fn test_fade_through_update() {
    let mut text = Text::new("HI", Vec2::ZERO, 10.0, Color::WHITE).with_effect(Fade::new(std::f32::consts::PI / 2.0));
    idle(&mut text);
    assert!((text.color.alpha() - 1.0).abs() < 1e-4);
}

#[test]
fn test_drift_moves_text() {
    let mut text = Text::new("AB", Vec2::new(10.0, 10.0), 5.0, Color::WHITE)
        .with_effect(Drift { velocity: Vec2::new(2.0, -1.0), wrap_x: None });
    idle(&mut text);
    idle(&mut text);
    assert_eq!(text.position(), Vec2::new(14.0, 8.0));
}

#[test]
fn test_drift_wraps_horizontally() {
    let mut text = Text::new("AB", Vec2::new(99.0, 0.0), 5.0, Color::WHITE);
    let mut drift = Drift { velocity: Vec2::new(2.0, 0.0), wrap_x: Some((0.0, 100.0)) };
    drift.apply(&mut text);
    assert_eq!(text.pos.x, -text.width());

    let mut drift = Drift { velocity: Vec2::new(-3.0, 0.0), wrap_x: Some((0.0, 100.0)) };
    text.pos.x = -text.width() + 1.0;
    drift.apply(&mut text);
    assert_eq!(text.pos.x, 100.0);
}
