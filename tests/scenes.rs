use glam::{IVec2, Vec2};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tilescroll::audio::AudioContext;
use tilescroll::camera::Camera;
use tilescroll::canvas::{Color, DrawCommand, RecordingCanvas, TextureId};
use tilescroll::entity::{Fade, Text};
use tilescroll::input::{Action, ActionMap, InputState, KeyCode};
use tilescroll::level::{Level, TileGrid, TileSet};
use tilescroll::menu::{Menu, MenuAction};
use tilescroll::scene::{Scene, SceneAction, SceneContext, SceneStack};
use tilescroll::world::World;

fn world() -> World {
    let grid = TileGrid::generate(800, 600, 32, &TileSet::default(), &mut StdRng::seed_from_u64(1)).unwrap();
    World::new(Level::new(grid, Camera::new(800, 600, 800, 600, 8), TextureId(0)))
}

fn menu() -> Menu {
    Menu::new(Color::DARK_BLUE, 800, 600)
        .with_component(Text::new("TITLE", Vec2::new(10.0, 10.0), 20.0, Color::WHITE).with_effect(Fade::default()))
        .with_mapping(Action::Confirm, MenuAction::Continue)
        .with_mapping(Action::Quit, MenuAction::Quit)
}

/// Run one scene update with `keys` pressed this tick.
fn update_with(scene: &mut dyn Scene, keys: &[KeyCode], debug: bool) -> SceneAction {
    let mut input = InputState::new();
    for k in keys {
        input.press(*k);
    }
    let actions = ActionMap::<Action>::default_bindings();
    let mut audio = AudioContext::disabled();
    let mut ctx = SceneContext { input: &input, actions: &actions, audio: &mut audio, debug };
    scene.update(&mut ctx)
}

fn stack_update(stack: &mut SceneStack, keys: &[KeyCode]) -> bool {
    let mut input = InputState::new();
    for k in keys {
        input.press(*k);
    }
    let actions = ActionMap::<Action>::default_bindings();
    let mut audio = AudioContext::disabled();
    let mut ctx = SceneContext { input: &input, actions: &actions, audio: &mut audio, debug: false };
    stack.update(&mut ctx)
}

#[test]
fn test_world_scrolls_from_held_keys() {
    let mut w = world();
    assert!(matches!(update_with(&mut w, &[KeyCode::KeyD], false), SceneAction::None));
    assert_eq!(w.level.camera.origin(), IVec2::new(8, 0));
    update_with(&mut w, &[KeyCode::ArrowDown], false);
    assert_eq!(w.level.camera.origin(), IVec2::new(8, 8));
}

#[test]
fn test_world_escape_quits() {
    let mut w = world();
    assert!(matches!(update_with(&mut w, &[KeyCode::Escape], false), SceneAction::Quit));
}

#[test]
fn test_grid_toggle_needs_debug_mode() {
    let mut w = world();
    update_with(&mut w, &[KeyCode::KeyG], false);
    assert!(!w.level.debug);
    update_with(&mut w, &[KeyCode::KeyG], true);
    assert!(w.level.debug);
    update_with(&mut w, &[KeyCode::KeyG], true);
    assert!(!w.level.debug);
}

#[test]
fn test_menu_updates_components() {
    let mut m = menu();
    update_with(&mut m, &[], false);
    let alpha = m.components[0].color.alpha();
    assert!(alpha > 0.0 && alpha < 1.0);
}

#[test]
fn test_menu_draws_background_then_text() {
    let m = menu();
    let mut canvas = RecordingCanvas::new();
    m.draw(&mut canvas);
    assert_eq!(canvas.commands[0], DrawCommand::Clear(Color::DARK_BLUE));
    assert_eq!(canvas.texts(), vec!["TITLE"]);
}

#[test]
fn test_menu_quit_mapping() {
    let mut m = menu();
    assert!(matches!(update_with(&mut m, &[KeyCode::Escape], false), SceneAction::Quit));
}

#[test]
fn test_stack_menu_continues_to_level() {
    let mut stack = SceneStack::new(Box::new(menu().with_next(Box::new(world()))));
    assert!(stack_update(&mut stack, &[]));
    assert!(stack_update(&mut stack, &[KeyCode::Space]));
    assert_eq!(stack.depth(), 1);

    // The level is on top now: it draws tiles, not the title.
    let mut canvas = RecordingCanvas::new();
    stack.draw(&mut canvas);
    assert!(canvas.texts().is_empty());
    assert!(!canvas.copies().is_empty());

    assert!(!stack_update(&mut stack, &[KeyCode::Escape]));
}

#[test]
fn test_stack_continue_without_next_pops() {
    let mut stack = SceneStack::new(Box::new(menu()));
    assert!(!stack_update(&mut stack, &[KeyCode::Space]));
    assert_eq!(stack.depth(), 0);
}

#[test]
fn test_stack_draw_clears_black() {
    let stack = SceneStack::new(Box::new(world()));
    let mut canvas = RecordingCanvas::new();
    stack.draw(&mut canvas);
    assert_eq!(canvas.commands[0], DrawCommand::Clear(Color::BLACK));
}
