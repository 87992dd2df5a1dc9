use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use glam::IVec2;
pub use winit::keyboard::KeyCode;

/// Raw keyboard state for a single tick.
///
/// `keys_held` is the level-triggered snapshot; `keys_pressed` and
/// `keys_released` are the discrete events queued since the previous tick and
/// are drained by [`InputState::clear_frame_state`] once the tick completes.
#[derive(Debug, Default)]
pub struct InputState {
    pub keys_held: HashSet<KeyCode>,
    pub keys_pressed: HashSet<KeyCode>,
    pub keys_released: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down event. Auto-repeat does not re-trigger `pressed`.
    pub fn press(&mut self, key: KeyCode) {
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub fn release(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
        self.keys_released.insert(key);
    }

    pub fn clear_frame_state(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool { self.keys_held.contains(&key) }
    pub fn is_key_pressed(&self, key: KeyCode) -> bool { self.keys_pressed.contains(&key) }
    pub fn is_key_released(&self, key: KeyCode) -> bool { self.keys_released.contains(&key) }
}

/// Maps logical actions (defined by the game) to one or more keys.
#[derive(Debug, Clone)]
pub struct ActionMap<A: Hash + Eq + Copy> {
    bindings: HashMap<A, Vec<KeyCode>>,
}

impl<A: Hash + Eq + Copy> ActionMap<A> {
    pub fn new() -> Self {
        Self { bindings: HashMap::new() }
    }

    pub fn bind(&mut self, action: A, key: KeyCode) {
        self.bindings.entry(action).or_default().push(key);
    }

    /// Builder-style [`ActionMap::bind`].
    pub fn with(mut self, action: A, key: KeyCode) -> Self {
        self.bind(action, key);
        self
    }

    /// Returns true if any bound key went down this tick.
    pub fn is_pressed(&self, action: A, input: &InputState) -> bool {
        self.bindings
            .get(&action)
            .is_some_and(|keys| keys.iter().any(|k| input.is_key_pressed(*k)))
    }

    /// Returns true if any bound key is currently held.
    pub fn is_held(&self, action: A, input: &InputState) -> bool {
        self.bindings
            .get(&action)
            .is_some_and(|keys| keys.iter().any(|k| input.is_key_held(*k)))
    }
}

impl<A: Hash + Eq + Copy> Default for ActionMap<A> {
    fn default() -> Self { Self::new() }
}

// ── Engine actions ───────────────────────────────────────────────────────────

/// Logical inputs the engine itself understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Sprint,
    Confirm,
    ToggleDebug,
    Quit,
}

impl ActionMap<Action> {
    /// WASD and arrow keys move, Shift sprints, Space confirms, G toggles the
    /// debug grid and Escape quits.
    pub fn default_bindings() -> Self {
        Self::new()
            .with(Action::Up, KeyCode::KeyW)
            .with(Action::Up, KeyCode::ArrowUp)
            .with(Action::Down, KeyCode::KeyS)
            .with(Action::Down, KeyCode::ArrowDown)
            .with(Action::Left, KeyCode::KeyA)
            .with(Action::Left, KeyCode::ArrowLeft)
            .with(Action::Right, KeyCode::KeyD)
            .with(Action::Right, KeyCode::ArrowRight)
            .with(Action::Sprint, KeyCode::ShiftLeft)
            .with(Action::Sprint, KeyCode::ShiftRight)
            .with(Action::Confirm, KeyCode::Space)
            .with(Action::ToggleDebug, KeyCode::KeyG)
            .with(Action::Quit, KeyCode::Escape)
    }
}

/// Per-tick snapshot of the held movement actions, decoupled from the
/// keyboard so the simulation can be driven without a window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
}

impl Controls {
    pub const NONE: Self = Self { up: false, down: false, left: false, right: false, sprint: false };
    pub const RIGHT: Self = Self { right: true, ..Self::NONE };
    pub const LEFT: Self = Self { left: true, ..Self::NONE };
    pub const UP: Self = Self { up: true, ..Self::NONE };
    pub const DOWN: Self = Self { down: true, ..Self::NONE };

    pub fn from_input(input: &InputState, actions: &ActionMap<Action>) -> Self {
        Self {
            up: actions.is_held(Action::Up, input),
            down: actions.is_held(Action::Down, input),
            left: actions.is_held(Action::Left, input),
            right: actions.is_held(Action::Right, input),
            sprint: actions.is_held(Action::Sprint, input),
        }
    }

    /// Net direction with each component in `{-1, 0, 1}`; opposite keys cancel.
    pub fn axis(&self) -> IVec2 {
        IVec2::new(
            self.right as i32 - self.left as i32,
            self.down as i32 - self.up as i32,
        )
    }

    /// One unit step per held direction, ordered up, down, left, right.
    pub fn steps(&self) -> impl Iterator<Item = IVec2> {
        [
            (self.up, IVec2::NEG_Y),
            (self.down, IVec2::Y),
            (self.left, IVec2::NEG_X),
            (self.right, IVec2::X),
        ]
        .into_iter()
        .filter_map(|(held, dir)| held.then_some(dir))
    }

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}
