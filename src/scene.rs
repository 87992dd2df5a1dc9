use crate::audio::AudioContext;
use crate::canvas::{Canvas, Color};
use crate::input::{Action, ActionMap, InputState};

/// Services a scene can use while updating.
pub struct SceneContext<'a> {
    pub input: &'a InputState,
    pub actions: &'a ActionMap<Action>,
    pub audio: &'a mut AudioContext,
    /// Process was started with `--debug`.
    pub debug: bool,
}

pub enum SceneAction {
    None,
    Push(Box<dyn Scene>),
    Pop,
    Switch(Box<dyn Scene>),
    Quit,
}

pub trait Scene {
    fn on_enter(&mut self, _ctx: &mut SceneContext<'_>) {}
    fn on_exit(&mut self, _ctx: &mut SceneContext<'_>) {}
    fn update(&mut self, ctx: &mut SceneContext<'_>) -> SceneAction;
    fn draw(&self, canvas: &mut dyn Canvas);
    fn is_transparent(&self) -> bool { false }
}

/// Stack of scenes; only the top one updates, the top opaque one and
/// everything above it draw.
pub struct SceneStack {
    scenes: Vec<Box<dyn Scene>>,
    initialized: bool,
}

impl SceneStack {
    pub fn new(initial: Box<dyn Scene>) -> Self {
        Self { scenes: vec![initial], initialized: false }
    }

    pub fn depth(&self) -> usize { self.scenes.len() }

    /// Run one tick of the top scene. Returns false once the game should exit.
    pub fn update(&mut self, ctx: &mut SceneContext<'_>) -> bool {
        if !self.initialized {
            self.initialized = true;
            if let Some(s) = self.scenes.first_mut() {
                s.on_enter(ctx);
            }
        }

        let action = match self.scenes.last_mut() {
            Some(top) => top.update(ctx),
            None => return false,
        };

        match action {
            SceneAction::None => {}
            SceneAction::Push(mut s) => {
                s.on_enter(ctx);
                self.scenes.push(s);
            }
            SceneAction::Pop => {
                if let Some(mut top) = self.scenes.pop() {
                    top.on_exit(ctx);
                }
            }
            SceneAction::Switch(mut s) => {
                if let Some(mut top) = self.scenes.pop() {
                    top.on_exit(ctx);
                }
                s.on_enter(ctx);
                self.scenes.push(s);
            }
            SceneAction::Quit => return false,
        }
        !self.scenes.is_empty()
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.set_draw_color(Color::BLACK);
        canvas.clear();
        let start = self.scenes.iter().rposition(|s| !s.is_transparent()).unwrap_or(0);
        for scene in &self.scenes[start..] {
            scene.draw(canvas);
        }
    }
}
