use crate::camera::Camera;
use crate::canvas::{Canvas, Color};
use crate::entity::{Entity, Text, TickContext};
use crate::input::{Action, Controls};
use crate::scene::{Scene, SceneAction, SceneContext};

/// What a menu key does.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuAction {
    /// Replace the menu with the next scene.
    Continue,
    Quit,
}

/// A full-screen menu: a background colour, a list of text components and
/// a key mapping.
pub struct Menu {
    pub background: Color,
    pub components: Vec<Text>,
    mapping: Vec<(Action, MenuAction)>,
    next: Option<Box<dyn Scene>>,
    camera: Camera,
    tick: u64,
}

impl Menu {
    pub fn new(background: Color, view_w: i32, view_h: i32) -> Self {
        Self {
            background,
            components: Vec::new(),
            mapping: Vec::new(),
            next: None,
            camera: Camera::new(view_w, view_h, 0, 0, 1),
            tick: 0,
        }
    }

    pub fn with_component(mut self, text: Text) -> Self {
        self.components.push(text);
        self
    }

    pub fn with_mapping(mut self, action: Action, menu_action: MenuAction) -> Self {
        self.mapping.push((action, menu_action));
        self
    }

    /// Scene that `MenuAction::Continue` switches to.
    pub fn with_next(mut self, scene: Box<dyn Scene>) -> Self {
        self.next = Some(scene);
        self
    }

    /// Advance every component one tick.
    pub fn tick_components(&mut self) {
        self.tick += 1;
        let ctx = TickContext { controls: Controls::NONE, camera: &self.camera, tick: self.tick };
        for component in self.components.iter_mut() {
            component.update(&ctx);
        }
    }
}

impl Scene for Menu {
    fn update(&mut self, ctx: &mut SceneContext<'_>) -> SceneAction {
        self.tick_components();

        let triggered = self
            .mapping
            .iter()
            .find(|(action, _)| ctx.actions.is_pressed(*action, ctx.input))
            .map(|(_, m)| *m);

        match triggered {
            Some(MenuAction::Quit) => SceneAction::Quit,
            Some(MenuAction::Continue) => match self.next.take() {
                Some(next) => SceneAction::Switch(next),
                None => SceneAction::Pop,
            },
            None => SceneAction::None,
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.set_draw_color(self.background);
        canvas.clear();
        for component in &self.components {
            component.draw(canvas);
        }
    }
}
