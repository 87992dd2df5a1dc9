use crate::canvas::Canvas;
use crate::entity::{Entity, EntityId, TickContext};
use crate::input::{Action, Controls};
use crate::level::{Level, Placement};
use crate::scene::{Scene, SceneAction, SceneContext};

/// Simulation state of a running level: the map, its camera and every
/// entity. All mutation happens in [`World::update`]; [`World::draw`] only
/// reads, so a frame never shows half-updated state.
pub struct World {
    pub level: Level,
    entities: Vec<Box<dyn Entity>>,
    /// Culled entities the entity map does not hold: outside the map, or
    /// displaced from their cell by a later spawn.
    unmapped: Vec<EntityId>,
    /// Sound played when the level is entered.
    pub music: Option<String>,
    tick: u64,
}

impl World {
    pub fn new(level: Level) -> Self {
        Self { level, entities: Vec::new(), unmapped: Vec::new(), music: None, tick: 0 }
    }

    /// Add an entity. Entities that obey camera culling are also recorded in
    /// the level's entity map at their level coordinates.
    pub fn spawn(&mut self, entity: Box<dyn Entity>) -> EntityId {
        let id = EntityId(self.entities.len());
        if !entity.always_visible() {
            match self.level.place_entity(id, entity.level_coords()) {
                Placement::Placed => {}
                Placement::Displaced(old) => self.unmapped.push(old),
                Placement::OutsideMap => {
                    log::warn!("entity {:?} at {} is outside the map", id, entity.level_coords());
                    self.unmapped.push(id);
                }
            }
        }
        self.entities.push(entity);
        id
    }

    pub fn entity(&self, id: EntityId) -> Option<&dyn Entity> {
        self.entities.get(id.0).map(|e| e.as_ref())
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut (dyn Entity + 'static)> {
        self.entities.get_mut(id.0).map(|e| e.as_mut())
    }

    pub fn len(&self) -> usize { self.entities.len() }
    pub fn is_empty(&self) -> bool { self.entities.is_empty() }
    pub fn tick(&self) -> u64 { self.tick }

    /// One simulation tick: scroll, update every entity, then move the
    /// culled entities inside the camera window to their screen slots.
    pub fn update(&mut self, controls: Controls) {
        self.tick += 1;
        self.level.update(&controls);

        let ctx = TickContext { controls, camera: &self.level.camera, tick: self.tick };
        for entity in self.entities.iter_mut() {
            entity.update(&ctx);
        }

        for id in self.in_view() {
            let entity = &mut self.entities[id.0];
            let screen = self.level.camera.to_screen(entity.level_coords());
            entity.set_x(screen.x);
            entity.set_y(screen.y);
        }
    }

    /// Culled entities whose level coords are inside the camera window, in
    /// list order. The entity map narrows the search to cells overlapping
    /// the view; entities it does not hold are checked directly.
    fn in_view(&self) -> Vec<EntityId> {
        let camera = &self.level.camera;
        let mut ids = self.level.entities_near_view();
        ids.extend(self.unmapped.iter().copied());
        ids.retain(|id| {
            self.entities
                .get(id.0)
                .is_some_and(|e| !e.always_visible() && camera.contains(e.level_coords()))
        });
        ids.sort();
        ids.dedup();
        ids
    }

    /// Entities to draw this frame, in list order.
    pub fn visible(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self
            .entities
            .iter()
            .enumerate()
            .filter(|(_, e)| e.always_visible())
            .map(|(i, _)| EntityId(i))
            .collect();
        ids.extend(self.in_view());
        ids.sort();
        ids
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.level.draw(canvas);
        for id in self.visible() {
            self.entities[id.0].draw(canvas);
        }
    }
}

impl Scene for World {
    fn on_enter(&mut self, ctx: &mut SceneContext<'_>) {
        log::info!(
            "entering level {}x{} px, {} entities",
            self.level.grid.width(),
            self.level.grid.height(),
            self.entities.len()
        );
        if let Some(name) = &self.music {
            ctx.audio.play(name);
        }
    }

    fn update(&mut self, ctx: &mut SceneContext<'_>) -> SceneAction {
        if ctx.actions.is_pressed(Action::Quit, ctx.input) {
            return SceneAction::Quit;
        }
        if ctx.debug && ctx.actions.is_pressed(Action::ToggleDebug, ctx.input) {
            self.level.debug = !self.level.debug;
            log::debug!("tile grid overlay {}", if self.level.debug { "on" } else { "off" });
        }
        self.update(Controls::from_input(ctx.input, ctx.actions));
        SceneAction::None
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        World::draw(self, canvas);
    }
}
