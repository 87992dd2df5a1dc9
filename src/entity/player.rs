use glam::{IVec2, Vec2};

use crate::canvas::{Canvas, SpriteSheet};
use crate::entity::{Effect, Entity, SpriteCell, TickContext};
use crate::geometry::{Rect, to_pixels};

/// Source size of one animation frame in the character sheet.
pub const FRAME_W: u32 = 16;
pub const FRAME_H: u32 = 32;
/// Frames are drawn at twice their source size.
pub const DISPLAY_SCALE: f32 = 2.0;

/// Sheet rows by facing.
pub const ROW_DOWN: u32 = 0;
pub const ROW_RIGHT: u32 = 1;
pub const ROW_UP: u32 = 2;
pub const ROW_LEFT: u32 = 3;

pub const WALK_SPEED: f32 = 4.0;
pub const SPRINT_SPEED: f32 = 8.0;

/// The keyboard-controlled character. Lives in screen space; its level
/// coordinates are the camera origin plus its screen position.
pub struct Player {
    /// Screen position of the sprite's top-left corner.
    pub pos: Vec2,
    /// Pixels per step at the current pace.
    pub speed: f32,
    pub walk_speed: f32,
    pub sprint_speed: f32,
    /// Animation counter, wraps after `frame_limit`.
    pub frame: u32,
    pub frame_limit: u32,
    pub sprite: SpriteCell,
    /// Viewport the player is confined to.
    pub bounds: Vec2,
    level: IVec2,
    sheet: SpriteSheet,
    effects: Vec<Box<dyn Effect<Player>>>,
}

impl Player {
    /// A player standing in the middle of a `bounds`-sized viewport.
    pub fn new(sheet: SpriteSheet, bounds: Vec2) -> Self {
        let size = Vec2::new(FRAME_W as f32, FRAME_H as f32);
        Self {
            pos: (bounds * 0.5 - size * 0.25).floor(),
            speed: WALK_SPEED,
            walk_speed: WALK_SPEED,
            sprint_speed: SPRINT_SPEED,
            frame: 0,
            frame_limit: 3,
            sprite: SpriteCell { col: 1, row: ROW_RIGHT },
            bounds,
            level: IVec2::ZERO,
            sheet,
            effects: Vec::new(),
        }
    }

    pub fn with_speeds(mut self, walk: f32, sprint: f32) -> Self {
        self.walk_speed = walk;
        self.sprint_speed = sprint;
        self.speed = walk;
        self
    }

    pub fn add_effect(&mut self, effect: Box<dyn Effect<Player>>) {
        self.effects.push(effect);
    }

    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }

    /// Largest position that keeps the sprite inside `bounds`.
    ///
    /// Uses the source frame size, not the doubled display size, so at the
    /// right and bottom bounds the drawn sprite overhangs the viewport.
    pub fn max_position(&self) -> Vec2 {
        (self.bounds - Vec2::new(FRAME_W as f32, FRAME_H as f32)).max(Vec2::ZERO)
    }

    /// Take one step in direction `(dx, dy)`, each in `{-1, 0, 1}`.
    ///
    /// Each axis snaps to its bound instead of overshooting. The animation
    /// advances even when the step is blocked, so walking into a wall still
    /// animates. Horizontal facing wins on diagonals.
    pub fn step(&mut self, dx: i32, dy: i32) {
        let dir = Vec2::new(dx.signum() as f32, dy.signum() as f32);
        self.pos = (self.pos + dir * self.speed).clamp(Vec2::ZERO, self.max_position());

        self.frame = (self.frame + 1) % (self.frame_limit + 1);
        self.sprite.col = self.frame;

        if dx != 0 {
            self.sprite.row = if dx > 0 { ROW_RIGHT } else { ROW_LEFT };
        } else if dy != 0 {
            self.sprite.row = if dy > 0 { ROW_DOWN } else { ROW_UP };
        }
    }

    fn run_effects(&mut self) {
        let mut effects = std::mem::take(&mut self.effects);
        for effect in effects.iter_mut() {
            effect.apply(self);
        }
        self.effects = effects;
    }
}

impl Entity for Player {
    fn draw(&self, canvas: &mut dyn Canvas) {
        let src = Rect::new(
            (self.sprite.col * FRAME_W) as f32,
            (self.sprite.row * FRAME_H) as f32,
            FRAME_W as f32,
            FRAME_H as f32,
        );
        let dst = Rect::new(
            self.pos.x,
            self.pos.y,
            FRAME_W as f32 * DISPLAY_SCALE,
            FRAME_H as f32 * DISPLAY_SCALE,
        );
        canvas.copy(self.sheet.texture, src, dst);
    }

    fn update(&mut self, ctx: &TickContext<'_>) {
        self.run_effects();

        self.speed = if ctx.controls.sprint { self.sprint_speed } else { self.walk_speed };
        let moving = ctx.controls.any();
        // Each held key is its own step, so the last held direction in
        // up, down, left, right order sets the facing.
        for dir in ctx.controls.steps() {
            self.step(dir.x, dir.y);
        }

        self.level = ctx.camera.origin() + to_pixels(self.pos);
        if moving {
            log::debug!("player level coords: {},{}", self.level.x, self.level.y);
        }

        // Standing still shows the idle frame.
        if !moving {
            self.frame = 0;
            self.sprite.col = 0;
        }
    }

    fn set_x(&mut self, x: f32) { self.pos.x = x; }
    fn set_y(&mut self, y: f32) { self.pos.y = y; }
    fn position(&self) -> Vec2 { self.pos }
    fn size(&self) -> (u32, u32) { (FRAME_W, FRAME_H) }
    fn level_coords(&self) -> IVec2 { self.level }
    fn always_visible(&self) -> bool { true }
}
