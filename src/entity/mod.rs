//! Things drawn on top of the tile map.
//!
//! Every kind implements [`Entity`] on its own state; the frame driver only
//! sees `Box<dyn Entity>`. Whether an entity skips camera culling is an
//! explicit attribute ([`Entity::always_visible`]), not a type check.

pub mod effect;
pub mod enemy;
pub mod player;
pub mod text;

use glam::{IVec2, Vec2};

pub use effect::{Drift, Effect, Fade, Gravity, Wander};
pub use enemy::Enemy;
pub use player::Player;
pub use text::Text;

use crate::camera::Camera;
use crate::canvas::Canvas;
use crate::input::Controls;

/// Index of an entity in the world's entity list.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub usize);

/// Column/row of the current frame in an entity's sprite sheet.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SpriteCell {
    pub col: u32,
    pub row: u32,
}

/// Everything an entity may read while updating.
#[derive(Clone, Copy, Debug)]
pub struct TickContext<'a> {
    pub controls: Controls,
    /// Camera after this tick's scroll.
    pub camera: &'a Camera,
    pub tick: u64,
}

pub trait Entity {
    /// Issue draw calls at the current screen position. Must not mutate.
    fn draw(&self, canvas: &mut dyn Canvas);
    /// Advance animation, run effects and input, record level coordinates.
    fn update(&mut self, ctx: &TickContext<'_>);
    fn set_x(&mut self, x: f32);
    fn set_y(&mut self, y: f32);
    /// Screen position the next `draw` uses.
    fn position(&self) -> Vec2;
    /// Logical sprite size in source pixels.
    fn size(&self) -> (u32, u32);
    /// Position in world space.
    fn level_coords(&self) -> IVec2;
    /// Drawn regardless of the camera window (the player, HUD text).
    fn always_visible(&self) -> bool {
        false
    }
}
