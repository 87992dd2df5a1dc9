use glam::{IVec2, Vec2};

use crate::canvas::{Canvas, SpriteSheet};
use crate::entity::{Entity, SpriteCell, TickContext};
use crate::geometry::Rect;

pub const FRAME_SIZE: u32 = 32;

/// A stationary, animated object placed on the map (the terminal).
///
/// Its level coordinates are fixed; the frame driver moves its screen
/// position with `set_x`/`set_y` whenever it is near the camera.
pub struct Enemy {
    /// Screen position, set from outside each tick it is in view.
    pub pos: Vec2,
    pub frame: u32,
    pub frame_limit: u32,
    pub sprite: SpriteCell,
    level: IVec2,
    sheet: SpriteSheet,
}

impl Enemy {
    pub fn new(level: IVec2, sheet: SpriteSheet) -> Self {
        Self {
            pos: level.as_vec2(),
            frame: 0,
            frame_limit: 1,
            sprite: SpriteCell::default(),
            level,
            sheet,
        }
    }
}

impl Entity for Enemy {
    fn draw(&self, canvas: &mut dyn Canvas) {
        let s = FRAME_SIZE as f32;
        let src = Rect::new(self.sprite.col as f32 * s, self.sprite.row as f32 * s, s, s);
        canvas.copy(self.sheet.texture, src, Rect::new(self.pos.x, self.pos.y, s, s));
    }

    fn update(&mut self, _ctx: &TickContext<'_>) {
        self.frame = (self.frame + 1) % (self.frame_limit + 1);
        self.sprite.col = (self.sprite.col + 1) % (self.frame_limit + 1);
    }

    fn set_x(&mut self, x: f32) { self.pos.x = x; }
    fn set_y(&mut self, y: f32) { self.pos.y = y; }
    fn position(&self) -> Vec2 { self.pos }
    fn size(&self) -> (u32, u32) { (FRAME_SIZE, FRAME_SIZE) }
    fn level_coords(&self) -> IVec2 { self.level }
}
