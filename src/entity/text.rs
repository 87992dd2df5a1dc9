use glam::{IVec2, Vec2};

use crate::canvas::{Canvas, Color};
use crate::entity::{Effect, Entity, TickContext};
use crate::geometry::to_pixels;
use crate::renderer::font;

/// A line of screen-space text, optionally animated by effects.
pub struct Text {
    pub text: String,
    pub pos: Vec2,
    /// Glyph height in pixels.
    pub size: f32,
    pub color: Color,
    level: IVec2,
    effects: Vec<Box<dyn Effect<Text>>>,
}

impl Text {
    pub fn new(text: &str, pos: Vec2, size: f32, color: Color) -> Self {
        Self {
            text: text.to_string(),
            pos,
            size,
            color,
            level: IVec2::ZERO,
            effects: Vec::new(),
        }
    }

    pub fn with_effect(mut self, effect: impl Effect<Text> + 'static) -> Self {
        self.effects.push(Box::new(effect));
        self
    }

    /// Rendered width in pixels.
    pub fn width(&self) -> f32 {
        font::text_width(&self.text, self.size)
    }
}

impl Entity for Text {
    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.draw_text(&self.text, self.pos, self.size, self.color);
    }

    fn update(&mut self, ctx: &TickContext<'_>) {
        let mut effects = std::mem::take(&mut self.effects);
        for effect in effects.iter_mut() {
            effect.apply(self);
        }
        self.effects = effects;
        self.level = ctx.camera.origin() + to_pixels(self.pos);
    }

    fn set_x(&mut self, x: f32) { self.pos.x = x; }
    fn set_y(&mut self, y: f32) { self.pos.y = y; }
    fn position(&self) -> Vec2 { self.pos }
    fn size(&self) -> (u32, u32) { (self.width().ceil() as u32, self.size.ceil() as u32) }
    fn level_coords(&self) -> IVec2 { self.level }
    fn always_visible(&self) -> bool { true }
}
