use std::path::Path;

use glam::Vec2;

use crate::geometry::Rect;

// ── Color ──────────────────────────────────────────────────────────────────

/// Linear RGBA colour, each channel in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const WHITE: Self = Self([1.0, 1.0, 1.0, 1.0]);
    pub const BLACK: Self = Self([0.0, 0.0, 0.0, 1.0]);
    pub const DARK_BLUE: Self = Self([0.0, 0.1, 0.4, 1.0]);
    /// Faint red used for the debug tile grid.
    pub const GRID: Self = Self([100.0 / 255.0, 0.0, 0.0, 100.0 / 255.0]);

    /// Build a colour from 8-bit channels.
    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0])
    }

    pub fn alpha(&self) -> f32 { self.0[3] }

    pub fn with_alpha(mut self, a: f32) -> Self {
        self.0[3] = a.clamp(0.0, 1.0);
        self
    }
}

// ── Textures ───────────────────────────────────────────────────────────────

/// Opaque handle to a texture owned by a [`Canvas`] implementation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// A loaded texture together with its pixel dimensions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SpriteSheet {
    pub texture: TextureId,
    pub width: u32,
    pub height: u32,
}

/// Loads images into GPU textures. Called only during setup; any error is
/// fatal to the caller.
pub trait TextureLoader {
    fn load_texture(&mut self, path: &Path) -> anyhow::Result<SpriteSheet>;
    fn load_texture_bytes(&mut self, label: &str, bytes: &[u8]) -> anyhow::Result<SpriteSheet>;
}

// ── Canvas ─────────────────────────────────────────────────────────────────

/// The drawing surface everything in the engine renders through.
///
/// Calls are recorded in submission order; later calls draw on top.
pub trait Canvas {
    fn set_draw_color(&mut self, color: Color);
    /// Discard everything drawn so far and fill with the current draw colour.
    fn clear(&mut self);
    /// Copy `src` (texture pixels) of `texture` into `dst` (screen pixels),
    /// scaling as needed.
    fn copy(&mut self, texture: TextureId, src: Rect, dst: Rect);
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color);
    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, color: Color);
    /// Hand the finished frame to the display.
    fn present(&mut self);
}

// ── RecordingCanvas ────────────────────────────────────────────────────────

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Copy { texture: TextureId, src: Rect, dst: Rect },
    Line { from: Vec2, to: Vec2, color: Color },
    Text { text: String, pos: Vec2, size: f32, color: Color },
}

/// Headless canvas that records every call. Used by the tests and handy for
/// inspecting a frame without a GPU.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub commands: Vec<DrawCommand>,
    pub presented: usize,
    draw_color: Option<Color>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// All texture copies in submission order as `(texture, src, dst)`.
    pub fn copies(&self) -> Vec<(TextureId, Rect, Rect)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Copy { texture, src, dst } => Some((*texture, *src, *dst)),
                _ => None,
            })
            .collect()
    }

    pub fn lines(&self) -> Vec<(Vec2, Vec2)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn set_draw_color(&mut self, color: Color) {
        self.draw_color = Some(color);
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(self.draw_color.unwrap_or(Color::BLACK)));
    }

    fn copy(&mut self, texture: TextureId, src: Rect, dst: Rect) {
        self.commands.push(DrawCommand::Copy { texture, src, dst });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text { text: text.to_string(), pos, size, color });
    }

    fn present(&mut self) {
        self.presented += 1;
    }
}
