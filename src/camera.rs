use glam::{IVec2, Vec2};

use crate::geometry::in_window;
use crate::input::Controls;

/// Scroll controller: the world-space window currently shown on screen.
///
/// `x`/`y` is the top-left corner in world pixels and is kept inside
/// `[0, x_size] × [0, y_size]` by every mutating method. There is no
/// inertia: while a direction is held the camera moves `scroll_speed`
/// pixels per tick, otherwise it stands still.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub x: i32,
    pub y: i32,
    /// Largest permitted `x`.
    pub x_size: i32,
    /// Largest permitted `y`.
    pub y_size: i32,
    /// Pixels moved per tick while a direction is held.
    pub scroll_speed: i32,
    /// Viewport width in pixels.
    pub view_w: i32,
    /// Viewport height in pixels.
    pub view_h: i32,
}

impl Camera {
    pub fn new(view_w: i32, view_h: i32, x_size: i32, y_size: i32, scroll_speed: i32) -> Self {
        Self {
            x: 0,
            y: 0,
            x_size: x_size.max(0),
            y_size: y_size.max(0),
            scroll_speed: scroll_speed.max(1),
            view_w,
            view_h,
        }
    }

    /// Apply one tick of directional input. Each held key is applied and
    /// clamped in turn (up, down, left, right), so diagonals scroll both axes.
    pub fn update(&mut self, controls: &Controls) {
        let s = self.scroll_speed;
        if controls.up { self.scroll_by(0, -s); }
        if controls.down { self.scroll_by(0, s); }
        if controls.left { self.scroll_by(-s, 0); }
        if controls.right { self.scroll_by(s, 0); }
    }

    /// Move by `(dx, dy)` pixels and clamp to the map bounds.
    pub fn scroll_by(&mut self, dx: i32, dy: i32) {
        self.set_position(self.x.saturating_add(dx), self.y.saturating_add(dy));
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x.clamp(0, self.x_size);
        self.y = y.clamp(0, self.y_size);
    }

    pub fn origin(&self) -> IVec2 { IVec2::new(self.x, self.y) }
    pub fn view_size(&self) -> IVec2 { IVec2::new(self.view_w, self.view_h) }

    /// True when the world point is inside `[x, x+view_w) × [y, y+view_h)`.
    pub fn contains(&self, world: IVec2) -> bool {
        in_window(world, self.origin(), self.view_size())
    }

    /// World pixels to screen pixels.
    pub fn to_screen(&self, world: IVec2) -> Vec2 {
        (world - self.origin()).as_vec2()
    }
}
