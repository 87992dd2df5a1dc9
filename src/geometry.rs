use glam::{IVec2, Vec2};

/// Axis-aligned rectangle in pixels. Source rects live in texture space,
/// destination rects in screen space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 { self.x + self.w }
    pub fn bottom(&self) -> f32 { self.y + self.h }

    /// True when `(px, py)` lies inside the half-open rect `[x, x+w) × [y, y+h)`.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}

/// Floor `v` to the nearest multiple of `size` (towards negative infinity).
///
/// `snap_down(37, 32) == 32`, `snap_down(-1, 32) == -32`.
pub fn snap_down(v: i32, size: i32) -> i32 {
    v.div_euclid(size) * size
}

/// Sub-cell remainder of `v`, always in `[0, size)`.
pub fn cell_offset(v: i32, size: i32) -> i32 {
    v.rem_euclid(size)
}

/// Convert a world-pixel point to the grid cell containing it.
pub fn world_to_cell(world: IVec2, tile_size: i32) -> IVec2 {
    IVec2::new(world.x.div_euclid(tile_size), world.y.div_euclid(tile_size))
}

/// Half-open containment test for integer world points against a window
/// of `size` pixels starting at `origin`.
pub fn in_window(point: IVec2, origin: IVec2, size: IVec2) -> bool {
    point.x >= origin.x
        && point.x < origin.x + size.x
        && point.y >= origin.y
        && point.y < origin.y + size.y
}

/// Round a float position to whole pixels the way draw calls do (truncation).
pub fn to_pixels(v: Vec2) -> IVec2 {
    IVec2::new(v.x as i32, v.y as i32)
}
