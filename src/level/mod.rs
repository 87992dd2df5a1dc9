pub mod grid;
pub mod tile;

use glam::{IVec2, Vec2};

pub use grid::{EntityMap, TileGrid};
pub use tile::{Tile, TileId, TileSet};

use crate::camera::Camera;
use crate::canvas::{Canvas, Color, TextureId};
use crate::entity::EntityId;
use crate::geometry::{Rect, cell_offset, snap_down};
use crate::input::Controls;

/// A run of destination pixels along one axis that samples a single tile.
///
/// `dest..dest+len` on screen shows world pixels
/// `tile_origin+offset .. tile_origin+offset+len`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Slice {
    pub dest: i32,
    pub len: i32,
    pub tile_origin: i32,
    pub offset: i32,
}

/// Cut the axis `[0, extent)` of a viewport starting at world `origin` into
/// draw slices.
///
/// Cells start every `step` pixels. A cell that crosses a tile boundary is
/// split there, so each slice samples exactly one tile. When `origin` is not
/// tile-aligned the first slice is the trailing part of the tile at
/// `origin - offset`: the partial edge tile.
pub fn slices(origin: i32, extent: i32, step: i32, tile_size: i32) -> Vec<Slice> {
    let step = step.max(1);
    let mut out = Vec::with_capacity((extent / step + 2).max(0) as usize);
    let mut cell = 0;
    while cell < extent {
        let cell_end = (cell + step).min(extent);
        let mut dest = cell;
        while dest < cell_end {
            let world = origin + dest;
            let offset = cell_offset(world, tile_size);
            let len = (tile_size - offset).min(cell_end - dest);
            out.push(Slice { dest, len, tile_origin: snap_down(world, tile_size), offset });
            dest += len;
        }
        cell += step;
    }
    out
}

/// Result of [`Level::place_entity`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Placement {
    Placed,
    /// Placed, taking the cell from the given entity.
    Displaced(EntityId),
    OutsideMap,
}

/// A scrollable level: tile layers, entity placement and the camera.
pub struct Level {
    pub grid: TileGrid,
    pub entity_map: EntityMap,
    pub camera: Camera,
    /// Texture the grid's tile rects refer to.
    pub texture: TextureId,
    /// Overlay the tile grid.
    pub debug: bool,
}

impl Level {
    pub fn new(grid: TileGrid, camera: Camera, texture: TextureId) -> Self {
        let entity_map = EntityMap::matching(&grid);
        Self { grid, entity_map, camera, texture, debug: false }
    }

    /// Scroll the camera for one tick of input.
    pub fn update(&mut self, controls: &Controls) {
        self.camera.update(controls);
    }

    /// Record `id` as residing at `level_coords`.
    pub fn place_entity(&mut self, id: EntityId, level_coords: IVec2) -> Placement {
        match self.entity_map.insert(level_coords, id) {
            Some(old) if old != id => {
                log::warn!("entity {id:?} replaces {old:?} at {level_coords}");
                Placement::Displaced(old)
            }
            _ if self.entity_map.get(level_coords) == Some(id) => Placement::Placed,
            _ => Placement::OutsideMap,
        }
    }

    /// Entities whose grid cell overlaps the camera window. Callers still
    /// check exact coordinates with [`Camera::contains`].
    pub fn entities_near_view(&self) -> Vec<EntityId> {
        self.entity_map.in_window(self.camera.origin(), self.camera.view_size())
    }

    /// Render the visible part of the map.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let ts = self.grid.tile_size();
        let step = self.camera.scroll_speed;
        let cols = slices(self.camera.x, self.camera.view_w, step, ts);
        let rows = slices(self.camera.y, self.camera.view_h, step, ts);

        for col in &cols {
            for row in &rows {
                let world = IVec2::new(col.tile_origin, row.tile_origin);
                for tile in self.grid.cell(world) {
                    // Source pixels per world pixel; 0.5 for 16px art on a 32px grid.
                    let sx = tile.width() as f32 / ts as f32;
                    let sy = tile.height() as f32 / ts as f32;
                    let src = Rect::new(
                        tile.x0 as f32 + col.offset as f32 * sx,
                        tile.y0 as f32 + row.offset as f32 * sy,
                        col.len as f32 * sx,
                        row.len as f32 * sy,
                    );
                    let dst = Rect::new(col.dest as f32, row.dest as f32, col.len as f32, row.len as f32);
                    canvas.copy(self.texture, src, dst);
                }
            }
        }

        if self.debug {
            self.draw_grid(canvas);
        }
    }

    /// Lines on every world tile boundary inside the viewport.
    fn draw_grid(&self, canvas: &mut dyn Canvas) {
        let ts = self.grid.tile_size();
        let (w, h) = (self.camera.view_w as f32, self.camera.view_h as f32);

        let mut x = (ts - cell_offset(self.camera.x, ts)) % ts;
        while x < self.camera.view_w {
            canvas.draw_line(Vec2::new(x as f32, 0.0), Vec2::new(x as f32, h), Color::GRID);
            x += ts;
        }
        let mut y = (ts - cell_offset(self.camera.y, ts)) % ts;
        while y < self.camera.view_h {
            canvas.draw_line(Vec2::new(0.0, y as f32), Vec2::new(w, y as f32), Color::GRID);
            y += ts;
        }
    }
}
