use std::collections::HashMap;

use anyhow::Context;
use glam::IVec2;
use rand::Rng;

use crate::entity::EntityId;
use crate::geometry::world_to_cell;
use crate::level::tile::{Tile, TileId, TileSet};

/// Column-major cell index shared by the tile layer and the entity map.
fn packed_index(cell: IVec2, cols: i32, rows: i32) -> Option<usize> {
    if cell.x < 0 || cell.y < 0 || cell.x >= cols || cell.y >= rows {
        return None;
    }
    Some((cell.x * rows + cell.y) as usize)
}

// ── TileGrid ─────────────────────────────────────────────────────────────────

/// Layered tile map over a `tile_size`-aligned grid.
///
/// Each cell holds an ordered stack of tiles; index 0 is drawn first. Tiles
/// are interned in a palette so a cell stores small ids, not copies.
/// Lookups are by world pixel and floor to the containing cell; anything
/// outside the map is an empty stack.
#[derive(Clone, Debug, PartialEq)]
pub struct TileGrid {
    tile_size: i32,
    cols: i32,
    rows: i32,
    palette: Vec<Tile>,
    interned: HashMap<Tile, TileId>,
    cells: Vec<Vec<TileId>>,
}

impl TileGrid {
    /// An empty grid covering `[0, width) × [0, height)` world pixels.
    pub fn new(width: i32, height: i32, tile_size: i32) -> Self {
        let tile_size = tile_size.max(1);
        let cols = (width.max(0) + tile_size - 1) / tile_size;
        let rows = (height.max(0) + tile_size - 1) / tile_size;
        Self {
            tile_size,
            cols,
            rows,
            palette: Vec::new(),
            interned: HashMap::new(),
            cells: vec![Vec::new(); (cols * rows) as usize],
        }
    }

    /// Procedurally fill a grid: every cell gets `tileset.base`, then the
    /// overlay and decoration layers are rolled independently.
    ///
    /// Cells are visited column by column and each cell always draws two
    /// samples from `rng`, so the same seed yields the same map.
    pub fn generate<R: Rng + ?Sized>(
        width: i32,
        height: i32,
        tile_size: i32,
        tileset: &TileSet,
        rng: &mut R,
    ) -> anyhow::Result<Self> {
        let mut grid = Self::new(width, height, tile_size);
        let base = grid.add_tile(tileset.base.clone())?;
        let overlay = grid.add_tile(tileset.overlay.clone())?;
        let decoration = grid.add_tile(tileset.decoration.clone())?;
        let overlay_p = tileset.overlay_chance.clamp(0.0, 1.0);
        let decoration_p = tileset.decoration_chance.clamp(0.0, 1.0);

        for col in 0..grid.cols {
            for row in 0..grid.rows {
                let world = IVec2::new(col, row) * grid.tile_size;
                grid.push_layer(world, base);
                let with_overlay = rng.gen_bool(overlay_p);
                let with_decoration = rng.gen_bool(decoration_p);
                if with_overlay {
                    grid.push_layer(world, overlay);
                }
                if with_decoration {
                    grid.push_layer(world, decoration);
                }
            }
        }
        Ok(grid)
    }

    pub fn tile_size(&self) -> i32 { self.tile_size }
    pub fn cols(&self) -> i32 { self.cols }
    pub fn rows(&self) -> i32 { self.rows }
    /// Map width in world pixels.
    pub fn width(&self) -> i32 { self.cols * self.tile_size }
    /// Map height in world pixels.
    pub fn height(&self) -> i32 { self.rows * self.tile_size }

    /// Intern `tile` in the palette, reusing an equal entry if present.
    /// Fails once the palette holds as many tiles as a [`TileId`] can name.
    pub fn add_tile(&mut self, tile: Tile) -> anyhow::Result<TileId> {
        if let Some(id) = self.interned.get(&tile) {
            return Ok(*id);
        }
        let id = u16::try_from(self.palette.len())
            .map(TileId)
            .ok()
            .with_context(|| format!("tile palette is full, cannot add '{}'", tile.name))?;
        self.interned.insert(tile.clone(), id);
        self.palette.push(tile);
        Ok(id)
    }

    pub fn palette_len(&self) -> usize { self.palette.len() }

    pub fn tile(&self, id: TileId) -> &Tile {
        &self.palette[id.0 as usize]
    }

    /// Put `id` on top of the stack of the cell containing `world`.
    /// Returns false when `world` is outside the map.
    pub fn push_layer(&mut self, world: IVec2, id: TileId) -> bool {
        match self.index_of(world) {
            Some(i) => {
                self.cells[i].push(id);
                true
            }
            None => false,
        }
    }

    /// Tile ids stacked at the cell containing `world`, bottom first.
    pub fn layers(&self, world: IVec2) -> &[TileId] {
        match self.index_of(world) {
            Some(i) => &self.cells[i],
            None => &[],
        }
    }

    /// Tiles stacked at the cell containing `world`, bottom first.
    pub fn cell(&self, world: IVec2) -> impl Iterator<Item = &Tile> + '_ {
        self.layers(world).iter().map(move |id| self.tile(*id))
    }

    fn index_of(&self, world: IVec2) -> Option<usize> {
        packed_index(world_to_cell(world, self.tile_size), self.cols, self.rows)
    }
}

// ── EntityMap ────────────────────────────────────────────────────────────────

/// Which entity sits in which grid cell. One entity per cell; the entity
/// itself lives in the world's entity list.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityMap {
    tile_size: i32,
    cols: i32,
    rows: i32,
    cells: Vec<Option<EntityId>>,
}

impl EntityMap {
    /// An empty map with the same cell layout as `grid`.
    pub fn matching(grid: &TileGrid) -> Self {
        Self {
            tile_size: grid.tile_size,
            cols: grid.cols,
            rows: grid.rows,
            cells: vec![None; (grid.cols * grid.rows) as usize],
        }
    }

    /// Place `id` in the cell containing `world`, returning the entity it
    /// displaced. Outside the map nothing is stored and `None` is returned.
    pub fn insert(&mut self, world: IVec2, id: EntityId) -> Option<EntityId> {
        let i = self.index_of(world)?;
        self.cells[i].replace(id)
    }

    pub fn remove(&mut self, world: IVec2) -> Option<EntityId> {
        let i = self.index_of(world)?;
        self.cells[i].take()
    }

    pub fn get(&self, world: IVec2) -> Option<EntityId> {
        self.index_of(world).and_then(|i| self.cells[i])
    }

    /// Entities in every cell overlapping the window `[origin, origin+size)`.
    pub fn in_window(&self, origin: IVec2, size: IVec2) -> Vec<EntityId> {
        let first = world_to_cell(origin, self.tile_size).max(IVec2::ZERO);
        let last = world_to_cell(origin + size - IVec2::ONE, self.tile_size)
            .min(IVec2::new(self.cols - 1, self.rows - 1));
        let mut found = Vec::new();
        for col in first.x..=last.x {
            for row in first.y..=last.y {
                if let Some(i) = packed_index(IVec2::new(col, row), self.cols, self.rows) {
                    found.extend(self.cells[i]);
                }
            }
        }
        found
    }

    fn index_of(&self, world: IVec2) -> Option<usize> {
        packed_index(world_to_cell(world, self.tile_size), self.cols, self.rows)
    }
}
