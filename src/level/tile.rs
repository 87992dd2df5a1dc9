use serde::Deserialize;

/// A named rectangle of the level's tileset texture.
///
/// Tiles are created when a level is built and never change afterwards;
/// the same tile value is shared by every cell that shows it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct Tile {
    pub name: String,
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Tile {
    pub fn new(name: &str, x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { name: name.to_string(), x0, y0, x1, y1 }
    }

    pub fn width(&self) -> i32 { self.x1 - self.x0 }
    pub fn height(&self) -> i32 { self.y1 - self.y0 }
}

/// Index into a grid's tile palette.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TileId(pub u16);

/// The three tile roles used by procedural generation and the probability
/// of each optional layer.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TileSet {
    /// Drawn in every cell.
    pub base: Tile,
    /// Second layer, present with probability `overlay_chance`.
    pub overlay: Tile,
    /// Top layer, present with probability `decoration_chance`.
    pub decoration: Tile,
    pub overlay_chance: f64,
    pub decoration_chance: f64,
}

impl Default for TileSet {
    /// Matches the stock overworld sheet drawn by the build script.
    fn default() -> Self {
        Self {
            base: Tile::new("grass", 0, 0, 16, 16),
            overlay: Tile::new("grass2", 16, 0, 32, 16),
            decoration: Tile::new("bush", 32, 0, 48, 16),
            overlay_chance: 0.5,
            decoration_chance: 0.1,
        }
    }
}
