use std::path::{Path, PathBuf};

use anyhow::Context;
use glam::IVec2;
use serde::Deserialize;

use crate::entity::{Effect, Gravity, Player, Wander};
use crate::level::TileSet;

// ── GameConfig ───────────────────────────────────────────────────────────────

/// Everything the stock game reads at startup. Every field has a default,
/// so `{}` (or no file at all) yields the stock game.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowSection,
    pub level: LevelSection,
    pub player: PlayerSection,
    pub enemies: Vec<EnemyPlacement>,
    pub assets: AssetSection,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: WindowSection::default(),
            level: LevelSection::default(),
            player: PlayerSection::default(),
            // The stock terminal.
            enemies: vec![EnemyPlacement { x: 800, y: 160 }],
            assets: AssetSection::default(),
        }
    }
}

impl GameConfig {
    /// Read and parse a JSON config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            anyhow::bail!("window size must be non-zero, got {}x{}", self.window.width, self.window.height);
        }
        if self.window.tick_rate == 0 {
            anyhow::bail!("tick_rate must be at least 1 tick per second");
        }
        if self.level.tile_size <= 0 {
            anyhow::bail!("tile_size must be positive, got {}", self.level.tile_size);
        }
        if self.level.scroll_speed <= 0 {
            anyhow::bail!("scroll_speed must be positive, got {}", self.level.scroll_speed);
        }
        Ok(())
    }
}

// ── Sections ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowSection {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Simulation ticks per second.
    pub tick_rate: u32,
}

impl Default for WindowSection {
    fn default() -> Self {
        Self { title: "tilescroll".to_string(), width: 800, height: 600, tick_rate: 16 }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LevelSection {
    /// Map size in world pixels.
    pub world_width: i32,
    pub world_height: i32,
    pub tile_size: i32,
    pub scroll_speed: i32,
    /// Seed for tile generation; `None` picks one from the OS.
    pub seed: Option<u64>,
    pub tileset: TileSet,
    /// Largest camera x; defaults to the world width.
    pub x_size: Option<i32>,
    /// Largest camera y; defaults to the world height.
    pub y_size: Option<i32>,
}

impl LevelSection {
    /// Camera bounds as `(x_size, y_size)`.
    pub fn camera_bounds(&self) -> (i32, i32) {
        (self.x_size.unwrap_or(self.world_width), self.y_size.unwrap_or(self.world_height))
    }
}

impl Default for LevelSection {
    fn default() -> Self {
        Self {
            world_width: 8000,
            world_height: 6000,
            tile_size: 32,
            scroll_speed: 8,
            seed: None,
            tileset: TileSet::default(),
            x_size: None,
            y_size: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerSection {
    pub speed: f32,
    pub sprint_speed: f32,
    pub effects: Vec<EffectConfig>,
}

impl Default for PlayerSection {
    fn default() -> Self {
        Self {
            speed: crate::entity::player::WALK_SPEED,
            sprint_speed: crate::entity::player::SPRINT_SPEED,
            effects: Vec::new(),
        }
    }
}

/// A player effect as written in the config file:
/// `{ "kind": "wander", "chance": 0.2, "seed": 7 }`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectConfig {
    Wander {
        #[serde(default = "default_wander_chance")]
        chance: f64,
        #[serde(default)]
        seed: u64,
    },
    Gravity { step: f32 },
}

fn default_wander_chance() -> f64 { 0.1 }

impl EffectConfig {
    pub fn build(&self) -> Box<dyn Effect<Player>> {
        match *self {
            EffectConfig::Wander { chance, seed } => Box::new(Wander::new(chance, seed)),
            EffectConfig::Gravity { step } => Box::new(Gravity { step }),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct EnemyPlacement {
    pub x: i32,
    pub y: i32,
}

impl EnemyPlacement {
    pub fn level_coords(&self) -> IVec2 { IVec2::new(self.x, self.y) }
}

/// Optional asset overrides. Missing textures fall back to the sheets
/// embedded in the binary; a path that is set but unreadable is fatal.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssetSection {
    pub overworld: Option<PathBuf>,
    pub character: Option<PathBuf>,
    pub terminal: Option<PathBuf>,
    pub background_music: Option<PathBuf>,
}
