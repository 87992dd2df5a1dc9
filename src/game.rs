//! Assembly of the stock game from a [`GameConfig`].

use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::audio::AudioContext;
use crate::camera::Camera;
use crate::canvas::{Color, SpriteSheet, TextureLoader};
use crate::config::{AssetSection, GameConfig};
use crate::entity::{Drift, Enemy, Fade, Player, Text};
use crate::input::Action;
use crate::level::{Level, TileGrid};
use crate::menu::{Menu, MenuAction};
use crate::scene::SceneStack;
use crate::world::World;

/// Name the background track is registered under.
pub const BACKGROUND_MUSIC: &str = "background";

/// Sprite sheets the stock game draws with.
#[derive(Copy, Clone, Debug)]
pub struct Assets {
    pub overworld: SpriteSheet,
    pub character: SpriteSheet,
    pub terminal: SpriteSheet,
}

impl Assets {
    /// Load every sheet, from the configured path when one is set and from
    /// the sheets embedded in the binary otherwise.
    pub fn load(loader: &mut dyn TextureLoader, paths: &AssetSection) -> anyhow::Result<Self> {
        let mut sheet = |path: &Option<std::path::PathBuf>, label: &str, embedded: &[u8]| match path {
            Some(p) => loader.load_texture(p),
            None => loader.load_texture_bytes(label, embedded),
        };
        Ok(Self {
            overworld: sheet(&paths.overworld, "overworld", crate::DEFAULT_OVERWORLD)?,
            character: sheet(&paths.character, "character", crate::DEFAULT_CHARACTER)?,
            terminal: sheet(&paths.terminal, "terminal", crate::DEFAULT_TERMINAL)?,
        })
    }
}

/// Build the level, the player and the configured enemies.
pub fn build_world(config: &GameConfig, assets: &Assets) -> anyhow::Result<World> {
    let lc = &config.level;
    let mut rng = match lc.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let grid = TileGrid::generate(lc.world_width, lc.world_height, lc.tile_size, &lc.tileset, &mut rng)?;
    log::info!("generated {}x{} tile grid", grid.cols(), grid.rows());

    let (view_w, view_h) = (config.window.width as i32, config.window.height as i32);
    let (x_size, y_size) = lc.camera_bounds();
    let camera = Camera::new(view_w, view_h, x_size, y_size, lc.scroll_speed);
    let mut world = World::new(Level::new(grid, camera, assets.overworld.texture));

    let mut player = Player::new(assets.character, Vec2::new(view_w as f32, view_h as f32))
        .with_speeds(config.player.speed, config.player.sprint_speed);
    for effect in &config.player.effects {
        player.add_effect(effect.build());
    }
    world.spawn(Box::new(player));

    for placement in &config.enemies {
        world.spawn(Box::new(Enemy::new(placement.level_coords(), assets.terminal)));
    }
    Ok(world)
}

/// The title screen shown before the level.
pub fn build_menu(config: &GameConfig) -> Menu {
    let (w, h) = (config.window.width as f32, config.window.height as f32);
    let title = config.window.title.to_uppercase();
    let title_size = 40.0;
    let title_x = (w - crate::renderer::font::text_width(&title, title_size)) / 2.0;

    Menu::new(Color::DARK_BLUE, w as i32, h as i32)
        .with_component(Text::new(&title, Vec2::new(title_x, h * 0.3), title_size, Color::WHITE))
        .with_component(
            Text::new("PRESS SPACE", Vec2::new(w / 2.0 - 80.0, h * 0.6), 20.0, Color::WHITE)
                .with_effect(Fade::default()),
        )
        .with_component(
            Text::new("ESC TO QUIT", Vec2::new(0.0, h - 30.0), 10.0, Color::rgba8(180, 180, 180, 255))
                .with_effect(Drift { velocity: Vec2::new(1.0, 0.0), wrap_x: Some((0.0, w)) }),
        )
        .with_mapping(Action::Confirm, MenuAction::Continue)
        .with_mapping(Action::Quit, MenuAction::Quit)
}

/// Load assets and assemble the stock scene stack: title menu, then level.
pub fn build_scenes(
    config: &GameConfig,
    loader: &mut dyn TextureLoader,
    audio: &mut AudioContext,
) -> anyhow::Result<SceneStack> {
    let assets = Assets::load(loader, &config.assets)?;
    let mut world = build_world(config, &assets)?;

    if let Some(path) = &config.assets.background_music {
        audio.load_sound(BACKGROUND_MUSIC, path)?;
        world.music = Some(BACKGROUND_MUSIC.to_string());
    }

    let menu = build_menu(config).with_next(Box::new(world));
    Ok(SceneStack::new(Box::new(menu)))
}
