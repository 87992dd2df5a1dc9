pub mod audio;
pub mod camera;
pub mod canvas;
pub mod config;
pub mod engine;
pub mod entity;
pub mod game;
pub mod geometry;
pub mod input;
pub mod level;
pub mod menu;
pub mod renderer;
pub mod scene;
pub mod world;

/// Stock 16×16 overworld tiles (grass, tufts, bush), drawn by the build script.
pub const DEFAULT_OVERWORLD: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/overworld.png"));
/// Stock 16×32 character walk cycle: four frames per row, rows down/right/up/left.
pub const DEFAULT_CHARACTER: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/character.png"));
/// Stock two-frame 32×32 terminal.
pub const DEFAULT_TERMINAL: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/terminal.png"));
