use glam::IVec2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tilescroll::camera::Camera;
use tilescroll::canvas::{Canvas, DrawCommand, RecordingCanvas, TextureId};
use tilescroll::input::Controls;
use tilescroll::level::{Level, Slice, Tile, TileGrid, TileSet, slices};

const TS: i32 = 32;

/// A grid whose cell (c, r) shows source pixels `(c*16, r*16)..+16`, so
/// world pixel `w` maps to source pixel `w / 2` on both axes.
fn identity_grid(width: i32, height: i32) -> TileGrid {
    let mut grid = TileGrid::new(width, height, TS);
    for c in 0..grid.cols() {
        for r in 0..grid.rows() {
            let id = grid.add_tile(Tile::new(&format!("{c},{r}"), c * 16, r * 16, c * 16 + 16, r * 16 + 16)).unwrap();
            grid.push_layer(IVec2::new(c * TS, r * TS), id);
        }
    }
    grid
}

fn level(grid: TileGrid, view: (i32, i32), step: i32) -> Level {
    let camera = Camera::new(view.0, view.1, grid.width(), grid.height(), step);
    Level::new(grid, camera, TextureId(7))
}

#[test]
fn test_slices_aligned() {
    let s = slices(0, 64, 8, 32);
    assert_eq!(s.len(), 8);
    assert_eq!(s[0], Slice { dest: 0, len: 8, tile_origin: 0, offset: 0 });
    assert_eq!(s[4], Slice { dest: 32, len: 8, tile_origin: 32, offset: 0 });
}

#[test]
fn test_slices_split_at_tile_boundary() {
    let s = slices(10, 32, 8, 32);
    assert_eq!(s[0], Slice { dest: 0, len: 8, tile_origin: 0, offset: 10 });
    // Cell 16..24 covers world 26..34 and crosses the boundary at 32.
    assert_eq!(s[2], Slice { dest: 16, len: 6, tile_origin: 0, offset: 26 });
    assert_eq!(s[3], Slice { dest: 22, len: 2, tile_origin: 32, offset: 0 });
}

#[test]
fn test_slices_cover_extent_exactly() {
    for origin in [0, 1, 7, 10, 31, 33, 250] {
        for step in [1, 5, 8, 32, 40] {
            let s = slices(origin, 100, step, TS);
            let mut expected = 0;
            for slice in &s {
                assert_eq!(slice.dest, expected, "gap at origin {origin} step {step}");
                assert!(slice.len > 0);
                assert!(slice.offset + slice.len <= TS, "slice crosses a tile");
                assert_eq!(slice.tile_origin + slice.offset, origin + slice.dest);
                expected += slice.len;
            }
            assert_eq!(expected, 100);
        }
    }
}

#[test]
fn test_left_edge_at_x10_samples_tile_zero() {
    let grid = TileGrid::generate(800, 600, TS, &TileSet::default(), &mut StdRng::seed_from_u64(9)).unwrap();
    let mut lvl = level(grid, (800, 600), 8);
    lvl.camera.set_position(10, 0);

    let mut canvas = RecordingCanvas::new();
    lvl.draw(&mut canvas);

    let (texture, src, dst) = canvas.copies()[0];
    assert_eq!(texture, TextureId(7));
    // 10 display pixels into the grass tile at world 0 is 5 source pixels.
    assert_eq!(src.x, 5.0);
    assert_eq!(src.w, 4.0);
    assert_eq!((dst.x, dst.y, dst.w, dst.h), (0.0, 0.0, 8.0, 8.0));
}

#[test]
fn test_every_pixel_samples_world_under_it() {
    let mut lvl = level(identity_grid(800, 600), (160, 96), 8);
    for (x, y) in [(0, 0), (10, 0), (3, 17), (31, 33), (8, 8), (250, 77), (640, 504)] {
        lvl.camera.set_position(x, y);
        let mut canvas = RecordingCanvas::new();
        lvl.draw(&mut canvas);

        let mut covered = 0.0;
        for (_, src, dst) in canvas.copies() {
            assert_eq!(src.x, (x as f32 + dst.x) / 2.0, "camera ({x},{y}) dst {dst:?}");
            assert_eq!(src.y, (y as f32 + dst.y) / 2.0, "camera ({x},{y}) dst {dst:?}");
            assert_eq!(src.w * 2.0, dst.w);
            assert_eq!(src.h * 2.0, dst.h);
            covered += dst.w * dst.h;
        }
        assert_eq!(covered, 160.0 * 96.0);
    }
}

#[test]
fn test_draw_visits_layers_in_order() {
    let mut grid = TileGrid::new(64, 64, TS);
    let base = grid.add_tile(Tile::new("grass", 0, 0, 16, 16)).unwrap();
    let top = grid.add_tile(Tile::new("bush", 32, 0, 48, 16)).unwrap();
    grid.push_layer(IVec2::ZERO, base);
    grid.push_layer(IVec2::ZERO, top);
    let lvl = level(grid, (8, 8), 8);

    let mut canvas = RecordingCanvas::new();
    lvl.draw(&mut canvas);
    let xs: Vec<f32> = canvas.copies().iter().map(|(_, src, _)| src.x).collect();
    assert_eq!(xs, vec![0.0, 32.0]);
}

#[test]
fn test_draw_skips_cells_outside_map() {
    let mut lvl = level(identity_grid(64, 64), (128, 64), 32);
    lvl.camera.x_size = 1000;
    lvl.camera.set_position(32, 0);
    let mut canvas = RecordingCanvas::new();
    lvl.draw(&mut canvas);
    // Only the one on-map column remains visible.
    assert_eq!(canvas.copies().len(), 2);
}

#[test]
fn test_debug_grid_is_world_aligned() {
    let mut lvl = level(identity_grid(800, 600), (128, 64), 8);
    lvl.debug = true;
    lvl.camera.set_position(10, 0);

    let mut canvas = RecordingCanvas::new();
    lvl.draw(&mut canvas);

    let verticals: Vec<f32> = canvas
        .lines()
        .iter()
        .filter(|(from, to)| from.x == to.x)
        .map(|(from, _)| from.x)
        .collect();
    assert_eq!(verticals, vec![22.0, 54.0, 86.0, 118.0]);

    let horizontals = canvas.lines().iter().filter(|(from, to)| from.y == to.y).count();
    assert_eq!(horizontals, 2);
}

#[test]
fn test_no_grid_without_debug() {
    let lvl = level(identity_grid(128, 128), (64, 64), 8);
    let mut canvas = RecordingCanvas::new();
    lvl.draw(&mut canvas);
    assert!(canvas.lines().is_empty());
}

#[test]
fn test_level_update_scrolls_camera() {
    let mut lvl = level(identity_grid(800, 600), (200, 200), 8);
    lvl.update(&Controls::DOWN);
    assert_eq!(lvl.camera.origin(), IVec2::new(0, 8));
}

#[test]
fn test_clear_resets_recording() {
    let lvl = level(identity_grid(64, 64), (64, 64), 32);
    let mut canvas = RecordingCanvas::new();
    lvl.draw(&mut canvas);
    canvas.clear();
    assert!(matches!(canvas.commands.as_slice(), [DrawCommand::Clear(_)]));
}
