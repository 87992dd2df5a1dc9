use glam::IVec2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tilescroll::entity::EntityId;
use tilescroll::level::{EntityMap, Tile, TileGrid, TileSet};

fn tileset() -> TileSet {
    TileSet::default()
}

#[test]
fn test_generate_covers_every_cell_with_base_first() {
    let mut rng = StdRng::seed_from_u64(1);
    let grid = TileGrid::generate(800, 600, 32, &tileset(), &mut rng).unwrap();
    assert_eq!(grid.cols(), 25);
    assert_eq!(grid.rows(), 19);

    for col in 0..grid.cols() {
        for row in 0..grid.rows() {
            let tiles: Vec<&Tile> = grid.cell(IVec2::new(col * 32, row * 32)).collect();
            assert!((1..=3).contains(&tiles.len()));
            assert_eq!(tiles[0].name, "grass");
        }
    }
}

#[test]
fn test_generate_layer_order() {
    let set = TileSet { overlay_chance: 1.0, decoration_chance: 1.0, ..tileset() };
    let mut rng = StdRng::seed_from_u64(3);
    let grid = TileGrid::generate(64, 64, 32, &set, &mut rng).unwrap();
    let names: Vec<&str> = grid.cell(IVec2::new(40, 10)).map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["grass", "grass2", "bush"]);
}

#[test]
fn test_generate_zero_chances_is_base_only() {
    let set = TileSet { overlay_chance: 0.0, decoration_chance: 0.0, ..tileset() };
    let mut rng = StdRng::seed_from_u64(3);
    let grid = TileGrid::generate(128, 128, 32, &set, &mut rng).unwrap();
    for x in (0..128).step_by(32) {
        for y in (0..128).step_by(32) {
            assert_eq!(grid.layers(IVec2::new(x, y)).len(), 1);
        }
    }
}

#[test]
fn test_generate_same_seed_same_map() {
    let a = TileGrid::generate(640, 480, 32, &tileset(), &mut StdRng::seed_from_u64(42)).unwrap();
    let b = TileGrid::generate(640, 480, 32, &tileset(), &mut StdRng::seed_from_u64(42)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_generate_different_seed_differs() {
    let a = TileGrid::generate(640, 480, 32, &tileset(), &mut StdRng::seed_from_u64(1)).unwrap();
    let b = TileGrid::generate(640, 480, 32, &tileset(), &mut StdRng::seed_from_u64(2)).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_lookup_floors_to_cell() {
    let mut grid = TileGrid::new(64, 64, 32);
    let id = grid.add_tile(Tile::new("x", 0, 0, 16, 16)).unwrap();
    assert!(grid.push_layer(IVec2::new(33, 2), id));
    assert_eq!(grid.layers(IVec2::new(32, 0)), &[id]);
    assert_eq!(grid.layers(IVec2::new(63, 31)), &[id]);
    assert!(grid.layers(IVec2::new(0, 0)).is_empty());
}

#[test]
fn test_lookup_outside_map_is_empty() {
    let grid = TileGrid::generate(64, 64, 32, &tileset(), &mut StdRng::seed_from_u64(0)).unwrap();
    assert!(grid.layers(IVec2::new(-1, 0)).is_empty());
    assert!(grid.layers(IVec2::new(64, 0)).is_empty());
    assert_eq!(grid.cell(IVec2::new(0, 1000)).count(), 0);
}

#[test]
fn test_push_layer_outside_map_fails() {
    let mut grid = TileGrid::new(64, 64, 32);
    let id = grid.add_tile(Tile::new("x", 0, 0, 16, 16)).unwrap();
    assert!(!grid.push_layer(IVec2::new(64, 64), id));
}

#[test]
fn test_add_tile_interns() {
    let mut grid = TileGrid::new(32, 32, 32);
    let a = grid.add_tile(Tile::new("grass", 0, 0, 16, 16)).unwrap();
    let b = grid.add_tile(Tile::new("grass", 0, 0, 16, 16)).unwrap();
    let c = grid.add_tile(Tile::new("bush", 32, 0, 48, 16)).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(grid.tile(c).width(), 16);
}

#[test]
fn test_full_palette_rejects_new_tiles() {
    let mut grid = TileGrid::new(32, 32, 32);
    for i in 0..=u16::MAX as i32 {
        grid.add_tile(Tile::new("t", i, 0, i + 16, 16)).unwrap();
    }
    assert_eq!(grid.palette_len(), 65_536);
    assert!(grid.add_tile(Tile::new("t", -1, 0, 15, 16)).is_err());
    // Known tiles still resolve.
    let last = grid.add_tile(Tile::new("t", 65_535, 0, 65_551, 16)).unwrap();
    assert_eq!(last.0, u16::MAX);
}

#[test]
fn test_entity_map_insert_and_window() {
    let grid = TileGrid::new(800, 600, 32);
    let mut map = EntityMap::matching(&grid);
    assert_eq!(map.insert(IVec2::new(100, 100), EntityId(1)), None);
    assert_eq!(map.get(IVec2::new(96, 96)), Some(EntityId(1)));

    assert_eq!(map.in_window(IVec2::ZERO, IVec2::new(200, 200)), vec![EntityId(1)]);
    assert!(map.in_window(IVec2::new(160, 0), IVec2::new(200, 200)).is_empty());
}

#[test]
fn test_entity_map_displaces_and_removes() {
    let grid = TileGrid::new(64, 64, 32);
    let mut map = EntityMap::matching(&grid);
    map.insert(IVec2::new(1, 1), EntityId(0));
    assert_eq!(map.insert(IVec2::new(2, 2), EntityId(5)), Some(EntityId(0)));
    assert_eq!(map.remove(IVec2::new(0, 0)), Some(EntityId(5)));
    assert_eq!(map.get(IVec2::new(0, 0)), None);
    assert_eq!(map.insert(IVec2::new(-5, 0), EntityId(2)), None);
    assert_eq!(map.get(IVec2::new(-5, 0)), None);
}
