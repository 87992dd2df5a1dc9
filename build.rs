// Draws the stock sprite sheets into OUT_DIR so the binary runs without any
// asset files on disk. Layouts must match the default `TileSet` in `src/level/tile.rs`.

use std::path::Path;

use image::{Rgba, RgbaImage};

const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

fn fill(img: &mut RgbaImage, x0: u32, y0: u32, w: u32, h: u32, color: Rgba<u8>) {
    for y in y0..(y0 + h).min(img.height()) {
        for x in x0..(x0 + w).min(img.width()) {
            img.put_pixel(x, y, color);
        }
    }
}

/// 64×16 overworld: grass (0), grass tufts overlay (16), bush (32).
fn draw_overworld() -> RgbaImage {
    let mut img = RgbaImage::from_pixel(64, 16, CLEAR);

    // Base grass with a cheap dither so scrolling is visible.
    for y in 0..16u32 {
        for x in 0..16u32 {
            let light = (x * 7 + y * 13) % 5 == 0;
            let c = if light { Rgba([0x5C, 0xA8, 0x3C, 0xFF]) } else { Rgba([0x48, 0x94, 0x30, 0xFF]) };
            img.put_pixel(x, y, c);
        }
    }

    // Tufts: a few dark blades on a transparent cell.
    for &(x, y) in &[(3u32, 4u32), (4, 3), (10, 9), (11, 8), (6, 12), (13, 2)] {
        fill(&mut img, 16 + x, y, 1, 3, Rgba([0x2E, 0x6B, 0x1E, 0xFF]));
    }

    // Bush: a round blob with a highlight.
    for y in 0..16u32 {
        for x in 0..16u32 {
            let dx = x as i32 - 8;
            let dy = y as i32 - 9;
            if dx * dx + dy * dy <= 36 {
                let c = if dx < -1 && dy < -1 { Rgba([0x3E, 0x8E, 0x4A, 0xFF]) } else { Rgba([0x1F, 0x5C, 0x2A, 0xFF]) };
                img.put_pixel(32 + x, y, c);
            }
        }
    }
    img
}

/// 64×128 character sheet: 4 columns of 16×32 frames, rows face
/// down (0), right (1), up (2), left (3).
fn draw_character() -> RgbaImage {
    let mut img = RgbaImage::from_pixel(64, 128, CLEAR);
    let skin = Rgba([0xF1, 0xC2, 0x7D, 0xFF]);
    let shirt = Rgba([0x2F, 0x5D, 0xC8, 0xFF]);
    let legs = Rgba([0x3A, 0x2E, 0x26, 0xFF]);
    let eye = Rgba([0x10, 0x10, 0x10, 0xFF]);

    for row in 0..4u32 {
        for col in 0..4u32 {
            let ox = col * 16;
            let oy = row * 32;
            fill(&mut img, ox + 4, oy + 4, 8, 8, skin);
            fill(&mut img, ox + 3, oy + 12, 10, 10, shirt);

            // Legs alternate every other frame.
            let stride = if col % 2 == 0 { 0 } else { 2 };
            fill(&mut img, ox + 4, oy + 22, 3, 8 - stride, legs);
            fill(&mut img, ox + 9, oy + 22, 3, 6 + stride, legs);

            match row {
                0 => {
                    fill(&mut img, ox + 5, oy + 7, 2, 2, eye);
                    fill(&mut img, ox + 9, oy + 7, 2, 2, eye);
                }
                1 => fill(&mut img, ox + 9, oy + 7, 2, 2, eye),
                3 => fill(&mut img, ox + 5, oy + 7, 2, 2, eye),
                _ => {}
            }
        }
    }
    img
}

/// 64×32 terminal sheet: two 32×32 frames, screen lit and dim.
fn draw_terminal() -> RgbaImage {
    let mut img = RgbaImage::from_pixel(64, 32, CLEAR);
    let case = Rgba([0xB8, 0xB4, 0xA8, 0xFF]);
    for frame in 0..2u32 {
        let ox = frame * 32;
        fill(&mut img, ox + 2, 2, 28, 22, case);
        fill(&mut img, ox + 8, 24, 16, 6, case);
        let screen = if frame == 0 { Rgba([0x30, 0xE0, 0x60, 0xFF]) } else { Rgba([0x10, 0x40, 0x20, 0xFF]) };
        fill(&mut img, ox + 5, 5, 22, 16, screen);
    }
    img
}

fn save(dir: &Path, name: &str, img: RgbaImage) {
    let path = dir.join(name);
    if let Err(e) = img.save(&path) {
        panic!("build: could not save {}: {e}", path.display());
    }
}

fn main() {
    let out = std::env::var("OUT_DIR").expect("build: OUT_DIR not set");
    let dir = Path::new(&out);

    save(dir, "overworld.png", draw_overworld());
    save(dir, "character.png", draw_character());
    save(dir, "terminal.png", draw_terminal());

    println!("cargo:rerun-if-changed=build.rs");
}
