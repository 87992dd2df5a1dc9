//! Built-in 3×5 bitmap font.
//!
//! Glyphs are rasterised into a small atlas at startup, so there is no font
//! file to ship. Lowercase letters render as uppercase; characters without a
//! glyph advance the cursor but draw nothing.

use crate::geometry::Rect;

/// Glyph size in atlas pixels.
pub const GLYPH_W: u32 = 3;
pub const GLYPH_H: u32 = 5;
/// Atlas cell size; one pixel of padding right and below each glyph.
const CELL_W: u32 = GLYPH_W + 1;
const CELL_H: u32 = GLYPH_H + 1;
const ATLAS_COLS: u32 = 16;

/// Characters in atlas order.
const CHARSET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789.,:!?-'/() ";

/// One row per entry, most significant of the three bits is the left pixel.
const GLYPHS: [[u8; 5]; 47] = [
    [0b010, 0b101, 0b111, 0b101, 0b101], // A
    [0b110, 0b101, 0b110, 0b101, 0b110], // B
    [0b011, 0b100, 0b100, 0b100, 0b011], // C
    [0b110, 0b101, 0b101, 0b101, 0b110], // D
    [0b111, 0b100, 0b110, 0b100, 0b111], // E
    [0b111, 0b100, 0b110, 0b100, 0b100], // F
    [0b011, 0b100, 0b101, 0b101, 0b011], // G
    [0b101, 0b101, 0b111, 0b101, 0b101], // H
    [0b111, 0b010, 0b010, 0b010, 0b111], // I
    [0b001, 0b001, 0b001, 0b101, 0b010], // J
    [0b101, 0b101, 0b110, 0b101, 0b101], // K
    [0b100, 0b100, 0b100, 0b100, 0b111], // L
    [0b101, 0b111, 0b111, 0b101, 0b101], // M
    [0b110, 0b101, 0b101, 0b101, 0b101], // N
    [0b010, 0b101, 0b101, 0b101, 0b010], // O
    [0b110, 0b101, 0b110, 0b100, 0b100], // P
    [0b010, 0b101, 0b101, 0b110, 0b011], // Q
    [0b110, 0b101, 0b110, 0b101, 0b101], // R
    [0b011, 0b100, 0b010, 0b001, 0b110], // S
    [0b111, 0b010, 0b010, 0b010, 0b010], // T
    [0b101, 0b101, 0b101, 0b101, 0b111], // U
    [0b101, 0b101, 0b101, 0b101, 0b010], // V
    [0b101, 0b101, 0b111, 0b111, 0b101], // W
    [0b101, 0b101, 0b010, 0b101, 0b101], // X
    [0b101, 0b101, 0b010, 0b010, 0b010], // Y
    [0b111, 0b001, 0b010, 0b100, 0b111], // Z
    [0b111, 0b101, 0b101, 0b101, 0b111], // 0
    [0b010, 0b110, 0b010, 0b010, 0b111], // 1
    [0b110, 0b001, 0b010, 0b100, 0b111], // 2
    [0b110, 0b001, 0b010, 0b001, 0b110], // 3
    [0b101, 0b101, 0b111, 0b001, 0b001], // 4
    [0b111, 0b100, 0b110, 0b001, 0b110], // 5
    [0b011, 0b100, 0b111, 0b101, 0b111], // 6
    [0b111, 0b001, 0b010, 0b010, 0b010], // 7
    [0b111, 0b101, 0b111, 0b101, 0b111], // 8
    [0b111, 0b101, 0b111, 0b001, 0b110], // 9
    [0b000, 0b000, 0b000, 0b000, 0b010], // .
    [0b000, 0b000, 0b000, 0b010, 0b100], // ,
    [0b000, 0b010, 0b000, 0b010, 0b000], // :
    [0b010, 0b010, 0b010, 0b000, 0b010], // !
    [0b110, 0b001, 0b010, 0b000, 0b010], // ?
    [0b000, 0b000, 0b111, 0b000, 0b000], // -
    [0b010, 0b010, 0b000, 0b000, 0b000], // '
    [0b001, 0b001, 0b010, 0b100, 0b100], // /
    [0b001, 0b010, 0b010, 0b010, 0b001], // (
    [0b100, 0b010, 0b010, 0b010, 0b100], // )
    [0b000, 0b000, 0b000, 0b000, 0b000], // space
];

fn glyph_index(ch: char) -> Option<u32> {
    let ch = ch.to_ascii_uppercase();
    CHARSET.chars().position(|c| c == ch).map(|i| i as u32)
}

/// Horizontal distance between consecutive characters at glyph height `size`.
pub fn advance(size: f32) -> f32 {
    size * CELL_W as f32 / GLYPH_H as f32
}

/// Width in pixels of `text` drawn at glyph height `size`.
pub fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * advance(size)
}

/// Atlas pixel rectangle of the glyph for `ch`.
pub fn glyph_rect(ch: char) -> Option<Rect> {
    let i = glyph_index(ch)?;
    let x = (i % ATLAS_COLS) * CELL_W;
    let y = (i / ATLAS_COLS) * CELL_H;
    Some(Rect::new(x as f32, y as f32, GLYPH_W as f32, GLYPH_H as f32))
}

/// Lay out `text` starting at `(x, y)`: one `(source, destination)` pair per
/// drawable glyph.
pub fn layout(text: &str, x: f32, y: f32, size: f32) -> Vec<(Rect, Rect)> {
    let scale = size / GLYPH_H as f32;
    let step = advance(size);
    text.chars()
        .enumerate()
        .filter(|(_, ch)| *ch != ' ')
        .filter_map(|(i, ch)| {
            let src = glyph_rect(ch)?;
            let dst = Rect::new(x + i as f32 * step, y, GLYPH_W as f32 * scale, size);
            Some((src, dst))
        })
        .collect()
}

/// Rasterise every glyph as white-on-transparent RGBA8.
/// Returns `(width, height, pixels)`.
pub fn rasterize_atlas() -> (u32, u32, Vec<u8>) {
    let rows = (GLYPHS.len() as u32).div_ceil(ATLAS_COLS);
    let (w, h) = (ATLAS_COLS * CELL_W, rows * CELL_H);
    let mut pixels = vec![0u8; (w * h * 4) as usize];

    for (i, glyph) in GLYPHS.iter().enumerate() {
        let ox = (i as u32 % ATLAS_COLS) * CELL_W;
        let oy = (i as u32 / ATLAS_COLS) * CELL_H;
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_W {
                if bits & (0b100 >> col) != 0 {
                    let p = (((oy + row as u32) * w + ox + col) * 4) as usize;
                    pixels[p..p + 4].copy_from_slice(&[255, 255, 255, 255]);
                }
            }
        }
    }
    (w, h, pixels)
}
