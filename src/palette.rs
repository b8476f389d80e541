//! Built-in palette for basic `^N` color codes.
//!
//! The ten entries are chosen to be legible on dark backgrounds, so unlike
//! hex codes they are never lightness-capped when rendered.

use crate::color::RgbColor;

/// Number of entries addressable by a basic `^N` code.
pub const PALETTE_SIZE: usize = 10;

/// Palette index used for text that precedes any color code.
pub const DEFAULT_INDEX: u8 = 7;

/// Byte values for `^0` through `^9`.
const BASIC_PALETTE: [[u8; 3]; PALETTE_SIZE] = [
    [128, 128, 128], // ^0 grey
    [255, 0, 0],     // ^1 red
    [51, 255, 0],    // ^2 green
    [255, 255, 0],   // ^3 yellow
    [51, 102, 255],  // ^4 blue
    [51, 255, 255],  // ^5 cyan
    [255, 51, 102],  // ^6 magenta
    [255, 255, 255], // ^7 white
    [153, 153, 153], // ^8 light grey
    [128, 128, 128], // ^9 grey
];

/// Returns the color for a basic code, or None if `index` is not 0-9.
pub fn basic_color(index: u8) -> Option<RgbColor> {
    BASIC_PALETTE
        .get(usize::from(index))
        .map(|&[r, g, b]| RgbColor::from_u8(r, g, b))
}

/// Color of text that appears before any code.
pub fn default_color() -> RgbColor {
    RgbColor::WHITE
}
