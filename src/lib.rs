//! qstr - Library for rendering Quake-style color-coded strings
//!
//! Game chat and player names embed color codes: `^N` picks one of ten
//! palette colors and `^xRGB` gives an exact color with one hex digit per
//! channel. This library provides functionality to:
//! - Strip codes to get plain text
//! - Render nested-span HTML, with hex colors lightness-capped for legibility
//! - Split strings into colored segments for custom renderers
//! - Convert colors between RGB and HSL
//!
//! Every rendering function is total: malformed codes are kept as text and
//! invalid hex digits decode to 0.
//!
//! # Examples
//!
//! ```
//! use qstr::{color_parts, stripped, to_html};
//!
//! assert_eq!(stripped("^1Anti^x4f4body"), "Antibody");
//! assert_eq!(
//!     to_html("^1hi"),
//!     "<span style=\"color:rgb(255,0,0)\">hi</span>"
//! );
//! assert_eq!(color_parts("^2go").len(), 1);
//! ```

pub mod cli;
pub mod color;
pub mod config;
pub mod decode;
pub mod escape;
pub mod palette;
pub mod renderer;
pub mod tokenizer;

pub use color::{cap_lightness, hex_to_rgb, hsl_to_rgb, rgb_to_hsl, HslColor, RgbColor};
pub use renderer::{color_parts, stripped, to_html, RenderOptions, Renderer};
pub use tokenizer::ColorSegment;
