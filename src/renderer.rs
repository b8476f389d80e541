//! Rendering of color-coded strings
//!
//! Three outputs are supported:
//! - stripped plain text with every code removed
//! - HTML with one nested `<span>` per code
//! - colored segments for custom renderers
//!
//! Rendering never fails. Malformed codes are kept as text.

use std::borrow::Cow;
use tracing::trace;

use crate::color::RgbColor;
use crate::decode::Decoder;
use crate::escape::escape_html;
use crate::palette;
use crate::tokenizer::{segments, tokens, ColorSegment, Token};

/// Lightness floor applied to hex colors in HTML output
pub const HEX_LIGHTNESS_FLOOR: f64 = 0.5;

/// Lightness ceiling applied to hex colors in HTML output
pub const HEX_LIGHTNESS_CEILING: f64 = 1.0;

const CLOSE_SPAN: &str = "</span>";

/// Options controlling how strings are rendered
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Color given to text that precedes the first code
    pub leading_color: RgbColor,
    /// Lightness bounds for hex colors in HTML output
    pub hex_lightness_floor: f64,
    pub hex_lightness_ceiling: f64,
    /// Substitutions applied to the input before anything else
    pub decoder: Option<Decoder>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            leading_color: palette::default_color(),
            hex_lightness_floor: HEX_LIGHTNESS_FLOOR,
            hex_lightness_ceiling: HEX_LIGHTNESS_CEILING,
            decoder: None,
        }
    }
}

/// Renders color-coded strings according to a set of [`RenderOptions`].
///
/// # Examples
///
/// ```
/// use qstr::renderer::{RenderOptions, Renderer};
/// use qstr::decode::Decoder;
///
/// let renderer = Renderer::new(RenderOptions {
///     decoder: Some(Decoder::new().with_rule("\u{e000}", "*")),
///     ..RenderOptions::default()
/// });
/// assert_eq!(renderer.stripped("^1\u{e000}star"), "*star");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn prepare<'a>(&self, input: &'a str) -> Cow<'a, str> {
        match &self.options.decoder {
            Some(decoder) => decoder.decode(input),
            None => Cow::Borrowed(input),
        }
    }

    /// Remove every color code, keeping all other text.
    ///
    /// Removing a code can join its neighbours into a new one (`^^11` becomes
    /// `^1`), which is removed as well. The result never contains a code.
    pub fn stripped(&self, input: &str) -> String {
        let input = self.prepare(input);
        let mut out = String::with_capacity(input.len());

        // The buffer never holds a code, so a new one can only end at its tail
        for c in input.chars() {
            out.push(c);
            let code_len = trailing_code_len(out.as_bytes());
            if code_len > 0 {
                out.truncate(out.len() - code_len);
            }
        }

        out
    }

    /// Split into colored text runs.
    pub fn color_parts(&self, input: &str) -> Vec<ColorSegment> {
        segments(&self.prepare(input), self.options.leading_color)
    }

    /// Render as HTML.
    ///
    /// The input is escaped first, then every code opens a
    /// `<span style="color:rgb(R,G,B)">`. Spans are closed together at the end
    /// of the string, so each color stays in effect until the next code.
    /// Hex colors are lightness-capped; palette colors are used as-is.
    pub fn to_html(&self, input: &str) -> String {
        let escaped = escape_html(&self.prepare(input));
        let mut out = String::with_capacity(escaped.len() * 2);
        let mut opened = 0usize;

        for token in tokens(&escaped) {
            match token {
                Token::Text(text) => out.push_str(text),
                Token::Directive(directive) => {
                    let mut color = directive.color();
                    if directive.is_hex() {
                        color = color.cap_lightness(
                            self.options.hex_lightness_floor,
                            self.options.hex_lightness_ceiling,
                        );
                    }
                    out.push_str(&open_span(color));
                    opened += 1;
                }
            }
        }

        out.push_str(&CLOSE_SPAN.repeat(opened));
        trace!(spans = opened, "rendered html");
        out
    }
}

/// Byte length of the color code ending `buf`, or 0 if it does not end in one.
fn trailing_code_len(buf: &[u8]) -> usize {
    match buf {
        [.., b'^', d] if d.is_ascii_digit() => 2,
        [.., b'^', b'x', r, g, b]
            if r.is_ascii_hexdigit() && g.is_ascii_hexdigit() && b.is_ascii_hexdigit() =>
        {
            5
        }
        _ => 0,
    }
}

/// Opening tag for a colored span, e.g. `<span style="color:rgb(255,0,0)">`.
pub fn open_span(color: RgbColor) -> String {
    format!("<span style=\"color:{}\">", color)
}

/// Remove every color code from `input`.
///
/// # Examples
///
/// ```
/// use qstr::stripped;
///
/// assert_eq!(stripped("Anti^x444body"), "Antibody");
/// assert_eq!(stripped("^7Antibody"), "Antibody");
/// ```
pub fn stripped(input: &str) -> String {
    Renderer::default().stripped(input)
}

/// Render `input` as HTML with default options. See [`Renderer::to_html`].
///
/// # Examples
///
/// ```
/// use qstr::to_html;
///
/// assert_eq!(
///     to_html("^1a<b"),
///     "<span style=\"color:rgb(255,0,0)\">a&lt;b</span>"
/// );
/// ```
pub fn to_html(input: &str) -> String {
    Renderer::default().to_html(input)
}

/// Split `input` into colored text runs with default options.
///
/// Text before the first code is white (palette entry 7).
pub fn color_parts(input: &str) -> Vec<ColorSegment> {
    Renderer::default().color_parts(input)
}
