//! Color-code extraction from Quake-style strings
//!
//! Two directive shapes are recognized in a single left-to-right pass:
//! - `^N` with `N` an ASCII digit selects a basic palette color
//! - `^xRGB` with three hex digits selects an exact color
//!
//! The `x` after `^` decides the shape. A `^` that does not start a complete
//! code is ordinary text. Codes cannot be escaped.

use regex::{CaptureMatches, Captures, Regex};
use serde::Serialize;
use std::sync::LazyLock;
use tracing::trace;

use crate::color::{hex_to_rgb, RgbColor};
use crate::palette::basic_color;

/// Combined pattern for both directive shapes, so matches never overlap.
static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\^(?:([0-9])|x([0-9A-Fa-f])([0-9A-Fa-f])([0-9A-Fa-f]))")
        .expect("Invalid directive regex pattern")
});

/// A parsed color code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// `^N`, an index into the basic palette (0-9)
    Basic(u8),
    /// `^xRGB`, one hex digit per channel
    Hex(char, char, char),
}

impl Directive {
    /// Resolve the directive to the color it selects.
    pub fn color(&self) -> RgbColor {
        match *self {
            Directive::Basic(index) => basic_color(index).unwrap_or_default(),
            Directive::Hex(r, g, b) => hex_to_rgb(r, g, b),
        }
    }

    pub fn is_hex(&self) -> bool {
        matches!(self, Directive::Hex(..))
    }

    fn from_captures(caps: &Captures<'_>) -> Option<Self> {
        if let Some(digit) = caps.get(1) {
            let index = digit.as_str().bytes().next()? - b'0';
            return Some(Directive::Basic(index));
        }

        let channel = |i: usize| caps.get(i).and_then(|m| m.as_str().chars().next());
        Some(Directive::Hex(channel(2)?, channel(3)?, channel(4)?))
    }
}

/// A piece of a tokenized string, borrowed from the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Literal text between directives (never empty)
    Text(&'a str),
    /// A color code
    Directive(Directive),
}

/// A run of literal text together with the color in effect for it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorSegment {
    pub text: String,
    pub color: RgbColor,
}

impl ColorSegment {
    pub fn new(text: impl Into<String>, color: RgbColor) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

/// Iterator over the tokens of a string. Created by [`tokens`].
pub struct Tokens<'a> {
    input: &'a str,
    matches: CaptureMatches<'static, 'a>,
    cursor: usize,
    pending: Option<Directive>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if let Some(directive) = self.pending.take() {
            return Some(Token::Directive(directive));
        }

        for caps in self.matches.by_ref() {
            let (Some(whole), Some(directive)) = (caps.get(0), Directive::from_captures(&caps))
            else {
                continue;
            };

            let text = &self.input[self.cursor..whole.start()];
            self.cursor = whole.end();

            if text.is_empty() {
                return Some(Token::Directive(directive));
            }
            self.pending = Some(directive);
            return Some(Token::Text(text));
        }

        // Flush the trailing literal run
        if self.cursor < self.input.len() {
            let text = &self.input[self.cursor..];
            self.cursor = self.input.len();
            return Some(Token::Text(text));
        }

        None
    }
}

/// Lazily scan `input` for text runs and directives.
pub fn tokens(input: &str) -> Tokens<'_> {
    Tokens {
        input,
        matches: DIRECTIVE_RE.captures_iter(input),
        cursor: 0,
        pending: None,
    }
}

/// Split a string into literal text runs and directives, in order.
///
/// # Examples
///
/// ```
/// use qstr::tokenizer::{tokenize, Directive, Token};
///
/// let tokens = tokenize("^1red^x0f0green");
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Directive(Directive::Basic(1)),
///         Token::Text("red"),
///         Token::Directive(Directive::Hex('0', 'f', '0')),
///         Token::Text("green"),
///     ]
/// );
///
/// // Incomplete codes stay literal
/// assert_eq!(tokenize("^x12 ^"), vec![Token::Text("^x12 ^")]);
/// ```
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let result: Vec<Token<'_>> = tokens(input).collect();
    trace!(
        tokens = result.len(),
        directives = result.iter().filter(|t| matches!(t, Token::Directive(_))).count(),
        "tokenized input"
    );
    result
}

/// Fold a string into colored text runs.
///
/// Text before the first directive gets `leading_color`. Directives with no
/// text after them produce no segment.
pub fn segments(input: &str, leading_color: RgbColor) -> Vec<ColorSegment> {
    let mut result = Vec::new();
    let mut current = leading_color;

    for token in tokens(input) {
        match token {
            Token::Text(text) => result.push(ColorSegment::new(text, current)),
            Token::Directive(directive) => current = directive.color(),
        }
    }

    result
}
