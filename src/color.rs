//! Color model for Quake-style color codes
//!
//! Colors are kept as normalized `f64` channels in `[0, 1]` so that RGB/HSL
//! conversions round-trip cleanly. Scaling to bytes only happens when a color
//! is rendered (see [`RgbColor::to_u8`] and the `Display` impl).
//!
//! Supports:
//! - RGB <-> HSL conversion (hue as a fraction of the color wheel)
//! - Lightness capping to keep colors legible
//! - Decoding of the 3-digit hex form used by `^xRGB` codes

use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::trace;

/// Error type for strict hex code parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Invalid length (must be exactly 3 hex chars)
    #[error("invalid color length {0}, expected 3 hex digits")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
}

const ONE_THIRD: f64 = 1.0 / 3.0;
const ONE_SIXTH: f64 = 1.0 / 6.0;
const TWO_THIRDS: f64 = 2.0 / 3.0;

/// A color in the RGB space with every channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RgbColor {
    r: f64,
    g: f64,
    b: f64,
}

/// A color in the HSL space.
///
/// Hue is a fraction of the color wheel in `[0, 1)`, not degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct HslColor {
    h: f64,
    s: f64,
    l: f64,
}

/// Clamp a channel into `[0, 1]`, mapping NaN to 0.
fn unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// Wrap a hue into `[0, 1)` using a truncated modulo.
fn wrap_hue(h: f64) -> f64 {
    let mut h = h % 1.0;
    if h < 0.0 {
        h += 1.0;
    }
    // A tiny negative remainder rounds up to exactly 1.0
    if h >= 1.0 {
        0.0
    } else {
        h
    }
}

impl RgbColor {
    pub const BLACK: RgbColor = RgbColor { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: RgbColor = RgbColor { r: 1.0, g: 1.0, b: 1.0 };

    /// Create a color from normalized channels. Out-of-range values are clamped.
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: unit(r),
            g: unit(g),
            b: unit(b),
        }
    }

    /// Create a color from byte channels (0-255).
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
        }
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn g(&self) -> f64 {
        self.g
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    /// Byte-scaled channels, `round(channel * 255)`.
    pub fn to_u8(&self) -> [u8; 3] {
        [to_byte(self.r), to_byte(self.g), to_byte(self.b)]
    }

    /// Convert to HSL.
    ///
    /// Achromatic colors (`r == g == b`, compared exactly) yield `h = 0, s = 0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use qstr::color::RgbColor;
    ///
    /// let hsl = RgbColor::new(0.0, 1.0, 1.0).to_hsl();
    /// assert_eq!((hsl.h(), hsl.s(), hsl.l()), (0.5, 1.0, 0.5));
    /// ```
    pub fn to_hsl(&self) -> HslColor {
        let max_c = self.r.max(self.g).max(self.b);
        let min_c = self.r.min(self.g).min(self.b);
        let l = (min_c + max_c) / 2.0;

        if min_c == max_c {
            return HslColor { h: 0.0, s: 0.0, l };
        }

        let delta = max_c - min_c;
        let s = if l <= 0.5 {
            delta / (max_c + min_c)
        } else {
            delta / (2.0 - max_c - min_c)
        };

        let rc = (max_c - self.r) / delta;
        let gc = (max_c - self.g) / delta;
        let bc = (max_c - self.b) / delta;

        let h = if self.r == max_c {
            bc - gc
        } else if self.g == max_c {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };

        HslColor {
            h: wrap_hue(h / 6.0),
            s,
            l,
        }
    }

    /// Trim the color's lightness into `[floor, ceiling]`.
    ///
    /// Bounds must satisfy `0 <= floor < ceiling <= 1`; anything else returns
    /// the color unchanged. A color already inside the bounds is returned as-is
    /// without an HSL round trip.
    ///
    /// # Examples
    ///
    /// ```
    /// use qstr::color::RgbColor;
    ///
    /// let capped = RgbColor::BLACK.cap_lightness(0.5, 1.0);
    /// assert!(capped.to_hsl().l() >= 0.5);
    ///
    /// // invalid floor
    /// assert_eq!(RgbColor::BLACK.cap_lightness(-1.0, 1.0), RgbColor::BLACK);
    /// ```
    pub fn cap_lightness(&self, floor: f64, ceiling: f64) -> RgbColor {
        // Negated so NaN bounds are rejected too
        if !(floor >= 0.0 && floor < ceiling && ceiling <= 1.0) {
            return *self;
        }

        let hsl = self.to_hsl();
        let l = if hsl.l < floor {
            floor
        } else if hsl.l > ceiling {
            ceiling
        } else {
            return *self;
        };

        trace!(from = hsl.l, to = l, "capped lightness");
        HslColor { l, ..hsl }.to_rgb()
    }
}

impl fmt::Display for RgbColor {
    /// Formats as CSS `rgb(R,G,B)` with byte-scaled channels.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.to_u8();
        write!(f, "rgb({},{},{})", r, g, b)
    }
}

fn to_byte(v: f64) -> u8 {
    (unit(v) * 255.0).round() as u8
}

impl HslColor {
    /// Create an HSL color. Hue is wrapped into `[0, 1)`; saturation and
    /// lightness are clamped into `[0, 1]`.
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: if h.is_finite() { wrap_hue(h) } else { 0.0 },
            s: unit(s),
            l: unit(l),
        }
    }

    pub fn h(&self) -> f64 {
        self.h
    }

    pub fn s(&self) -> f64 {
        self.s
    }

    pub fn l(&self) -> f64 {
        self.l
    }

    /// Convert back to RGB.
    pub fn to_rgb(&self) -> RgbColor {
        if self.s == 0.0 {
            return RgbColor::new(self.l, self.l, self.l);
        }

        let m2 = if self.l <= 0.5 {
            self.l * (1.0 + self.s)
        } else {
            self.l + self.s - (self.l * self.s)
        };
        let m1 = 2.0 * self.l - m2;

        RgbColor::new(
            hue_channel(m1, m2, self.h + ONE_THIRD),
            hue_channel(m1, m2, self.h),
            hue_channel(m1, m2, self.h - ONE_THIRD),
        )
    }
}

impl fmt::Display for HslColor {
    /// Formats as CSS `hsl(deg, s%, l%)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h_deg = (self.h * 360.0).round() as u32 % 360;
        let s_pct = (self.s * 100.0).round() as u32;
        let l_pct = (self.l * 100.0).round() as u32;
        write!(f, "hsl({}, {}%, {}%)", h_deg, s_pct, l_pct)
    }
}

/// Reconstruct one channel from the HSL intermediates.
///
/// Boundaries belong to the region above them: a hue of exactly 1/6 yields `m2`.
fn hue_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let mut hue = hue % 1.0;
    if hue < 0.0 {
        hue += 1.0;
    }

    if hue < ONE_SIXTH {
        return m1 + (m2 - m1) * hue * 6.0;
    }
    if hue < 0.5 {
        return m2;
    }
    if hue < TWO_THIRDS {
        return m1 + (m2 - m1) * (TWO_THIRDS - hue) * 6.0;
    }
    m1
}

/// Convert an RGB color to HSL. See [`RgbColor::to_hsl`].
pub fn rgb_to_hsl(c: RgbColor) -> HslColor {
    c.to_hsl()
}

/// Convert an HSL color to RGB. See [`HslColor::to_rgb`].
pub fn hsl_to_rgb(c: HslColor) -> RgbColor {
    c.to_rgb()
}

/// Clamp a color's lightness. See [`RgbColor::cap_lightness`].
pub fn cap_lightness(c: RgbColor, floor: f64, ceiling: f64) -> RgbColor {
    c.cap_lightness(floor, ceiling)
}

/// Decode the three digits of a `^xRGB` code into a color.
///
/// Each digit is doubled (`4` -> `0x44`) to form a byte. Digits that are not
/// hexadecimal decode to 0 for their channel.
///
/// # Examples
///
/// ```
/// use qstr::color::hex_to_rgb;
///
/// let c = hex_to_rgb('4', '4', '4');
/// assert_eq!(c.to_u8(), [0x44, 0x44, 0x44]);
///
/// // 'z' is not hex, so red is 0
/// assert_eq!(hex_to_rgb('z', 'f', 'f').to_u8(), [0, 255, 255]);
/// ```
pub fn hex_to_rgb(r: char, g: char, b: char) -> RgbColor {
    let channel = |c: char| parse_hex_digit(c).map_or(0, |d| d * 17);
    RgbColor::from_u8(channel(r), channel(g), channel(b))
}

/// Strictly parse a 3-digit hex code such as `"4a8"`, `"^x4a8"` or `"#4a8"`.
///
/// # Errors
///
/// Returns `ColorError` if the code does not contain exactly three hex digits.
pub fn parse_hex_code(s: &str) -> Result<RgbColor, ColorError> {
    let digits = s
        .strip_prefix("^x")
        .or_else(|| s.strip_prefix('#'))
        .unwrap_or(s);

    let chars: Vec<char> = digits.chars().collect();
    if chars.len() != 3 {
        return Err(ColorError::InvalidLength(chars.len()));
    }
    for &c in &chars {
        parse_hex_digit(c)?;
    }

    Ok(hex_to_rgb(chars[0], chars[1], chars[2]))
}

/// Parse a single hex digit (0-9, A-F, a-f) to u8 (0-15)
fn parse_hex_digit(c: char) -> Result<u8, ColorError> {
    match c {
        '0'..='9' => Ok(c as u8 - b'0'),
        'a'..='f' => Ok(c as u8 - b'a' + 10),
        'A'..='F' => Ok(c as u8 - b'A' + 10),
        _ => Err(ColorError::InvalidHex(c)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_hsl(c: RgbColor, h: f64, s: f64, l: f64) {
        let hsl = c.to_hsl();
        assert!(
            (hsl.h() - h).abs() < EPSILON
                && (hsl.s() - s).abs() < EPSILON
                && (hsl.l() - l).abs() < EPSILON,
            "Incorrect HSL for {:?}: expected ({}, {}, {}), got {:?}",
            c,
            h,
            s,
            l,
            hsl
        );
    }

    #[test]
    fn test_hsl_fixtures() {
        assert_hsl(RgbColor::new(0.0, 0.0, 0.0), 0.0, 0.0, 0.0);
        assert_hsl(RgbColor::new(1.0, 0.0, 0.0), 0.0, 1.0, 0.5);
        assert_hsl(RgbColor::new(0.0, 1.0, 0.0), 1.0 / 3.0, 1.0, 0.5);
        assert_hsl(RgbColor::new(0.0, 0.0, 1.0), 2.0 / 3.0, 1.0, 0.5);
        assert_hsl(RgbColor::new(0.0, 1.0, 1.0), 0.5, 1.0, 0.5);
        assert_hsl(RgbColor::new(1.0, 1.0, 0.0), 1.0 / 6.0, 1.0, 0.5);
        assert_hsl(RgbColor::new(1.0, 0.0, 1.0), 5.0 / 6.0, 1.0, 0.5);
        assert_hsl(RgbColor::new(1.0, 1.0, 1.0), 0.0, 0.0, 1.0);
    }

    #[test]
    fn test_magenta_hue_is_not_negative() {
        let hsl = RgbColor::new(1.0, 0.0, 1.0).to_hsl();
        assert!(hsl.h() >= 0.0 && hsl.h() < 1.0);
    }

    #[test]
    fn test_grey_is_exactly_achromatic() {
        for v in [0.0, 0.1, 0.25, 0.5, 0.7333, 1.0] {
            let hsl = RgbColor::new(v, v, v).to_hsl();
            assert_eq!(hsl.s(), 0.0);
            assert_eq!(hsl.h(), 0.0);
            assert_eq!(hsl.l(), v);
        }
    }

    #[test]
    fn test_round_trip() {
        let steps = [0.0, 0.2, 0.4, 0.6, 0.8, 1.0];
        for &r in &steps {
            for &g in &steps {
                for &b in &steps {
                    let c = RgbColor::new(r, g, b);
                    let back = c.to_hsl().to_rgb();
                    assert!(
                        (back.r() - r).abs() < 1e-3
                            && (back.g() - g).abs() < 1e-3
                            && (back.b() - b).abs() < 1e-3,
                        "round trip of {:?} produced {:?}",
                        c,
                        back
                    );
                }
            }
        }
    }

    #[test]
    fn test_hue_channel_boundaries() {
        // Each breakpoint belongs to the region whose condition is `<`
        assert_eq!(hue_channel(0.0, 1.0, ONE_SIXTH), 1.0);
        assert_eq!(hue_channel(0.0, 1.0, 0.5), 1.0 - (TWO_THIRDS - 0.5) * 6.0);
        assert_eq!(hue_channel(0.2, 1.0, TWO_THIRDS), 0.2);
        // Negative hue wraps
        assert_eq!(hue_channel(0.0, 1.0, -0.75), hue_channel(0.0, 1.0, 0.25));
    }

    #[test]
    fn test_capped_low() {
        let capped = RgbColor::WHITE.cap_lightness(0.0, 0.5);
        assert!(capped.to_hsl().l() <= 0.5);
    }

    #[test]
    fn test_capped_mid() {
        let c = RgbColor::from_u8(127, 127, 127);
        // Already in range: returned untouched
        assert_eq!(c.cap_lightness(0.25, 0.75), c);
    }

    #[test]
    fn test_capped_high() {
        let capped = RgbColor::BLACK.cap_lightness(0.5, 1.0);
        assert!(capped.to_hsl().l() >= 0.5);
    }

    #[test]
    fn test_capped_preserves_hue() {
        let dark_red = RgbColor::from_u8(0x44, 0, 0);
        let capped = dark_red.cap_lightness(0.5, 1.0);
        let hsl = capped.to_hsl();
        assert!((hsl.l() - 0.5).abs() < EPSILON);
        assert!(hsl.h().abs() < EPSILON);
        assert_eq!(capped.to_u8(), [255, 0, 0]);
    }

    #[test]
    fn test_capped_invalid_bounds() {
        let c = RgbColor::new(0.3, 0.6, 0.9);
        assert_eq!(c.cap_lightness(-1.0, 1.0), c);
        assert_eq!(c.cap_lightness(0.0, 1.5), c);
        assert_eq!(c.cap_lightness(0.6, 0.6), c);
        assert_eq!(c.cap_lightness(0.8, 0.2), c);
        assert_eq!(c.cap_lightness(f64::NAN, 1.0), c);
        assert_eq!(c.cap_lightness(0.0, 1.0), c);
    }

    #[test]
    fn test_hex_to_rgb() {
        let c = hex_to_rgb('4', '4', '4');
        let expected = 0x44 as f64 / 255.0;
        assert!((c.r() - expected).abs() < EPSILON);
        assert!((c.g() - expected).abs() < EPSILON);
        assert!((c.b() - expected).abs() < EPSILON);
        assert!((c.r() - 0.2667).abs() < 1e-4);
    }

    #[test]
    fn test_hex_to_rgb_case_insensitive() {
        assert_eq!(hex_to_rgb('F', 'a', '0'), hex_to_rgb('f', 'A', '0'));
        assert_eq!(hex_to_rgb('f', 'a', '0').to_u8(), [255, 170, 0]);
    }

    #[test]
    fn test_hex_to_rgb_invalid_digit_is_zero() {
        assert_eq!(hex_to_rgb('g', '?', 'é'), RgbColor::BLACK);
    }

    #[test]
    fn test_parse_hex_code() {
        assert_eq!(parse_hex_code("f00"), Ok(RgbColor::new(1.0, 0.0, 0.0)));
        assert_eq!(parse_hex_code("^xf00"), Ok(RgbColor::new(1.0, 0.0, 0.0)));
        assert_eq!(parse_hex_code("#0f0"), Ok(RgbColor::new(0.0, 1.0, 0.0)));
        assert_eq!(parse_hex_code("ff"), Err(ColorError::InvalidLength(2)));
        assert_eq!(parse_hex_code("ffff"), Err(ColorError::InvalidLength(4)));
        assert_eq!(parse_hex_code("fgf"), Err(ColorError::InvalidHex('g')));
    }

    #[test]
    fn test_new_clamps_channels() {
        let c = RgbColor::new(-0.5, 2.0, f64::NAN);
        assert_eq!((c.r(), c.g(), c.b()), (0.0, 1.0, 0.0));
    }

    #[test]
    fn test_hsl_new_wraps_hue() {
        let hsl = HslColor::new(1.25, 1.0, 0.5);
        assert!((hsl.h() - 0.25).abs() < EPSILON);
        let hsl = HslColor::new(-0.25, 1.0, 0.5);
        assert!((hsl.h() - 0.75).abs() < EPSILON);
    }

    #[test]
    fn test_display() {
        assert_eq!(RgbColor::from_u8(51, 102, 255).to_string(), "rgb(51,102,255)");
        assert_eq!(RgbColor::new(1.0, 0.0, 0.0).to_hsl().to_string(), "hsl(0, 100%, 50%)");
    }

    #[test]
    fn test_display_hue_near_full_turn() {
        assert_eq!(HslColor::new(0.9999, 1.0, 0.5).to_string(), "hsl(0, 100%, 50%)");
        assert_eq!(HslColor::new(0.998, 1.0, 0.5).to_string(), "hsl(359, 100%, 50%)");
    }

    #[test]
    fn test_to_u8_rounds() {
        // 0.5 * 255 = 127.5 rounds up, where truncation would give 127
        assert_eq!(RgbColor::new(0.5, 0.5, 0.5).to_u8(), [128, 128, 128]);
    }
}
