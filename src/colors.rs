//! Color space conversions for status line themes.
//!
//! Provides:
//! - RGB color representation parsed from and formatted as `#RRGGBB`
//! - HLS conversion (hue, lightness, saturation, in that order, each in `[0, 1]`)
//! - Triadic color derivation
//! - Integration with owo-colors for terminal swatches
//!
//! Formatting always truncates float channels toward zero and emits
//! uppercase hex digits.

use std::fmt;

use crate::error::{StatuslineError, StatuslineResult};

/// A color in hue/lightness/saturation order.
///
/// The component order is HLS rather than HSL; constructors and accessors
/// keep it that way so values can be passed around without reordering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hls {
    pub h: f64,
    pub l: f64,
    pub s: f64,
}

impl Hls {
    #[inline]
    pub const fn new(h: f64, l: f64, s: f64) -> Self {
        Self { h, l, s }
    }
}

/// An opaque 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from channels in `[0, 1]`, scaling by 255 and truncating.
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        Self::rgb(unit_to_byte(r), unit_to_byte(g), unit_to_byte(b))
    }

    /// Parse six hex digits, with or without a leading `#`.
    pub fn from_hex(hex: &str) -> StatuslineResult<Self> {
        let offset = usize::from(hex.starts_with('#'));
        let digits = &hex[offset..];

        if digits.len() != 6 {
            return Err(StatuslineError::invalid_color(
                hex,
                (0, hex.len()),
                format!("expected 6 hex digits, found {}", digits.len()),
            )
            .into());
        }

        if let Some((idx, ch)) = digits.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
            return Err(StatuslineError::invalid_color(
                hex,
                (offset + idx, ch.len_utf8()),
                format!("non-hex digit '{}'", ch),
            )
            .into());
        }

        // Every byte is an ASCII hex digit at this point.
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or_default();
        Ok(Self::rgb(channel(0), channel(2), channel(4)))
    }

    /// Uppercase `#RRGGBB`
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Channels normalized to `[0, 1]`
    pub fn to_unit(&self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    pub fn from_hls(hls: Hls) -> Self {
        let (r, g, b) = hls_to_rgb(hls);
        Self::from_unit(r, g, b)
    }

    pub fn to_hls(&self) -> Hls {
        let (r, g, b) = self.to_unit();
        rgb_to_hls(r, g, b)
    }

    /// Mix with another color by a specified amount (0.0-1.0), rounding each channel
    pub fn mix(&self, other: &Color, amount: f64) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| -> u8 {
            (f64::from(a) * (1.0 - amount) + f64::from(b) * amount)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Self::rgb(
            lerp(self.r, other.r),
            lerp(self.g, other.g),
            lerp(self.b, other.b),
        )
    }

    /// Convert to owo-colors RGB type
    pub fn to_owo_rgb(&self) -> owo_colors::Rgb {
        owo_colors::Rgb(self.r, self.g, self.b)
    }

    pub fn rgb_components(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

impl From<Color> for owo_colors::Rgb {
    fn from(color: Color) -> Self {
        color.to_owo_rgb()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn unit_to_byte(c: f64) -> u8 {
    (c * 255.0).clamp(0.0, 255.0) as u8
}

/// Parse a hex color into HLS.
pub fn hex_to_hls(hex: &str) -> StatuslineResult<Hls> {
    Ok(Color::from_hex(hex)?.to_hls())
}

/// Format an HLS color as uppercase `#RRGGBB`, truncating channels.
pub fn hls_to_hex(hls: Hls) -> String {
    Color::from_hls(hls).to_hex()
}

/// Format channels in `[0, 1]` as `#RRGGBB`, scaling by 255 and truncating.
pub fn rgb_float_to_hex(r: f64, g: f64, b: f64) -> String {
    Color::from_unit(r, g, b).to_hex()
}

/// Format byte channels as `#RRGGBB`.
pub fn rgb_byte_to_hex(r: u8, g: u8, b: u8) -> String {
    Color::rgb(r, g, b).to_hex()
}

/// The two colors whose hues sit 120° and 240° away, in that order.
pub fn triadic_colors(hex: &str) -> StatuslineResult<[String; 2]> {
    let hls = hex_to_hls(hex)?;
    let rotate = |degrees: f64| {
        let h = (hls.h + degrees / 360.0).rem_euclid(1.0);
        hls_to_hex(Hls::new(h, hls.l, hls.s))
    };
    Ok([rotate(120.0), rotate(240.0)])
}

const ONE_THIRD: f64 = 1.0 / 3.0;
const ONE_SIXTH: f64 = 1.0 / 6.0;
const TWO_THIRDS: f64 = 2.0 / 3.0;

/// Standard RGB to HLS transform; all values in `[0, 1]`.
pub fn rgb_to_hls(r: f64, g: f64, b: f64) -> Hls {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let sum = max + min;
    let range = max - min;
    let l = sum / 2.0;

    if range == 0.0 {
        return Hls::new(0.0, l, 0.0);
    }

    let s = if l <= 0.5 {
        range / sum
    } else {
        range / (2.0 - sum)
    };

    let rc = (max - r) / range;
    let gc = (max - g) / range;
    let bc = (max - b) / range;

    let h = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };

    Hls::new((h / 6.0).rem_euclid(1.0), l, s)
}

/// Standard HLS to RGB transform; all values in `[0, 1]`.
pub fn hls_to_rgb(hls: Hls) -> (f64, f64, f64) {
    let Hls { h, l, s } = hls;
    if s == 0.0 {
        return (l, l, l);
    }

    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;

    (
        hue_channel(m1, m2, h + ONE_THIRD),
        hue_channel(m1, m2, h),
        hue_channel(m1, m2, h - ONE_THIRD),
    )
}

fn hue_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < ONE_SIXTH {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < TWO_THIRDS {
        m1 + (m2 - m1) * (TWO_THIRDS - hue) * 6.0
    } else {
        m1
    }
}
