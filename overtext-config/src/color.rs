//! RGBA colour type used for glyph compositing.
//!
//! Components are 8-bit. Multiplication is a normalized component-wise
//! product (`a * b / 255`), addition saturates per component. Glyph images are
//! composited as `coverage(fill) * fill + coverage(stroke) * outline`, so the
//! two weighted layers are summed rather than blended.

use std::fmt;
use std::ops::{Add, Mul};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// An RGBA colour with 8-bit components.
///
/// Serialized as a hex string (`"#RRGGBBAA"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Normalized product of two 8-bit values, rounded to nearest.
#[inline]
fn mul_norm(a: u8, b: u8) -> u8 {
    ((a as u16 * b as u16 + 127) / 255) as u8
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// White with every component, alpha included, set to `alpha`.
    ///
    /// Multiplying a colour by this scales every component by
    /// `alpha / 255`, which is how rasterizer coverage weights a layer.
    pub const fn coverage(alpha: u8) -> Self {
        Self {
            r: alpha,
            g: alpha,
            b: alpha,
            a: alpha,
        }
    }

    /// Scale the colour channels by alpha.
    pub fn premultiplied(self) -> Self {
        Self {
            r: mul_norm(self.r, self.a),
            g: mul_norm(self.g, self.a),
            b: mul_norm(self.b, self.a),
            a: self.a,
        }
    }

    /// Undo [`Rgba::premultiplied`]. Fully transparent pixels map to
    /// [`Rgba::TRANSPARENT`].
    pub fn unpremultiplied(self) -> Self {
        if self.a == 0 {
            return Self::TRANSPARENT;
        }
        let un = |c: u8| -> u8 {
            let v = (c as u32 * 255 + self.a as u32 / 2) / self.a as u32;
            v.min(255) as u8
        };
        Self {
            r: un(self.r),
            g: un(self.g),
            b: un(self.b),
            a: self.a,
        }
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const fn from_array(rgba: [u8; 4]) -> Self {
        Self::new(rgba[0], rgba[1], rgba[2], rgba[3])
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional).
    pub fn from_hex(input: &str) -> Result<Self, ConfigError> {
        let digits = input.trim().trim_start_matches('#');
        let invalid = || ConfigError::InvalidColor(input.to_string());

        if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
            return Err(invalid());
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());

        let r = byte(0)?;
        let g = byte(2)?;
        let b = byte(4)?;
        let a = if digits.len() == 8 { byte(6)? } else { 255 };
        Ok(Self::new(r, g, b, a))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

impl Mul for Rgba {
    type Output = Rgba;

    fn mul(self, rhs: Rgba) -> Rgba {
        Rgba {
            r: mul_norm(self.r, rhs.r),
            g: mul_norm(self.g, rhs.g),
            b: mul_norm(self.b, rhs.b),
            a: mul_norm(self.a, rhs.a),
        }
    }
}

impl Add for Rgba {
    type Output = Rgba;

    fn add(self, rhs: Rgba) -> Rgba {
        Rgba {
            r: self.r.saturating_add(rhs.r),
            g: self.g.saturating_add(rhs.g),
            b: self.b.saturating_add(rhs.b),
            a: self.a.saturating_add(rhs.a),
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgba {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgba {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgba> for String {
    fn from(value: Rgba) -> Self {
        value.to_hex()
    }
}
