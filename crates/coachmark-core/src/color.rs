#![forbid(unsafe_code)]

//! Packed RGBA colors.
//!
//! Colors serialize as `#RRGGBB` or `#RRGGBBAA` hex strings so that config
//! files stay readable.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A color packed as `0xRRGGBBAA`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    /// Fully transparent (alpha = 0).
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create an opaque RGB color (alpha = 255).
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create an RGBA color with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Replace the alpha channel with `opacity` in `[0, 1]`.
    #[must_use]
    pub fn with_opacity(self, opacity: f32) -> Self {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::rgba(self.r(), self.g(), self.b(), a)
    }

    /// Scale the existing alpha channel by `factor` in `[0, 1]`.
    #[must_use]
    pub fn fade(self, factor: f32) -> Self {
        let a = (self.a() as f32 * factor.clamp(0.0, 1.0)).round() as u8;
        Self::rgba(self.r(), self.g(), self.b(), a)
    }

    /// Alpha as a fraction in `[0, 1]`.
    #[inline]
    pub fn opacity(self) -> f32 {
        self.a() as f32 / 255.0
    }

    /// Porter-Duff source-over: `self` composited onto `dst`.
    #[must_use]
    pub fn over(self, dst: Self) -> Self {
        let sa = self.a() as u32;
        if sa == 255 {
            return self;
        }
        if sa == 0 {
            return dst;
        }
        let da = dst.a() as u32;
        // out_a = sa + da * (1 - sa), all scaled by 255.
        let out_a = sa * 255 + da * (255 - sa);
        if out_a == 0 {
            return Self::TRANSPARENT;
        }
        let channel = |s: u8, d: u8| -> u8 {
            let num = s as u32 * sa * 255 + d as u32 * da * (255 - sa);
            ((num + out_a / 2) / out_a).min(255) as u8
        };
        Self::rgba(
            channel(self.r(), dst.r()),
            channel(self.g(), dst.g()),
            channel(self.b(), dst.b()),
            ((out_a + 127) / 255).min(255) as u8,
        )
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(text: &str) -> Option<Self> {
        let hex = text.strip_prefix('#').unwrap_or(text);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(hex, 16).ok()?;
        match hex.len() {
            6 => Some(Self((value << 8) | 0xFF)),
            8 => Some(Self(value)),
            _ => None,
        }
    }
}

impl fmt::Debug for PackedRgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PackedRgba({self})")
    }
}

impl fmt::Display for PackedRgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

impl TryFrom<String> for PackedRgba {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value).ok_or_else(|| format!("invalid color {value:?}"))
    }
}

impl From<PackedRgba> for String {
    fn from(value: PackedRgba) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_round_trip() {
        let c = PackedRgba::rgba(1, 2, 3, 4);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (1, 2, 3, 4));
    }

    #[test]
    fn with_opacity_rounds() {
        let c = PackedRgba::BLACK.with_opacity(0.5);
        assert_eq!(c.a(), 128);
        assert_eq!(PackedRgba::BLACK.with_opacity(2.0).a(), 255);
    }

    #[test]
    fn fade_scales_alpha() {
        let c = PackedRgba::rgba(0, 0, 0, 200).fade(0.5);
        assert_eq!(c.a(), 100);
        assert_eq!(PackedRgba::WHITE.fade(0.0).a(), 0);
    }

    #[test]
    fn over_opaque_and_transparent() {
        let red = PackedRgba::rgb(255, 0, 0);
        assert_eq!(red.over(PackedRgba::WHITE), red);
        assert_eq!(PackedRgba::TRANSPARENT.over(red), red);
    }

    #[test]
    fn over_half_black_on_white_is_gray() {
        let half = PackedRgba::rgba(0, 0, 0, 128);
        let out = half.over(PackedRgba::WHITE);
        assert_eq!(out.a(), 255);
        assert!((126..=128).contains(&out.r()));
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(
            PackedRgba::from_hex("#0A0B0C"),
            Some(PackedRgba::rgb(10, 11, 12))
        );
        assert_eq!(
            PackedRgba::from_hex("0a0b0c80"),
            Some(PackedRgba::rgba(10, 11, 12, 128))
        );
        assert_eq!(PackedRgba::from_hex("#abc"), None);
        assert_eq!(PackedRgba::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn serde_as_hex_string() {
        let json = serde_json::to_string(&PackedRgba::rgba(255, 0, 16, 32)).unwrap();
        assert_eq!(json, "\"#FF001020\"");
        let back: PackedRgba = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PackedRgba::rgba(255, 0, 16, 32));
    }
}
