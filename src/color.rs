//! RGBA colours and hex helpers
//!
//! Obstacle shading relies on [`Color::darken`] being bit-reproducible, so all
//! channel math is done on integers.

use serde::{Deserialize, Serialize};

use crate::error::ColorError;

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Build a colour from a CSS-style alpha in 0..=1
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    /// Parse `#RRGGBB` (case-insensitive). Alpha is opaque.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(hex.to_string()))?;
        if digits.len() != 6 {
            return Err(ColorError::BadLength(hex.to_string()));
        }
        // from_str_radix alone would accept a leading sign
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::BadDigits(hex.to_string()));
        }
        let num =
            u32::from_str_radix(digits, 16).map_err(|_| ColorError::BadDigits(hex.to_string()))?;
        Ok(Self::rgb((num >> 16) as u8, (num >> 8 & 0xFF) as u8, (num & 0xFF) as u8))
    }

    /// Lowercase `#rrggbb` (alpha dropped)
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Subtract `round(2.55 * percent)` from each RGB channel, clamped at 0
    pub fn darken(&self, percent: u32) -> Self {
        let amount = (2.55_f64 * percent as f64).round() as i32;
        let channel = |c: u8| (c as i32 - amount).max(0) as u8;
        Self {
            r: channel(self.r),
            g: channel(self.g),
            b: channel(self.b),
            a: self.a,
        }
    }

    /// Linear 0..1 components for the GPU
    pub fn to_f32_array(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

/// Darken a `#RRGGBB` string, returning lowercase `#rrggbb`
pub fn darken_hex(hex: &str, percent: u32) -> Result<String, ColorError> {
    Ok(Color::from_hex(hex)?.darken(percent).to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_darken_pinned_values() {
        assert_eq!(darken_hex("#FF5733", 20).unwrap(), "#cc2400");
        assert_eq!(darken_hex("#FF5733", 40).unwrap(), "#990000");
        assert_eq!(darken_hex("#33FFF3", 0).unwrap(), "#33fff3");
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert_eq!(
            Color::from_hex("FF5733"),
            Err(ColorError::MissingHash("FF5733".into()))
        );
        assert_eq!(
            Color::from_hex("#FFF"),
            Err(ColorError::BadLength("#FFF".into()))
        );
        assert_eq!(
            Color::from_hex("#GG0000"),
            Err(ColorError::BadDigits("#GG0000".into()))
        );
        assert_eq!(
            Color::from_hex("#+FFFFF"),
            Err(ColorError::BadDigits("#+FFFFF".into()))
        );
        assert_eq!(
            Color::from_hex("#-00001"),
            Err(ColorError::BadDigits("#-00001".into()))
        );
    }

    #[test]
    fn test_with_alpha() {
        let shadow = Color::BLACK.with_alpha(0.3);
        assert_eq!(shadow.a, 77);
        assert_eq!(shadow.to_hex(), "#000000");
    }

    proptest! {
        #[test]
        fn darken_never_brightens(r in any::<u8>(), g in any::<u8>(), b in any::<u8>(), percent in 0u32..=100) {
            let base = Color::rgb(r, g, b);
            let dark = base.darken(percent);
            prop_assert!(dark.r <= base.r && dark.g <= base.g && dark.b <= base.b);
            prop_assert_eq!(dark, base.darken(percent));
        }
    }
}
