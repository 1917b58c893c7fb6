//! Color types and utilities

use serde::{Deserialize, Serialize};

/// RGBA color with f32 components (0.0 to 1.0)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const TRANSPARENT: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create from u8 components (0-255)
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create from a packed `0xAARRGGBB` value
    pub fn from_argb(argb: u32) -> Self {
        let [a, r, g, b] = argb.to_be_bytes();
        Self::from_rgba8(r, g, b, a)
    }

    /// Pack into `0xAARRGGBB`
    pub fn to_argb(&self) -> u32 {
        let [r, g, b, a] = self.to_rgba8();
        u32::from_be_bytes([a, r, g, b])
    }

    /// Set alpha and return new color
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { a: alpha, ..self }
    }

    /// Whether anything drawn with this color would be visible
    pub fn is_visible(&self) -> bool {
        self.a > 0.0
    }

    /// Component-wise linear interpolation
    pub fn lerp(self, other: Color, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Convert to u8 array [r, g, b, a]
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
            channel_to_u8(self.a),
        ]
    }
}

impl From<u32> for Color {
    fn from(argb: u32) -> Self {
        Color::from_argb(argb)
    }
}

fn channel_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Interpolate two packed `0xAARRGGBB` colors channel by channel.
///
/// `t` is not clamped; callers that feed eased progress should clamp first.
pub fn lerp_argb(from: u32, to: u32, t: f32) -> u32 {
    let from = from.to_be_bytes();
    let to = to.to_be_bytes();
    let mut out = [0u8; 4];
    for i in 0..4 {
        let a = from[i] as f32;
        let b = to[i] as f32;
        out[i] = (a + (b - a) * t).round().clamp(0.0, 255.0) as u8;
    }
    u32::from_be_bytes(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argb_roundtrip_preserves_channels() {
        let color = Color::from_argb(0xFF3477EB);
        assert_eq!(color.to_rgba8(), [0x34, 0x77, 0xEB, 0xFF]);
        assert_eq!(color.to_argb(), 0xFF3477EB);
    }

    #[test]
    fn test_lerp_argb_endpoints_and_midpoint() {
        let from = 0xFF3477EB;
        let to = 0x003477EB;
        assert_eq!(lerp_argb(from, to, 0.0), from);
        assert_eq!(lerp_argb(from, to, 1.0), to);
        // Only alpha differs: 255 -> 0 halfway is 127.5, rounded to 128
        assert_eq!(lerp_argb(from, to, 0.5) >> 24, 128);
        assert_eq!(lerp_argb(from, to, 0.5) & 0x00FF_FFFF, 0x3477EB);
    }

    #[test]
    fn test_visibility() {
        assert!(Color::BLACK.is_visible());
        assert!(!Color::TRANSPARENT.is_visible());
        assert!(!Color::WHITE.with_alpha(0.0).is_visible());
    }
}
