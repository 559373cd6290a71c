//! Colour type and blending.

use std::fmt;

/// An RGBA colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully transparent colour.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Build a colour from an RGBA byte quad.
    pub const fn from_rgba(rgba: [u8; 4]) -> Self {
        Self::new(rgba[0], rgba[1], rgba[2], rgba[3])
    }

    /// Convert to RGBA tuple.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Same RGB channels with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Check if the colour is fully transparent.
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Check if the colour is fully opaque.
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Squared Euclidean distance between the RGB channels. Alpha is ignored.
    pub fn distance_squared(self, other: Colour) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Composite `self` over `dst` with straight (non-premultiplied) alpha.
    pub fn over(self, dst: Colour) -> Colour {
        if self.is_opaque() {
            return self;
        }
        if self.is_transparent() {
            return dst;
        }

        let sa = self.a as f32 / 255.0;
        let da = dst.a as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return Colour::TRANSPARENT;
        }

        let channel = |s: u8, d: u8| -> u8 {
            let v = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
            v.round().clamp(0.0, 255.0) as u8
        };

        Colour::new(
            channel(self.r, dst.r),
            channel(self.g, dst.g),
            channel(self.b, dst.b),
            (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        )
    }

    /// Hue (degrees), saturation and lightness (0..=1) of the RGB channels.
    pub fn to_hsl(self) -> (f32, f32, f32) {
        use palette::{Hsl, IntoColor, Srgb};

        let rgb: Srgb<f32> = Srgb::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        );
        let hsl: Hsl = rgb.into_color();

        (
            hsl.hue.into_positive_degrees(),
            hsl.saturation,
            hsl.lightness,
        )
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Colour::rgb(255, 0, 0)), "#FF0000");
        assert_eq!(format!("{}", Colour::new(255, 0, 0, 128)), "#FF000080");
    }

    #[test]
    fn test_constants() {
        assert_eq!(Colour::BLACK, Colour::rgb(0, 0, 0));
        assert_eq!(Colour::WHITE, Colour::rgb(255, 255, 255));
        assert!(Colour::TRANSPARENT.is_transparent());
        assert!(Colour::BLACK.is_opaque());
    }

    #[test]
    fn test_distance_squared_ignores_alpha() {
        let a = Colour::new(0, 0, 85, 10);
        assert_eq!(a.distance_squared(Colour::BLACK), 85 * 85);
        assert_eq!(a.distance_squared(Colour::rgb(0, 0, 170)), 85 * 85);
        assert_eq!(Colour::WHITE.distance_squared(Colour::BLACK), 3 * 255 * 255);
    }

    #[test]
    fn test_over_opaque_replaces() {
        let red = Colour::rgb(255, 0, 0);
        assert_eq!(red.over(Colour::BLACK), red);
    }

    #[test]
    fn test_over_transparent_is_noop() {
        let dst = Colour::rgb(1, 2, 3);
        assert_eq!(Colour::TRANSPARENT.over(dst), dst);
    }

    #[test]
    fn test_over_empty_destination_keeps_source() {
        let src = Colour::new(170, 0, 0, 128);
        assert_eq!(src.over(Colour::TRANSPARENT), src);
    }

    #[test]
    fn test_over_translucent_blends() {
        let src = Colour::new(255, 255, 255, 128);
        let out = src.over(Colour::BLACK);
        assert_eq!(out.a, 255);
        assert_eq!(out.r, 128);
        assert_eq!(out.r, out.g);
        assert_eq!(out.g, out.b);
    }

    #[test]
    fn test_to_hsl() {
        let (h, s, l) = Colour::rgb(255, 0, 0).to_hsl();
        assert!(h.abs() < 0.01);
        assert!((s - 1.0).abs() < 0.01);
        assert!((l - 0.5).abs() < 0.01);

        let (_, s, l) = Colour::WHITE.to_hsl();
        assert!(s.abs() < 0.01);
        assert!((l - 1.0).abs() < 0.01);
    }
}
