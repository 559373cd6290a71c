//! The fixed 16-colour CGA palette and nearest-colour lookup.

use super::Colour;

/// Number of entries in the palette.
pub const PALETTE_LEN: usize = 16;

/// The standard CGA 16-colour palette.
pub const CGA_PALETTE: [Colour; PALETTE_LEN] = [
    Colour::rgb(0, 0, 0),       // 0  black
    Colour::rgb(0, 0, 170),     // 1  blue
    Colour::rgb(0, 170, 0),     // 2  green
    Colour::rgb(0, 170, 170),   // 3  cyan
    Colour::rgb(170, 0, 0),     // 4  red
    Colour::rgb(170, 0, 170),   // 5  magenta
    Colour::rgb(170, 85, 0),    // 6  brown
    Colour::rgb(170, 170, 170), // 7  light gray
    Colour::rgb(85, 85, 85),    // 8  dark gray
    Colour::rgb(85, 85, 255),   // 9  light blue
    Colour::rgb(85, 255, 85),   // 10 light green
    Colour::rgb(85, 255, 255),  // 11 light cyan
    Colour::rgb(255, 85, 85),   // 12 light red
    Colour::rgb(255, 85, 255),  // 13 light magenta
    Colour::rgb(255, 255, 85),  // 14 yellow
    Colour::rgb(255, 255, 255), // 15 white
];

/// Display names, indexed like `CGA_PALETTE`.
pub const CGA_NAMES: [&str; PALETTE_LEN] = [
    "black",
    "blue",
    "green",
    "cyan",
    "red",
    "magenta",
    "brown",
    "light-gray",
    "dark-gray",
    "light-blue",
    "light-green",
    "light-cyan",
    "light-red",
    "light-magenta",
    "yellow",
    "white",
];

/// Find the nearest palette index for a colour.
///
/// Uses squared Euclidean RGB distance. The scan keeps the first minimum it
/// sees, so ties resolve to the lower index. Alpha plays no part.
pub fn nearest_index(colour: Colour) -> u8 {
    let mut best_index: u8 = 0;
    let mut best_dist = u32::MAX;

    for (i, pc) in CGA_PALETTE.iter().enumerate() {
        let dist = colour.distance_squared(*pc);
        if dist < best_dist {
            best_dist = dist;
            best_index = i as u8;
        }
    }

    best_index
}

/// Replace the RGB channels with the nearest palette entry, keeping alpha.
pub fn quantize_colour(colour: Colour) -> Colour {
    CGA_PALETTE[nearest_index(colour) as usize].with_alpha(colour.a)
}

/// Whether the RGB channels are exactly one of the palette entries.
pub fn is_palette_colour(colour: Colour) -> bool {
    CGA_PALETTE
        .iter()
        .any(|pc| pc.r == colour.r && pc.g == colour.g && pc.b == colour.b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_entries_are_exact() {
        assert_eq!(CGA_PALETTE[0], Colour::rgb(0, 0, 0));
        assert_eq!(CGA_PALETTE[6], Colour::rgb(170, 85, 0));
        assert_eq!(CGA_PALETTE[9], Colour::rgb(85, 85, 255));
        assert_eq!(CGA_PALETTE[15], Colour::rgb(255, 255, 255));
        assert!(CGA_PALETTE.iter().all(|c| c.is_opaque()));
    }

    #[test]
    fn test_every_entry_maps_to_itself() {
        for (i, c) in CGA_PALETTE.iter().enumerate() {
            assert_eq!(nearest_index(*c) as usize, i);
        }
    }

    #[test]
    fn test_pure_red_maps_to_red() {
        assert_eq!(nearest_index(Colour::rgb(255, 0, 0)), 4);
    }

    #[test]
    fn test_tie_black_blue_prefers_black() {
        // (0,0,85) is 85^2 from both black and blue
        assert_eq!(nearest_index(Colour::rgb(0, 0, 85)), 0);
    }

    #[test]
    fn test_tie_dark_gray_light_blue_prefers_dark_gray() {
        // (85,85,170) is 85^2 from dark gray (8) and light blue (9)
        let c = Colour::rgb(85, 85, 170);
        assert_eq!(c.distance_squared(CGA_PALETTE[8]), c.distance_squared(CGA_PALETTE[9]));
        assert_eq!(nearest_index(c), 8);
    }

    #[test]
    fn test_quantize_keeps_alpha() {
        let q = quantize_colour(Colour::new(250, 250, 250, 77));
        assert_eq!(q, Colour::new(255, 255, 255, 77));
    }

    #[test]
    fn test_quantize_transparent_pixel_still_maps_rgb() {
        let q = quantize_colour(Colour::new(10, 160, 10, 0));
        assert_eq!(q, Colour::new(0, 170, 0, 0));
    }

    #[test]
    fn test_is_palette_colour() {
        assert!(is_palette_colour(Colour::new(85, 255, 85, 3)));
        assert!(!is_palette_colour(Colour::rgb(1, 0, 0)));
    }
}
