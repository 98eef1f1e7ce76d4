//! Round-robin color cycling for spawned glyphs.

use serde::{Deserialize, Serialize};

/// An sRGB color with 8-bit channels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    /// Channels as linear-ish floats in `[0, 1]` for renderers.
    pub fn to_f32_array(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

/// The reference palette: five colors cycled across spawned outlines.
pub const DEFAULT_COLORS: [Color; 5] = [
    Color::rgb(0x85, 0x73, 0xfb),
    Color::rgb(0xf8, 0x57, 0xb0),
    Color::rgb(0xff, 0xcd, 0x2a),
    Color::rgb(0x52, 0xa4, 0xf7),
    Color::rgb(0xa4, 0xe9, 0x0f),
];

/// A fixed color sequence plus a cursor that wraps modulo the palette length.
///
/// The cursor lives inside the palette object and is advanced by [`next`],
/// so there is no ambient mutable index shared between callers.
///
/// [`next`]: Palette::next
#[derive(Clone, Debug)]
pub struct Palette {
    colors: Vec<Color>,
    index: usize,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.to_vec(),
            index: 0,
        }
    }
}

impl Palette {
    /// Builds a palette from a non-empty color list. Empty input falls back
    /// to [`DEFAULT_COLORS`].
    pub fn new(colors: Vec<Color>) -> Self {
        if colors.is_empty() {
            Self::default()
        } else {
            Self { colors, index: 0 }
        }
    }

    /// Returns the color at the cursor, then advances the cursor by one,
    /// wrapping at the end of the palette.
    pub fn next(&mut self) -> Color {
        let color = self.colors[self.index];
        self.index = (self.index + 1) % self.colors.len();
        color
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        // Non-empty by construction.
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_in_order_and_wraps() {
        let mut palette = Palette::default();
        for n in 0..23 {
            assert_eq!(palette.next(), DEFAULT_COLORS[n % DEFAULT_COLORS.len()]);
        }
    }

    #[test]
    fn cursor_never_leaves_range() {
        let mut palette = Palette::new(vec![
            Color::rgb(1, 2, 3),
            Color::rgb(4, 5, 6),
            Color::rgb(7, 8, 9),
        ]);
        for _ in 0..100 {
            palette.next();
            assert!(palette.index < palette.len());
        }
    }

    #[test]
    fn empty_input_falls_back_to_default() {
        let mut palette = Palette::new(vec![]);
        assert_eq!(palette.len(), DEFAULT_COLORS.len());
        assert_eq!(palette.next(), DEFAULT_COLORS[0]);
    }

    #[test]
    fn parses_hex() {
        assert_eq!(Color::from_hex("#8573fb"), Some(Color::rgb(0x85, 0x73, 0xfb)));
        assert_eq!(Color::from_hex("ffcd2a"), Some(Color::rgb(0xff, 0xcd, 0x2a)));
        assert_eq!(Color::from_hex("#nope"), None);
        assert_eq!(Color::from_hex(""), None);
    }
}
