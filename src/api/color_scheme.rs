use serde::{Deserialize, Serialize};

use crate::render::Color;

const MIXED_PALETTE: [u32; 8] = [
    0x5b8def, 0xf59e0b, 0x10b981, 0xef4444, 0x8b5cf6, 0x14b8a6, 0xec4899, 0x84cc16,
];
const BLUE_PALETTE: [u32; 8] = [
    0x0d47a1, 0x1565c0, 0x1976d2, 0x1e88e5, 0x2196f3, 0x42a5f5, 0x64b5f6, 0x90caf9,
];
const PURPLE_PALETTE: [u32; 8] = [
    0x4a148c, 0x6a1b9a, 0x7b1fa2, 0x8e24aa, 0x9c27b0, 0xab47bc, 0xba68c8, 0xce93d8,
];

/// Palette family used to color graph series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Mixed,
    Blue,
    Purple,
}

impl ColorScheme {
    #[must_use]
    pub fn palette(self) -> &'static [u32] {
        match self {
            Self::Mixed => &MIXED_PALETTE,
            Self::Blue => &BLUE_PALETTE,
            Self::Purple => &PURPLE_PALETTE,
        }
    }

    /// Color of the series at `index`, cycling through the palette.
    #[must_use]
    pub fn color_for(self, index: usize) -> Color {
        let palette = self.palette();
        Color::from_hex(palette[index % palette.len()])
    }
}
