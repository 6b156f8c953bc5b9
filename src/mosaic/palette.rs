//! Symbol palettes for mosaic rendering.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Deserialize;

/// Coloured square emoji (9 levels).
/// Ordered from darkest (black square) to lightest (white square).
pub const SQUARES_PALETTE: &[&str] = &["⬛", "🟫", "🟪", "🟥", "🟦", "🟩", "🟧", "🟨", "⬜"];

/// Coloured circle emoji (9 levels).
pub const CIRCLES_PALETTE: &[&str] = &["⚫", "🟤", "🟣", "🔴", "🔵", "🟢", "🟠", "🟡", "⚪"];

/// Unicode shade blocks (4 levels).
/// Chat clients strip leading spaces, so the ramp starts at the light shade.
pub const BLOCKS_PALETTE: &[&str] = &["░", "▒", "▓", "█"];

/// ASCII density ramp (9 levels), darkest first.
pub const ASCII_PALETTE: &[&str] = &[".", ":", "-", "=", "+", "*", "#", "%", "@"];

/// Palette used to turn brightness samples into symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    /// Coloured square emoji
    #[default]
    Squares,
    /// Coloured circle emoji
    Circles,
    /// Unicode shade blocks
    Blocks,
    /// Plain ASCII ramp
    Ascii,
}

impl Palette {
    /// Symbols for this palette, index 0 = darkest.
    pub fn symbols(&self) -> &'static [&'static str] {
        match self {
            Palette::Squares => SQUARES_PALETTE,
            Palette::Circles => CIRCLES_PALETTE,
            Palette::Blocks => BLOCKS_PALETTE,
            Palette::Ascii => ASCII_PALETTE,
        }
    }

    /// Number of brightness levels.
    pub fn levels(&self) -> usize {
        self.symbols().len()
    }

    pub fn darkest(&self) -> &'static str {
        self.symbols()[0]
    }

    pub fn lightest(&self) -> &'static str {
        self.symbols()[self.levels() - 1]
    }

    /// Get a human-readable name for the palette.
    pub fn name(&self) -> &'static str {
        match self {
            Palette::Squares => "squares",
            Palette::Circles => "circles",
            Palette::Blocks => "blocks",
            Palette::Ascii => "ascii",
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Palette {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "squares" => Ok(Palette::Squares),
            "circles" => Ok(Palette::Circles),
            "blocks" => Ok(Palette::Blocks),
            "ascii" => Ok(Palette::Ascii),
            other => Err(format!(
                "Unknown palette '{}'. Available palettes: squares, circles, blocks, ascii",
                other
            )),
        }
    }
}
