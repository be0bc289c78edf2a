//! Color palette
//!
//! A palette is an ordered, non-empty list of foreground color sequences.
//! Entries are built once and never change afterwards.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error, Result};

/// SGR 0, restores the terminal's default attributes
pub const RESET: &[u8] = b"\x1b[0m";

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Truecolor foreground sequence (`ESC[38;2;R;G;Bm`)
    pub fn foreground_sequence(self) -> Vec<u8> {
        format!("\x1b[38;2;{};{};{}m", self.r, self.g, self.b).into_bytes()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGB({}, {}, {})", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ConfigError;

    /// Parse `RRGGBB`, optionally prefixed with `#`
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidColor(s.to_string()));
        }
        let component = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ConfigError::InvalidColor(s.to_string()))
        };
        Ok(Rgb::new(component(0..2)?, component(2..4)?, component(4..6)?))
    }
}

/// Colors used when none are configured
pub const DEFAULT_COLORS: [Rgb; 12] = [
    Rgb::new(255, 255, 255),
    Rgb::new(255, 0, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(127, 0, 0),
    Rgb::new(0, 127, 0),
    Rgb::new(0, 255, 255),
    Rgb::new(255, 0, 255),
    Rgb::new(255, 255, 0),
    Rgb::new(0, 127, 255),
    Rgb::new(63, 255, 63),
    Rgb::new(0, 127, 63),
    Rgb::new(127, 127, 0),
];

/// One palette slot: the escape sequence and an optional human readable label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    sequence: Vec<u8>,
    label: Option<String>,
}

impl PaletteEntry {
    pub fn new(sequence: impl Into<Vec<u8>>, label: Option<String>) -> Self {
        Self {
            sequence: sequence.into(),
            label,
        }
    }

    /// Bytes that switch the terminal to this color
    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl From<Rgb> for PaletteEntry {
    fn from(rgb: Rgb) -> Self {
        PaletteEntry::new(rgb.foreground_sequence(), Some(rgb.to_string()))
    }
}

/// Ordered, non-empty list of colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Build a palette, rejecting an empty entry list
    pub fn new(entries: Vec<PaletteEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::EmptyPalette);
        }
        Ok(Self { entries })
    }

    /// Build a truecolor palette from RGB values
    pub fn from_rgb(colors: &[Rgb]) -> Result<Self> {
        Self::new(colors.iter().copied().map(PaletteEntry::from).collect())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PaletteEntry> {
        self.entries.get(index)
    }

    /// Entry selected by a hash value
    pub fn pick(&self, hash: u32) -> &PaletteEntry {
        // usize is at least 32 bits on every supported target
        &self.entries[hash as usize % self.entries.len()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &PaletteEntry> {
        self.entries.iter()
    }

    /// Length of the longest color sequence
    pub fn max_sequence_len(&self) -> usize {
        self.entries.iter().map(PaletteEntry::len).max().unwrap_or(0)
    }

    /// Write one line per entry: the sequence text (ESC dropped) shown in its
    /// own color, then the label
    pub fn write_listing<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        for entry in &self.entries {
            let visible = entry.sequence.strip_prefix(b"\x1b").unwrap_or(&entry.sequence);
            out.write_all(&entry.sequence)?;
            out.write_all(visible)?;
            out.write_all(RESET)?;
            match entry.label() {
                Some(label) => writeln!(out, " - {label}")?,
                None => writeln!(out)?,
            }
        }
        Ok(())
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            entries: DEFAULT_COLORS.iter().copied().map(PaletteEntry::from).collect(),
        }
    }
}
