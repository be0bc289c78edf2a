//! Word colorizer
//!
//! Every word gets its own color sequence and its own reset, so no terminal
//! state leaks from one word to the next.

use super::hash::fnv1a;
use super::palette::{Palette, PaletteEntry, RESET};
use crate::text::RunKind;

/// Picks a palette entry per word from the word's hash
#[derive(Debug, Clone)]
pub struct Colorizer {
    palette: Palette,
    seed: u32,
}

impl Colorizer {
    pub fn new(palette: Palette, seed: u32) -> Self {
        Self { palette, seed }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Palette index for `word`
    pub fn index_of(&self, word: &[u8]) -> usize {
        fnv1a(word, self.seed) as usize % self.palette.len()
    }

    /// Palette entry for `word`
    pub fn entry_for(&self, word: &[u8]) -> &PaletteEntry {
        self.palette.pick(fnv1a(word, self.seed))
    }

    /// Output pieces for one run
    pub fn colorize<'a>(&'a self, kind: RunKind, bytes: &'a [u8]) -> Colored<'a> {
        match kind {
            RunKind::Separator => Colored::plain(bytes),
            RunKind::Word if bytes.is_empty() => Colored::plain(&[]),
            RunKind::Word => Colored {
                prefix: self.entry_for(bytes).sequence(),
                body: bytes,
                suffix: RESET,
            },
        }
    }
}

impl Default for Colorizer {
    fn default() -> Self {
        Self::new(Palette::default(), 0)
    }
}

/// A run ready for output: `prefix ++ body ++ suffix`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colored<'a> {
    pub prefix: &'a [u8],
    pub body: &'a [u8],
    pub suffix: &'a [u8],
}

impl<'a> Colored<'a> {
    const fn plain(body: &'a [u8]) -> Self {
        Self {
            prefix: &[],
            body,
            suffix: &[],
        }
    }

    /// The pieces in output order
    pub fn parts(&self) -> [&'a [u8]; 3] {
        [self.prefix, self.body, self.suffix]
    }

    pub fn len(&self) -> usize {
        self.prefix.len() + self.body.len() + self.suffix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.parts().concat()
    }
}
