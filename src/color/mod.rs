//! Color assignment
//!
//! - `palette`: the fixed list of color sequences
//! - `hash`: seedable FNV-1a used to index the palette
//! - `colorizer`: wraps words in their color and a reset

mod colorizer;
mod hash;
mod palette;

pub use colorizer::{Colored, Colorizer};
pub use hash::{fnv1a, seed_from_str, FNV_OFFSET_BASIS, FNV_PRIME};
pub use palette::{Palette, PaletteEntry, Rgb, DEFAULT_COLORS, RESET};
