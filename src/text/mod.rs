//! Text segmentation
//!
//! Separator sets and the byte-level tokenizer that carves input into word
//! and separator runs without decoding it.

mod separators;
mod tokenizer;
pub mod utf8;

pub use separators::{Escaped, SeparatorSet, ALNUM_SEPARATORS, DEFAULT_SEPARATORS};
pub use tokenizer::{Run, RunKind, Runs, Tokenizer};
