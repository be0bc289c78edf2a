//! Colors: pipe text through to color identical words in identical colors
//!
//! Words are hashed with a seedable FNV-1a and wrapped in the matching
//! palette color plus a reset; separators pass through untouched. The crate
//! is organized as:
//!
//! - `text`: separator sets and the byte-level tokenizer
//! - `color`: palette, hash and colorizer
//! - `stream`: fixed-capacity input reader and output buffer
//! - `pipeline`: the read, tokenize, colorize, write loop and its overflow fallback
//! - `config`: CLI arguments and the resolved configuration

pub mod color;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod stream;
pub mod text;

pub use config::{CliArgs, Config, FlushMode};
pub use error::{ConfigError, Error, Result};
pub use pipeline::{Pipeline, PipelineState};
