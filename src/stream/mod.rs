//! Stream plumbing
//!
//! Fixed-capacity buffers on both sides of the pipeline: the chunk reader
//! on the input side and the output buffer on the output side. Neither
//! buffer is ever resized after construction.

mod output;
mod reader;

pub use output::OutputBuffer;
pub use reader::{ChunkReader, ReadMode, ReadOutcome};

/// Default input buffer capacity
pub const LINE_BUFFER_SIZE: usize = 64 * 1024;
/// Default output buffer capacity
pub const OUTPUT_BUFFER_SIZE: usize = 256 * 1024;
/// Smallest accepted input buffer capacity
pub const MIN_BUFFER_SIZE: usize = 2;
/// Largest accepted input buffer
pub const MAX_BUFFER_SIZE: usize = 1024 * 1024 * 1024;
