//! UTF-8 boundary helpers
//!
//! The tokenizer works on raw bytes and never decodes; it only needs to know
//! where a codepoint may not be split.

/// True for `10xxxxxx`, a byte that continues a multi-byte sequence
#[inline]
pub const fn is_continuation(byte: u8) -> bool {
    byte & 0b1100_0000 == 0b1000_0000
}

/// True when a cut before `bytes[index]` would not land inside a codepoint
#[inline]
pub fn is_boundary(bytes: &[u8], index: usize) -> bool {
    bytes.get(index).map_or(true, |&b| !is_continuation(b))
}
