//! Word separator set
//!
//! The set keeps its members in insertion order for diagnostics and mirrors
//! them into a 256-entry table so membership is a single index.

use std::fmt;

/// Whitespace separating words when nothing else is configured
pub const DEFAULT_SEPARATORS: &[u8] = b" \x0c\n\r\t\x0b";

/// Printable ASCII characters that are not alphanumeric, plus the default whitespace
pub const ALNUM_SEPARATORS: &[u8] = b"~{&@)\t_^$\"?\x0b*[(\r=/\\,|]#>+\x0c -\n!}.;<`%':";

/// Set of bytes that end a word
#[derive(Clone, PartialEq, Eq)]
pub struct SeparatorSet {
    /// Members in insertion order, no repetitions
    members: Vec<u8>,
    /// `table[b]` iff `b` is a member
    table: [bool; 256],
}

impl SeparatorSet {
    /// An empty set
    pub fn empty() -> Self {
        Self {
            members: Vec::new(),
            table: [false; 256],
        }
    }

    /// Set built from the given bytes
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut set = Self::empty();
        set.extend(bytes);
        set
    }

    /// Every printable ASCII non-alphanumeric character plus whitespace
    pub fn alnum() -> Self {
        Self::from_bytes(ALNUM_SEPARATORS)
    }

    /// Add one byte, returning whether it was new
    pub fn insert(&mut self, byte: u8) -> bool {
        let slot = &mut self.table[usize::from(byte)];
        if *slot {
            return false;
        }
        *slot = true;
        self.members.push(byte);
        true
    }

    /// Add every byte of `bytes`, returning how many were new
    pub fn extend(&mut self, bytes: &[u8]) -> usize {
        bytes.iter().filter(|&&b| self.insert(b)).count()
    }

    #[inline]
    pub fn contains(&self, byte: u8) -> bool {
        self.table[usize::from(byte)]
    }

    /// Members in the order they were added
    pub fn as_bytes(&self) -> &[u8] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Default for SeparatorSet {
    fn default() -> Self {
        Self::from_bytes(DEFAULT_SEPARATORS)
    }
}

/// Shows the members escaped, e.g. `' \f\n\r\t\v'`
impl fmt::Display for SeparatorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", Escaped(&self.members))
    }
}

impl fmt::Debug for SeparatorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SeparatorSet").field(&format_args!("{self}")).finish()
    }
}

/// Printable rendering of arbitrary bytes for diagnostics
pub struct Escaped<'a>(pub &'a [u8]);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in self.0 {
            match byte {
                b'\n' => f.write_str("\\n")?,
                b'\x0b' => f.write_str("\\v")?,
                b'\t' => f.write_str("\\t")?,
                b'\r' => f.write_str("\\r")?,
                b'\x0c' => f.write_str("\\f")?,
                b'\\' => f.write_str("\\\\")?,
                b' '..=b'~' => write!(f, "{}", char::from(byte))?,
                _ => write!(f, "\\x{byte:02x}")?,
            }
        }
        Ok(())
    }
}
