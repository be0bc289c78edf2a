//! Word tokenizer
//!
//! Splits a read-only byte span into alternating word and separator runs.
//! Runs are reported as offsets into the span; the span itself is never
//! modified. Concatenating the runs in order reproduces the span exactly.

use std::num::NonZeroUsize;
use std::ops::Range;

use super::separators::SeparatorSet;
use super::utf8;

/// What a run consists of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunKind {
    /// Non-separator bytes, colored as a unit
    Word,
    /// Separator bytes, passed through untouched
    Separator,
}

/// A contiguous piece of the tokenized span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub kind: RunKind,
    pub start: usize,
    pub len: usize,
}

impl Run {
    pub const fn word(start: usize, len: usize) -> Self {
        Self {
            kind: RunKind::Word,
            start,
            len,
        }
    }

    pub const fn separator(start: usize, len: usize) -> Self {
        Self {
            kind: RunKind::Separator,
            start,
            len,
        }
    }

    pub const fn end(&self) -> usize {
        self.start + self.len
    }

    pub const fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    pub const fn is_word(&self) -> bool {
        matches!(self.kind, RunKind::Word)
    }

    /// The bytes of this run within `span`
    pub fn bytes<'a>(&self, span: &'a [u8]) -> &'a [u8] {
        &span[self.range()]
    }
}

/// Tokenizer configuration: the separator set and optional word length limit
#[derive(Debug, Clone)]
pub struct Tokenizer {
    separators: SeparatorSet,
    word_limit: Option<NonZeroUsize>,
}

impl Tokenizer {
    pub fn new(separators: SeparatorSet, word_limit: Option<NonZeroUsize>) -> Self {
        Self {
            separators,
            word_limit,
        }
    }

    /// Lazily tokenize `span`
    pub fn tokenize<'a>(&'a self, span: &'a [u8]) -> Runs<'a> {
        Runs {
            span,
            separators: &self.separators,
            word_limit: self.word_limit.map_or(usize::MAX, NonZeroUsize::get),
            pos: 0,
            word_start: 0,
        }
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(SeparatorSet::default(), None)
    }
}

/// Iterator over the runs of a span
///
/// Word runs are never empty. Adjacent separator bytes come out as a single
/// run.
#[derive(Debug, Clone)]
pub struct Runs<'a> {
    span: &'a [u8],
    separators: &'a SeparatorSet,
    /// `usize::MAX` when unbounded
    word_limit: usize,
    /// Next byte to inspect
    pos: usize,
    /// Start of the word being accumulated, `word_start <= pos`
    word_start: usize,
}

impl Runs<'_> {
    fn take_word(&mut self, end: usize) -> Run {
        let run = Run::word(self.word_start, end - self.word_start);
        self.word_start = end;
        run
    }
}

impl Iterator for Runs<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        while self.pos < self.span.len() {
            let i = self.pos;

            if self.separators.contains(self.span[i]) {
                if self.word_start < i {
                    // Leave `pos` on the separator, it is emitted next call
                    return Some(self.take_word(i));
                }
                let len = self.span[i..]
                    .iter()
                    .position(|&b| !self.separators.contains(b))
                    .unwrap_or(self.span.len() - i);
                self.pos = i + len;
                self.word_start = self.pos;
                return Some(Run::separator(i, len));
            }

            // The limit only cuts at codepoint starts, a longer run is fine
            if i - self.word_start >= self.word_limit && utf8::is_boundary(self.span, i) {
                let run = self.take_word(i);
                self.pos = i + 1;
                return Some(run);
            }

            self.pos += 1;
        }

        if self.word_start < self.span.len() {
            return Some(self.take_word(self.span.len()));
        }
        None
    }
}
