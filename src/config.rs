//! Configuration for the colorizer
//!
//! Command line arguments are parsed with clap and then resolved into a
//! [`Config`]. Malformed values never abort a run: each one is reported and
//! the option falls back to its previous or default value.

use std::num::NonZeroUsize;

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::color::{seed_from_str, Palette, Rgb};
use crate::error::{ConfigError, Result};
use crate::stream::{
    ReadMode, LINE_BUFFER_SIZE, MAX_BUFFER_SIZE, MIN_BUFFER_SIZE, OUTPUT_BUFFER_SIZE,
};
use crate::text::{Escaped, SeparatorSet};

/// Most digits accepted by `--wordlen=`
pub const MAX_WORDLEN_DIGITS: usize = 7;

/// CLI arguments
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "colors")]
#[command(version)]
#[command(about = "Pipe to color same words with the same random colors", long_about = None)]
pub struct CliArgs {
    /// Add chars to the list of word separators (repeatable)
    #[arg(long = "addsep", value_name = "CHARS", num_args = 0..=1, default_missing_value = "")]
    pub addsep: Vec<String>,

    /// Print internal and diagnostic info to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Limit words to NUM bytes but keep UTF-8 intact
    #[arg(
        long,
        value_name = "NUM",
        allow_hyphen_values = true,
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub wordlen: Option<String>,

    /// Alias for --wordlen=1
    #[arg(long = "char")]
    pub char_mode: bool,

    /// Don't flush stdout after each line
    #[arg(long = "no-flush", alias = "noflush")]
    pub no_flush: bool,

    /// Do no coloring and work like cat does
    #[arg(long)]
    pub cat: bool,

    /// Consider all ASCII non-alnum printable characters separators
    #[arg(long)]
    pub alnum: bool,

    /// Seed to use in the hash, a string that will be hashed
    #[arg(long, value_name = "SEED", num_args = 0..=1, default_missing_value = "")]
    pub seed: Option<String>,

    /// Comma separated RRGGBB colors to use instead of the default palette
    #[arg(
        long,
        value_name = "HEX,...",
        value_delimiter = ',',
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub colors: Vec<String>,

    /// Input buffer size in bytes; longer lines degrade to plain output
    #[arg(long, value_name = "BYTES", num_args = 0..=1, default_missing_value = "")]
    pub buffer_size: Option<String>,

    /// Print the buffer sizes and palette, then exit
    #[arg(long)]
    pub list_colors: bool,
}

/// When buffered output reaches stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FlushMode {
    /// Read line by line and flush after each one
    #[default]
    PerLine,
    /// Read whole blocks and flush only when the buffer fills or input ends
    BlockBuffered,
}

impl FlushMode {
    /// Input unit matching this flush mode
    pub fn read_mode(self) -> ReadMode {
        match self {
            FlushMode::PerLine => ReadMode::Line,
            FlushMode::BlockBuffered => ReadMode::Block,
        }
    }

    /// Name of the input unit, used in diagnostics
    pub fn unit_name(self) -> &'static str {
        match self {
            FlushMode::PerLine => "line",
            FlushMode::BlockBuffered => "word",
        }
    }
}

/// Effective configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Bytes that end a word
    #[serde(with = "separator_bytes")]
    pub separators: SeparatorSet,
    /// Maximum word length in bytes, `None` for unbounded
    pub word_limit: Option<NonZeroUsize>,
    /// Folded into every word hash
    pub seed: u32,
    pub flush_mode: FlushMode,
    /// Copy input to output without coloring
    pub passthrough: bool,
    pub verbose: bool,
    /// Palette colors
    pub colors: Vec<Rgb>,
    /// Input buffer capacity
    pub buffer_size: usize,
    /// Output buffer capacity before adjustment for the longest colored word
    pub output_buffer_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            separators: SeparatorSet::default(),
            word_limit: None,
            seed: 0,
            flush_mode: FlushMode::PerLine,
            passthrough: false,
            verbose: false,
            colors: crate::color::DEFAULT_COLORS.to_vec(),
            buffer_size: LINE_BUFFER_SIZE,
            output_buffer_size: OUTPUT_BUFFER_SIZE,
        }
    }
}

impl Config {
    /// Resolve CLI arguments, reporting and skipping malformed values
    pub fn from_args(args: &CliArgs) -> Self {
        let mut config = Config {
            verbose: args.verbose,
            passthrough: args.cat,
            ..Config::default()
        };

        if args.alnum {
            config.separators = SeparatorSet::alnum();
            tracing::debug!("the --alnum option is set, printable ASCII non-alnum will be separators");
        }
        tracing::debug!("starting with separator set {}", config.separators);

        for chars in &args.addsep {
            if let Err(e) = config.add_separators(chars) {
                tracing::warn!("{}", e);
            }
        }

        if let Some(value) = &args.wordlen {
            match parse_word_limit(value) {
                Ok(limit) => {
                    config.word_limit = Some(limit);
                    tracing::debug!("wordlen successfully set to {}", limit);
                },
                Err(e) => tracing::warn!("{}", e),
            }
        }

        if args.char_mode {
            config.word_limit = NonZeroUsize::new(1);
            tracing::debug!("wordlen successfully set to 1 by --char option");
        }

        if args.no_flush {
            config.flush_mode = FlushMode::BlockBuffered;
        }

        match args.seed.as_deref() {
            Some("") => tracing::warn!("{}", ConfigError::MissingValue("seed")),
            Some(text) => {
                config.seed = seed_from_str(text);
                tracing::debug!("seed set to fnv({}) = {}", text, config.seed);
            },
            None => {},
        }

        if args.colors.iter().all(|value| value.is_empty()) {
            if !args.colors.is_empty() {
                tracing::warn!("{}", ConfigError::MissingValue("colors"));
            }
        } else {
            let colors = parse_colors(&args.colors);
            if colors.is_empty() {
                tracing::warn!("no valid colors given, keeping the default palette");
            } else {
                config.colors = colors;
            }
        }

        if let Some(value) = &args.buffer_size {
            match parse_buffer_size(value) {
                Ok(size) => config.buffer_size = size,
                Err(e) => tracing::warn!("{}", e),
            }
        }

        config
    }

    /// Union the bytes of `chars` into the separator set
    pub fn add_separators(&mut self, chars: &str) -> std::result::Result<usize, ConfigError> {
        if chars.is_empty() {
            return Err(ConfigError::MissingSeparators);
        }
        let before = self.separators.to_string();
        let added = self.separators.extend(chars.as_bytes());
        tracing::debug!(
            "adding '{}' to separator set {}, result is {} ({} chars added)",
            Escaped(chars.as_bytes()),
            before,
            self.separators,
            added
        );
        Ok(added)
    }

    /// Palette built from the configured colors
    pub fn palette(&self) -> Result<Palette> {
        Palette::from_rgb(&self.colors)
    }

    /// Output capacity large enough for the longest possible colored word
    pub fn effective_output_size(&self, palette: &Palette) -> usize {
        let longest_run = self
            .buffer_size
            .saturating_add(palette.max_sequence_len())
            .saturating_add(crate::color::RESET.len());
        self.output_buffer_size.max(longest_run)
    }
}

/// Parse a `--wordlen` value: a positive integer of at most seven digits
pub fn parse_word_limit(value: &str) -> std::result::Result<NonZeroUsize, ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::MissingValue("wordlen"));
    }
    if value.len() > MAX_WORDLEN_DIGITS {
        return Err(ConfigError::WordLimitTooLong {
            value: value.to_string(),
            max: MAX_WORDLEN_DIGITS,
        });
    }
    value
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or_else(|| ConfigError::WordLimitNotPositive(value.to_string()))
}

/// Parse a `--buffer-size` value
pub fn parse_buffer_size(value: &str) -> std::result::Result<usize, ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::MissingValue("buffer-size"));
    }
    match value.trim().parse::<u64>() {
        Ok(size) if size > MAX_BUFFER_SIZE as u64 => Err(ConfigError::BufferTooLarge {
            value: value.to_string(),
            max: MAX_BUFFER_SIZE,
        }),
        Ok(size) if size >= MIN_BUFFER_SIZE as u64 => Ok(size as usize),
        _ => Err(ConfigError::BufferTooSmall {
            value: value.to_string(),
            min: MIN_BUFFER_SIZE,
        }),
    }
}

/// Parse palette colors, reporting and dropping invalid entries
pub fn parse_colors(values: &[String]) -> Vec<Rgb> {
    values
        .iter()
        .filter_map(|value| match value.parse::<Rgb>() {
            Ok(rgb) => Some(rgb),
            Err(e) => {
                tracing::warn!("{}", e);
                None
            },
        })
        .collect()
}

/// Separator sets serialize as their member bytes in insertion order
mod separator_bytes {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::text::SeparatorSet;

    pub fn serialize<S: Serializer>(set: &SeparatorSet, serializer: S) -> Result<S::Ok, S::Error> {
        set.as_bytes().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SeparatorSet, D::Error> {
        let bytes = Vec::<u8>::deserialize(deserializer)?;
        Ok(SeparatorSet::from_bytes(&bytes))
    }
}
