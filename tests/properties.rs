//! Property tests for the tokenizer and pipeline

use std::num::NonZeroUsize;

use proptest::prelude::*;

use colors::color::{Colorizer, RESET};
use colors::text::{RunKind, SeparatorSet, Tokenizer};
use colors::{Config, FlushMode, Pipeline};

fn run(config: &Config, input: &[u8]) -> Vec<u8> {
    let mut pipeline = Pipeline::new(config).unwrap();
    let mut out = Vec::new();
    let mut diag = Vec::new();
    pipeline.run(input, &mut out, &mut diag).unwrap();
    out
}

/// Inputs mixing ASCII words, whitespace and multi-byte characters
fn text() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(
        prop_oneof![
            Just("foo"),
            Just("bar"),
            Just("é"),
            Just("中文"),
            Just(" "),
            Just("\t"),
            Just("\n"),
            Just("\r\n"),
            Just("x,y"),
        ],
        0..64,
    )
    .prop_map(|parts| parts.concat().into_bytes())
}

/// Inputs where no word is longer than six bytes
fn short_words() -> impl Strategy<Value = Vec<u8>> {
    let word = prop_oneof![Just(""), Just("foo"), Just("bar"), Just("é"), Just("中文"), Just("x,y")];
    let sep = prop_oneof![Just(" "), Just("\t"), Just("\n"), Just("  \r\n")];
    prop::collection::vec((word, sep), 0..64).prop_map(|pairs| {
        pairs
            .into_iter()
            .flat_map(|(w, s)| [w, s])
            .collect::<String>()
            .into_bytes()
    })
}

/// Remove every color sequence and reset the colorizer could have emitted
fn strip_colors(colorizer: &Colorizer, mut bytes: Vec<u8>) -> Vec<u8> {
    let mut sequences: Vec<Vec<u8>> = colorizer
        .palette()
        .iter()
        .map(|entry| entry.sequence().to_vec())
        .collect();
    sequences.push(RESET.to_vec());

    for seq in &sequences {
        let mut stripped = Vec::with_capacity(bytes.len());
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i..].starts_with(seq) {
                i += seq.len();
            } else {
                stripped.push(bytes[i]);
                i += 1;
            }
        }
        bytes = stripped;
    }
    bytes
}

proptest! {
    #[test]
    fn prop_runs_reconstruct_input(
        input in prop::collection::vec(any::<u8>(), 0..256),
        limit in 0usize..5,
    ) {
        let tokenizer = Tokenizer::new(SeparatorSet::default(), NonZeroUsize::new(limit));
        let mut rebuilt = Vec::new();
        for run in tokenizer.tokenize(&input) {
            prop_assert!(run.len > 0);
            rebuilt.extend_from_slice(run.bytes(&input));
        }
        prop_assert_eq!(rebuilt, input);
    }

    #[test]
    fn prop_limited_words_start_on_codepoints(input in text(), limit in 1usize..4) {
        let tokenizer = Tokenizer::new(SeparatorSet::default(), NonZeroUsize::new(limit));
        for run in tokenizer.tokenize(&input) {
            if run.kind == RunKind::Word {
                let word = run.bytes(&input);
                prop_assert!(std::str::from_utf8(word).is_ok(), "split codepoint: {:?}", word);
            }
        }
    }

    #[test]
    fn prop_pipeline_is_deterministic(input in text(), seed in any::<u32>()) {
        let config = Config { seed, ..Config::default() };
        prop_assert_eq!(run(&config, &input), run(&config, &input));
    }

    #[test]
    fn prop_stripping_colors_gives_input_back(input in text()) {
        let config = Config::default();
        let colorizer = Colorizer::new(config.palette().unwrap(), config.seed);
        let out = run(&config, &input);
        prop_assert_eq!(strip_colors(&colorizer, out), input);
    }

    #[test]
    fn prop_block_and_line_modes_agree(input in short_words(), buffer_size in 8usize..32) {
        let line = Config::default();
        let block = Config {
            flush_mode: FlushMode::BlockBuffered,
            buffer_size,
            ..Config::default()
        };
        prop_assert_eq!(run(&line, &input), run(&block, &input));
    }

    #[test]
    fn prop_identical_words_identical_colors(word in "[a-z]{1,12}", seed in any::<u32>()) {
        let colorizer = Colorizer::new(colors::color::Palette::default(), seed);
        let input = format!("{word} {word}\n{word}");
        let out = run(&Config { seed, ..Config::default() }, input.as_bytes());
        let entry = colorizer.entry_for(word.as_bytes()).sequence();
        let wraps = out.windows(entry.len()).filter(|w| *w == entry).count();
        prop_assert_eq!(wraps, 3);
    }
}
