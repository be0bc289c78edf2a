//! End-to-end tests for the colorizing pipeline
//!
//! Each test feeds an in-memory input through a configured pipeline and
//! checks the exact bytes on the output and diagnostic streams.

use std::num::NonZeroUsize;

use colors::color::{Colorizer, RESET};
use colors::text::SeparatorSet;
use colors::{Config, FlushMode, Pipeline, PipelineState};

/// Run `input` through a pipeline built from `config`
fn colorize(config: &Config, input: &[u8]) -> (Vec<u8>, String, PipelineState) {
    let mut pipeline = Pipeline::new(config).expect("valid config");
    let mut out = Vec::new();
    let mut diag = Vec::new();
    let state = pipeline.run(input, &mut out, &mut diag).expect("in-memory I/O cannot fail");
    (out, String::from_utf8(diag).expect("diagnostics are UTF-8"), state)
}

/// Expected bytes for one colored word
fn wrap(colorizer: &Colorizer, word: &[u8]) -> Vec<u8> {
    let mut v = colorizer.entry_for(word).sequence().to_vec();
    v.extend_from_slice(word);
    v.extend_from_slice(RESET);
    v
}

fn colorizer_for(config: &Config) -> Colorizer {
    Colorizer::new(config.palette().unwrap(), config.seed)
}

// ============================================================================
// Basic coloring
// ============================================================================

#[test]
fn test_foo_bar_foo() {
    let config = Config::default();
    let c = colorizer_for(&config);
    let (out, diag, state) = colorize(&config, b"foo bar foo");

    let mut expected = wrap(&c, b"foo");
    expected.push(b' ');
    expected.extend(wrap(&c, b"bar"));
    expected.push(b' ');
    expected.extend(wrap(&c, b"foo"));

    assert_eq!(out, expected);
    assert!(diag.is_empty());
    assert_eq!(state, PipelineState::Normal);
    assert_ne!(c.index_of(b"foo"), c.index_of(b"bar"));
}

#[test]
fn test_only_separators_have_no_color() {
    let (out, _, _) = colorize(&Config::default(), b"   \t\r\n\n");
    assert_eq!(out, b"   \t\r\n\n");
}

#[test]
fn test_empty_input() {
    let (out, diag, state) = colorize(&Config::default(), b"");
    assert!(out.is_empty());
    assert!(diag.is_empty());
    assert_eq!(state, PipelineState::Normal);
}

#[test]
fn test_empty_lines_preserved() {
    let config = Config::default();
    let c = colorizer_for(&config);
    let (out, _, _) = colorize(&config, b"\n\na\n\n");

    let mut expected = b"\n\n".to_vec();
    expected.extend(wrap(&c, b"a"));
    expected.extend_from_slice(b"\n\n");
    assert_eq!(out, expected);
}

#[test]
fn test_binary_bytes_pass_through() {
    let config = Config::default();
    let c = colorizer_for(&config);
    let input = [0x00, 0xff, b'\r', b'\n', 0x1b];
    let (out, _, _) = colorize(&config, &input);

    let mut expected = wrap(&c, &[0x00, 0xff]);
    expected.extend_from_slice(b"\r\n");
    expected.extend(wrap(&c, &[0x1b]));
    assert_eq!(out, expected);
}

#[test]
fn test_crlf_is_not_translated() {
    let (out, _, _) = colorize(&Config::default(), b"\r\n\r\n");
    assert_eq!(out, b"\r\n\r\n");
}

// ============================================================================
// Configuration effects
// ============================================================================

#[test]
fn test_added_separators() {
    let mut config = Config::default();
    config.add_separators(",").unwrap();
    let c = colorizer_for(&config);
    let (out, _, _) = colorize(&config, b"a,b");

    let mut expected = wrap(&c, b"a");
    expected.push(b',');
    expected.extend(wrap(&c, b"b"));
    assert_eq!(out, expected);
}

#[test]
fn test_alnum_separators() {
    let config = Config {
        separators: SeparatorSet::alnum(),
        ..Config::default()
    };
    let c = colorizer_for(&config);
    let (out, _, _) = colorize(&config, b"f(x)");

    let mut expected = wrap(&c, b"f");
    expected.push(b'(');
    expected.extend(wrap(&c, b"x"));
    expected.push(b')');
    assert_eq!(out, expected);
}

#[test]
fn test_word_limit_utf8_safe() {
    let config = Config {
        word_limit: NonZeroUsize::new(1),
        ..Config::default()
    };
    let c = colorizer_for(&config);

    let (out, _, _) = colorize(&config, "é".as_bytes());
    assert_eq!(out, wrap(&c, "é".as_bytes()));

    let (out, _, _) = colorize(&config, b"ab");
    let mut expected = wrap(&c, b"a");
    expected.extend(wrap(&c, b"b"));
    assert_eq!(out, expected);
}

#[test]
fn test_seed_changes_colors_deterministically() {
    let input = b"one two three four five six seven eight nine ten";
    let seeded = Config {
        seed: colors::color::seed_from_str("x"),
        ..Config::default()
    };

    let (plain_a, _, _) = colorize(&Config::default(), input);
    let (plain_b, _, _) = colorize(&Config::default(), input);
    let (seeded_a, _, _) = colorize(&seeded, input);
    let (seeded_b, _, _) = colorize(&seeded, input);

    assert_eq!(plain_a, plain_b);
    assert_eq!(seeded_a, seeded_b);
    assert_ne!(plain_a, seeded_a);
}

#[test]
fn test_custom_palette() {
    let config = Config {
        colors: vec![colors::color::Rgb::new(10, 20, 30)],
        ..Config::default()
    };
    let (out, _, _) = colorize(&config, b"hi");
    assert_eq!(out, b"\x1b[38;2;10;20;30mhi\x1b[0m");
}

#[test]
fn test_passthrough_copies_input() {
    let config = Config {
        passthrough: true,
        ..Config::default()
    };
    let input = b"nothing \x00 colored\n";
    let (out, diag, _) = colorize(&config, input);
    assert_eq!(out, input);
    assert!(diag.is_empty());
}

// ============================================================================
// Flush modes
// ============================================================================

#[test]
fn test_block_buffered_never_splits_words() {
    let input = b"lorem ipsum dolor sit amet consectetur adipiscing elit\nsed do eiusmod";
    let per_line = Config::default();
    let c = colorizer_for(&per_line);
    let (expected, _, _) = colorize(&per_line, input);

    for buffer_size in [12, 13, 17, 64] {
        let block = Config {
            flush_mode: FlushMode::BlockBuffered,
            buffer_size,
            ..Config::default()
        };
        let (out, diag, state) = colorize(&block, input);
        assert_eq!(out, expected, "buffer size {buffer_size}");
        assert!(diag.is_empty());
        assert_eq!(state, PipelineState::Normal);
    }

    // The longest word is wrapped whole
    let longest = wrap(&c, b"consectetur");
    assert!(expected.windows(longest.len()).any(|w| w == longest.as_slice()));
}

#[test]
fn test_block_buffered_keeps_codepoints_across_blocks() {
    let input = "ééé ééé".as_bytes();
    let per_line = Config::default();
    let (expected, _, _) = colorize(&per_line, input);

    let block = Config {
        flush_mode: FlushMode::BlockBuffered,
        buffer_size: 7,
        ..Config::default()
    };
    let (out, _, _) = colorize(&block, input);
    assert_eq!(out, expected);
}

// ============================================================================
// Overflow degradation
// ============================================================================

#[test]
fn test_overflow_line_of_capacity_plus_one() {
    let capacity = 8;
    let config = Config {
        buffer_size: capacity,
        ..Config::default()
    };
    let c = colorizer_for(&config);
    let long_line = vec![b'x'; capacity + 1];

    let mut input = b"one two\n".to_vec();
    input.extend_from_slice(&long_line);
    input.extend_from_slice(b"\nthree four\n");

    let (out, diag, state) = colorize(&config, &input);

    let mut expected = wrap(&c, b"one");
    expected.push(b' ');
    expected.extend(wrap(&c, b"two"));
    expected.push(b'\n');
    expected.extend_from_slice(&long_line);
    expected.extend_from_slice(b"\nthree four\n");

    assert_eq!(out, expected);
    assert_eq!(diag, "warning: more than 8 bytes in line - degrading to plain cat\n");
    assert_eq!(state, PipelineState::Degraded);
}

#[test]
fn test_overflow_on_first_line() {
    let config = Config {
        buffer_size: 4,
        ..Config::default()
    };
    let (out, diag, state) = colorize(&config, b"abcdef ghi\njkl\n");
    assert_eq!(out, b"abcdef ghi\njkl\n");
    assert!(diag.contains("more than 4 bytes"));
    assert_eq!(state, PipelineState::Degraded);
}

#[test]
fn test_long_unterminated_last_line_fits_exactly() {
    let config = Config {
        buffer_size: 4,
        ..Config::default()
    };
    let c = colorizer_for(&config);
    let (out, diag, state) = colorize(&config, b"ab\nwxyz");

    let mut expected = wrap(&c, b"ab");
    expected.push(b'\n');
    expected.extend(wrap(&c, b"wxyz"));
    assert_eq!(out, expected);
    assert!(diag.is_empty());
    assert_eq!(state, PipelineState::Normal);
}

#[test]
fn test_block_overflow_flushes_prior_output_first() {
    let config = Config {
        buffer_size: 6,
        flush_mode: FlushMode::BlockBuffered,
        ..Config::default()
    };
    let c = colorizer_for(&config);
    let (out, diag, state) = colorize(&config, b"ab abcdefghij kl");

    let mut expected = wrap(&c, b"ab");
    expected.push(b' ');
    expected.extend_from_slice(b"abcdefghij kl");
    assert_eq!(out, expected);
    assert_eq!(diag, "warning: more than 6 bytes in word - degrading to plain cat\n");
    assert_eq!(state, PipelineState::Degraded);
}
