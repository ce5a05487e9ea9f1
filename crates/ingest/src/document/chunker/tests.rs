//! Tests for the splitting engine.

use nest_core::config::SplitterConfig;
use nest_core::{LengthUnit, NestError, SplitterStrategy};

use super::helpers::{join_pieces, merge_pieces, split_on_separator};
use super::*;
use crate::document::{ExtractedDocument, PageContent};

fn pieces(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn recursive(chunk_size: usize, chunk_overlap: usize) -> RecursiveSplitter {
    RecursiveSplitter::new(chunk_size, chunk_overlap).unwrap()
}

// ── Helpers ─────────────────────────────────────────────────────────

#[test]
fn split_on_separator_trims_and_drops_empties() {
    assert_eq!(
        split_on_separator("  a \n\n\n\n b  \n\n  ", "\n\n"),
        vec!["a".to_string(), "b".to_string()]
    );
}

#[test]
fn split_on_empty_separator_yields_visible_characters() {
    assert_eq!(split_on_separator("a b\nc", ""), pieces(&["a", "b", "c"]));
}

#[test]
fn join_of_whitespace_is_none() {
    assert_eq!(join_pieces([" ", "  "], " "), None);
    assert_eq!(join_pieces(["a", "b"], "-").as_deref(), Some("a-b"));
}

#[test]
fn merge_carries_overlap_between_chunks() {
    let words = pieces(&["aaaa", "bbbb", "cccc", "dddd", "eeee", "ffff"]);
    let chunks = merge_pieces(&words, " ", 14, 5, &LengthFunction::CharacterCount);
    assert_eq!(
        chunks,
        vec!["aaaa bbbb cccc", "cccc dddd eeee", "eeee ffff"]
    );
}

#[test]
fn merge_stops_evicting_at_exact_overlap() {
    // After evicting "aaaa", the carried cost is exactly 9 == overlap.
    let words = pieces(&["aaaa", "bbbb", "cccc", "dddd", "eeee", "ffff"]);
    let chunks = merge_pieces(&words, " ", 14, 9, &LengthFunction::CharacterCount);
    assert_eq!(
        chunks,
        vec![
            "aaaa bbbb cccc",
            "bbbb cccc dddd",
            "cccc dddd eeee",
            "dddd eeee ffff"
        ]
    );
}

#[test]
fn merge_accepts_chunk_of_exactly_chunk_size() {
    let words = pieces(&["aaaa", "bbbb", "cccc"]);
    let chunks = merge_pieces(&words, " ", 14, 0, &LengthFunction::CharacterCount);
    assert_eq!(chunks, vec!["aaaa bbbb cccc"]);
}

#[test]
fn merge_keeps_oversized_piece_whole() {
    let words = pieces(&["abcdefghij", "xy"]);
    let chunks = merge_pieces(&words, " ", 5, 1, &LengthFunction::CharacterCount);
    assert_eq!(chunks, vec!["abcdefghij", "xy"]);
}

#[test]
fn merge_of_nothing_is_empty() {
    assert!(merge_pieces(&[], " ", 10, 2, &LengthFunction::CharacterCount).is_empty());
}

// ── Recursive ───────────────────────────────────────────────────────

#[test]
fn recursive_rejects_overlap_not_below_size() {
    assert!(matches!(
        RecursiveSplitter::new(10, 10),
        Err(NestError::InvalidChunkSize { chunk_size: 10, chunk_overlap: 10 })
    ));
    assert!(matches!(
        RecursiveSplitter::new(0, 0),
        Err(NestError::InvalidChunkSize { .. })
    ));
}

#[test]
fn recursive_empty_input_yields_nothing() {
    assert!(recursive(50, 10).split("").is_empty());
    assert!(recursive(50, 10).split(" \n\n \n ").is_empty());
}

#[test]
fn recursive_short_text_is_single_chunk() {
    assert_eq!(recursive(50, 10).split("  hello world  "), vec!["hello world"]);
}

#[test]
fn recursive_splits_oversized_paragraph_only() {
    let short = "The first paragraph is exactly forty ch.";
    let long = "the second paragraph runs on to sixty characters total here.";
    assert_eq!(short.chars().count(), 40);
    assert_eq!(long.chars().count(), 60);
    let text = format!("{short}\n\n{long}");

    let chunks = recursive(50, 10).split(&text);

    assert!(chunks.len() >= 3, "got {chunks:?}");
    assert_eq!(chunks[0], short);
    for chunk in &chunks {
        assert!(chunk.chars().count() <= 50, "oversized chunk {chunk:?}");
    }
    for word in long.split_whitespace() {
        assert!(chunks[1..].iter().any(|c| c.contains(word)), "lost {word}");
    }
}

#[test]
fn recursive_bounds_every_chunk_and_loses_no_words() {
    let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit.\n\
                Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.\n\n\
                Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris.\n\
                Duis aute irure dolor in reprehenderit in voluptate velit esse.";
    let chunks = recursive(40, 8).split(text);

    for chunk in &chunks {
        assert!(chunk.chars().count() <= 40, "oversized chunk {chunk:?}");
        assert_eq!(chunk, chunk.trim());
    }
    for word in text.split_whitespace() {
        assert!(chunks.iter().any(|c| c.contains(word)), "lost {word}");
    }
}

#[test]
fn recursive_falls_back_to_characters() {
    let text = "x".repeat(95);
    let chunks = recursive(10, 0).split(&text);
    assert_eq!(chunks.len(), 10);
    assert!(chunks[..9].iter().all(|c| c == "xxxxxxxxxx"));
    assert_eq!(chunks[9], "xxxxx");
}

#[test]
fn recursive_terminates_with_unit_chunk_size() {
    let chunks = recursive(1, 0).split("ab c");
    assert_eq!(chunks, pieces(&["a", "b", "c"]));
}

#[test]
fn recursive_custom_separators_get_character_fallback() {
    let splitter = recursive(5, 0).with_separators(pieces(&["|"]));
    assert_eq!(splitter.separators(), &["|".to_string(), String::new()]);
    assert_eq!(splitter.split("ab|cd|efghijk"), pieces(&["ab|cd", "efghi", "jk"]));
}

#[test]
fn recursive_counts_words_when_configured() {
    let splitter = recursive(3, 0).with_length_function(LengthFunction::WordCount);
    let chunks = splitter.split("one two three four five");
    // Separator " " costs zero words, so three words fit per chunk.
    assert_eq!(chunks, vec!["one two three", "four five"]);
}

// ── Paragraph ───────────────────────────────────────────────────────

#[test]
fn paragraph_rejects_zero_merge_count() {
    assert!(matches!(
        ParagraphSplitter::new(0),
        Err(NestError::InvalidMergeCount)
    ));
}

#[test]
fn paragraph_groups_by_merge_count() {
    let text: String = (1..=10).map(|i| format!("p{i}\n\n")).collect();
    let chunks = ParagraphSplitter::default().split(&text);
    assert_eq!(chunks, vec!["p1 p2 p3 p4 p5 p6 p7 p8", "p9 p10"]);
}

#[test]
fn paragraph_trims_lines_and_skips_blanks() {
    let chunks = ParagraphSplitter::new(2).unwrap().split("  a \r\n\n   \n b\nc  ");
    assert_eq!(chunks, vec!["a b", "c"]);
}

#[test]
fn paragraph_empty_input_yields_nothing() {
    assert!(ParagraphSplitter::default().split("\n \n").is_empty());
}

// ── Dispatch ────────────────────────────────────────────────────────

#[test]
fn split_text_uses_configured_strategy() {
    let config = SplitterConfig {
        strategy: SplitterStrategy::Paragraph,
        merge_count: 2,
        ..SplitterConfig::default()
    };
    assert_eq!(split_text("a\nb\nc", &config).unwrap(), vec!["a b", "c"]);
}

#[test]
fn build_splitter_propagates_invalid_config() {
    let config = SplitterConfig {
        chunk_size: 10,
        chunk_overlap: 20,
        ..SplitterConfig::default()
    };
    assert!(matches!(
        build_splitter(&config),
        Err(NestError::InvalidChunkSize { .. })
    ));
}

#[test]
fn build_splitter_with_token_costs() {
    let config = SplitterConfig {
        chunk_size: 4,
        chunk_overlap: 0,
        length_unit: LengthUnit::Tokens,
        ..SplitterConfig::default()
    };
    let chunks = build_splitter(&config).unwrap().split("hello world hello world hello world");
    assert!(chunks.len() >= 2);
    let tokens = LengthFunction::from_unit(LengthUnit::Tokens).unwrap();
    for chunk in &chunks {
        assert!(tokens.measure(chunk) <= 4, "oversized chunk {chunk:?}");
    }
}

#[test]
fn split_document_walks_pages_in_order() {
    let doc = ExtractedDocument {
        filename: "two.pdf".to_string(),
        file_type: "pdf".to_string(),
        pages: vec![
            PageContent { page_number: 1, text: "first page".to_string(), headings: vec![] },
            PageContent { page_number: 2, text: "second page".to_string(), headings: vec![] },
        ],
    };
    let splitter = recursive(100, 10);
    assert_eq!(split_document(&doc, &splitter), vec!["first page", "second page"]);
}
