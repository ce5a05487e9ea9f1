//! Text splitting and merging utilities used by chunking strategies.

use std::collections::VecDeque;

use tracing::warn;

use super::length::LengthFunction;

/// Split `text` on `separator`, trimming every piece and dropping empties.
///
/// The empty separator splits into individual characters, so whitespace
/// characters vanish entirely.
pub(crate) fn split_on_separator(text: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        return text
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(String::from)
            .collect();
    }
    text.split(separator)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Concatenate `pieces` with `separator` and trim the result.
///
/// Returns `None` when nothing but whitespace remains.
pub(crate) fn join_pieces<'a>(
    pieces: impl IntoIterator<Item = &'a str>,
    separator: &str,
) -> Option<String> {
    let mut joined = String::new();
    for (i, piece) in pieces.into_iter().enumerate() {
        if i > 0 {
            joined.push_str(separator);
        }
        joined.push_str(piece);
    }
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Greedily pack `pieces` into chunks of at most `chunk_size`, carrying up to
/// `chunk_overlap` worth of trailing pieces into the next chunk.
///
/// A single piece larger than `chunk_size` is emitted whole with a warning.
pub(crate) fn merge_pieces(
    pieces: &[String],
    separator: &str,
    chunk_size: usize,
    chunk_overlap: usize,
    length: &LengthFunction,
) -> Vec<String> {
    let separator_len = length.measure(separator);
    // Cost of joining one more piece onto `current`.
    let joiner = |non_empty: bool| if non_empty { separator_len } else { 0 };

    let mut chunks = Vec::new();
    let mut current: VecDeque<(&str, usize)> = VecDeque::new();
    // Invariant: sum of piece costs plus one separator between each pair.
    let mut total = 0usize;

    for piece in pieces {
        let piece_len = length.measure(piece);

        if !current.is_empty() && total + piece_len + separator_len > chunk_size {
            if total > chunk_size {
                warn!(size = total, chunk_size, "created a chunk larger than the chunk size");
            }
            if let Some(chunk) = join_pieces(current.iter().map(|(p, _)| *p), separator) {
                chunks.push(chunk);
            }

            while total > chunk_overlap
                || (total > 0 && total + piece_len + joiner(!current.is_empty()) > chunk_size)
            {
                let Some((_, front_len)) = current.pop_front() else {
                    total = 0;
                    break;
                };
                total = total.saturating_sub(front_len + joiner(!current.is_empty()));
            }
        }

        total += piece_len + joiner(!current.is_empty());
        current.push_back((piece.as_str(), piece_len));
    }

    if total > chunk_size {
        warn!(size = total, chunk_size, "created a chunk larger than the chunk size");
    }
    if let Some(chunk) = join_pieces(current.iter().map(|(p, _)| *p), separator) {
        chunks.push(chunk);
    }
    chunks
}
