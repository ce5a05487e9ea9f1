//! Text splitting engine.
//!
//! Two strategies share the [`TextSplitter`] contract: a recursive
//! separator-hierarchy splitter with size-bounded, overlapping merges, and a
//! paragraph grouper.

mod helpers;
mod length;
mod paragraph;
mod recursive;
mod strategies;
mod types;

pub use length::{LengthFunction, TokenEncoder};
pub use paragraph::ParagraphSplitter;
pub use recursive::RecursiveSplitter;
pub use strategies::{build_splitter, split_document, split_text};
pub use types::TextSplitter;

#[cfg(test)]
mod tests;
