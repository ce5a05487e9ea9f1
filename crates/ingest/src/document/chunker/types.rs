//! The contract shared by every splitting strategy.

/// Turns raw text into an ordered sequence of chunks.
///
/// Implementations are immutable once built; configuration errors surface
/// from their constructors, so `split` itself cannot fail. Empty input yields
/// an empty sequence.
pub trait TextSplitter: Send + Sync {
    fn split(&self, text: &str) -> Vec<String>;
}
