/// Integration tests for the vector store covering the public ranking surface,
/// vector primitives, and concurrent access through the shared handle.

mod concurrency;
mod helpers;
mod primitives;
mod ranking;
