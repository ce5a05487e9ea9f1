pub mod metric;
pub mod shared;
pub mod store;
pub mod vector;

// Re-export key types
pub use metric::Metric;
pub use shared::SharedVectorStore;
pub use store::{Ranked, SearchHit, StoreStats, VectorStore};
pub use vector::{cosine_similarity, dot, euclidean_distance, magnitude, normalize};
