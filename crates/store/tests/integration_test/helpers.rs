use nest_store::VectorStore;

/// Build chunk labels `"chunk-0"`, `"chunk-1"`, ...
pub fn labels(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("chunk-{i}")).collect()
}

/// Store populated with `vectors`, labelled in insertion order.
pub fn store_with(vectors: Vec<Vec<f32>>) -> VectorStore {
    let mut store = VectorStore::new();
    store.append(labels(vectors.len()), vectors).unwrap();
    store
}

/// Deterministic unit-ish vector for entry `i` of dimension `dim`.
pub fn spread_vector(i: usize, dim: usize) -> Vec<f32> {
    (0..dim)
        .map(|d| (((i * 31 + d * 17) % 97) as f32 / 97.0) - 0.5)
        .collect()
}
