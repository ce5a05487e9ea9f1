use nest_core::NestError;
use nest_store::{Metric, VectorStore};

use crate::helpers::{labels, spread_vector, store_with};

#[test]
fn test_compass_scenario() {
    let store = store_with(vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.7, 0.7]]);

    let ranked = store.rank(&[1.0, 0.0], 2).unwrap();
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].index, 0);
    assert!((ranked[0].score - 1.0).abs() < 1e-6);
    assert_eq!(ranked[1].index, 2);
    assert!((ranked[1].score - 0.707).abs() < 1e-3);
}

#[test]
fn test_result_length_is_min_of_k_and_corpus() {
    let store = store_with((0..7).map(|i| spread_vector(i, 8)).collect());
    for k in 0..12 {
        let ranked = store.rank(&spread_vector(3, 8), k).unwrap();
        assert_eq!(ranked.len(), k.min(7), "k = {k}");
    }
}

#[test]
fn test_scores_are_non_increasing() {
    let store = store_with((0..50).map(|i| spread_vector(i, 16)).collect());
    let ranked = store.rank(&spread_vector(11, 16), 50).unwrap();
    for pair in ranked.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn test_query_equal_to_stored_vector_ranks_first() {
    let store = store_with((0..20).map(|i| spread_vector(i, 12)).collect());
    let query = spread_vector(13, 12);
    let ranked = store.rank(&query, 3).unwrap();
    assert_eq!(ranked[0].index, 13);
    assert!((ranked[0].score - 1.0).abs() < 1e-5);
}

#[test]
fn test_duplicate_vectors_rank_by_insertion() {
    let v = vec![0.2, 0.4, 0.6];
    let store = store_with(vec![vec![-1.0, 0.0, 0.0], v.clone(), vec![0.0, 1.0, 0.0], v.clone()]);
    let ranked = store.rank(&v, 2).unwrap();
    assert_eq!(ranked[0].index, 1);
    assert_eq!(ranked[1].index, 3);
}

#[test]
fn test_multiple_appends_preserve_alignment() {
    let mut store = VectorStore::new();
    store
        .append(vec!["alpha".into(), "beta".into()], vec![vec![1.0, 0.0], vec![0.0, 1.0]])
        .unwrap();
    store
        .append(vec!["gamma".into()], vec![vec![-1.0, 0.0]])
        .unwrap();

    let hits = store.search(&[-1.0, 0.0], 1).unwrap();
    assert_eq!(hits[0].index, 2);
    assert_eq!(hits[0].chunk, "gamma");
    assert_eq!(store.chunk(0), Some("alpha"));
    assert_eq!(store.vector(1), Some(&[0.0, 1.0][..]));
}

#[test]
fn test_dot_product_store_prefers_magnitude() {
    let mut store = VectorStore::with_metric(Metric::DotProduct);
    store
        .append(labels(2), vec![vec![1.0, 0.0], vec![3.0, 0.0]])
        .unwrap();
    let ranked = store.rank(&[1.0, 0.0], 2).unwrap();
    assert_eq!(ranked[0].index, 1);
    assert_eq!(ranked[0].score, 3.0);
}

#[test]
fn test_query_dimension_is_checked() {
    let store = store_with(vec![vec![1.0, 0.0, 0.0]]);
    let err = store.search(&[1.0, 0.0], 1).unwrap_err();
    assert!(matches!(err, NestError::DimensionMismatch { expected: 3, actual: 2 }));
}

#[test]
fn test_stats_serialize() {
    let store = store_with(vec![vec![1.0, 0.0]]);
    let json = serde_json::to_string(&store.stats()).unwrap();
    assert!(json.contains("\"chunk_count\":1"));
    assert!(json.contains("\"dimension\":2"));
    assert!(json.contains("\"metric\":\"cosine\""));
}
