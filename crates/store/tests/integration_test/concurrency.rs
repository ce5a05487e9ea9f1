use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use nest_store::SharedVectorStore;

/// Every chunk text encodes the single non-zero axis of its vector, so a
/// reader can verify index alignment of whatever snapshot it observed.
fn axis_entry(axis: usize, dim: usize) -> (String, Vec<f32>) {
    let mut v = vec![0.0; dim];
    v[axis] = 1.0;
    (format!("axis-{axis}"), v)
}

#[test]
fn test_readers_never_observe_misaligned_corpus() {
    const DIM: usize = 64;
    let store = SharedVectorStore::default();
    let done = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..4)
        .map(|r| {
            let store = store.clone();
            let done = done.clone();
            thread::spawn(move || {
                let mut checks = 0usize;
                while !done.load(Ordering::SeqCst) || checks == 0 {
                    let axis = (r * 7 + checks) % DIM;
                    let (_, query) = axis_entry(axis, DIM);
                    let hits = store.search(&query, 1).unwrap_or_default();
                    if let Some(hit) = hits.first() {
                        if hit.score > 0.5 {
                            assert_eq!(hit.chunk, format!("axis-{axis}"));
                        }
                    }
                    checks += 1;
                }
                checks
            })
        })
        .collect();

    for batch in 0..DIM / 8 {
        let (chunks, vectors): (Vec<String>, Vec<Vec<f32>>) =
            (batch * 8..batch * 8 + 8).map(|axis| axis_entry(axis, DIM)).unzip();
        store.append(chunks, vectors).unwrap();
    }
    done.store(true, Ordering::SeqCst);

    for reader in readers {
        assert!(reader.join().unwrap() > 0);
    }
    assert_eq!(store.len(), DIM);
    assert_eq!(store.stats().dimension, Some(DIM));
}

#[test]
fn test_snapshot_sees_consistent_lengths() {
    let store = SharedVectorStore::default();
    store
        .append(vec!["a".into(), "b".into()], vec![vec![1.0], vec![2.0]])
        .unwrap();
    let (chunks, first) = store.with_snapshot(|s| (s.len(), s.vector(0).map(|v| v.to_vec())));
    assert_eq!(chunks, 2);
    assert_eq!(first, Some(vec![1.0]));
    assert_eq!(store.chunk(1).as_deref(), Some("b"));
}
