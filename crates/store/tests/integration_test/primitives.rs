use nest_core::NestError;
use nest_store::{cosine_similarity, dot, euclidean_distance, magnitude, normalize};

#[test]
fn test_normalized_vectors_have_cosine_equal_to_dot() {
    let a = normalize(&[1.0, 2.0, 2.0]);
    let b = normalize(&[2.0, -1.0, 0.5]);
    let cos = cosine_similarity(&a, &b).unwrap();
    let d = dot(&a, &b).unwrap();
    assert!((cos - d).abs() < 1e-6);
    assert!((magnitude(&a) - 1.0).abs() < 1e-6);
}

#[test]
fn test_cosine_is_scale_invariant() {
    let a = [1.0, 3.0, -2.0];
    let b = [0.5, 1.0, 4.0];
    let scaled: Vec<f32> = a.iter().map(|x| x * 10.0).collect();
    let base = cosine_similarity(&a, &b).unwrap();
    let after = cosine_similarity(&scaled, &b).unwrap();
    assert!((base - after).abs() < 1e-6);
}

#[test]
fn test_distance_is_symmetric() {
    let a = [1.0, 2.0, 3.0];
    let b = [-1.0, 0.0, 7.0];
    assert_eq!(
        euclidean_distance(&a, &b).unwrap(),
        euclidean_distance(&b, &a).unwrap()
    );
}

#[test]
fn test_mismatch_is_a_typed_error() {
    for result in [
        dot(&[1.0], &[1.0, 2.0]),
        cosine_similarity(&[1.0], &[1.0, 2.0]),
        euclidean_distance(&[1.0], &[1.0, 2.0]),
    ] {
        assert!(matches!(
            result,
            Err(NestError::DimensionMismatch { expected: 1, actual: 2 })
        ));
    }
}
