use super::*;
use crate::embedding::MockEncoder;

fn unit(dim: usize, axis: usize) -> Vec<f32> {
    let mut v = vec![0.0; dim];
    v[axis] = 1.0;
    v
}

fn berry_encoder() -> MockEncoder {
    MockEncoder::new(3)
        .with_vector("Blueberries", vec![1.0, 0.0, 0.0])
        .with_vector("Blackberries", vec![0.8, 0.6, 0.0])
        .with_vector("Bananas", vec![0.0, 0.0, 1.0])
        .with_vector("blueberry", vec![1.0, 0.0, 0.0])
}

#[test]
fn test_build_dedupes_preserving_order() {
    let index = EmbeddingIndex::build(
        ["Bananas", "Blueberries", "Bananas", "Blackberries"],
        Arc::new(berry_encoder()),
    )
    .unwrap();

    assert_eq!(index.len(), 3);
    assert_eq!(
        index.names().collect::<Vec<_>>(),
        vec!["Bananas", "Blueberries", "Blackberries"]
    );
}

#[test]
fn test_build_normalizes_vectors() {
    let encoder = MockEncoder::new(2).with_vector("Milk", vec![3.0, 4.0]);
    let index = EmbeddingIndex::build(["Milk"], Arc::new(encoder)).unwrap();
    let v = &index.items()[0].embedding;
    assert!((v[0] - 0.6).abs() < 1e-6);
    assert!((v[1] - 0.8).abs() < 1e-6);
}

#[test]
fn test_build_empty_catalog() {
    let encoder = Arc::new(MockEncoder::new(3));
    let index = EmbeddingIndex::build(Vec::<String>::new(), encoder.clone()).unwrap();
    assert!(index.is_empty());
    assert!(index.top_k("anything", 3).unwrap().is_empty());
    assert_eq!(encoder.calls(), 0);
}

#[test]
fn test_build_fails_when_encoder_fails() {
    let err = EmbeddingIndex::build(["Milk"], Arc::new(MockEncoder::failing(3))).unwrap_err();
    assert!(matches!(err, IndexBuildError::Encoding { .. }));
}

#[test]
fn test_build_rejects_wrong_dimension() {
    let encoder = MockEncoder::new(3).with_vector("Milk", vec![1.0, 0.0]);
    let err = EmbeddingIndex::build(["Milk"], Arc::new(encoder)).unwrap_err();
    match err {
        IndexBuildError::Dimension { name, .. } => assert_eq!(name, "Milk"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_build_with_missing_model_dir() {
    let dir = tempfile::tempdir().unwrap();
    let err = EmbeddingIndex::build_with_config(["Milk"], EncoderConfig::new(dir.path()))
        .unwrap_err();
    assert!(matches!(err, IndexBuildError::ModelLoad { .. }));
}

#[test]
fn test_build_with_stub_config() {
    let index =
        EmbeddingIndex::build_with_config(["Milk", "Bread"], EncoderConfig::stub()).unwrap();
    assert_eq!(index.len(), 2);
    assert_eq!(index.dim(), crate::embedding::ENCODER_EMBEDDING_DIM);
}

#[test]
fn test_top_k_orders_by_similarity() {
    let index = EmbeddingIndex::build(
        ["Bananas", "Blackberries", "Blueberries"],
        Arc::new(berry_encoder()),
    )
    .unwrap();

    let results = index.top_k("blueberry", 3).unwrap();
    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Blueberries", "Blackberries", "Bananas"]);
    assert!((results[0].score - 1.0).abs() < 1e-6);
    assert!((results[1].score - 0.8).abs() < 1e-6);
    assert!(results[2].score.abs() < 1e-6);
}

#[test]
fn test_top_k_truncates() {
    let index = EmbeddingIndex::build(
        ["Bananas", "Blackberries", "Blueberries"],
        Arc::new(berry_encoder()),
    )
    .unwrap();
    assert_eq!(index.top_k("blueberry", 1).unwrap().len(), 1);
    assert_eq!(index.top_k("blueberry", 10).unwrap().len(), 3);
    assert!(index.top_k("blueberry", 0).unwrap().is_empty());
}

#[test]
fn test_top_k_ties_keep_catalog_order() {
    let encoder = MockEncoder::new(2)
        .with_vector("Apples", unit(2, 0))
        .with_vector("Apricots", unit(2, 0))
        .with_vector("Avocados", unit(2, 0))
        .with_vector("a", unit(2, 0));
    let index =
        EmbeddingIndex::build(["Avocados", "Apples", "Apricots"], Arc::new(encoder)).unwrap();

    let names: Vec<String> = index
        .top_k("a", 3)
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["Avocados", "Apples", "Apricots"]);
}

#[test]
fn test_top_k_surfaces_encode_error() {
    let encoder = berry_encoder().fail_on("broken");
    let index = EmbeddingIndex::build(["Blueberries"], Arc::new(encoder)).unwrap();
    let err = index.top_k("broken", 3).unwrap_err();
    assert!(err.to_string().contains("failed to encode query"));
}

#[test]
fn test_query_cache_skips_reencoding() {
    let encoder = Arc::new(berry_encoder());
    let index = EmbeddingIndex::build(["Blueberries", "Bananas"], encoder.clone())
        .unwrap()
        .with_query_cache(16);
    let after_build = encoder.calls();

    let first = index.top_k("blueberry", 2).unwrap();
    let second = index.top_k("blueberry", 2).unwrap();

    assert_eq!(first, second);
    assert_eq!(encoder.calls(), after_build + 1);
}

#[test]
fn test_query_cache_disabled_with_zero_capacity() {
    let encoder = Arc::new(berry_encoder());
    let index = EmbeddingIndex::build(["Blueberries"], encoder.clone())
        .unwrap()
        .with_query_cache(0);
    let after_build = encoder.calls();

    index.top_k("blueberry", 1).unwrap();
    index.top_k("blueberry", 1).unwrap();
    assert_eq!(encoder.calls(), after_build + 2);
}

#[test]
fn test_debug_output() {
    let index = EmbeddingIndex::build(["Blueberries"], Arc::new(berry_encoder())).unwrap();
    let debug = format!("{:?}", index);
    assert!(debug.contains("EmbeddingIndex"));
    assert!(debug.contains("items: 1"));
}
