use super::*;
use std::path::PathBuf;

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

mod config_tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    fn test_encoder_config_default() {
        let config = EncoderConfig::default();
        assert_eq!(config.embedding_dim, ENCODER_EMBEDDING_DIM);
        assert_eq!(config.max_seq_len, ENCODER_MAX_SEQ_LEN);
        assert!(!config.testing_stub);
        assert!(config.model_dir.as_os_str().is_empty());
    }

    #[test]
    fn test_encoder_config_paths() {
        let config = EncoderConfig::new("/models/e5-small-v2");
        assert_eq!(config.model_dir, PathBuf::from("/models/e5-small-v2"));
        assert_eq!(
            config.config_path(),
            PathBuf::from("/models/e5-small-v2/config.json")
        );
        assert_eq!(
            config.tokenizer_path(),
            PathBuf::from("/models/e5-small-v2/tokenizer.json")
        );
        assert_eq!(
            config.weights_path(),
            PathBuf::from("/models/e5-small-v2/model.safetensors")
        );
    }

    #[test]
    fn test_encoder_config_stub_validates() {
        assert!(EncoderConfig::stub().validate().is_ok());
    }

    #[test]
    fn test_encoder_config_empty_dir_no_stub() {
        let err = EncoderConfig::default().validate().unwrap_err();
        assert!(matches!(err, EmbeddingError::InvalidConfig { .. }));
    }

    #[test]
    fn test_encoder_config_missing_dir() {
        let err = EncoderConfig::new("/nonexistent/model").validate().unwrap_err();
        assert!(matches!(err, EmbeddingError::ModelNotFound { .. }));
    }

    #[test]
    fn test_encoder_config_zero_seq_len() {
        let err = EncoderConfig::stub()
            .with_max_seq_len(0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, EmbeddingError::InvalidConfig { .. }));
    }

    #[test]
    fn test_encoder_config_zero_stub_dim() {
        let err = EncoderConfig::stub()
            .with_embedding_dim(0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, EmbeddingError::InvalidConfig { .. }));
    }

    #[test]
    fn test_model_available_requires_all_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = EncoderConfig::new(dir.path());
        assert!(!config.model_available());

        std::fs::write(config.config_path(), "{}").unwrap();
        std::fs::write(config.tokenizer_path(), "{}").unwrap();
        assert!(!config.model_available());

        std::fs::write(config.weights_path(), b"").unwrap();
        assert!(config.model_available());
    }

    #[test]
    #[serial]
    fn test_from_env_unset_means_lexical_only() {
        // SAFETY: Test code only, serialized with other env tests.
        unsafe { env::remove_var(EncoderConfig::ENV_MODEL_PATH) };
        assert!(EncoderConfig::from_env().is_none());
    }

    #[test]
    #[serial]
    fn test_from_env_blank_means_lexical_only() {
        // SAFETY: Test code only, serialized with other env tests.
        unsafe { env::set_var(EncoderConfig::ENV_MODEL_PATH, "   ") };
        assert!(EncoderConfig::from_env().is_none());
        unsafe { env::remove_var(EncoderConfig::ENV_MODEL_PATH) };
    }

    #[test]
    #[serial]
    fn test_from_env_with_path() {
        // SAFETY: Test code only, serialized with other env tests.
        unsafe { env::set_var(EncoderConfig::ENV_MODEL_PATH, "/models/bge-small") };
        let config = EncoderConfig::from_env().expect("configured");
        assert_eq!(config.model_dir, PathBuf::from("/models/bge-small"));
        assert!(!config.testing_stub);
        unsafe { env::remove_var(EncoderConfig::ENV_MODEL_PATH) };
    }
}

mod stub_tests {
    use super::*;

    #[test]
    fn test_stub_load() {
        let encoder = TextEncoder::stub().expect("stub loads");
        assert!(encoder.is_stub());
        assert_eq!(encoder.dim(), ENCODER_EMBEDDING_DIM);
    }

    #[test]
    fn test_stub_vectors_are_unit_length() {
        let encoder = TextEncoder::stub().unwrap();
        let v = encoder.encode("green bell pepper").unwrap();
        assert_eq!(v.len(), ENCODER_EMBEDDING_DIM);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4, "norm = {norm}");
    }

    #[test]
    fn test_stub_is_deterministic() {
        let encoder = TextEncoder::stub().unwrap();
        let a = encoder.encode("blueberry bunch").unwrap();
        let b = encoder.encode("blueberry bunch").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_stub_is_case_insensitive() {
        let encoder = TextEncoder::stub().unwrap();
        assert_eq!(
            encoder.encode("Blueberries").unwrap(),
            encoder.encode("blueberries").unwrap()
        );
    }

    #[test]
    fn test_stub_similarity_tracks_spelling() {
        let encoder = TextEncoder::stub().unwrap();
        let query = encoder.encode("blueberry").unwrap();
        let close = encoder.encode("Blueberries").unwrap();
        let far = encoder.encode("Chicken, raw").unwrap();
        assert!(cosine(&query, &close) > cosine(&query, &far));
    }

    #[test]
    fn test_stub_identical_text_scores_one() {
        let encoder = TextEncoder::stub().unwrap();
        let v = encoder.encode("Bananas").unwrap();
        assert!((cosine(&v, &v) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_stub_empty_text_is_zero_vector() {
        let encoder = TextEncoder::stub().unwrap();
        let v = encoder.encode("").unwrap();
        assert_eq!(v.len(), ENCODER_EMBEDDING_DIM);
        assert!(v.iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_stub_batch_matches_single() {
        let encoder = TextEncoder::stub().unwrap();
        let batch = encoder.encode_batch(&["milk", "bread"]).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], encoder.encode("milk").unwrap());
        assert_eq!(batch[1], encoder.encode("bread").unwrap());
    }

    #[test]
    fn test_stub_empty_batch() {
        let encoder = TextEncoder::stub().unwrap();
        assert!(encoder.encode_batch(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_stub_custom_dim() {
        let encoder = TextEncoder::load(EncoderConfig::stub().with_embedding_dim(64)).unwrap();
        assert_eq!(encoder.dim(), 64);
        assert_eq!(encoder.encode("eggs").unwrap().len(), 64);
    }

    #[test]
    fn test_debug_output() {
        let encoder = TextEncoder::stub().unwrap();
        let debug = format!("{:?}", encoder);
        assert!(debug.contains("TextEncoder"));
        assert!(debug.contains("Stub"));
    }

    #[test]
    fn test_load_fails_without_model_files() {
        let dir = tempfile::tempdir().unwrap();
        let err = TextEncoder::load(EncoderConfig::new(dir.path())).unwrap_err();
        assert!(matches!(err, EmbeddingError::ModelLoadFailed { .. }));
    }
}

#[test]
fn test_normalize_helper() {
    let v = normalize(vec![3.0, 4.0]);
    assert!((v[0] - 0.6).abs() < 1e-6);
    assert!((v[1] - 0.8).abs() < 1e-6);
    assert_eq!(normalize(vec![0.0, 0.0]), vec![0.0, 0.0]);
}

mod model_tests {
    use super::*;

    fn model_config() -> Option<EncoderConfig> {
        EncoderConfig::from_env().filter(|c| c.model_available())
    }

    #[test]
    #[ignore] // Requires LARDER_MODEL_PATH pointing at a BERT sentence model
    fn test_model_vectors_are_unit_length() {
        let Some(config) = model_config() else {
            return;
        };
        let encoder = TextEncoder::load(config).expect("model loads");
        let v = encoder.encode("green bell pepper").unwrap();
        assert_eq!(v.len(), encoder.dim());
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-3);
    }

    #[test]
    #[ignore] // Requires LARDER_MODEL_PATH pointing at a BERT sentence model
    fn test_model_batch_padding_does_not_change_vectors() {
        let Some(config) = model_config() else {
            return;
        };
        let encoder = TextEncoder::load(config).expect("model loads");
        let single = encoder.encode("milk").unwrap();
        let batch = encoder
            .encode_batch(&["milk", "a much longer receipt line about bread"])
            .unwrap();
        assert!(cosine(&single, &batch[0]) > 0.999);
    }
}
