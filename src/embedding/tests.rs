use super::*;
use std::path::PathBuf;

mod config_tests {
    use super::*;

    #[test]
    fn test_encoder_config_default() {
        let config = EncoderConfig::default();
        assert_eq!(config.embedding_dim, ENCODER_EMBEDDING_DIM);
        assert_eq!(config.max_seq_len, ENCODER_MAX_SEQ_LEN);
        assert!(!config.testing_stub);
        assert!(config.model_dir.as_os_str().is_empty());
    }

    #[test]
    fn test_encoder_config_paths_derived_from_model_dir() {
        let config = EncoderConfig::new("/models/minilm");
        assert_eq!(config.config_path(), PathBuf::from("/models/minilm/config.json"));
        assert_eq!(
            config.weights_path(),
            PathBuf::from("/models/minilm/model.safetensors")
        );
        assert_eq!(
            config.tokenizer_path(),
            PathBuf::from("/models/minilm/tokenizer.json")
        );
    }

    #[test]
    fn test_encoder_config_stub_validates() {
        let config = EncoderConfig::stub();
        assert!(config.testing_stub);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_encoder_config_empty_dir_no_stub_rejected() {
        let config = EncoderConfig {
            testing_stub: false,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EmbeddingError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_encoder_config_missing_dir_rejected() {
        let config = EncoderConfig::new("/nonexistent/model/dir");
        assert!(matches!(
            config.validate(),
            Err(EmbeddingError::ModelNotFound { .. })
        ));
    }

    #[test]
    fn test_encoder_config_zero_dim_rejected() {
        let config = EncoderConfig {
            embedding_dim: 0,
            ..EncoderConfig::stub()
        };
        assert!(matches!(
            config.validate(),
            Err(EmbeddingError::InvalidConfig { .. })
        ));
    }
}

mod stub_encoder_tests {
    use super::*;

    fn stub_encoder() -> TextEncoder {
        TextEncoder::load(EncoderConfig::stub()).unwrap()
    }

    #[test]
    fn test_stub_encoder_reports_mode() {
        let encoder = stub_encoder();
        assert!(encoder.is_stub());
        assert!(!encoder.has_model());
        assert_eq!(encoder.embedding_dim(), ENCODER_EMBEDDING_DIM);
    }

    #[test]
    fn test_encode_returns_one_vector_per_input() {
        let encoder = stub_encoder();
        let vectors = encoder.encode(&["alpha", "beta", "gamma"]).unwrap();

        assert_eq!(vectors.len(), 3);
        for vector in &vectors {
            assert_eq!(vector.len(), ENCODER_EMBEDDING_DIM);
        }
    }

    #[test]
    fn test_encode_empty_batch() {
        let encoder = stub_encoder();
        assert!(encoder.encode(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_encode_is_deterministic() {
        let encoder = stub_encoder();
        let first = encoder.encode(&["the same text"]).unwrap();
        let second = encoder.encode(&["the same text"]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_texts_get_different_vectors() {
        let encoder = stub_encoder();
        let vectors = encoder.encode(&["one text", "another text"]).unwrap();
        assert_ne!(vectors[0], vectors[1]);
    }

    #[test]
    fn test_vectors_are_unit_norm() {
        let encoder = stub_encoder();
        let vectors = encoder.encode(&["check the norm"]).unwrap();

        let norm: f32 = vectors[0].iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_empty_string_does_not_crash() {
        let encoder = stub_encoder();
        let vectors = encoder.encode(&[""]).unwrap();
        assert_eq!(vectors.len(), 1);
        assert_eq!(vectors[0].len(), ENCODER_EMBEDDING_DIM);
    }

    #[test]
    fn test_encode_one_matches_batch() {
        let encoder = stub_encoder();
        let single = encoder.encode_one("some text").unwrap();
        let batch = encoder.encode(&["some text"]).unwrap();
        assert_eq!(single, batch[0]);
    }
}

mod normalize_tests {
    use super::*;

    #[test]
    fn test_normalize_zero_vector_stays_zero() {
        let result = normalize(vec![0.0, 0.0, 0.0]);
        assert_eq!(result, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_normalize_scales_to_unit_length() {
        let result = normalize(vec![3.0, 4.0]);
        assert!((result[0] - 0.6).abs() < 1e-6);
        assert!((result[1] - 0.8).abs() < 1e-6);
    }
}
