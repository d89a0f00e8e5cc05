//! Text embedding.
//!
//! [`TextEncoder`] maps text to fixed-length vectors, batch-first. Use
//! [`EncoderConfig::stub`] for tests/deployments without model files.

/// Encoder configuration.
pub mod config;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
pub(crate) mod model;

#[cfg(test)]
mod tests;

pub use config::{ENCODER_EMBEDDING_DIM, ENCODER_MAX_SEQ_LEN, EncoderConfig};
pub use error::EmbeddingError;

use std::sync::Arc;

use candle_core::{Device, IndexOp, Tensor};
use tracing::{debug, info, warn};

use device::select_device;
use model::BertSentenceModel;

enum EncoderBackend {
    Model {
        model: Arc<BertSentenceModel>,
        tokenizer: Arc<tokenizers::Tokenizer>,
        device: Device,
    },
    Stub,
}

/// Embedding generator for queries and candidate documents.
///
/// Expensive to construct (loads model weights); build it once and share it
/// through the engine context. `encode` is read-only and safe to call from
/// concurrent requests.
pub struct TextEncoder {
    backend: EncoderBackend,
    config: EncoderConfig,
}

impl std::fmt::Debug for TextEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextEncoder")
            .field(
                "backend",
                &match &self.backend {
                    EncoderBackend::Model { device, .. } => format!("Model({device:?})"),
                    EncoderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.config.embedding_dim)
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl TextEncoder {
    /// Loads the encoder from a config (stub mode is supported).
    ///
    /// Construction failure is fatal to the engine; there is no embedding
    /// fallback.
    pub fn load(config: EncoderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!("Text encoder running in STUB mode (deterministic hash embeddings)");
            return Ok(Self {
                backend: EncoderBackend::Stub,
                config,
            });
        }

        let device = select_device();

        let tokenizer = tokenizers::Tokenizer::from_file(config.tokenizer_path()).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: format!("failed to load tokenizer: {e}"),
            }
        })?;

        let model = BertSentenceModel::load(&config.config_path(), &config.weights_path(), &device)?;

        if config.embedding_dim > model.hidden_size() {
            return Err(EmbeddingError::InvalidConfig {
                reason: format!(
                    "embedding_dim ({}) exceeds model hidden_size ({})",
                    config.embedding_dim,
                    model.hidden_size()
                ),
            });
        }

        info!(
            model_dir = %config.model_dir.display(),
            embedding_dim = config.embedding_dim,
            max_seq_len = config.max_seq_len,
            hidden_size = model.hidden_size(),
            "Text encoder loaded"
        );

        Ok(Self {
            backend: EncoderBackend::Model {
                model: Arc::new(model),
                tokenizer: Arc::new(tokenizer),
                device,
            },
            config,
        })
    }

    /// Generates embeddings for a batch of texts, one vector per input, in
    /// input order.
    ///
    /// Batching is the primary interface: many documents go through one
    /// tokenizer pass and one padded forward pass. Empty or untokenizable
    /// text yields the zero vector rather than an error.
    pub fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        match &self.backend {
            EncoderBackend::Model {
                model,
                tokenizer,
                device,
            } => self.encode_with_model(texts, model, tokenizer, device),
            EncoderBackend::Stub => Ok(texts.iter().map(|text| self.encode_stub(text)).collect()),
        }
    }

    /// Generates an embedding for a single text.
    pub fn encode_one(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut vectors = self.encode(&[text])?;
        Ok(vectors.pop().unwrap_or_else(|| vec![0.0; self.config.embedding_dim]))
    }

    fn encode_with_model(
        &self,
        texts: &[&str],
        model: &Arc<BertSentenceModel>,
        tokenizer: &tokenizers::Tokenizer,
        device: &Device,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let encodings = tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| EmbeddingError::TokenizationFailed {
                reason: e.to_string(),
            })?;

        let mut token_rows: Vec<Vec<u32>> = Vec::with_capacity(encodings.len());
        let mut max_len = 0usize;
        for encoding in &encodings {
            let mut ids = encoding.get_ids().to_vec();
            ids.truncate(self.config.max_seq_len);
            max_len = max_len.max(ids.len());
            token_rows.push(ids);
        }

        // Every row tokenized to nothing: skip the forward pass entirely.
        if max_len == 0 {
            return Ok(vec![vec![0.0; self.config.embedding_dim]; texts.len()]);
        }

        let batch = token_rows.len();
        let mut ids_flat = Vec::with_capacity(batch * max_len);
        let mut mask_flat = Vec::with_capacity(batch * max_len);
        for row in &token_rows {
            for &id in row {
                ids_flat.push(id);
                mask_flat.push(1u32);
            }
            for _ in row.len()..max_len {
                ids_flat.push(0);
                mask_flat.push(0);
            }
        }

        debug!(
            batch = batch,
            padded_len = max_len,
            "Encoding batch (single forward pass)"
        );

        let input_ids = Tensor::new(ids_flat.as_slice(), device)?.reshape((batch, max_len))?;
        let attention_mask = Tensor::new(mask_flat.as_slice(), device)?.reshape((batch, max_len))?;

        let pooled = model
            .forward_mean_pooled(&input_ids, &attention_mask)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("encoder forward pass failed: {e}"),
            })?;

        let sliced = pooled.i((.., ..self.config.embedding_dim))?;
        let rows = sliced.to_vec2::<f32>()?;

        Ok(rows.into_iter().map(normalize).collect())
    }

    fn encode_stub(&self, text: &str) -> Vec<f32> {
        use std::hash::{DefaultHasher, Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let seed = hasher.finish();

        let mut embedding = Vec::with_capacity(self.config.embedding_dim);
        let mut state = seed;

        for _ in 0..self.config.embedding_dim {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            embedding.push(value);
        }

        normalize(embedding)
    }

    /// Returns the configured output embedding dimension.
    pub fn embedding_dim(&self) -> usize {
        self.config.embedding_dim
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EncoderBackend::Stub)
    }

    /// Returns `true` if a model is loaded.
    pub fn has_model(&self) -> bool {
        matches!(self.backend, EncoderBackend::Model { .. })
    }

    /// Returns the encoder configuration.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }
}

fn normalize(mut embedding: Vec<f32>) -> Vec<f32> {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm > 0.0 {
        for x in &mut embedding {
            *x /= norm;
        }
    }

    embedding
}
