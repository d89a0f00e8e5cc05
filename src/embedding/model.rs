//! BERT-family sentence encoder (safetensors + candle).

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config};
use std::path::Path;

use super::error::EmbeddingError;

pub(crate) struct BertSentenceModel {
    bert: BertModel,
    hidden_size: usize,
}

impl BertSentenceModel {
    pub fn load(
        config_path: &Path,
        weights_path: &Path,
        device: &Device,
    ) -> Result<Self, EmbeddingError> {
        let config_content = std::fs::read_to_string(config_path)?;
        let config: Config =
            serde_json::from_str(&config_content).map_err(|e| EmbeddingError::ModelLoadFailed {
                reason: format!("failed to parse model config: {e}"),
            })?;

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path.to_path_buf()], DType::F32, device)
                .map_err(|e| EmbeddingError::ModelLoadFailed {
                    reason: format!("failed to map weights: {e}"),
                })?
        };

        let bert = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("bert"), &config)
        } else {
            BertModel::load(vb, &config)
        }
        .map_err(|e| EmbeddingError::ModelLoadFailed {
            reason: format!("failed to load BERT weights: {e}"),
        })?;

        Ok(Self {
            bert,
            hidden_size: config.hidden_size,
        })
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Runs one padded batch and returns mask-weighted mean-pooled sentence
    /// vectors, shape `[batch, hidden]`.
    ///
    /// A row whose attention mask is all zeros (empty text) pools to the zero
    /// vector rather than dividing by zero.
    pub fn forward_mean_pooled(
        &self,
        input_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> candle_core::Result<Tensor> {
        let token_type_ids = input_ids.zeros_like()?;
        let hidden = self
            .bert
            .forward(input_ids, &token_type_ids, Some(attention_mask))?;

        let mask = attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?.affine(1.0, 1e-9)?;

        summed.broadcast_div(&counts)
    }
}

impl std::fmt::Debug for BertSentenceModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BertSentenceModel")
            .field("hidden_size", &self.hidden_size)
            .finish()
    }
}
