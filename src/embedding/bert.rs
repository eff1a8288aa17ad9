use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config, DTYPE};

use crate::embedding::EncoderConfig;

/// BERT-family sentence encoder: transformer + attention-masked mean pooling + L2 norm.
pub struct BertSentenceModel {
    bert: BertModel,
    hidden_size: usize,
}

impl BertSentenceModel {
    /// Loads `config.json` and `model.safetensors` from the configured model directory.
    pub fn load(encoder: &EncoderConfig, device: &Device) -> Result<Self> {
        let weights_path = encoder.weights_path();

        let config_content = std::fs::read_to_string(encoder.config_path())?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;

        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DTYPE, device)? };

        // Sentence-transformers exports sometimes keep the `bert.` prefix.
        let bert = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("bert"), &config)?
        } else {
            BertModel::load(vb, &config)?
        };

        Ok(Self {
            bert,
            hidden_size: config.hidden_size,
        })
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Returns unit-length sentence vectors, shape `[batch, hidden]`.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        let hidden = self
            .bert
            .forward(input_ids, token_type_ids, Some(attention_mask))?;
        let pooled = masked_mean(&hidden, attention_mask)?;
        l2_normalize(&pooled)
    }
}

/// Mean over the token axis, ignoring padded positions.
pub fn masked_mean(hidden: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
    let mask = attention_mask
        .to_dtype(hidden.dtype())?
        .unsqueeze(2)?;
    let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
    let counts = mask.sum(1)?.clamp(1e-9, f64::MAX)?;
    summed.broadcast_div(&counts)
}

pub fn l2_normalize(tensor: &Tensor) -> Result<Tensor> {
    let norm = tensor
        .to_dtype(DType::F32)?
        .sqr()?
        .sum_keepdim(1)?
        .sqrt()?
        .clamp(1e-12, f64::MAX)?;
    tensor.to_dtype(DType::F32)?.broadcast_div(&norm)
}
