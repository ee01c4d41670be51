//! Zero-shot NLI scoring on a ModernBERT sequence-classification head.
//!
//! Each candidate label becomes the hypothesis `"This example is {label}."`;
//! the premise/hypothesis pair runs through the entailment head and the
//! entailment probabilities, normalized across labels, become the scores.

use std::collections::HashMap;

use candle_core::{DType, Device, IndexOp, Tensor, D};
use candle_nn::ops::softmax;
use candle_nn::VarBuilder;
use candle_transformers::models::modernbert::{Config, ModernBertForSequenceClassification};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use serde::Deserialize;
use tokenizers::Tokenizer;

use crate::SentimentError;

/// Label metadata carried alongside the model config in `config.json`.
#[derive(Deserialize)]
struct ClassifierConfigJson {
    #[serde(default)]
    label2id: HashMap<String, u32>,
}

/// A loaded NLI checkpoint: weights, tokenizer, and the entailment class id.
pub struct NliModel {
    model: ModernBertForSequenceClassification,
    tokenizer: Tokenizer,
    device: Device,
    entailment_id: u32,
}

impl NliModel {
    /// Fetch `model_id` from the Hugging Face hub and load it onto the GPU
    /// when one is compiled in and available, else the CPU.
    ///
    /// # Errors
    ///
    /// Returns `SentimentError` when the download, the tokenizer, the
    /// checkpoint weights, or the label metadata cannot be loaded.
    pub fn load(model_id: &str) -> Result<Self, SentimentError> {
        let device = Device::cuda_if_available(0)?;
        let api = Api::new()?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let config_path = repo.get("config.json")?;
        let tokenizer_path = repo.get("tokenizer.json")?;
        let weights_path = repo.get("model.safetensors")?;

        let config_str = std::fs::read_to_string(&config_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        let class_cfg: ClassifierConfigJson = serde_json::from_str(&config_str)?;
        let entailment_id = class_cfg
            .label2id
            .get("entailment")
            .copied()
            .ok_or(SentimentError::MissingEntailment)?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| SentimentError::Tokenizer(e.to_string()))?;

        let weights = std::fs::read(&weights_path)?;
        let vb = VarBuilder::from_buffered_safetensors(weights, DType::F32, &device)?;
        let model = ModernBertForSequenceClassification::load(vb, &config)?;

        Ok(NliModel {
            model,
            tokenizer,
            device,
            entailment_id,
        })
    }

    /// Score `text` against every candidate label.
    ///
    /// Returns `(label, score)` pairs normalized to sum to 1, sorted
    /// best-first.
    ///
    /// # Errors
    ///
    /// Returns `SentimentError` on tokenization or tensor failures.
    pub fn score_labels(
        &self,
        text: &str,
        labels: &[&str],
    ) -> Result<Vec<(String, f32)>, SentimentError> {
        if labels.is_empty() {
            return Ok(Vec::new());
        }

        let mut encodings = Vec::new();
        for &label in labels {
            let hypothesis = format!("This example is {label}.");
            let encoding = self
                .tokenizer
                .encode((text, hypothesis.as_str()), true)
                .map_err(|e| SentimentError::Tokenizer(e.to_string()))?;
            encodings.push(encoding);
        }

        let max_len = encodings.iter().map(|e| e.len()).max().unwrap_or(0);
        let pad_token_id = self
            .tokenizer
            .get_padding()
            .map(|p| p.pad_id)
            .or_else(|| self.tokenizer.token_to_id("<pad>"))
            .or_else(|| self.tokenizer.token_to_id("[PAD]"))
            .unwrap_or(0);

        let mut all_token_ids: Vec<u32> = Vec::new();
        let mut all_attention_masks: Vec<u32> = Vec::new();
        for encoding in &encodings {
            let mut token_ids = encoding.get_ids().to_vec();
            let mut attention_mask = encoding.get_attention_mask().to_vec();
            token_ids.resize(max_len, pad_token_id);
            attention_mask.resize(max_len, 0);
            all_token_ids.extend(token_ids);
            all_attention_masks.extend(attention_mask);
        }

        let input_ids = Tensor::from_vec(all_token_ids, (labels.len(), max_len), &self.device)?;
        let attention_mask =
            Tensor::from_vec(all_attention_masks, (labels.len(), max_len), &self.device)?;

        let logits = self.model.forward(&input_ids, &attention_mask)?;
        let probabilities = softmax(&logits, D::Minus1)?;
        let entailment_probs = probabilities
            .i((.., self.entailment_id as usize))?
            .to_vec1::<f32>()?;

        let mut results: Vec<(String, f32)> = labels
            .iter()
            .map(|&l| l.to_string())
            .zip(entailment_probs)
            .collect();

        let sum: f32 = results.iter().map(|(_, p)| p).sum();
        if sum > 0.0 {
            for (_, p) in &mut results {
                *p /= sum;
            }
        }
        results.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        Ok(results)
    }
}
