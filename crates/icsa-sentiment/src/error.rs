use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("model hub error: {0}")]
    Hub(#[from] hf_hub::api::sync::ApiError),

    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    #[error("tensor error: {0}")]
    Tensor(#[from] candle_core::Error),

    #[error("model config error: {0}")]
    ModelConfig(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("model config has no 'entailment' entry in label2id")]
    MissingEntailment,
}
