//! Sentiment analysis for Instagram comments.
//!
//! Normalizes raw comment text (mentions, hashtags, URLs, punctuation,
//! emoji), classifies it with a zero-shot NLI model via candle, and
//! annotates whole comment tables with `cleaned_comment`, `sentiment`,
//! and `confidence` columns. The classifier degrades gracefully: when the
//! model cannot be loaded every comment falls back to a neutral result and
//! batch runs never abort.

pub mod classifier;
pub mod error;
pub mod model;
pub mod normalize;
pub mod pipeline;

pub use classifier::{Classifier, ZeroShotClassifier};
pub use error::SentimentError;
pub use normalize::clean_text;
pub use pipeline::{annotate_records, annotate_table, RowAnnotation};
