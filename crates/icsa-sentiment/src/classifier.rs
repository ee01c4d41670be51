//! The classifier seam between the pipeline and the model backend.
//!
//! `ZeroShotClassifier` wraps the NLI model behind an infallible interface:
//! a failed model load produces a degraded instance whose every answer is
//! the neutral fallback, and per-text inference errors are swallowed the
//! same way. Batch callers never see an error from this layer.

use icsa_core::{Classification, SentimentLabel};

use crate::model::NliModel;

pub trait Classifier {
    /// Classify already-normalized text. Never fails; unanalyzable input
    /// and internal errors yield the neutral fallback.
    fn classify(&self, text: &str) -> Classification;

    /// False when the model backend is unavailable.
    fn is_ready(&self) -> bool;
}

enum ClassifierState {
    Ready(Box<NliModel>),
    Degraded,
}

pub struct ZeroShotClassifier {
    state: ClassifierState,
}

impl ZeroShotClassifier {
    /// Load the named checkpoint. On any failure the classifier comes up
    /// degraded; the failure is logged here, once, not per call.
    #[must_use]
    pub fn load(model_id: &str) -> Self {
        match NliModel::load(model_id) {
            Ok(model) => {
                tracing::info!(model = model_id, "sentiment model loaded");
                ZeroShotClassifier {
                    state: ClassifierState::Ready(Box::new(model)),
                }
            }
            Err(error) => {
                tracing::warn!(
                    model = model_id,
                    %error,
                    "sentiment model unavailable, continuing in degraded mode"
                );
                ZeroShotClassifier {
                    state: ClassifierState::Degraded,
                }
            }
        }
    }

    /// A classifier with no model backend. Every call returns the neutral
    /// fallback.
    #[must_use]
    pub fn degraded() -> Self {
        ZeroShotClassifier {
            state: ClassifierState::Degraded,
        }
    }
}

impl Classifier for ZeroShotClassifier {
    fn classify(&self, text: &str) -> Classification {
        let ClassifierState::Ready(model) = &self.state else {
            return Classification::default();
        };
        if text.is_empty() {
            return Classification::default();
        }

        let candidates: Vec<&str> = SentimentLabel::CANDIDATES
            .iter()
            .map(|l| l.as_str())
            .collect();
        match model.score_labels(text, &candidates) {
            Ok(scores) => scores
                .first()
                .and_then(|(label, confidence)| {
                    SentimentLabel::from_label(label).map(|label| Classification {
                        label,
                        confidence: *confidence,
                    })
                })
                .unwrap_or_default(),
            Err(error) => {
                tracing::warn!(%error, "inference failed, using neutral fallback");
                Classification::default()
            }
        }
    }

    fn is_ready(&self) -> bool {
        matches!(self.state, ClassifierState::Ready(_))
    }
}
