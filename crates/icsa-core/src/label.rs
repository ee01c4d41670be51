use serde::{Deserialize, Serialize};

/// The three sentiment classes the workspace classifies comments into.
///
/// Serialized lowercase everywhere (API responses, CSV output, candidate
/// labels fed to the zero-shot model).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Candidate labels in the order they are offered to the classifier.
    pub const CANDIDATES: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Neutral,
        SentimentLabel::Negative,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }

    #[must_use]
    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "positive" => Some(SentimentLabel::Positive),
            "neutral" => Some(SentimentLabel::Neutral),
            "negative" => Some(SentimentLabel::Negative),
            _ => None,
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single classification outcome: the winning label and its confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub label: SentimentLabel,
    pub confidence: f32,
}

impl Default for Classification {
    /// The fallback outcome for unanalyzable text or a failed inference.
    fn default() -> Self {
        Classification {
            label: SentimentLabel::Neutral,
            confidence: 0.0,
        }
    }
}
