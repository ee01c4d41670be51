//! Comment text normalization.
//!
//! Strips the Instagram noise (mentions, hashtags, URLs, punctuation,
//! emoji) so the classifier sees plain lowercase prose. Purely numeric
//! comments carry no sentiment and normalize to `None`.

use std::sync::LazyLock;

use regex::Regex;

static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\w+").expect("valid regex"));
static HASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\w+").expect("valid regex"));
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+|www\.\S+").expect("valid regex"));
static PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[[:punct:]]").expect("valid regex"));
// Extended_Pictographic misses the joiners and selectors emoji sequences
// are stitched together with; those are stripped explicitly.
static EMOJI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{Extended_Pictographic}\u{200D}\u{FE0F}\u{20E3}]").expect("valid regex")
});
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Normalize a raw comment into classifier-ready text.
///
/// Applied in order: lowercase, drop purely numeric comments, strip
/// mentions, hashtags, URLs, ASCII punctuation, and emoji, then collapse
/// whitespace. Returns `None` when nothing analyzable remains.
///
/// The numeric check runs before any stripping, so `" 123"` survives it
/// (and cleans to `"123"`) while `"123"` and `"3.14"` do not.
#[must_use]
pub fn clean_text(raw: &str) -> Option<String> {
    let text = raw.to_lowercase();
    if is_purely_numeric(&text) {
        return None;
    }

    let text = MENTION_RE.replace_all(&text, "");
    let text = HASHTAG_RE.replace_all(&text, "");
    let text = URL_RE.replace_all(&text, "");
    let text = PUNCT_RE.replace_all(&text, "");
    let text = EMOJI_RE.replace_all(&text, "");
    let text = WHITESPACE_RE.replace_all(&text, " ");

    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// True when the string, minus at most one embedded decimal point, is all
/// ASCII digits.
fn is_purely_numeric(text: &str) -> bool {
    let stripped = text.replacen('.', "", 1);
    !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit())
}
