use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::types::KeywordProfile;

/// Maximum number of terms kept by the fallback extractor
const MAX_DERIVED_TERMS: usize = 8;

/// Derived terms must be strictly longer than this
const MIN_TERM_LEN: usize = 4;

/// How many of the derived terms become primary; the rest are secondary
const PRIMARY_SPLIT: usize = 3;

/// Words too generic to carry a relevance signal
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "from", "that", "this", "are", "was", "were", "have", "has",
    "had", "not", "you", "your", "what", "when", "where", "which", "will", "would", "there",
    "their", "about", "into", "than", "then", "them", "they", "because", "being", "while",
];

/// Markdown link syntax `[text](target)`; the display text is kept
static MARKDOWN_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").expect("valid markdown link regex"));

/// HTML-style tags
static MARKUP_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid markup tag regex"));

/// Derive a keyword profile from an item's own free text.
///
/// Used when an item carries no explicit terms: lowercase the text, strip
/// link/markup syntax, drop stopwords, keep the first `MAX_DERIVED_TERMS`
/// distinct words longer than `MIN_TERM_LEN` characters, and split them
/// `PRIMARY_SPLIT` / rest into primary/secondary. Deterministic for a given
/// input, so re-runs derive the same profile.
#[must_use]
pub fn derive_profile(text: &str) -> KeywordProfile {
    let text = text.to_lowercase();
    let text = MARKDOWN_LINK.replace_all(&text, "$1");
    let text = MARKUP_TAG.replace_all(&text, " ");

    let mut seen = std::collections::HashSet::new();
    let mut terms = Vec::new();
    for word in text.unicode_words() {
        if word.len() <= MIN_TERM_LEN || STOPWORDS.contains(&word) {
            continue;
        }
        if seen.insert(word.to_string()) {
            terms.push(word.to_string());
        }
        if terms.len() == MAX_DERIVED_TERMS {
            break;
        }
    }

    let split = terms.len().min(PRIMARY_SPLIT);
    let secondary = terms.split_off(split);
    KeywordProfile::new(terms, secondary)
}
