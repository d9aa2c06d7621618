use serde::{Deserialize, Serialize};

use curator_catalog::{Asset, KeywordProfile};

use crate::tokenizer::tokenize;

/// Canonical weight of a primary term hit on the identifier
pub const PRIMARY_IDENTIFIER_WEIGHT: u32 = 200;

/// Canonical weight of a primary term hit in the body text
pub const PRIMARY_BODY_WEIGHT: u32 = 30;

/// Canonical weight of a secondary term hit on the identifier
pub const SECONDARY_IDENTIFIER_WEIGHT: u32 = 50;

/// Canonical weight of a secondary term hit in the body text
pub const SECONDARY_BODY_WEIGHT: u32 = 10;

/// Terms at least this long match identifier tokens by bare prefix
const PREFIX_MIN_TERM_LEN: usize = 5;

/// Four-character terms prefix-match only tokens with this much extra length
const SHORT_TERM_LEN: usize = 4;
const SHORT_TERM_MIN_EXTRA: usize = 2;

/// Field weights for the additive relevance score.
///
/// The totals are points for ranking within one profile, not a metric; the
/// defaults are the canonical values and any subset can be overridden from
/// a run profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScoreWeights {
    pub primary_identifier: u32,
    pub primary_body: u32,
    pub secondary_identifier: u32,
    pub secondary_body: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            primary_identifier: PRIMARY_IDENTIFIER_WEIGHT,
            primary_body: PRIMARY_BODY_WEIGHT,
            secondary_identifier: SECONDARY_IDENTIFIER_WEIGHT,
            secondary_body: SECONDARY_BODY_WEIGHT,
        }
    }
}

/// Score one asset against one keyword profile.
///
/// Each term contributes at most once per field: once for an identifier
/// token hit, once for a body substring hit. A total of 0 means "no
/// relevance signal" and the ranker excludes such assets entirely. Pure
/// function; safe to run in parallel across items.
#[must_use]
pub fn score_asset(asset: &Asset, profile: &KeywordProfile, weights: &ScoreWeights) -> u32 {
    let tokens = tokenize(&asset.identifier);
    let body = asset.body_text.as_deref().map(str::to_lowercase);

    let mut total = 0u32;
    total += field_points(
        profile.primary(),
        &tokens,
        body.as_deref(),
        weights.primary_identifier,
        weights.primary_body,
    );
    total += field_points(
        profile.secondary(),
        &tokens,
        body.as_deref(),
        weights.secondary_identifier,
        weights.secondary_body,
    );
    total
}

fn field_points(
    terms: &[String],
    tokens: &[String],
    body: Option<&str>,
    identifier_weight: u32,
    body_weight: u32,
) -> u32 {
    let mut points = 0u32;
    for term in terms {
        let term_upper = term.to_ascii_uppercase();
        if tokens
            .iter()
            .any(|token| term_matches_token(&term_upper, token))
        {
            points += identifier_weight;
        }
        if body.is_some_and(|body| body.contains(term.as_str())) {
            points += body_weight;
        }
    }
    points
}

/// Match rule between a query term and an identifier token, both uppercase.
///
/// Exact equality always matches. Terms of `PREFIX_MIN_TERM_LEN` or more
/// match by prefix ("RUMINAT" hits "RUMINATION"). Four-character terms
/// prefix-match only tokens at least `SHORT_TERM_MIN_EXTRA` longer than the
/// term; note the literal `>=` makes "CARE" match "CAREER" (6 >= 6) even
/// though the rule was meant to block that class of hit — the boundary is
/// kept as specified because consumers may depend on it. Terms of three
/// characters or fewer never prefix-match.
fn term_matches_token(term: &str, token: &str) -> bool {
    if token == term {
        return true;
    }
    if term.len() >= PREFIX_MIN_TERM_LEN {
        return token.starts_with(term);
    }
    if term.len() == SHORT_TERM_LEN {
        return token.starts_with(term) && token.len() >= term.len() + SHORT_TERM_MIN_EXTRA;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn profile(primary: &[&str], secondary: &[&str]) -> KeywordProfile {
        KeywordProfile::new(primary.to_vec(), secondary.to_vec())
    }

    #[test]
    fn exact_identifier_hit_scores_primary_weight() {
        let asset = Asset::new("90_THE_RUMINATION.png", "img/90.png");
        let profile = profile(&["rumination"], &[]);

        assert_eq!(
            score_asset(&asset, &profile, &ScoreWeights::default()),
            PRIMARY_IDENTIFIER_WEIGHT
        );
    }

    #[test]
    fn long_terms_match_by_prefix() {
        let asset = Asset::new("90_THE_RUMINATION.png", "img/90.png");
        let profile = profile(&["ruminat"], &[]);

        assert_eq!(
            score_asset(&asset, &profile, &ScoreWeights::default()),
            PRIMARY_IDENTIFIER_WEIGHT
        );
    }

    #[test]
    fn four_char_term_boundary() {
        let weights = ScoreWeights::default();
        let profile = profile(&["care"], &[]);

        // 9 >= 6: matches
        let caretaker = Asset::new("01_THE_CARETAKER.png", "img/1.png");
        assert_eq!(
            score_asset(&caretaker, &profile, &weights),
            PRIMARY_IDENTIFIER_WEIGHT
        );

        // Documented edge: 6 >= 6, so "CAREER" passes the literal rule
        let career = Asset::new("02_THE_CAREER.png", "img/2.png");
        assert_eq!(
            score_asset(&career, &profile, &weights),
            PRIMARY_IDENTIFIER_WEIGHT
        );

        // No prefix relation at all
        let cars = Asset::new("03_THE_CARS.png", "img/3.png");
        assert_eq!(score_asset(&cars, &profile, &weights), 0);
    }

    #[test]
    fn short_terms_only_match_exactly() {
        let weights = ScoreWeights::default();
        let profile = profile(&["sea"], &[]);

        let exact = Asset::new("04_DEEP_SEA.png", "img/4.png");
        assert_eq!(
            score_asset(&exact, &profile, &weights),
            PRIMARY_IDENTIFIER_WEIGHT
        );

        let prefix_only = Asset::new("05_THE_SEASON.png", "img/5.png");
        assert_eq!(score_asset(&prefix_only, &profile, &weights), 0);
    }

    #[test]
    fn term_counts_once_per_field() {
        // Both tokens match "loop"; the term still contributes once
        let asset = Asset::new("06_LOOPS_LOOPING.png", "img/6.png");
        let profile = profile(&["loops"], &[]);

        assert_eq!(
            score_asset(&asset, &profile, &ScoreWeights::default()),
            PRIMARY_IDENTIFIER_WEIGHT
        );
    }

    #[test]
    fn identifier_and_body_hits_accumulate() {
        let asset = Asset::new("22_THE_WORRY_LOOP.png", "img/22.png")
            .with_body("A worry that loops back on itself");
        let profile = profile(&["worry"], &[]);

        assert_eq!(
            score_asset(&asset, &profile, &ScoreWeights::default()),
            PRIMARY_IDENTIFIER_WEIGHT + PRIMARY_BODY_WEIGHT
        );
    }

    #[test]
    fn secondary_terms_use_secondary_weights() {
        let asset = Asset::new("22_THE_WORRY_LOOP.png", "img/22.png");
        let profile = profile(&["loop"], &["worry"]);

        assert_eq!(
            score_asset(&asset, &profile, &ScoreWeights::default()),
            PRIMARY_IDENTIFIER_WEIGHT + SECONDARY_IDENTIFIER_WEIGHT
        );
    }

    #[test]
    fn adding_a_matching_term_never_decreases_the_score() {
        let narrow = Asset::new("90_THE_RUMINATION.png", "img/90.png");
        let widened = Asset::new("90_THE_RUMINATION_LOOP.png", "img/90.png");
        let profile = profile(&["rumination", "loop"], &[]);
        let weights = ScoreWeights::default();

        assert!(score_asset(&widened, &profile, &weights) >= score_asset(&narrow, &profile, &weights));
    }

    #[test]
    fn no_signal_scores_zero() {
        let asset = Asset::new("12_THE_OVERTHINKING.png", "img/12.png");
        let profile = profile(&["rumination", "loop"], &["worry"]);

        assert_eq!(score_asset(&asset, &profile, &ScoreWeights::default()), 0);
    }
}
