use std::cmp::Reverse;

use curator_catalog::{Asset, KeywordProfile};

use crate::scorer::{score_asset, ScoreWeights};

/// One scored candidate in a ranked list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ranked<'a> {
    pub asset: &'a Asset,
    pub score: u32,
}

/// Rank an eligible pool against one item's profile.
///
/// Zero-score assets are dropped, the rest sorted by score descending with
/// pool order as the stable tie-break, so repeated runs over the same pool
/// are bit-for-bit identical. Memoryless and side-effect-free; usable on
/// its own for previews and debugging.
#[must_use]
pub fn rank<'a>(
    pool: &'a [Asset],
    profile: &KeywordProfile,
    weights: &ScoreWeights,
) -> Vec<Ranked<'a>> {
    let mut scored: Vec<(usize, Ranked<'a>)> = pool
        .iter()
        .enumerate()
        .filter_map(|(idx, asset)| {
            let score = score_asset(asset, profile, weights);
            (score > 0).then_some((idx, Ranked { asset, score }))
        })
        .collect();

    scored.sort_by_key(|(idx, ranked)| (Reverse(ranked.score), *idx));

    log::debug!("Ranked {} of {} assets", scored.len(), pool.len());
    scored.into_iter().map(|(_, ranked)| ranked).collect()
}
