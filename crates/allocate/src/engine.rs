use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use curator_catalog::{Asset, ContentItem};
use curator_matcher::{rank, Ranked, ScoreWeights};

use crate::config::AllocationConfig;
use crate::report::AllocationReport;
use crate::state::AllocationState;

/// Result of one allocation run: per-item locator lists plus the run
/// report. `BTreeMap` keeps serialization order deterministic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllocationOutcome {
    pub assignments: BTreeMap<String, Vec<String>>,
    pub report: AllocationReport,
}

/// Allocate up to `max_per_item` assets to every item, in item order.
///
/// This is a greedy per-item heuristic, not an optimal bipartite matcher:
/// each item consumes its ranked candidate list in turn, and within the
/// first `uniqueness_window` slots an asset already reserved by an earlier
/// item is skipped only when a not-yet-reserved alternative scores at
/// least `relax_threshold` times as much; otherwise quality wins and the
/// asset stays shared. Items the caller passes earlier win reservations —
/// the slice order is the contract, and ingestion fixes it to ascending
/// `item_id`.
///
/// Items with no scoring candidates get an empty list (never absent from
/// the map) and are counted in the report. Given identical inputs the
/// outcome is byte-for-byte reproducible.
pub fn allocate(
    items: &[ContentItem],
    pool: &[Asset],
    weights: &ScoreWeights,
    config: &AllocationConfig,
) -> crate::error::Result<AllocationOutcome> {
    config.validate()?;

    let mut state = AllocationState::new();
    let mut report = AllocationReport::default();
    let mut assignments = BTreeMap::new();

    for item in items {
        let ranked = rank(pool, &item.profile, weights);
        if ranked.is_empty() {
            log::debug!("Item '{}' matched no assets", item.item_id);
            report.add_unmatched(&item.item_id);
        }

        let locators = allocate_item(&ranked, &mut state, config, &mut report);
        report.add_item(locators.len());
        assignments.insert(item.item_id.clone(), locators);
    }

    log::info!(
        "Allocated {} placements across {} items ({} unmatched, {} shared, {} refilled)",
        report.placements,
        report.items,
        report.unmatched_items.len(),
        report.shared_accepts,
        report.refilled_items
    );
    Ok(AllocationOutcome {
        assignments,
        report,
    })
}

/// One per-item step over the shared reservation state.
fn allocate_item(
    ranked: &[Ranked<'_>],
    state: &mut AllocationState,
    config: &AllocationConfig,
    report: &mut AllocationReport,
) -> Vec<String> {
    let mut picked: Vec<&Asset> = Vec::new();
    let mut picked_ids: HashSet<&str> = HashSet::new();

    for (pos, candidate) in ranked.iter().enumerate() {
        if picked.len() == config.max_per_item {
            break;
        }
        let id = candidate.asset.identifier.as_str();
        if picked_ids.contains(id) {
            continue;
        }

        if picked.len() < config.uniqueness_window && state.is_reserved(id) {
            // Reserved by an earlier item: prefer the best unreserved
            // alternative further down, but only if it is close enough.
            let alternative = ranked[pos + 1..].iter().find(|alt| {
                !state.is_reserved(&alt.asset.identifier)
                    && !picked_ids.contains(alt.asset.identifier.as_str())
            });
            let close_enough = alternative.is_some_and(|alt| {
                alt.score as f32 >= config.relax_threshold * candidate.score as f32
            });
            if close_enough {
                log::debug!("Skipping reserved '{id}' for a close unreserved alternative");
                report.unique_swaps += 1;
                continue;
            }
            // Quality wins over uniqueness; the asset stays shared and is
            // not re-reserved.
            report.shared_accepts += 1;
            picked_ids.insert(id);
            picked.push(candidate.asset);
            continue;
        }

        if picked.len() < config.uniqueness_window {
            state.reserve(id);
        }
        picked_ids.insert(id);
        picked.push(candidate.asset);
    }

    // Fallback: a sparse list is worse than a non-unique one. Re-scan the
    // full ranked list ignoring reservations and top up.
    if picked.len() < config.min_fill {
        let before = picked.len();
        for candidate in ranked {
            if picked.len() == config.max_per_item {
                break;
            }
            let id = candidate.asset.identifier.as_str();
            if picked_ids.insert(id) {
                picked.push(candidate.asset);
            }
        }
        if picked.len() > before {
            report.refilled_items += 1;
        }
    }

    picked.iter().map(|asset| asset.locator.clone()).collect()
}
