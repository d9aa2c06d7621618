use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::profile::derive_profile;
use crate::types::{Asset, ContentItem, KeywordProfile};

/// Counts of accepted/rejected records for one ingestion pass.
///
/// Malformed records are skipped individually; the run continues with the
/// rest and the caller decides what to do with the counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestStats {
    /// Records accepted into the run
    pub accepted: usize,

    /// Records rejected as malformed or duplicate
    pub rejected: usize,

    /// Identities of rejected records, as far as they could be determined
    pub rejected_ids: Vec<String>,
}

impl IngestStats {
    fn accept(&mut self) {
        self.accepted += 1;
    }

    fn reject(&mut self, id: impl Into<String>, reason: &str) {
        let id = id.into();
        log::warn!("Rejecting record '{id}': {reason}");
        self.rejected += 1;
        self.rejected_ids.push(id);
    }
}

/// A content-item record as it appears in a manifest, before validation.
///
/// Explicit terms win; when both lists are empty the profile is derived
/// from `text` instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawItem {
    #[serde(default)]
    pub item_id: String,

    #[serde(default)]
    pub primary_terms: Vec<String>,

    #[serde(default)]
    pub secondary_terms: Vec<String>,

    #[serde(default)]
    pub text: Option<String>,
}

/// Validate raw asset records, skipping malformed or duplicate ones.
///
/// Pool order is preserved: it is the stable tie-break for ranking.
pub fn ingest_assets(raw: Vec<Asset>) -> (Vec<Asset>, IngestStats) {
    let mut stats = IngestStats::default();
    let mut seen = HashSet::new();
    let mut pool = Vec::with_capacity(raw.len());

    for asset in raw {
        if asset.identifier.trim().is_empty() {
            stats.reject(asset.locator.clone(), "empty identifier");
            continue;
        }
        if asset.locator.trim().is_empty() {
            stats.reject(asset.identifier.clone(), "empty locator");
            continue;
        }
        if !seen.insert(asset.identifier.clone()) {
            stats.reject(asset.identifier.clone(), "duplicate identifier");
            continue;
        }
        stats.accept();
        pool.push(asset);
    }

    log::info!(
        "Ingested {} assets ({} rejected)",
        stats.accepted,
        stats.rejected
    );
    (pool, stats)
}

/// Validate raw item records and fix the processing order.
///
/// Items are sorted by ascending `item_id`; allocation outcomes depend on
/// processing order, so this sort is part of the contract rather than an
/// implementation accident. An item whose profile is still empty after
/// fallback derivation is kept: it will simply match zero candidates.
pub fn ingest_items(raw: Vec<RawItem>) -> (Vec<ContentItem>, IngestStats) {
    let mut stats = IngestStats::default();
    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(raw.len());

    for record in raw {
        let item_id = record.item_id.trim().to_string();
        if item_id.is_empty() {
            stats.reject("<missing id>", "empty item_id");
            continue;
        }
        if !seen.insert(item_id.clone()) {
            stats.reject(item_id, "duplicate item_id");
            continue;
        }

        let mut profile = KeywordProfile::new(&record.primary_terms, &record.secondary_terms);
        if profile.is_empty() {
            if let Some(text) = &record.text {
                profile = derive_profile(text);
            }
        }
        if profile.is_empty() {
            log::debug!("Item '{item_id}' has an empty profile; it will match nothing");
        }

        stats.accept();
        items.push(ContentItem::new(item_id, profile));
    }

    items.sort_by(|a, b| a.item_id.cmp(&b.item_id));

    log::info!(
        "Ingested {} items ({} rejected)",
        stats.accepted,
        stats.rejected
    );
    (items, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw_item(id: &str, primary: &[&str]) -> RawItem {
        RawItem {
            item_id: id.to_string(),
            primary_terms: primary.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn rejects_assets_without_identifier_or_locator() {
        let raw = vec![
            Asset::new("01_THE_ANCHOR.png", "img/anchor.png"),
            Asset::new("", "img/blank.png"),
            Asset::new("02_THE_HARBOR.png", ""),
        ];

        let (pool, stats) = ingest_assets(raw);

        assert_eq!(pool.len(), 1);
        assert_eq!(stats.accepted, 1);
        assert_eq!(stats.rejected, 2);
        assert_eq!(stats.rejected_ids.len(), 2);
    }

    #[test]
    fn rejects_duplicate_asset_identifiers() {
        let raw = vec![
            Asset::new("01_THE_ANCHOR.png", "img/a.png"),
            Asset::new("01_THE_ANCHOR.png", "img/b.png"),
        ];

        let (pool, stats) = ingest_assets(raw);

        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].locator, "img/a.png");
        assert_eq!(stats.rejected_ids, vec!["01_THE_ANCHOR.png".to_string()]);
    }

    #[test]
    fn sorts_items_by_id() {
        let raw = vec![
            raw_item("q-20", &["harbor"]),
            raw_item("q-03", &["anchor"]),
            raw_item("q-11", &["breeze"]),
        ];

        let (items, stats) = ingest_items(raw);

        let ids: Vec<&str> = items.iter().map(|i| i.item_id.as_str()).collect();
        assert_eq!(ids, vec!["q-03", "q-11", "q-20"]);
        assert_eq!(stats.rejected, 0);
    }

    #[test]
    fn rejects_blank_and_duplicate_item_ids() {
        let raw = vec![
            raw_item("q-01", &["anchor"]),
            raw_item("  ", &["breeze"]),
            raw_item("q-01", &["candle"]),
        ];

        let (items, stats) = ingest_items(raw);

        assert_eq!(items.len(), 1);
        assert_eq!(stats.rejected, 2);
    }

    #[test]
    fn falls_back_to_derived_profile() {
        let raw = vec![RawItem {
            item_id: "q-07".to_string(),
            text: Some("Rumination is planning without anything to plan".to_string()),
            ..Default::default()
        }];

        let (items, _) = ingest_items(raw);

        let profile = &items[0].profile;
        assert!(profile.primary().contains(&"rumination".to_string()));
        assert!(profile.primary().contains(&"planning".to_string()));
    }

    #[test]
    fn explicit_terms_win_over_text() {
        let raw = vec![RawItem {
            item_id: "q-07".to_string(),
            primary_terms: vec!["anchor".to_string()],
            text: Some("Rumination is planning without anything to plan".to_string()),
            ..Default::default()
        }];

        let (items, _) = ingest_items(raw);

        assert_eq!(items[0].profile.primary(), &["anchor"]);
        assert!(items[0].profile.secondary().is_empty());
    }

    #[test]
    fn keeps_items_with_empty_profiles() {
        let raw = vec![raw_item("q-01", &[])];

        let (items, stats) = ingest_items(raw);

        assert_eq!(items.len(), 1);
        assert!(items[0].profile.is_empty());
        assert_eq!(stats.accepted, 1);
    }
}
