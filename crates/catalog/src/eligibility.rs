use std::collections::HashSet;

use crate::types::Asset;

/// Remove assets whose every group membership is excluded.
///
/// An asset with no groups at all carries no exclusion signal and stays
/// eligible, as does an asset with at least one non-excluded group. Runs
/// once per run, before any scoring; asset records are never mutated.
#[must_use]
pub fn filter_pool(pool: Vec<Asset>, excluded_groups: &HashSet<String>) -> Vec<Asset> {
    if excluded_groups.is_empty() {
        return pool;
    }

    let before = pool.len();
    let eligible: Vec<Asset> = pool
        .into_iter()
        .filter(|asset| {
            asset.groups.is_empty()
                || asset
                    .groups
                    .iter()
                    .any(|group| !excluded_groups.contains(group))
        })
        .collect();

    log::debug!(
        "Eligibility filter kept {} of {} assets",
        eligible.len(),
        before
    );
    eligible
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn excluded(groups: &[&str]) -> HashSet<String> {
        groups.iter().map(|g| g.to_string()).collect()
    }

    #[test]
    fn excludes_only_wholly_excluded_assets() {
        let pool = vec![
            Asset::new("01_A.png", "img/a.png").with_group("retired"),
            Asset::new("02_B.png", "img/b.png")
                .with_group("retired")
                .with_group("maritime"),
            Asset::new("03_C.png", "img/c.png"),
        ];

        let eligible = filter_pool(pool, &excluded(&["retired"]));

        let ids: Vec<&str> = eligible.iter().map(|a| a.identifier.as_str()).collect();
        assert_eq!(ids, vec!["02_B.png", "03_C.png"]);
    }

    #[test]
    fn empty_exclusion_set_keeps_everything() {
        let pool = vec![Asset::new("01_A.png", "img/a.png").with_group("retired")];

        let eligible = filter_pool(pool.clone(), &HashSet::new());

        assert_eq!(eligible, pool);
    }

    #[test]
    fn group_comparison_is_exact() {
        let pool = vec![Asset::new("01_A.png", "img/a.png").with_group("Retired")];

        let eligible = filter_pool(pool, &excluded(&["retired"]));

        assert_eq!(eligible.len(), 1);
    }
}
