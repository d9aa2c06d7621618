use serde::{Deserialize, Serialize};

/// A candidate resource (typically an image) eligible for assignment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Asset {
    /// Short descriptive name, e.g. "42_THE_WORRY_LOOP.png"
    pub identifier: String,

    /// Collections this asset belongs to; empty means no exclusion signal
    #[serde(default)]
    pub groups: Vec<String>,

    /// Optional longer caption or description
    #[serde(default)]
    pub body_text: Option<String>,

    /// Resolvable reference (path/URL); opaque to scoring
    pub locator: String,
}

impl Asset {
    /// Create a new asset with no groups and no body text
    #[must_use]
    pub fn new(identifier: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            groups: Vec::new(),
            body_text: None,
            locator: locator.into(),
        }
    }

    /// Builder: add a group membership
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    /// Builder: set body text
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body_text = Some(body.into());
        self
    }
}

/// Primary/secondary term sets used to score relevance for one content item.
///
/// Terms are normalized to lowercase and de-duplicated (order preserved) at
/// construction, so every downstream comparison is case-insensitive by
/// invariant rather than by repeated normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeywordProfile {
    primary: Vec<String>,
    secondary: Vec<String>,
}

impl KeywordProfile {
    pub fn new<I, J, S, T>(primary: I, secondary: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            primary: normalize_terms(primary),
            secondary: normalize_terms(secondary),
        }
    }

    #[must_use]
    pub fn primary(&self) -> &[String] {
        &self.primary
    }

    #[must_use]
    pub fn secondary(&self) -> &[String] {
        &self.secondary
    }

    /// True when both term lists are empty; such a profile yields zero
    /// candidates, which is a valid terminal state, not an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.secondary.is_empty()
    }
}

/// Lowercase, trim, drop empties, de-duplicate preserving first-seen order
fn normalize_terms<I, S>(terms: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for term in terms {
        let normalized = term.as_ref().trim().to_lowercase();
        if normalized.is_empty() {
            continue;
        }
        if seen.insert(normalized.clone()) {
            out.push(normalized);
        }
    }
    out
}

/// One unit of content requesting asset assignment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentItem {
    /// Unique, orderable id; processing order over items is fixed by
    /// ascending `item_id` at ingestion
    pub item_id: String,

    /// Keyword profile this item is scored against
    pub profile: KeywordProfile,
}

impl ContentItem {
    #[must_use]
    pub fn new(item_id: impl Into<String>, profile: KeywordProfile) -> Self {
        Self {
            item_id: item_id.into(),
            profile,
        }
    }
}
