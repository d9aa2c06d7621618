mod eligibility;
mod error;
mod ingest;
mod profile;
mod source;
mod types;

pub use eligibility::filter_pool;
pub use error::{CatalogError, Result};
pub use ingest::{ingest_assets, ingest_items, IngestStats, RawItem};
pub use profile::derive_profile;
pub use source::{load_asset_manifest, load_item_manifest, scan_directory, ScanConfig};
pub use types::{Asset, ContentItem, KeywordProfile};
