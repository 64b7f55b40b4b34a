pub mod brands;
pub mod commons;
pub mod config;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod wikidata;

#[cfg(test)]
mod test_support;

// Re-export main types
pub use brands::{read_brands, sanitize_filename};
pub use commons::{CommonsClient, MediaSource};
pub use config::Config;
pub use error::LogoError;
pub use normalize::normalize_logo;
pub use pipeline::{BrandResult, LogoPipeline, Summary};
pub use wikidata::{resolve_entity, KnowledgeBase, WikidataClient};
