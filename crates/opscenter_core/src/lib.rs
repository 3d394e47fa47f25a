pub mod analytics;
pub mod cache;
pub mod config;
pub mod demo;
pub mod domain;
pub mod error;
pub mod filter;
pub mod ingest;
pub mod normalize;
pub mod severity;
pub mod validate;

pub use analytics::{aggregate, aggregate_with_config, MetricsSnapshot};
pub use filter::available_regions;

