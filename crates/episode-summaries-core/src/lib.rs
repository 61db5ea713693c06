//! Wikipedia Episode Summaries Core Library
//!
//! This crate turns a show's per-season Wikipedia articles into a single
//! markdown document of episode titles and summaries, grouped by season.
//!
//! # Features
//! - Concurrent season page fetching with fail-fast batch semantics
//! - Episode table extraction with multi-part episode detection
//! - Deterministic markdown rendering with optional table of contents
//!   and source links
//! - All-or-nothing output write

pub mod client;
pub mod error;
pub mod parser;
pub mod render;
pub mod scraper;
pub mod types;
pub mod writer;

// Re-export main types for convenience
pub use client::{ClientConfig, PageFetcher, WikiClient, WIKIPEDIA_BASE_URL};
pub use error::{Result, ScraperError};
pub use scraper::EpisodeSummaryScraper;
pub use types::{EpisodeRecord, RenderOptions, SeasonResult, ShowSpec};
