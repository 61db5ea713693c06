//! Data types for the episode summaries scraper
//!
//! This module contains the core data structures shared by the extractor,
//! the renderer and the document assembler.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScraperError};
use crate::writer::output_path_for;

/// Placeholder replaced by the season number in a URL pattern
pub const SEASON_SLOT: &str = "{}";

/// Script identity used when no output path is given
pub const DEFAULT_SCRIPT_NAME: &str = "episode_summaries";

/// One rendered list entry extracted from an episode table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Episode title, trimmed
    pub title: String,
    /// Normalized summary text; `None` for synthetic continuation parts
    pub summary: Option<String>,
    /// Part number (2, 3, ...) for continuation parts of a multi-part episode
    pub part_number: Option<u32>,
}

impl EpisodeRecord {
    /// Create a standalone episode, or the first part of a multi-part one
    pub fn episode(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: Some(summary.into()),
            part_number: None,
        }
    }

    /// Create a continuation part that carries no summary of its own
    pub fn part(title: impl Into<String>, part_number: u32) -> Self {
        Self {
            title: title.into(),
            summary: None,
            part_number: Some(part_number),
        }
    }
}

/// Output of one season's fetch, extract and render pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonResult {
    /// Season number (1-based)
    pub season_number: u32,
    /// Page the season was scraped from
    pub url: String,
    /// Markdown section for the season
    pub rendered_markdown: String,
    /// Number of list lines in the section
    pub episode_count: usize,
}

/// Rendering variants of the assembled document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Prepend a table of contents linking every season section
    pub emit_toc: bool,
    /// Render season headings as links to their source pages
    pub emit_season_links: bool,
}

/// Show description supplied by the caller for one scrape run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowSpec {
    /// Page name after `/wiki/` with `{}` in place of the season number,
    /// e.g. `Adventure_Time_(season_{})`
    pub url_pattern: String,
    /// Number of seasons to scrape
    pub season_count: u32,
    /// Where the markdown document is written
    pub output_path: PathBuf,
    /// Page title override; derived from the pattern when absent
    pub title: Option<String>,
}

impl ShowSpec {
    /// Create a spec writing to `episode_summaries.md` in the working directory.
    ///
    /// # Errors
    /// Returns `ScraperError::InvalidPattern` unless the pattern has exactly
    /// one `{}` slot.
    pub fn new(url_pattern: impl Into<String>, season_count: u32) -> Result<Self> {
        Self::for_script(url_pattern, season_count, DEFAULT_SCRIPT_NAME)
    }

    /// Create a spec whose output file is named after an invoking script,
    /// `<dir>/<script stem>.md`.
    pub fn for_script(
        url_pattern: impl Into<String>,
        season_count: u32,
        script_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let url_pattern = url_pattern.into();
        if url_pattern.matches(SEASON_SLOT).count() != 1 {
            return Err(ScraperError::InvalidPattern(url_pattern));
        }

        Ok(Self {
            url_pattern,
            season_count,
            output_path: output_path_for(script_path.as_ref()),
            title: None,
        })
    }

    /// Override the output path
    pub fn with_output_path(mut self, output_path: impl Into<PathBuf>) -> Self {
        self.output_path = output_path.into();
        self
    }

    /// Override the derived page title (the leading `# ` is added if missing)
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Page name for one season, before percent-encoding
    pub fn page_name(&self, season: u32) -> String {
        self.url_pattern.replacen(SEASON_SLOT, &season.to_string(), 1)
    }
}
