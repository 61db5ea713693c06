//! Command-line interface definitions.
//!
//! Positional arguments mirror the library's `ShowSpec`; the flags pick the
//! rendering variant.

use std::path::PathBuf;

use clap::Parser;

/// Collect a show's Wikipedia episode summaries across seasons into one
/// markdown file.
///
/// # Examples
///
/// ```sh
/// episode-summaries 'Adventure_Time_(season_{})' 10
/// episode-summaries 'Bluey_(season_{})' 3 --toc --links -o bluey.md
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Page name after `/wiki/` with `{}` in place of the season number,
    /// e.g. 'Adventure_Time_(season_{})'
    pub url_pattern: String,

    /// Number of seasons to scrape
    pub num_seasons: u32,

    /// Output markdown file (default: ./episode_summaries.md)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Prepend a table of contents
    #[arg(long)]
    pub toc: bool,

    /// Link each season heading to its Wikipedia page
    #[arg(long)]
    pub links: bool,

    /// Page title to use instead of the one derived from the pattern
    #[arg(long)]
    pub title: Option<String>,

    /// Wiki root the season pages are fetched from
    #[arg(
        long,
        env = "EPISODE_SUMMARIES_BASE_URL",
        default_value = episode_summaries_core::WIKIPEDIA_BASE_URL
    )]
    pub base_url: String,
}
