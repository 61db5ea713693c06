//! # Episode Summaries
//!
//! Fetches a show's season articles from Wikipedia and writes the episode
//! titles and summaries as one markdown document.
//!
//! ```sh
//! episode-summaries 'Adventure_Time_(season_{})' 10 --toc --links
//! ```

use std::error::Error;

use clap::Parser;
use episode_summaries_core::{EpisodeSummaryScraper, RenderOptions, ShowSpec};
use tracing::{debug, error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    debug!(?args, "parsed CLI arguments");

    let mut spec = ShowSpec::new(&args.url_pattern, args.num_seasons)?;
    if let Some(output) = args.output {
        spec = spec.with_output_path(output);
    }
    if let Some(title) = args.title {
        spec = spec.with_title(title);
    }

    let options = RenderOptions {
        emit_toc: args.toc,
        emit_season_links: args.links,
    };
    let scraper = EpisodeSummaryScraper::new(spec)?
        .with_options(options)
        .with_base_url(args.base_url);
    info!(
        seasons = scraper.spec().season_count,
        output = %scraper.spec().output_path.display(),
        "scraping episode summaries"
    );

    let start_time = std::time::Instant::now();
    match scraper.scrape().await {
        Ok(path) => {
            info!(
                path = %path.display(),
                elapsed_ms = start_time.elapsed().as_millis() as u64,
                "done"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "scrape failed");
            Err(e.into())
        }
    }
}
