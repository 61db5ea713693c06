//! Scrape every season of Adventure Time into `adventure_time.md`
//! next to this file.

use episode_summaries_core::render::title_from_script;
use episode_summaries_core::{EpisodeSummaryScraper, RenderOptions, ShowSpec};

const URL_PATTERN: &str = "Adventure_Time_(season_{})";
const NUM_SEASONS: u32 = 10;
const SCRIPT_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/examples/adventure_time.rs");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let spec = ShowSpec::for_script(URL_PATTERN, NUM_SEASONS, SCRIPT_PATH)?
        .with_title(title_from_script("adventure_time_episode_summaries"));
    let scraper = EpisodeSummaryScraper::new(spec)?.with_options(RenderOptions {
        emit_toc: true,
        emit_season_links: true,
    });

    let path = scraper.scrape().await?;
    println!("Wrote {}", path.display());

    Ok(())
}
