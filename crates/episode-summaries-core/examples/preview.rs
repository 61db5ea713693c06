//! Print the assembled document for a show instead of writing it.
//!
//! ```sh
//! cargo run --example preview -- "Bluey_(season_{})" 3
//! ```

use episode_summaries_core::{EpisodeSummaryScraper, ShowSpec};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let pattern = args.next().unwrap_or_else(|| "Bluey_(season_{})".to_string());
    let seasons: u32 = args.next().map(|n| n.parse()).transpose()?.unwrap_or(1);

    let scraper = EpisodeSummaryScraper::new(ShowSpec::new(pattern, seasons)?)?;
    let document = scraper.assemble().await?;

    println!("{}", document);
    println!("-- {} lines", document.lines().count());

    Ok(())
}
