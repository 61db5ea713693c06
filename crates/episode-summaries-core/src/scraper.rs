//! Main episode summaries scraper API
//!
//! This module combines the page fetcher, the episode table parser and the
//! markdown renderer. Every season page is fetched concurrently and the
//! sections are reassembled in season order before the single write.

use std::path::PathBuf;

use futures::future::try_join_all;
use tracing::{debug, info, instrument};

use crate::client::{PageFetcher, WikiClient, WIKIPEDIA_BASE_URL};
use crate::error::Result;
use crate::parser::extract_episodes;
use crate::render::{
    as_title_line, assemble_document, page_title, render_season, table_of_contents,
};
use crate::types::{RenderOptions, SeasonResult, ShowSpec};
use crate::writer::write_document;

/// Scraper that turns a show's season pages into one markdown document
///
/// # Example
/// ```no_run
/// use episode_summaries_core::{EpisodeSummaryScraper, ShowSpec};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let spec = ShowSpec::new("Adventure_Time_(season_{})", 10)?;
///     let path = EpisodeSummaryScraper::new(spec)?.scrape().await?;
///     println!("Wrote {}", path.display());
///     Ok(())
/// }
/// ```
pub struct EpisodeSummaryScraper<F = WikiClient> {
    spec: ShowSpec,
    options: RenderOptions,
    base_url: String,
    fetcher: F,
}

impl EpisodeSummaryScraper<WikiClient> {
    /// Create a scraper backed by a default `WikiClient`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(spec: ShowSpec) -> Result<Self> {
        Ok(Self::with_fetcher(spec, WikiClient::new()?))
    }
}

impl<F: PageFetcher> EpisodeSummaryScraper<F> {
    /// Create a scraper with a custom page fetcher.
    ///
    /// Useful for tests and for hosts that need their own HTTP setup.
    pub fn with_fetcher(spec: ShowSpec, fetcher: F) -> Self {
        Self {
            spec,
            options: RenderOptions::default(),
            base_url: WIKIPEDIA_BASE_URL.to_string(),
            fetcher,
        }
    }

    /// Choose the rendering variant.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Fetch pages from another wiki root instead of English Wikipedia.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    /// The show being scraped
    pub fn spec(&self) -> &ShowSpec {
        &self.spec
    }

    /// Absolute URL of one season's page.
    ///
    /// Each `/`-separated segment of the page name is percent-encoded.
    pub fn season_url(&self, season: u32) -> String {
        let page = self.spec.page_name(season);
        let encoded: Vec<String> = page
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!("{}{}", self.base_url, encoded.join("/"))
    }

    /// Title line of the document.
    pub fn title(&self) -> String {
        match &self.spec.title {
            Some(title) => as_title_line(title),
            None => page_title(&self.spec.url_pattern),
        }
    }

    /// Fetch, extract and render one season.
    ///
    /// # Errors
    /// Propagates the fetch error of the season page unchanged.
    pub async fn scrape_season(&self, season: u32) -> Result<SeasonResult> {
        let url = self.season_url(season);
        info!(season, %url, "fetching season page");

        let html = self.fetcher.fetch(&url).await?;
        let records = extract_episodes(&html);
        let rendered_markdown = render_season(season, &url, &records, &self.options);

        Ok(SeasonResult {
            season_number: season,
            url,
            rendered_markdown,
            episode_count: records.len(),
        })
    }

    /// Scrape every season and return the assembled document.
    ///
    /// Seasons are fetched concurrently. The first failing season aborts
    /// the whole batch and no document is produced.
    #[instrument(
        level = "info",
        skip(self),
        fields(pattern = %self.spec.url_pattern, seasons = self.spec.season_count)
    )]
    pub async fn assemble(&self) -> Result<String> {
        let pipelines = (1..=self.spec.season_count).map(|season| self.scrape_season(season));
        let seasons = try_join_all(pipelines).await?;

        for season in &seasons {
            debug!(
                season = season.season_number,
                url = %season.url,
                episodes = season.episode_count,
                "season rendered"
            );
        }
        let episodes: usize = seasons.iter().map(|s| s.episode_count).sum();
        info!(episodes, "all seasons scraped");

        let toc = self
            .options
            .emit_toc
            .then(|| table_of_contents(self.spec.season_count));
        let sections: Vec<String> = seasons.into_iter().map(|s| s.rendered_markdown).collect();

        Ok(assemble_document(&self.title(), toc.as_deref(), &sections))
    }

    /// Scrape every season and write the document to the show's output path.
    ///
    /// # Returns
    /// The path that was written.
    ///
    /// # Errors
    /// - any fetch error from `assemble`, in which case nothing is written
    /// - `ScraperError::WriteError` if the file cannot be written
    pub async fn scrape(&self) -> Result<PathBuf> {
        let document = self.assemble().await?;
        write_document(&self.spec.output_path, &document).await?;

        info!(path = %self.spec.output_path.display(), "episode summaries written");
        Ok(self.spec.output_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    use proptest::prelude::*;

    use crate::error::ScraperError;

    /// Serves canned pages, optionally delaying each one.
    struct StaticFetcher {
        pages: HashMap<String, (String, Duration)>,
    }

    impl StaticFetcher {
        fn new() -> Self {
            Self {
                pages: HashMap::new(),
            }
        }

        fn page(mut self, url: &str, html: String, delay_ms: u64) -> Self {
            self.pages
                .insert(url.to_string(), (html, Duration::from_millis(delay_ms)));
            self
        }
    }

    impl PageFetcher for StaticFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            match self.pages.get(url) {
                Some((html, delay)) => {
                    tokio::time::sleep(*delay).await;
                    Ok(html.clone())
                }
                None => Err(ScraperError::NotFound(url.to_string())),
            }
        }
    }

    fn episode_page(number_cell: &str, title: &str, summary: &str) -> String {
        format!(
            r#"<html><body><table class="wikiepisodetable">
            <tr class="vevent"><th scope="row">{}</th><td class="summary">{}</td></tr>
            <tr class="expand-child"><td class="description">{}</td></tr>
            </table></body></html>"#,
            number_cell, title, summary
        )
    }

    const FOO_1: &str = "https://en.wikipedia.org/wiki/Foo_%28season_1%29";
    const FOO_2: &str = "https://en.wikipedia.org/wiki/Foo_%28season_2%29";

    fn foo_scraper(
        season_count: u32,
        fetcher: StaticFetcher,
    ) -> EpisodeSummaryScraper<StaticFetcher> {
        let spec = ShowSpec::new("Foo_(season_{})", season_count).unwrap();
        EpisodeSummaryScraper::with_fetcher(spec, fetcher)
    }

    #[test]
    fn test_season_url_percent_encodes_page_name() {
        let scraper = foo_scraper(1, StaticFetcher::new());
        assert_eq!(scraper.season_url(1), FOO_1);
    }

    #[test]
    fn test_season_url_keeps_path_separators() {
        let spec = ShowSpec::new("Show/Season {}", 1).unwrap();
        let scraper = EpisodeSummaryScraper::with_fetcher(spec, StaticFetcher::new())
            .with_base_url("http://localhost:8080/wiki");
        assert_eq!(scraper.season_url(3), "http://localhost:8080/wiki/Show/Season%203");
    }

    #[test]
    fn test_spec_accessor() {
        let scraper = foo_scraper(4, StaticFetcher::new());
        assert_eq!(scraper.spec().season_count, 4);
        assert_eq!(scraper.spec().url_pattern, "Foo_(season_{})");
    }

    #[tokio::test]
    async fn test_scrape_season_result() {
        let fetcher =
            StaticFetcher::new().page(FOO_2, episode_page("1<hr>2", "Finale", "The end."), 0);

        let result = foo_scraper(2, fetcher).scrape_season(2).await.unwrap();

        assert_eq!(result.season_number, 2);
        assert_eq!(result.url, FOO_2);
        assert_eq!(result.episode_count, 2);
        assert!(result.rendered_markdown.starts_with("## Season 2\n"));
    }

    #[test]
    fn test_title_override() {
        let spec = ShowSpec::new("Foo_(season_{})", 1).unwrap().with_title("Foo Recaps");
        let scraper = EpisodeSummaryScraper::with_fetcher(spec, StaticFetcher::new());
        assert_eq!(scraper.title(), "# Foo Recaps");
    }

    #[tokio::test]
    async fn test_assemble_two_seasons() {
        let fetcher = StaticFetcher::new()
            .page(FOO_1, episode_page("1", "Pilot", "A beginning."), 0)
            .page(FOO_2, episode_page("1<hr>2", "Finale", "The end."), 0);

        let document = foo_scraper(2, fetcher).assemble().await.unwrap();

        assert_eq!(
            document,
            "# Foo Episode Summaries\n\n\
             ## Season 1\n\
             1. **Pilot** - A beginning.\n\
             \n\
             ## Season 2\n\
             1. **Finale** - The end.\n\
             1. **Finale (Part 2)**\n"
        );
    }

    #[tokio::test]
    async fn test_assemble_with_toc_and_links() {
        let fetcher =
            StaticFetcher::new().page(FOO_1, episode_page("1", "Pilot", "A beginning."), 0);
        let options = RenderOptions {
            emit_toc: true,
            emit_season_links: true,
        };

        let document = foo_scraper(1, fetcher).with_options(options).assemble().await.unwrap();

        assert_eq!(
            document,
            format!(
                "# Foo Episode Summaries\n\n- [Season 1](#season-1)\n___\n\n\
                 ## [Season 1]({})\n1. **Pilot** - A beginning.\n",
                FOO_1
            )
        );
    }

    #[tokio::test]
    async fn test_assemble_restores_season_order() {
        // Season 1 finishes last.
        let fetcher = StaticFetcher::new()
            .page(FOO_1, episode_page("1", "First", "One."), 60)
            .page(FOO_2, episode_page("1", "Second", "Two."), 0);

        let document = foo_scraper(2, fetcher).assemble().await.unwrap();

        let first = document.find("## Season 1").unwrap();
        let second = document.find("## Season 2").unwrap();
        assert!(first < second);
    }

    #[tokio::test]
    async fn test_assemble_zero_seasons() {
        let document = foo_scraper(0, StaticFetcher::new()).assemble().await.unwrap();
        assert_eq!(document, "# Foo Episode Summaries\n\n");
    }

    #[tokio::test]
    async fn test_assemble_fails_when_any_season_fails() {
        let fetcher =
            StaticFetcher::new().page(FOO_1, episode_page("1", "Pilot", "A beginning."), 0);

        match foo_scraper(2, fetcher).assemble().await {
            Err(ScraperError::NotFound(url)) => assert_eq!(url, FOO_2),
            other => panic!("Expected NotFound error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_scrape_writes_nothing_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("foo.md");
        let spec = ShowSpec::new("Foo_(season_{})", 1)
            .unwrap()
            .with_output_path(&output);

        let result = EpisodeSummaryScraper::with_fetcher(spec, StaticFetcher::new()).scrape().await;

        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_scrape_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("foo.md");
        let spec = ShowSpec::new("Foo_(season_{})", 1)
            .unwrap()
            .with_output_path(&output);
        let fetcher =
            StaticFetcher::new().page(FOO_1, episode_page("1", "Pilot", "A beginning."), 0);

        let written = EpisodeSummaryScraper::with_fetcher(spec, fetcher).scrape().await.unwrap();

        assert_eq!(written, output);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "# Foo Episode Summaries\n\n## Season 1\n1. **Pilot** - A beginning.\n"
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_headings_ascending_for_any_completion_order(
            delays in proptest::collection::vec(0u64..15, 0..8)
        ) {
            let season_count = delays.len() as u32;
            let spec = ShowSpec::new("Foo_(season_{})", season_count).unwrap();
            let mut fetcher = StaticFetcher::new();
            for (i, delay) in delays.iter().enumerate() {
                let season = i as u32 + 1;
                let url = format!("https://en.wikipedia.org/wiki/Foo_%28season_{}%29", season);
                let page = episode_page("1", &format!("Ep {}", season), "Text.");
                fetcher = fetcher.page(&url, page, *delay);
            }
            let scraper = EpisodeSummaryScraper::with_fetcher(spec, fetcher);

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .unwrap();
            let document = runtime.block_on(scraper.assemble()).unwrap();

            let headings: Vec<&str> = document
                .lines()
                .filter(|line| line.starts_with("## "))
                .collect();
            let expected: Vec<String> =
                (1..=season_count).map(|n| format!("## Season {}", n)).collect();
            prop_assert_eq!(headings, expected);
        }
    }
}
