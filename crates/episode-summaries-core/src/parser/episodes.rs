//! Episode table parser for Wikipedia season pages
//!
//! Wikipedia season articles list episodes in `wikiepisodetable` tables.
//! Each episode is a `tr.vevent` row whose header cell holds the episode
//! number, followed by a `td.summary` title cell, and a separate row with a
//! `td.description` summary cell. Multi-part episodes share one row; the
//! number cell then holds one `<hr>` between consecutive part numbers.

use scraper::{ElementRef, Html, Node, Selector};
use tracing::debug;

use crate::types::EpisodeRecord;

/// Episode-number cells, one per episode row
const EPISODE_NUMBER_SELECTOR: &str = r#"tr.vevent th[scope="row"]"#;

/// Episode title cells
const TITLE_SELECTOR: &str = "td.summary";

/// Episode summary cells
const SUMMARY_SELECTOR: &str = "td.description";

/// Separator between part numbers inside an episode-number cell
const PART_SEPARATOR_SELECTOR: &str = "hr";

/// Extract episode records from a Wikipedia season page.
///
/// The number, title and summary cells are paired by position. Pages with
/// a missing or misaligned column produce fewer records instead of an
/// error; extraction stops at the shortest column.
///
/// # Examples
/// ```
/// use episode_summaries_core::parser::extract_episodes;
///
/// let html = r#"<table>
///     <tr class="vevent"><th scope="row">1<hr>2</th><td class="summary">"Finale"</td></tr>
///     <tr><td class="description">The end.</td></tr>
/// </table>"#;
///
/// let records = extract_episodes(html);
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[1].part_number, Some(2));
/// ```
pub fn extract_episodes(html: &str) -> Vec<EpisodeRecord> {
    let document = Html::parse_document(html);

    let numbers = select_all(&document, EPISODE_NUMBER_SELECTOR);
    let titles = select_all(&document, TITLE_SELECTOR);
    let summaries = select_all(&document, SUMMARY_SELECTOR);

    if numbers.len() != titles.len() || titles.len() != summaries.len() {
        debug!(
            numbers = numbers.len(),
            titles = titles.len(),
            summaries = summaries.len(),
            "episode table columns differ in length"
        );
    }

    let mut records = Vec::with_capacity(numbers.len());
    for ((number, title), summary) in numbers.iter().zip(&titles).zip(&summaries) {
        let title_text = title.text().collect::<String>().trim().to_string();
        let summary_text = normalize_summary(&cell_text(summary));
        let separators = count_part_separators(number);

        records.push(EpisodeRecord::episode(title_text.clone(), summary_text));
        for part in 2..=separators as u32 + 1 {
            records.push(EpisodeRecord::part(title_text.clone(), part));
        }
    }

    records
}

/// Count the part separators inside an episode-number cell.
///
/// Zero means the row is a single-part episode.
pub fn count_part_separators(cell: &ElementRef) -> usize {
    match Selector::parse(PART_SEPARATOR_SELECTOR) {
        Ok(selector) => cell.select(&selector).count(),
        Err(_) => 0,
    }
}

/// Trim a summary and turn each run of line breaks into a single space.
///
/// # Examples
/// ```
/// use episode_summaries_core::parser::normalize_summary;
///
/// assert_eq!(normalize_summary("  Finn fights.\nJake helps.\n"), "Finn fights. Jake helps.");
/// ```
pub fn normalize_summary(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    let mut in_break = false;

    for ch in text.trim().chars() {
        if ch == '\n' || ch == '\r' {
            in_break = true;
            continue;
        }
        if in_break {
            normalized.push(' ');
            in_break = false;
        }
        normalized.push(ch);
    }

    normalized
}

/// Text content of a cell, with `<br>` elements read as line breaks.
fn cell_text(cell: &ElementRef) -> String {
    let mut text = String::new();
    for node in cell.descendants() {
        match node.value() {
            Node::Text(chunk) => text.push_str(chunk),
            Node::Element(element) if element.name() == "br" => text.push('\n'),
            _ => {}
        }
    }
    text
}

fn select_all<'a>(document: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => document.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}
