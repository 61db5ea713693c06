//! Markdown rendering of seasons and the assembled document
//!
//! All rendering is pure string formatting; the same records always
//! produce the same bytes.

use crate::types::{EpisodeRecord, RenderOptions};

/// Suffix of every page title
const TITLE_SUFFIX: &str = "Episode Summaries";

/// Horizontal rule closing the table of contents
const TOC_RULE: &str = "___";

/// Render one season as a markdown section.
///
/// The heading is followed by one ordered-list line per record, in
/// extraction order. The section ends with a single newline.
///
/// # Examples
/// ```
/// use episode_summaries_core::render::render_season;
/// use episode_summaries_core::{EpisodeRecord, RenderOptions};
///
/// let records = vec![EpisodeRecord::episode("Pilot", "A beginning.")];
/// let section = render_season(1, "https://en.wikipedia.org/wiki/Foo", &records, &RenderOptions::default());
/// assert_eq!(section, "## Season 1\n1. **Pilot** - A beginning.\n");
/// ```
pub fn render_season(
    season_number: u32,
    url: &str,
    records: &[EpisodeRecord],
    options: &RenderOptions,
) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);

    if options.emit_season_links {
        lines.push(format!("## [Season {}]({})", season_number, url));
    } else {
        lines.push(format!("## Season {}", season_number));
    }
    lines.extend(records.iter().map(render_episode_line));

    lines.join("\n") + "\n"
}

/// Render a single ordered-list line.
pub fn render_episode_line(record: &EpisodeRecord) -> String {
    match (record.part_number, &record.summary) {
        (Some(part), _) => format!("1. **{} (Part {})**", record.title, part),
        (None, Some(summary)) => format!("1. **{}** - {}", record.title, summary),
        (None, None) => format!("1. **{}**", record.title),
    }
}

/// Derive the page title from a URL pattern.
///
/// The show name is everything before the parenthesized season suffix,
/// with underscores read as spaces.
///
/// # Examples
/// ```
/// use episode_summaries_core::render::page_title;
///
/// assert_eq!(page_title("Adventure_Time_(season_{})"), "# Adventure Time Episode Summaries");
/// ```
pub fn page_title(url_pattern: &str) -> String {
    let show = url_pattern
        .split_once("_(")
        .or_else(|| url_pattern.split_once('('))
        .map(|(show, _)| show.to_string())
        .unwrap_or_else(|| url_pattern.replace(crate::types::SEASON_SLOT, ""));

    let words: Vec<String> = show
        .replace('_', " ")
        .split_whitespace()
        .map(capitalize_first)
        .collect();

    title_line(&words)
}

/// Derive the page title from a script name such as
/// `adventure_time_episode_summaries`.
///
/// Every underscore-separated word is title-cased.
pub fn title_from_script(stem: &str) -> String {
    let words: Vec<String> = stem
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| capitalize_first(&word.to_lowercase()))
        .collect();

    let joined = words.join(" ");
    if joined.ends_with(TITLE_SUFFIX) {
        format!("# {}", joined)
    } else {
        title_line(&words)
    }
}

/// GitHub-style anchor for a heading.
///
/// # Examples
/// ```
/// use episode_summaries_core::render::heading_anchor;
///
/// assert_eq!(heading_anchor("Season 3"), "season-3");
/// ```
pub fn heading_anchor(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let stripped = match regex_lite::Regex::new(r"[^a-z0-9 _-]") {
        Ok(re) => re.replace_all(&lowered, "").into_owned(),
        Err(_) => lowered,
    };
    stripped.replace(' ', "-")
}

/// Table of contents with one link per season, closed by a rule.
pub fn table_of_contents(season_count: u32) -> String {
    let mut lines: Vec<String> = (1..=season_count)
        .map(|season| {
            let heading = format!("Season {}", season);
            format!("- [{}](#{})", heading, heading_anchor(&heading))
        })
        .collect();
    lines.push(TOC_RULE.to_string());

    lines.join("\n") + "\n"
}

/// Join title, optional table of contents and season sections.
///
/// Sections each end in a newline, so joining them with another newline
/// leaves one blank line between them.
pub fn assemble_document(title: &str, toc: Option<&str>, sections: &[String]) -> String {
    let mut document = format!("{}\n\n", title);
    if let Some(toc) = toc {
        document.push_str(toc);
        document.push('\n');
    }
    document.push_str(&sections.join("\n"));
    document
}

/// Ensure a caller-supplied title is a level-one heading.
pub fn as_title_line(title: &str) -> String {
    let title = title.trim();
    if title.starts_with("# ") {
        title.to_string()
    } else {
        format!("# {}", title.trim_start_matches('#').trim_start())
    }
}

fn title_line(words: &[String]) -> String {
    if words.is_empty() {
        format!("# {}", TITLE_SUFFIX)
    } else {
        format!("# {} {}", words.join(" "), TITLE_SUFFIX)
    }
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
