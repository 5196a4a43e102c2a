//! Media URL extraction from third-party HTML/text.
//!
//! Upstream pages change shape without notice, so extraction is a cascade of
//! independent heuristics tried in a fixed order, stopping at the first hit:
//!
//! 1. Open Graph `<meta property=...>` tags from a fixed allow-list
//! 2. Any bare `http(s)://....mp4` token in the text
//! 3. A `playAddr` key inside embedded script data (raw or JSON-escaped)
//!
//! No step can fail the whole extraction; a step that cannot make sense of
//! its input simply reports no match.

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

/// Substring every accepted media URL must contain
const MEDIA_MARKER: &str = ".mp4";

/// Open Graph properties checked in step 1, in priority order.
///
/// An `og:image` tag only matters when its content happens to point at an
/// `.mp4`.
pub const META_PROPERTIES: [&str; 4] = [
    "og:video:secure_url",
    "og:video",
    "og:video:url",
    "og:image",
];

const BARE_MP4_PATTERN: &str = r#"https?://[^\s"'>]+\.mp4[^\s"'>]*"#;
const PLAY_ADDR_PATTERN: &str = r#"playAddr":"([^"]+)""#;
const ESCAPED_PLAY_ADDR_PATTERN: &str = r#"playAddr\\":\\"(.+?)\\""#;

/// Helper function to compile a static regex pattern, panicking with a detailed error
/// message if compilation fails (a programming error, caught by the unit tests).
fn compile_regex_unsafe(pattern: &str, context: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}' in {}: {}. This is a programming error.",
            pattern, context, e
        )
    })
}

static BARE_MP4_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(BARE_MP4_PATTERN, "BARE_MP4_RE"));
static PLAY_ADDR_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(PLAY_ADDR_PATTERN, "PLAY_ADDR_RE"));
static ESCAPED_PLAY_ADDR_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(ESCAPED_PLAY_ADDR_PATTERN, "ESCAPED_PLAY_ADDR_RE"));

static META_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    META_PROPERTIES
        .iter()
        .map(|property| {
            crate::utils::parse_selector_with_fallback(
                &format!("meta[property=\"{}\"]", property),
                "META_SELECTORS",
            )
        })
        .collect()
});

/// Which heuristic produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStep {
    MetaTag,
    BareLink,
    PlayAddr,
}

/// Locates a direct media URL inside an HTML/text blob.
///
/// Returns `None` when none of the heuristics match. Never panics on
/// malformed markup.
///
/// # Examples
///
/// ```
/// use clip_resolver::extract_media_url;
///
/// let html = r#"<meta property="og:video:secure_url" content="https://x/y.mp4">"#;
/// assert_eq!(extract_media_url(html).as_deref(), Some("https://x/y.mp4"));
/// assert_eq!(extract_media_url("<p>nothing here</p>"), None);
/// ```
pub fn extract_media_url(html: &str) -> Option<String> {
    extract_with_step(html).map(|(url, _)| url)
}

/// Same as [`extract_media_url`], also reporting which step matched.
pub fn extract_with_step(html: &str) -> Option<(String, ExtractionStep)> {
    if html.is_empty() {
        return None;
    }

    let found = scan_meta_tags(html)
        .map(|url| (url, ExtractionStep::MetaTag))
        .or_else(|| scan_bare_links(html).map(|url| (url, ExtractionStep::BareLink)))
        .or_else(|| scan_play_addr(html).map(|url| (url, ExtractionStep::PlayAddr)));

    match &found {
        Some((url, step)) => log::debug!("Extracted media URL via {:?}: {}", step, url),
        None => log::debug!("No media URL found in {} bytes of markup", html.len()),
    }
    found
}

/// Step 1: Open Graph meta tags.
///
/// The DOM parse is isolated with `catch_unwind` so a parser failure on a
/// hostile document degrades to "no match" instead of aborting extraction.
fn scan_meta_tags(html: &str) -> Option<String> {
    let scanned = std::panic::catch_unwind(|| {
        let document = Html::parse_document(html);
        META_SELECTORS.iter().find_map(|selector| {
            document
                .select(selector)
                .filter_map(|element| element.value().attr("content"))
                .map(str::trim)
                .find(|content| content.contains(MEDIA_MARKER))
                .map(str::to_string)
        })
    });

    match scanned {
        Ok(found) => found,
        Err(_) => {
            log::warn!("HTML parser failed during meta tag scan; skipping step");
            None
        }
    }
}

/// Step 2: first bare `http(s)://` token containing `.mp4`.
fn scan_bare_links(text: &str) -> Option<String> {
    BARE_MP4_RE.find(text).map(|m| m.as_str().to_string())
}

/// Step 3: `playAddr` in embedded script data.
fn scan_play_addr(text: &str) -> Option<String> {
    let raw = PLAY_ADDR_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    // Inside a JSON string literal every backslash is itself escaped
    let candidate = raw.or_else(|| {
        ESCAPED_PLAY_ADDR_RE
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().replace("\\\\", "\\"))
    })?;

    let link = unescape_media_url(&candidate);
    if link.contains(MEDIA_MARKER) {
        Some(link)
    } else {
        log::debug!("playAddr found but does not point at an mp4: {}", link);
        None
    }
}

/// Replaces the escape sequences found in embedded script URLs
/// (`\u0026` → `&`, `\/` → `/`).
pub fn unescape_media_url(raw: &str) -> String {
    raw.replace("\\u0026", "&").replace("\\/", "/")
}
