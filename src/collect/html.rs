//! HTML scanning: page title and image sources

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{Error, Result};
use super::extensions::Extensions;

/// Title used when the page has no usable `<title>`
pub const UNTITLED: &str = "Untitled";

/// Attributes holding an image address, most preferred first
const SOURCE_ATTRIBUTES: [&str; 2] = ["data-src", "src"];

/// What a single pass over the page found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageScan {
    /// Trimmed document title, or [`UNTITLED`]
    pub title: String,
    /// Number of `<img>` elements, including those without a source
    pub element_count: usize,
    /// Raw source values in document order, repeats kept
    pub sources: Vec<String>,
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::General(format!("Bad selector '{}': {}", css, e)))
}

/// Scan an HTML document for its title and `<img>` sources
///
/// Non-HTML input is parsed leniently and simply yields no images.
pub fn scan_page(html: &str) -> Result<PageScan> {
    let document = Html::parse_document(html);
    let title_selector = selector("title")?;
    let img_selector = selector("img")?;

    let title = document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string());

    let mut element_count = 0;
    let mut sources = Vec::new();
    for element in document.select(&img_selector) {
        element_count += 1;
        if let Some(source) = image_source(&element) {
            sources.push(source.to_string());
        }
    }

    Ok(PageScan {
        title,
        element_count,
        sources,
    })
}

/// First non-empty of the lazy-load attribute and `src`
fn image_source<'a>(element: &ElementRef<'a>) -> Option<&'a str> {
    SOURCE_ATTRIBUTES
        .iter()
        .filter_map(|name| element.value().attr(name))
        .map(str::trim)
        .find(|value| !value.is_empty())
}

/// Resolve sources against the page address and keep accepted extensions
pub fn resolve_candidates(page_url: &Url, sources: &[String], extensions: &Extensions) -> Vec<Url> {
    let mut candidates = Vec::new();
    for source in sources {
        match page_url.join(source) {
            Ok(url) if extensions.matches_url(url.as_str()) => candidates.push(url),
            Ok(url) => tracing::debug!("Skipping {}: extension not accepted", url),
            Err(e) => tracing::debug!("Skipping unresolvable source '{}': {}", source, e),
        }
    }
    candidates
}
