//! Listing-page HTML to headline records.

use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

/// One headline anchor from the news listing.
#[derive(Debug, Clone)]
pub struct Headline {
    pub link: String,
    pub title: String,
}

/// Collect headline anchors (`div.titulo a`) from the listing document.
/// Relative links are resolved against `base`; anchors without an `href`
/// are skipped.
pub fn headlines(html: &str, base: &Url) -> Vec<Headline> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("div.titulo a").unwrap();

    let mut found = Vec::new();
    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Ok(link) = base.join(href) else {
            debug!(href, "skipping unresolvable headline link");
            continue;
        };
        found.push(Headline {
            link: link.to_string(),
            title: element.text().collect(),
        });
    }
    found
}
