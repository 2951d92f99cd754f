//! Headline parsing and the extraction pipeline itself. Pure except for the
//! injected date resolver, which performs one fetch per qualifying headline.

use std::sync::LazyLock;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use regex::Regex;

use crate::dataset::Observation;
use crate::listing::Headline;
use crate::pipe::Pipe;

/// A headline qualifies only when its lowercased text contains both
/// keywords.
pub const BED_KEYWORD: &str = "leito";
pub const OCCUPIED_KEYWORD: &str = "ocupado";

static PERCENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(,\d+)?%").unwrap());

/// Extract the leftmost percentage from headline text. The site writes
/// decimals with a comma ("12,5%"); anything without a percent pattern
/// yields `None`.
pub fn parse_title(title: &str) -> Option<f64> {
    let matched = PERCENT_RE.find(title)?;
    let number = matched.as_str().trim_end_matches('%').replace(',', ".");
    // The pattern admits only digits and one comma; a panic here means a
    // new headline format.
    Some(number.parse().expect("percent match is not a valid decimal"))
}

/// Run the headline records through the extraction pipeline: normalize,
/// keyword-filter, resolve dates and percentages, drop headlines without a
/// percentage, and materialize in document order.
///
/// `resolve_date` is called once per qualifying headline; its failure (and
/// any malformed date) aborts the whole extraction, while a missing
/// percentage only excludes that single headline.
pub fn extract_observations<F>(headlines: Vec<Headline>, resolve_date: F) -> Result<Vec<Observation>>
where
    F: Fn(&str) -> Result<NaiveDateTime>,
{
    Pipe::new(headlines.into_iter())
        .map(|headline| (headline.link, headline.title.to_lowercase()))
        .filter_pair(|_, title| title.contains(BED_KEYWORD) && title.contains(OCCUPIED_KEYWORD))
        .map_both(|link| resolve_date(&link), |title| parse_title(&title))
        .filter_pair(|_, occupancy| occupancy.is_some())
        .map_pair(|date, occupancy| -> Result<Observation> {
            let occupancy = occupancy.context("headline lost its percentage after filtering")?;
            Ok(Observation {
                date: date?,
                occupancy,
            })
        })
        .try_materialize()
}

// ── Tests ──
