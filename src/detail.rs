//! Publication-date resolution through the per-article detail endpoint.
//!
//! Listing links carry a query string joined with `;` instead of `&`. The
//! `id` value keys a JSON export endpoint whose first record holds the
//! article's original publication timestamp.

use std::time::Instant;

use anyhow::Result;
use chrono::NaiveDateTime;
use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y - %H:%M";

/// Contract violations against the site's link and payload shape. Any of
/// these means the site changed format, so the run aborts.
#[derive(Debug, Error)]
pub enum DetailError {
    #[error("headline link is not a valid url: {0}")]
    BadLink(#[from] url::ParseError),
    #[error("headline link has no query string: {link}")]
    MissingQuery { link: String },
    #[error("malformed query segment {segment:?} in headline link: {link}")]
    MalformedSegment { link: String, segment: String },
    #[error("headline link query has no `id` key: {link}")]
    MissingId { link: String },
    #[error("detail payload for id {id} is empty")]
    EmptyPayload { id: String },
}

#[derive(Debug, Deserialize)]
struct DetailRecord {
    not_dtinicial: String,
}

/// Pull the article id out of a headline link. Query pairs are split on
/// `;`, each segment on its first `=`.
pub fn article_id(link: &str) -> Result<String, DetailError> {
    let url = Url::parse(link)?;
    let query = url
        .query()
        .filter(|q| !q.is_empty())
        .ok_or_else(|| DetailError::MissingQuery {
            link: link.to_string(),
        })?;

    let mut id = None;
    for segment in query.split(';') {
        let (key, value) = segment
            .split_once('=')
            .ok_or_else(|| DetailError::MalformedSegment {
                link: link.to_string(),
                segment: segment.to_string(),
            })?;
        if key == "id" {
            id = Some(value.to_string());
        }
    }
    id.ok_or_else(|| DetailError::MissingId {
        link: link.to_string(),
    })
}

/// Read `not_dtinicial` from the first record of a detail payload and parse
/// it as `DD/MM/YYYY - HH:MM`.
pub fn timestamp_from_payload(id: &str, payload: &str) -> Result<NaiveDateTime> {
    let records: Vec<DetailRecord> = serde_json::from_str(payload)?;
    let first = records.first().ok_or_else(|| DetailError::EmptyPayload {
        id: id.to_string(),
    })?;
    Ok(NaiveDateTime::parse_from_str(
        &first.not_dtinicial,
        TIMESTAMP_FORMAT,
    )?)
}

/// Resolves headline links to publication timestamps, one blocking fetch
/// per call. No caching and no retry; the first failure aborts the run.
pub struct DateResolver {
    client: Client,
    detail_url: String,
}

impl DateResolver {
    /// `detail_url` is a template with an `{id}` placeholder.
    pub fn new(client: Client, detail_url: impl Into<String>) -> Self {
        DateResolver {
            client,
            detail_url: detail_url.into(),
        }
    }

    pub fn resolve(&self, link: &str) -> Result<NaiveDateTime> {
        let id = article_id(link)?;
        let url = self.detail_url.replace("{id}", &id);

        let started = Instant::now();
        let payload = self.client.get(&url).send()?.error_for_status()?.text()?;
        debug!(
            %url,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "fetched detail payload"
        );

        timestamp_from_payload(&id, &payload)
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn article_id_from_semicolon_query() {
        let id = article_id("https://noticias.test/integra?foo=1;id=4242;bar=2").unwrap();
        assert_eq!(id, "4242");
    }

    #[test]
    fn segment_splits_on_first_equals_only() {
        let id = article_id("https://noticias.test/integra?id=a=b").unwrap();
        assert_eq!(id, "a=b");
    }

    #[test]
    fn single_pair_query() {
        let id = article_id("https://noticias.test/integra?id=7").unwrap();
        assert_eq!(id, "7");
    }

    #[test]
    fn missing_id_key_is_a_contract_violation() {
        let err = article_id("https://noticias.test/integra?foo=1;bar=2").unwrap_err();
        assert!(matches!(err, DetailError::MissingId { .. }));
    }

    #[test]
    fn missing_query_is_a_contract_violation() {
        let err = article_id("https://noticias.test/integra").unwrap_err();
        assert!(matches!(err, DetailError::MissingQuery { .. }));
    }

    #[test]
    fn segment_without_equals_is_a_contract_violation() {
        let err = article_id("https://noticias.test/integra?id=1;naked").unwrap_err();
        assert!(matches!(err, DetailError::MalformedSegment { .. }));
    }

    #[test]
    fn invalid_link_is_a_contract_violation() {
        let err = article_id("not a url").unwrap_err();
        assert!(matches!(err, DetailError::BadLink(_)));
    }

    #[test]
    fn timestamp_parsed_from_first_record() {
        let payload = r#"[{"not_dtinicial": "05/04/2021 - 14:30", "not_titulo": "x"}]"#;
        let parsed = timestamp_from_payload("1", payload).unwrap();
        let expected = NaiveDate::from_ymd_opt(2021, 4, 5)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn later_records_are_ignored() {
        let payload = r#"[
            {"not_dtinicial": "01/01/2021 - 08:00"},
            {"not_dtinicial": "31/12/2021 - 23:59"}
        ]"#;
        let parsed = timestamp_from_payload("1", payload).unwrap();
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2021, 1, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn empty_payload_is_fatal() {
        let err = timestamp_from_payload("9", "[]").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn unexpected_timestamp_shape_is_fatal() {
        let payload = r#"[{"not_dtinicial": "2021-04-05 14:30"}]"#;
        assert!(timestamp_from_payload("1", payload).is_err());
    }
}
