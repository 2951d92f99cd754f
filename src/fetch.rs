//! Blocking HTTP helpers shared by the listing and detail fetches.

use std::time::{Duration, Instant};

use anyhow::Result;
use reqwest::blocking::Client;
use tracing::debug;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const TIMEOUT: Duration = Duration::from_secs(30);

pub fn client() -> Result<Client> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(TIMEOUT)
        .build()?)
}

/// GET a page and return its body, failing on any non-2xx status.
pub fn fetch_html(client: &Client, url: &str) -> Result<String> {
    let started = Instant::now();
    let body = client.get(url).send()?.error_for_status()?.text()?;
    debug!(
        %url,
        elapsed_ms = started.elapsed().as_millis() as u64,
        bytes = body.len(),
        "fetched page"
    );
    Ok(body)
}
