mod chart;
mod dataset;
mod detail;
mod extract;
mod fetch;
mod listing;
mod pipe;
mod settings;

use std::path::Path;

use anyhow::{bail, Result};
use tracing::info;
use url::Url;

use crate::dataset::Dataset;
use crate::detail::DateResolver;
use crate::settings::Settings;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let settings = Settings::load()?;

    println!("ICU bed occupancy - Campinas news feed");
    println!("======================================\n");

    let listing_url = Url::parse(&settings.listing_url)?;
    let client = fetch::client()?;
    let html = fetch::fetch_html(&client, listing_url.as_str())?;
    let headlines = listing::headlines(&html, &listing_url);
    println!("Found {} headlines on the listing page", headlines.len());

    let resolver = DateResolver::new(client, settings.detail_url.clone());
    let observations = extract::extract_observations(headlines, |link| resolver.resolve(link))?;

    let dataset = Dataset::from_observations(observations);
    if dataset.is_empty() {
        bail!("no observations extracted from {}", settings.listing_url);
    }
    info!(count = dataset.len(), "extracted observations");

    dataset.write_csv(Path::new(&settings.csv_path))?;
    chart::render(&dataset, Path::new(&settings.chart_path))?;

    println!(
        "\nWrote {} observations to {} and {}",
        dataset.len(),
        settings.csv_path,
        settings.chart_path
    );
    if let Some(latest) = dataset.latest() {
        println!("Latest occupancy: {:.1}% at {}", latest.occupancy, latest.date);
    }
    Ok(())
}
