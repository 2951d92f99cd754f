//! Run configuration. Defaults match the live site; every field can be
//! overridden through `UTI_`-prefixed environment variables.

use anyhow::Result;
use config::Config;
use serde::Deserialize;

pub const LISTING_URL: &str = "https://covid-19.campinas.sp.gov.br/noticias";
pub const DETAIL_URL: &str =
    "https://www.campinas.sp.gov.br/export/export-noticias-integra-newportal.php?id={id}";

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub listing_url: String,
    /// Detail-endpoint template; `{id}` is replaced per article.
    pub detail_url: String,
    pub csv_path: String,
    pub chart_path: String,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("listing_url", LISTING_URL)?
            .set_default("detail_url", DETAIL_URL)?
            .set_default("csv_path", "data.csv")?
            .set_default("chart_path", "data.png")?
            .add_source(config::Environment::with_prefix("UTI"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}
