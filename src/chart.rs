//! Line-chart rendering of the occupancy series.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDateTime};
use itertools::{Itertools, MinMaxResult};
use plotters::prelude::*;
use tracing::debug;

use crate::dataset::Dataset;

const TITLE: &str = "Taxa de ocupação de leitos de UTI em Campinas";
const SIZE: (u32, u32) = (1280, 960);

/// Render the series to a PNG: y axis fixed to 0..100, mesh grid on, and a
/// red horizontal reference line at the latest observation's value.
pub fn render(dataset: &Dataset, path: &Path) -> Result<()> {
    let (start, end) = date_span(dataset).context("cannot chart an empty dataset")?;
    let latest = dataset.latest().context("cannot chart an empty dataset")?;

    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(TITLE, ("sans-serif", 28))
        .margin(24)
        .x_label_area_size(48)
        .y_label_area_size(56)
        .build_cartesian_2d(RangedDateTime::from(start..end), 0.0f64..100.0f64)?;

    chart.configure_mesh().y_desc("% de ocupação").draw()?;

    chart.draw_series(LineSeries::new(
        dataset.iter().map(|observation| (observation.date, observation.occupancy)),
        &BLUE,
    ))?;
    chart.draw_series(LineSeries::new(
        [(start, latest.occupancy), (end, latest.occupancy)],
        &RED,
    ))?;

    root.present()?;
    debug!(path = %path.display(), points = dataset.len(), "chart written");
    Ok(())
}

/// X-axis span of the series. A single observation gets a day of padding on
/// each side so the range stays non-degenerate.
fn date_span(dataset: &Dataset) -> Option<(NaiveDateTime, NaiveDateTime)> {
    match dataset.iter().map(|observation| observation.date).minmax() {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(date) => {
            Some((date - Duration::days(1), date + Duration::days(1)))
        }
        MinMaxResult::MinMax(first, last) => Some((first, last)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Observation;
    use chrono::NaiveDate;

    fn ts(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 4, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn span_of_empty_dataset_is_none() {
        assert!(date_span(&Dataset::default()).is_none());
    }

    #[test]
    fn span_of_single_point_is_padded() {
        let dataset = Dataset::from_observations(vec![Observation {
            date: ts(5),
            occupancy: 70.0,
        }]);
        let (start, end) = date_span(&dataset).unwrap();
        assert!(start < ts(5));
        assert!(end > ts(5));
    }

    #[test]
    fn span_covers_first_to_last_date() {
        let dataset = Dataset::from_observations(vec![
            Observation {
                date: ts(3),
                occupancy: 60.0,
            },
            Observation {
                date: ts(9),
                occupancy: 80.0,
            },
        ]);
        assert_eq!(date_span(&dataset), Some((ts(3), ts(9))));
    }
}
