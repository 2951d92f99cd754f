//! Date-ordered occupancy series and its CSV form.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use chrono::NaiveDateTime;
use serde::Serialize;

/// A single (timestamp, occupancy-percentage) point in the series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub date: NaiveDateTime,
    pub occupancy: f64,
}

#[derive(Serialize)]
struct Row {
    date: NaiveDateTime,
    occupancy: f64,
}

/// Observations keyed and ordered by date. Duplicate dates keep the last
/// value seen, in input order.
#[derive(Debug, Default)]
pub struct Dataset {
    points: BTreeMap<NaiveDateTime, f64>,
}

impl Dataset {
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        let mut points = BTreeMap::new();
        for observation in observations {
            points.insert(observation.date, observation.occupancy);
        }
        Dataset { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The observation with the most recent date.
    pub fn latest(&self) -> Option<Observation> {
        self.points
            .iter()
            .next_back()
            .map(|(&date, &occupancy)| Observation { date, occupancy })
    }

    /// Points in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = Observation> + '_ {
        self.points
            .iter()
            .map(|(&date, &occupancy)| Observation { date, occupancy })
    }

    /// Write the series as `date,occupancy` rows, overwriting `path`.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        self.write_csv_to(File::create(path)?)
    }

    fn write_csv_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for observation in self.iter() {
            csv_writer.serialize(Row {
                date: observation.date,
                occupancy: observation.occupancy,
            })?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 4, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn obs(d: u32, h: u32, occupancy: f64) -> Observation {
        Observation {
            date: ts(d, h),
            occupancy,
        }
    }

    #[test]
    fn points_come_out_ordered_by_date() {
        let dataset =
            Dataset::from_observations(vec![obs(5, 14, 75.0), obs(3, 9, 60.0), obs(4, 10, 70.0)]);
        let dates: Vec<_> = dataset.iter().map(|o| o.date).collect();
        assert_eq!(dates, vec![ts(3, 9), ts(4, 10), ts(5, 14)]);
    }

    #[test]
    fn duplicate_date_keeps_last_value() {
        let dataset = Dataset::from_observations(vec![obs(5, 14, 75.0), obs(5, 14, 80.0)]);
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.latest().unwrap().occupancy, 80.0);
    }

    #[test]
    fn latest_is_the_maximum_date() {
        let dataset =
            Dataset::from_observations(vec![obs(5, 14, 75.0), obs(7, 8, 68.5), obs(6, 12, 71.0)]);
        let latest = dataset.latest().unwrap();
        assert_eq!(latest.date, ts(7, 8));
        assert_eq!(latest.occupancy, 68.5);
    }

    #[test]
    fn empty_dataset_has_no_latest() {
        let dataset = Dataset::from_observations(Vec::new());
        assert!(dataset.is_empty());
        assert!(dataset.latest().is_none());
    }

    #[test]
    fn csv_has_header_and_date_ordered_rows() {
        let dataset = Dataset::from_observations(vec![obs(5, 14, 75.0), obs(4, 9, 62.5)]);

        let mut buffer = Vec::new();
        dataset.write_csv_to(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "date,occupancy");
        assert!(lines[1].starts_with("2021-04-04T09:00:00,"));
        assert!(lines[1].ends_with("62.5"));
        assert!(lines[2].starts_with("2021-04-05T14:00:00,"));
        assert_eq!(lines.len(), 3);
    }
}
