//! CSV-backed reading store.
//!
//! Every call re-reads the whole source. There is no cache, so the cost of
//! `load` and `most_recent` is linear in the size of the dataset; that is
//! acceptable for a small, slowly appended log of readings and is the first
//! thing to revisit at higher request rates.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::{debug, warn};

use crate::error::LoadError;
use crate::models::{RawSensorReading, SensorReading, CANONICAL_COLUMNS};

// ---

/// What to do with a row whose `time` does not parse. Other row errors
/// always fail the load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampPolicy {
    /// Fail the whole load.
    #[default]
    Reject,
    /// Drop the row and log a warning.
    Skip,
}

/// Read-only access to the reading source.
#[derive(Debug, Clone)]
pub struct ReadingStore {
    // ---
    path: PathBuf,
    policy: TimestampPolicy,
}

impl ReadingStore {
    // ---
    pub fn new(path: impl Into<PathBuf>, policy: TimestampPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every reading, in source order.
    pub fn load(&self) -> Result<Vec<SensorReading>, LoadError> {
        // ---
        let file = File::open(&self.path).map_err(|source| LoadError::Unreadable {
            path: self.path.clone(),
            source,
        })?;

        let readings = Self::parse(file, self.policy)?;
        debug!(
            "Loaded {} readings from {}",
            readings.len(),
            self.path.display()
        );
        Ok(readings)
    }

    /// The `n` newest readings, newest first. Equal timestamps keep source order.
    pub fn most_recent(&self, n: usize) -> Result<Vec<SensorReading>, LoadError> {
        // ---
        let mut readings = self.load()?;
        sort_newest_first(&mut readings);
        readings.truncate(n);
        Ok(readings)
    }

    /// Parse an in-memory CSV source.
    ///
    /// The header must name every canonical column; extra columns are ignored
    /// and columns may appear in any order.
    pub fn parse<R: Read>(
        source: R,
        policy: TimestampPolicy,
    ) -> Result<Vec<SensorReading>, LoadError> {
        // ---
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(source);

        let headers = reader.headers()?.clone();
        let missing: Vec<&'static str> = CANONICAL_COLUMNS
            .iter()
            .copied()
            .filter(|column| !headers.iter().any(|h| h == *column))
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::MissingColumns(missing));
        }

        let mut readings = Vec::new();
        for (i, row) in reader.deserialize::<RawSensorReading>().enumerate() {
            let raw = row?;
            match raw.into_reading(i + 1) {
                Ok(reading) => readings.push(reading),
                Err(LoadError::Timestamp(e)) if policy == TimestampPolicy::Skip => {
                    warn!("Skipping reading: {}", e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(readings)
    }
}

/// Stable sort by timestamp, descending.
pub fn sort_newest_first(readings: &mut [SensorReading]) {
    readings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use std::io::Write;

    const HEADER: &str = "time,device_id,air_temperature,air_humidity,soil_moisture,\
soil_temperature,soil_ph,nitrogen_levels,phosphorus_levels,potassium_levels,motion_detected";

    fn row(time: &str, device_id: &str) -> String {
        format!("{time},{device_id},23.0,55,60,18.5,6.5,30,15,200,0")
    }

    fn csv_of(rows: &[String]) -> String {
        // ---
        let mut out = String::from(HEADER);
        for r in rows {
            out.push('\n');
            out.push_str(r);
        }
        out.push('\n');
        out
    }

    #[test]
    fn test_parse_keeps_source_order() {
        // ---
        let data = csv_of(&[
            row("2023-11-28T06:16:46.777Z", "a"),
            row("2023-11-29T06:16:46.777Z", "b"),
            row("2023-11-27T06:16:46.777Z", "c"),
        ]);
        let readings = ReadingStore::parse(data.as_bytes(), TimestampPolicy::Reject).unwrap();

        let ids: Vec<_> = readings.iter().map(|r| r.device_id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_parse_accepts_reordered_and_extra_columns() {
        // ---
        let data = "extra,motion_detected,potassium_levels,phosphorus_levels,nitrogen_levels,\
soil_ph,soil_temperature,soil_moisture,air_humidity,air_temperature,device_id,time
x,1,200,15,30,6.5,18.5,60,55,23.0,7,2023-11-28T06:16:46.777Z
";
        let readings = ReadingStore::parse(data.as_bytes(), TimestampPolicy::Reject).unwrap();

        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].device_id, "7");
        assert_eq!(readings[0].motion_detected, 1);
        assert_eq!(readings[0].air_temperature, 23.0);
    }

    #[test]
    fn test_parse_missing_columns() {
        // ---
        let data = "time,device_id,air_temperature\n2023-11-28T06:16:46.777Z,1,23.0\n";
        let err = ReadingStore::parse(data.as_bytes(), TimestampPolicy::Reject).unwrap_err();

        match err {
            LoadError::MissingColumns(missing) => {
                assert_eq!(missing.len(), 8);
                assert_eq!(missing[0], "air_humidity");
                assert_eq!(missing[7], "motion_detected");
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_non_numeric_metric_is_malformed() {
        // ---
        let data = csv_of(&["2023-11-28T06:16:46.777Z,1,warm,55,60,18.5,6.5,30,15,200,0".to_string()]);
        let err = ReadingStore::parse(data.as_bytes(), TimestampPolicy::Reject).unwrap_err();

        assert!(matches!(err, LoadError::Malformed(_)));
    }

    #[test]
    fn test_bad_timestamp_rejects_whole_load() {
        // ---
        let data = csv_of(&[
            row("2023-11-28T06:16:46.777Z", "a"),
            row("not-a-date", "b"),
        ]);
        let err = ReadingStore::parse(data.as_bytes(), TimestampPolicy::Reject).unwrap_err();

        match err {
            LoadError::Timestamp(e) => {
                assert_eq!(e.row, 2);
                assert_eq!(e.value, "not-a-date");
            }
            other => panic!("expected Timestamp, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_timestamp_skipped_under_skip_policy() {
        // ---
        let data = csv_of(&[
            row("2023-11-28T06:16:46.777Z", "a"),
            row("not-a-date", "b"),
            row("2023-11-29T06:16:46.777Z", "c"),
        ]);
        let readings = ReadingStore::parse(data.as_bytes(), TimestampPolicy::Skip).unwrap();

        let ids: Vec<_> = readings.iter().map(|r| r.device_id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn test_non_finite_metrics_reject_load() {
        // ---
        let data = csv_of(&[
            row("2023-11-28T06:16:46.777Z", "a"),
            "2023-11-28T07:16:46.777Z,b,NaN,55,60,18.5,6.5,30,15,200,0".to_string(),
        ]);
        let err = ReadingStore::parse(data.as_bytes(), TimestampPolicy::Reject).unwrap_err();
        match err {
            LoadError::NonFinite { row, column, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, "air_temperature");
            }
            other => panic!("expected NonFinite, got {other:?}"),
        }

        // Skip only applies to timestamps
        let data = csv_of(&["2023-11-28T07:16:46.777Z,b,23.0,55,60,18.5,inf,30,15,200,0".to_string()]);
        let err = ReadingStore::parse(data.as_bytes(), TimestampPolicy::Skip).unwrap_err();
        assert!(matches!(err, LoadError::NonFinite { column: "soil_ph", .. }));
    }

    #[test]
    fn test_timestamp_without_millis_rejected() {
        // ---
        let data = csv_of(&[row("2023-11-28T06:16:46Z", "a")]);
        let err = ReadingStore::parse(data.as_bytes(), TimestampPolicy::Reject).unwrap_err();
        assert!(matches!(err, LoadError::Timestamp(_)));
    }

    #[test]
    fn test_load_missing_file() {
        // ---
        let store = ReadingStore::new("/nonexistent/sensor_data.csv", TimestampPolicy::Reject);
        let err = store.load().unwrap_err();

        assert!(matches!(err, LoadError::Unreadable { .. }));
        assert!(err.to_string().contains("/nonexistent/sensor_data.csv"));
    }

    #[test]
    fn test_most_recent_sorted_and_truncated() {
        // ---
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let data = csv_of(&[
            row("2023-11-28T06:16:46.777Z", "a"),
            row("2023-11-30T06:16:46.777Z", "b"),
            row("2023-11-29T06:16:46.777Z", "c"),
            row("2023-11-30T06:16:46.777Z", "d"),
        ]);
        file.write_all(data.as_bytes()).unwrap();

        let store = ReadingStore::new(file.path(), TimestampPolicy::Reject);
        let latest = store.most_recent(3).unwrap();

        // b and d share a timestamp; b comes first in the source
        let ids: Vec<_> = latest.iter().map(|r| r.device_id.as_str()).collect();
        assert_eq!(ids, ["b", "d", "c"]);

        // Idempotent on an unchanged source
        assert_eq!(store.most_recent(3).unwrap(), latest);

        // n larger than the dataset returns everything
        assert_eq!(store.most_recent(10).unwrap().len(), 4);
        assert!(store.most_recent(0).unwrap().is_empty());
    }

    #[test]
    fn test_empty_source_has_no_readings() {
        // ---
        let data = csv_of(&[]);
        let readings = ReadingStore::parse(data.as_bytes(), TimestampPolicy::Reject).unwrap();
        assert!(readings.is_empty());
    }
}
