//! Sensor reading models and the fixed source timestamp format.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Parameter;
use crate::error::{LoadError, TimestampParseError};

// ---

/// Source timestamp layout, e.g. `2023-11-28T06:16:46.777Z`.
///
/// The dot and exactly three fraction digits are required: `%3f` consumes a
/// fixed-width field, whereas `%.3f` would also accept a missing fraction.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.%3fZ";

/// Canonical column order of the reading source.
pub const CANONICAL_COLUMNS: [&str; 11] = [
    "time",
    "device_id",
    "air_temperature",
    "air_humidity",
    "soil_moisture",
    "soil_temperature",
    "soil_ph",
    "nitrogen_levels",
    "phosphorus_levels",
    "potassium_levels",
    "motion_detected",
];

/// One CSV row as stored, before timestamp and metric validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSensorReading {
    // ---
    pub time: String,
    pub device_id: String,
    pub air_temperature: f64,
    pub air_humidity: f64,
    pub soil_moisture: f64,
    pub soil_temperature: f64,
    pub soil_ph: f64,
    pub nitrogen_levels: f64,
    pub phosphorus_levels: f64,
    pub potassium_levels: f64,
    pub motion_detected: i64,
}

/// Validated, immutable sensor reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorReading {
    // ---
    pub timestamp: DateTime<Utc>,
    pub device_id: String,
    /// °C
    pub air_temperature: f64,
    /// %
    pub air_humidity: f64,
    /// % of soil volume
    pub soil_moisture: f64,
    /// °C
    pub soil_temperature: f64,
    pub soil_ph: f64,
    /// mg/kg
    pub nitrogen_levels: f64,
    /// mg/kg
    pub phosphorus_levels: f64,
    /// mg/kg
    pub potassium_levels: f64,
    /// PIR flag, 0 = no movement.
    pub motion_detected: i64,
}

/// Parse a source timestamp. The trailing `Z` is required; offsets are not accepted.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    // ---
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map(|naive| naive.and_utc())
}

impl RawSensorReading {
    // ---
    /// Validate the timestamp and metrics and produce a [`SensorReading`].
    ///
    /// Every metric must be finite; `NaN` and infinities are rejected.
    /// `row` is the 1-based data row number, used only for error reporting.
    pub fn into_reading(self, row: usize) -> Result<SensorReading, LoadError> {
        // ---
        let timestamp = match parse_timestamp(&self.time) {
            Ok(ts) => ts,
            Err(source) => {
                return Err(TimestampParseError {
                    row,
                    value: self.time,
                    source,
                }
                .into())
            }
        };

        let reading = SensorReading {
            timestamp,
            device_id: self.device_id,
            air_temperature: self.air_temperature,
            air_humidity: self.air_humidity,
            soil_moisture: self.soil_moisture,
            soil_temperature: self.soil_temperature,
            soil_ph: self.soil_ph,
            nitrogen_levels: self.nitrogen_levels,
            phosphorus_levels: self.phosphorus_levels,
            potassium_levels: self.potassium_levels,
            motion_detected: self.motion_detected,
        };

        if let Some(parameter) = Parameter::ALL
            .into_iter()
            .find(|p| !reading.value(*p).is_finite())
        {
            return Err(LoadError::NonFinite {
                row,
                column: parameter.name(),
                value: reading.value(parameter),
            });
        }

        Ok(reading)
    }
}

impl SensorReading {
    // ---
    pub fn value(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::AirTemperature => self.air_temperature,
            Parameter::AirHumidity => self.air_humidity,
            Parameter::SoilMoisture => self.soil_moisture,
            Parameter::SoilTemperature => self.soil_temperature,
            Parameter::SoilPh => self.soil_ph,
            Parameter::NitrogenLevels => self.nitrogen_levels,
            Parameter::PhosphorusLevels => self.phosphorus_levels,
            Parameter::PotassiumLevels => self.potassium_levels,
        }
    }
}
