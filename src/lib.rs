//! Condition classification and alerting engine for agricultural IoT sensor
//! readings.
//!
//! Data flows leaf-first: [`ReadingStore`] yields readings, [`build_report`]
//! classifies each one against the static [`CATALOG`] and the motion flag, and
//! the resulting [`AlertReport`] is handed to whatever renders it. The
//! [`routes`] module exposes that boundary over HTTP.

pub mod alerts;
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod error;
pub mod models;
pub mod pest;
pub mod routes;
pub mod store;

pub use alerts::{build_report, AlertReport, ConditionAlert, PestAlert};
pub use catalog::{spec_for, Parameter, ParameterSpec, ValueRange, CATALOG};
pub use classifier::{classify, Condition, Severity};
pub use config::Config;
pub use error::{LoadError, TimestampParseError, UnknownParameter};
pub use models::{RawSensorReading, SensorReading};
pub use pest::PestVerdict;
pub use store::{ReadingStore, TimestampPolicy};
