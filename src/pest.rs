//! Binary pest classification from the PIR motion flag.

use serde::Serialize;

// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PestVerdict {
    /// No movement detected.
    Safe,
    /// Movement detected; possible infestation.
    Alert,
}

/// `0` is safe, any other value is an alert.
pub fn classify(motion_flag: i64) -> PestVerdict {
    if motion_flag == 0 {
        PestVerdict::Safe
    } else {
        PestVerdict::Alert
    }
}
