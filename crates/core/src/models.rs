pub mod appointment;
pub mod doctor;
pub mod slot;

/// Serde helpers for `HH:MM` wall-clock times.
///
/// Output is always `HH:MM`. Input accepts both `HH:MM` and `HH:MM:SS` since
/// the hospital database stores seconds while the booking pages do not.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        crate::availability::parse_time(&raw).map_err(serde::de::Error::custom)
    }
}
