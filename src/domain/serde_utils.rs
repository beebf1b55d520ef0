//! Serde utilities for inkdex.

use serde::{Deserialize, Deserializer, Serializer};

/// Module to (de)serialize a `Duration` as whole milliseconds.
pub mod duration_millis {
    use super::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    /// Serializes a duration as an integer number of milliseconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the serializer fails.
    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    /// Deserializes a duration from an integer number of milliseconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an unsigned integer.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::time::Duration;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Wrapper {
        #[serde(with = "duration_millis")]
        delay: Duration,
    }

    #[test]
    fn test_duration_from_millis() {
        let wrapper: Wrapper = serde_json::from_str(r#"{"delay": 1500}"#).unwrap();
        assert_eq!(wrapper.delay, Duration::from_millis(1500));
    }

    #[test]
    fn test_duration_to_millis() {
        let json = serde_json::to_string(&Wrapper {
            delay: Duration::from_secs(2),
        })
        .unwrap();
        assert_eq!(json, r#"{"delay":2000}"#);
    }

    #[test]
    fn test_rejects_negative() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"delay": -1}"#).is_err());
    }
}
