use serde::{Deserialize, de::Error};
use serde_json::Value;

/// Accepts a JSON number or a numeric string.
///
/// A few endpoints report counters as strings depending on server version,
/// so both shapes are decoded to the same integer.
pub fn i64_or_string<'de, D>(de: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(de)? {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| Error::custom(format!("{n} is not an integer"))),
        Value::String(s) => s.trim().parse().map_err(Error::custom),
        other => Err(Error::custom(format!("expected integer, got {other}"))),
    }
}

pub fn u64_or_string<'de, D>(de: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let val = i64_or_string(de)?;
    u64::try_from(val).map_err(Error::custom)
}

/// Treats an explicit `null` like a missing field.
pub fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(de).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Count {
        #[serde(deserialize_with = "u64_or_string")]
        count: u64,
    }

    #[test]
    fn test_number_and_string() {
        let n: Count = serde_json::from_str(r#"{"count": 42}"#).unwrap();
        let s: Count = serde_json::from_str(r#"{"count": "42"}"#).unwrap();
        assert_eq!(n.count, 42);
        assert_eq!(s.count, 42);
    }

    #[test]
    fn test_rejects_negative_and_garbage() {
        assert!(serde_json::from_str::<Count>(r#"{"count": -1}"#).is_err());
        assert!(serde_json::from_str::<Count>(r#"{"count": "abc"}"#).is_err());
        assert!(serde_json::from_str::<Count>(r#"{"count": true}"#).is_err());
    }
}
