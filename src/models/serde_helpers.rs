//! Serde helpers for payloads produced by clients that emit `null` for empty values.

use serde::{Deserialize, Deserializer};

/// Deserialize a value that treats null as `T::default()`.
///
/// Pair with `#[serde(default)]` so an absent field and an explicit `null`
/// decode the same way.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "null_as_default")]
        name: String,
        #[serde(deserialize_with = "null_as_default")]
        tags: Vec<String>,
        #[serde(deserialize_with = "null_as_default")]
        count: i64,
    }

    #[test]
    fn test_null_and_absent_are_zero() {
        let nulls: Sample = serde_json::from_str(r#"{"name":null,"tags":null,"count":null}"#).unwrap();
        assert_eq!(nulls.name, "");
        assert!(nulls.tags.is_empty());
        assert_eq!(nulls.count, 0);

        let absent: Sample = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.count, 0);
    }

    #[test]
    fn test_values_pass_through() {
        let s: Sample = serde_json::from_str(r#"{"name":"a","tags":["x"],"count":3}"#).unwrap();
        assert_eq!(s.name, "a");
        assert_eq!(s.tags, vec!["x".to_string()]);
        assert_eq!(s.count, 3);
    }

    #[test]
    fn test_wrong_type_still_fails() {
        assert!(serde_json::from_str::<Sample>(r#"{"count":"three"}"#).is_err());
    }
}
