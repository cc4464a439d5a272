//! Best-effort field deserializers for registry responses.
//!
//! Registries are not validated beyond extracting what they send,
//! so a field with an unexpected type is treated as missing instead
//! of failing the whole response.

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes a field, yielding `None` when it has the wrong shape.
///
/// # Errors
/// Only errors if the underlying data is not valid JSON.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Deserializes a list field, dropping entries with the wrong shape.
///
/// Anything other than a list yields `None`.
///
/// # Errors
/// Only errors if the underlying data is not valid JSON.
pub fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    })
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "lenient")]
        text: Option<String>,

        #[serde(default, deserialize_with = "lenient_seq")]
        numbers: Option<Vec<u32>>,
    }

    #[rstest]
    #[case::valid(r#"{"text": "a", "numbers": [1, 2]}"#, Some("a"), Some(vec![1, 2]))]
    #[case::missing("{}", None, None)]
    #[case::null(r#"{"text": null, "numbers": null}"#, None, None)]
    #[case::wrong_types(r#"{"text": 42, "numbers": {}}"#, None, None)]
    #[case::bad_entries(r#"{"numbers": [1, "two", 3, -4]}"#, None, Some(vec![1, 3]))]
    fn best_effort_fields(
        #[case] json: &str,
        #[case] text: Option<&str>,
        #[case] numbers: Option<Vec<u32>>,
    ) {
        let parsed: Fields = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.text.as_deref(), text);
        assert_eq!(parsed.numbers, numbers);
    }

    #[test]
    fn invalid_syntax_still_fails() {
        assert!(serde_json::from_str::<Fields>(r#"{"text": "#).is_err());
    }
}
