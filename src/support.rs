use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes `null` as the target's default value.
///
/// The reporting service emits `null` for empty strings and empty work item
/// lists; combine with `#[serde(default)]` to also cover absent fields.
pub fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Lowercases every object key, recursively.
///
/// When two keys differ only in case, one of them is dropped.
pub fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key.to_lowercase(), lowercase_keys(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}

/// Deserializes `T` from the input with its object keys lowercased, so `T`
/// matches field names regardless of case. `T`'s fields must be lowercase.
pub struct LowercaseKeys<T>(pub T);

impl<'de, T: DeserializeOwned> Deserialize<'de> for LowercaseKeys<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        serde_json::from_value(lowercase_keys(value))
            .map(LowercaseKeys)
            .map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "deserialize_null_default")]
        name: String,
        #[serde(default, deserialize_with = "deserialize_null_default")]
        tags: Vec<String>,
    }

    #[test]
    fn null_becomes_default() {
        let sample: Sample = serde_json::from_str(r#"{"name": null, "tags": null}"#).unwrap();
        assert_eq!(sample.name, "");
        assert!(sample.tags.is_empty());
    }

    #[test]
    fn absent_becomes_default() {
        let sample: Sample = serde_json::from_str("{}").unwrap();
        assert_eq!(sample.name, "");
        assert!(sample.tags.is_empty());
    }

    #[test]
    fn present_values_pass_through() {
        let sample: Sample = serde_json::from_str(r#"{"name": "x", "tags": ["a"]}"#).unwrap();
        assert_eq!(sample.name, "x");
        assert_eq!(sample.tags, vec!["a".to_string()]);
    }

    #[test]
    fn wrong_type_is_still_rejected() {
        assert!(serde_json::from_str::<Sample>(r#"{"name": 5}"#).is_err());
    }

    #[test]
    fn keys_are_lowercased_at_every_depth() {
        let value = json!({"TfsRequest": {"ServiceUrl": "X", "List": [{"InnerKey": 1}]}});
        assert_eq!(
            lowercase_keys(value),
            json!({"tfsrequest": {"serviceurl": "X", "list": [{"innerkey": 1}]}})
        );
    }

    #[test]
    fn values_keep_their_case() {
        let value = json!({"Name": "MixedCase Value"});
        assert_eq!(lowercase_keys(value), json!({"name": "MixedCase Value"}));
    }

    #[test]
    fn wrapper_matches_fields_ignoring_case() {
        let LowercaseKeys(sample): LowercaseKeys<Sample> =
            serde_json::from_str(r#"{"NAME": "x", "Tags": ["a"]}"#).unwrap();
        assert_eq!(sample.name, "x");
        assert_eq!(sample.tags, vec!["a".to_string()]);
    }
}
