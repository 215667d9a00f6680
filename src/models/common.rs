use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts a JSON number and treats anything else (`"Unknown"`, null) as absent.
pub fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok()))
}

pub fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_u64))
}

pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_f64))
}

/// Accepts a string and drops the service's `"Unknown"` placeholder.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() && s != "Unknown" => Some(s),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "lenient_u32")]
        width: Option<u32>,
        #[serde(default, deserialize_with = "lenient_string")]
        created: Option<String>,
        #[serde(default, deserialize_with = "lenient_f64")]
        seconds: Option<f64>,
    }

    #[test]
    fn test_unknown_placeholders_become_none() {
        let probe: Probe =
            serde_json::from_str(r#"{"width": "Unknown", "created": "Unknown", "seconds": null}"#)
                .unwrap();
        assert_eq!(probe.width, None);
        assert_eq!(probe.created, None);
        assert_eq!(probe.seconds, None);
    }

    #[test]
    fn test_numbers_pass_through() {
        let probe: Probe =
            serde_json::from_str(r#"{"width": 768, "created": "2025-01-02T03:04:05", "seconds": 0}"#)
                .unwrap();
        assert_eq!(probe.width, Some(768));
        assert_eq!(probe.created.as_deref(), Some("2025-01-02T03:04:05"));
        assert_eq!(probe.seconds, Some(0.0));
    }

    #[test]
    fn test_missing_fields_default() {
        let probe: Probe = serde_json::from_str("{}").unwrap();
        assert!(probe.width.is_none() && probe.created.is_none() && probe.seconds.is_none());
    }
}
