//! Serde helpers for dashboard ids.
//!
//! Older dashboard endpoints return organization and test ids as JSON
//! numbers, newer ones as strings. Ids are always handled as strings here.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    U64(u64),
    I64(i64),
}

pub fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::U64(v) => v.to_string(),
        StringOrNumber::I64(v) => v.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "id_from_string_or_number")]
        id: String,
    }

    #[test]
    fn test_accepts_strings_and_numbers() {
        let s: Holder = serde_json::from_str(r#"{"id": "549236"}"#).unwrap();
        let n: Holder = serde_json::from_str(r#"{"id": 549236}"#).unwrap();
        assert_eq!(s.id, "549236");
        assert_eq!(n.id, "549236");
    }

    #[test]
    fn test_rejects_other_types() {
        assert!(serde_json::from_str::<Holder>(r#"{"id": true}"#).is_err());
    }
}
