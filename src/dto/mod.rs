pub mod application_dto;
pub mod auth_dto;
pub mod job_dto;
pub mod ranking_dto;

use serde::{Deserialize, Deserializer};

/// Accepts an id as a JSON number or a numeric string (`5`, `"5"`, `" 5 "`).
/// Blank or non-numeric strings read as absent, so callers report the field
/// as missing. Use with `#[serde(default, deserialize_with = "...")]`.
pub(crate) fn deserialize_optional_id<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdOrString {
        Int(i64),
        String(String),
    }

    Ok(match Option::<IdOrString>::deserialize(deserializer)? {
        Some(IdOrString::Int(id)) => Some(id),
        Some(IdOrString::String(s)) => s.trim().parse::<i64>().ok(),
        None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "deserialize_optional_id")]
        id: Option<i64>,
    }

    fn json_id(body: &str) -> Option<i64> {
        serde_json::from_str::<Holder>(body).unwrap().id
    }

    fn query_id(query: &str) -> Option<i64> {
        let uri: axum::http::Uri = format!("/x?{query}").parse().unwrap();
        axum::extract::Query::<Holder>::try_from_uri(&uri).unwrap().0.id
    }

    #[test]
    fn ids_from_json_numbers_and_strings() {
        assert_eq!(json_id(r#"{"id": 5}"#), Some(5));
        assert_eq!(json_id(r#"{"id": "42"}"#), Some(42));
        assert_eq!(json_id(r#"{"id": " 7 "}"#), Some(7));
        assert_eq!(json_id(r#"{"id": "abc"}"#), None);
        assert_eq!(json_id(r#"{"id": ""}"#), None);
        assert_eq!(json_id(r#"{"id": null}"#), None);
        assert_eq!(json_id("{}"), None);
    }

    #[test]
    fn ids_from_query_strings() {
        assert_eq!(query_id("id=12"), Some(12));
        assert_eq!(query_id("id=abc"), None);
        assert_eq!(query_id("id="), None);
        assert_eq!(query_id("other=1"), None);
    }

    #[test]
    fn non_id_shapes_are_rejected() {
        assert!(serde_json::from_str::<Holder>(r#"{"id": [1]}"#).is_err());
        assert!(serde_json::from_str::<Holder>(r#"{"id": true}"#).is_err());
    }
}
