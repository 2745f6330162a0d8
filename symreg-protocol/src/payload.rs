//! Structured payload encoding
//!
//! Query and send commands carry structured values serialized under a named
//! root tag, so each payload is self-describing: a JSON object with exactly
//! one key, the logical field name, holding the value. The root tag is a
//! compatibility surface; both peers must agree on it per operation.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Root tags, one per structured payload kind
pub mod tags {
    pub const DATA_SET: &str = "data_set";
    pub const SEARCH_OPTIONS: &str = "search_options";
    pub const VECTOR_SOLUTION_INFO: &str = "vector_solution_info";
    pub const SEARCH_PROGRESS: &str = "search_progress";
    pub const SERVER_INFO: &str = "server_info";
    pub const SOLUTION_FRONTIER: &str = "solution_frontier";
}

/// Payload encoding error
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("Serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing root tag '{0}' in payload")]
    MissingTag(String),
}

/// Encode a named, typed value to a byte sequence
pub fn encode<T: Serialize + ?Sized>(tag: &str, value: &T) -> Result<Vec<u8>, PayloadError> {
    let mut root = serde_json::Map::with_capacity(1);
    root.insert(tag.to_string(), serde_json::to_value(value)?);
    Ok(serde_json::to_vec(&serde_json::Value::Object(root))?)
}

/// Decode a byte sequence back into a named, typed value
pub fn decode<T: DeserializeOwned>(tag: &str, bytes: &[u8]) -> Result<T, PayloadError> {
    let mut root: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(bytes)?;
    let value = root
        .remove(tag)
        .ok_or_else(|| PayloadError::MissingTag(tag.to_string()))?;
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SearchOptions, SolutionInfo};

    #[test]
    fn test_roundtrip_under_tag() {
        let options = SearchOptions::new("y = f(x)");
        let bytes = encode(tags::SEARCH_OPTIONS, &options).unwrap();
        let decoded: SearchOptions = decode(tags::SEARCH_OPTIONS, &bytes).unwrap();
        assert_eq!(decoded, options);
    }

    #[test]
    fn test_payload_is_keyed_by_tag() {
        let bytes = encode(tags::SERVER_INFO, &42i32).unwrap();
        let root: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(root[tags::SERVER_INFO], 42);
    }

    #[test]
    fn test_wrong_tag_is_a_decode_failure() {
        let bytes = encode(tags::SEARCH_PROGRESS, &1.5f32).unwrap();
        let err = decode::<f32>(tags::SERVER_INFO, &bytes).unwrap_err();
        assert!(matches!(err, PayloadError::MissingTag(tag) if tag == tags::SERVER_INFO));
    }

    #[test]
    fn test_malformed_bytes_fail() {
        let err = decode::<i32>(tags::SERVER_INFO, b"not json at all").unwrap_err();
        assert!(matches!(err, PayloadError::Json(_)));
    }

    #[test]
    fn test_encode_accepts_unsized_slice() {
        let individuals = [SolutionInfo::new("x"), SolutionInfo::new("x + 1")];
        let slice: &[SolutionInfo] = &individuals;
        let bytes = encode(tags::VECTOR_SOLUTION_INFO, slice).unwrap();
        let decoded: Vec<SolutionInfo> = decode(tags::VECTOR_SOLUTION_INFO, &bytes).unwrap();
        assert_eq!(decoded.len(), 2);
    }

    #[test]
    fn test_solution_vector_roundtrip() {
        let individuals = vec![
            SolutionInfo::new("x + 1"),
            SolutionInfo::new("sin(x)*2.5"),
        ];
        let bytes = encode(tags::VECTOR_SOLUTION_INFO, &individuals).unwrap();
        let decoded: Vec<SolutionInfo> = decode(tags::VECTOR_SOLUTION_INFO, &bytes).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[1].text, "sin(x)*2.5");
    }
}
