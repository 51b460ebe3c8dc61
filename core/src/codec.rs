//! JSON encoding of request bodies and decoding of response bodies.

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{ClientError, Result};

/// The client's JSON codec. Stateless; one instance lives inside each
/// `SimpleClient` and is shared by every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    pub fn new() -> Self {
        Self
    }

    pub fn encode<V: Serialize + ?Sized>(&self, value: &V) -> Result<String> {
        serde_json::to_string(value).map_err(|e| ClientError::Serialization(e.to_string()))
    }

    /// Decode raw body bytes. Invalid UTF-8 is a decoding error like any
    /// other mismatch.
    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        serde_json::from_slice(bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde::Deserialize;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: u64,
        name: String,
    }

    #[test]
    fn decode_reports_shape_mismatch() {
        let err = JsonCodec::new()
            .decode::<Item>(br#"{"id":"one"}"#)
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn encode_rejects_maps_with_non_string_keys() {
        let mut map = BTreeMap::new();
        map.insert(vec![1u8], 1);
        let err = JsonCodec::new().encode(&map).unwrap_err();
        assert!(matches!(err, ClientError::Serialization(_)));
    }

    #[test]
    fn decode_inverts_encode() {
        let codec = JsonCodec::new();
        let item = Item {
            id: 7,
            name: "seven".to_string(),
        };
        let text = codec.encode(&item).unwrap();
        assert_eq!(codec.decode::<Item>(text.as_bytes()).unwrap(), item);
    }

    #[test]
    fn invalid_utf8_is_a_decode_error() {
        let err = JsonCodec::new()
            .decode::<serde_json::Value>(b"\xFF\xFE")
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
