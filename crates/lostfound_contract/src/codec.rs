use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to serialize value to JSON: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to parse JSON document: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("failed to deserialize document to target type: {0}")]
    Deserialize(#[source] serde_json::Error),
}

pub fn encode_canonical<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
    let json = serde_json::to_value(value).map_err(CodecError::Serialize)?;
    let normalized = normalize_json(json);
    serde_json::to_vec_pretty(&normalized).map_err(CodecError::Serialize)
}

pub fn decode_canonical<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    let decoded: Value = serde_json::from_slice(bytes).map_err(CodecError::Parse)?;
    serde_json::from_value(decoded).map_err(CodecError::Deserialize)
}

fn normalize_json(value: Value) -> Value {
    match value {
        Value::Object(obj) => {
            let mut entries: Vec<(String, Value)> = obj.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));

            let mut normalized = Map::new();
            for (key, item) in entries {
                normalized.insert(key, normalize_json(item));
            }
            Value::Object(normalized)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_json).collect()),
        primitive => primitive,
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_canonical, encode_canonical, CodecError};
    use crate::record::{FinderIdentity, LostItemRecord};
    use chrono::{TimeZone, Utc};

    fn sample() -> LostItemRecord {
        LostItemRecord::new_report(
            "Wallet",
            "Near the gym entrance",
            "file:///cache/wallet.jpg",
            &FinderIdentity::new("user-7", "+15550100"),
            Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap(),
        )
    }

    #[test]
    fn keys_come_out_sorted() {
        let encoded = encode_canonical(&sample()).expect("encode");
        let text = String::from_utf8(encoded).expect("utf8");

        let claim = text.find("\"claimDate\"").expect("claimDate");
        let title = text.find("\"title\"").expect("title");
        let date = text.find("\"datePosted\"").expect("datePosted");
        assert!(claim < date);
        assert!(date < title);
    }

    #[test]
    fn decoded_record_matches_source() {
        let record = sample();
        let encoded = encode_canonical(&record).expect("encode");
        let decoded: LostItemRecord = decode_canonical(&encoded).expect("decode");

        assert_eq!(record, decoded);
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let err = decode_canonical::<LostItemRecord>(b"not json").unwrap_err();
        assert!(matches!(err, CodecError::Parse(_)));
    }
}
