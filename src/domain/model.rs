use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// A single item in a records store: an optional unique key plus free-form
/// fields. Storing a record under an existing key overwrites it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(flatten)]
    pub fields: HashMap<String, serde_json::Value>,
}

impl Record {
    pub fn new(fields: HashMap<String, serde_json::Value>) -> Self {
        Self { key: None, fields }
    }

    pub fn with_key(key: impl Into<String>, fields: HashMap<String, serde_json::Value>) -> Self {
        Self {
            key: Some(key.into()),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.fields.get(name)
    }
}

/// Per-item expiration: relative seconds from now, or an absolute instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expiry {
    In(u64),
    At(DateTime<Utc>),
}

impl Expiry {
    /// Unix timestamp the item expires at, as stored on the wire.
    pub fn unix_timestamp(&self) -> i64 {
        match self {
            Expiry::In(seconds) => Utc::now().timestamp() + *seconds as i64,
            Expiry::At(when) => when.timestamp(),
        }
    }
}

/// Payload for a file write: in-memory bytes or a file on local disk.
#[derive(Debug, Clone)]
pub enum FileSource {
    Bytes(Bytes),
    Path(PathBuf),
}

impl From<Vec<u8>> for FileSource {
    fn from(data: Vec<u8>) -> Self {
        FileSource::Bytes(Bytes::from(data))
    }
}

impl From<Bytes> for FileSource {
    fn from(data: Bytes) -> Self {
        FileSource::Bytes(data)
    }
}

impl From<PathBuf> for FileSource {
    fn from(path: PathBuf) -> Self {
        FileSource::Path(path)
    }
}

/// One page of file names. `last` is the pagination cursor for the next page,
/// absent on the final page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileListing {
    pub names: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
}

/// Outcome of a bulk file deletion: names removed, and a name → reason map for
/// the ones the service refused.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteResult {
    #[serde(default)]
    pub deleted: Vec<String>,

    #[serde(default)]
    pub failed: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_record_serializes_key_beside_flattened_fields() {
        let record = Record::with_key(
            "user1",
            HashMap::from([("name".to_string(), json!("John")), ("age".to_string(), json!(25))]),
        );

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({"key": "user1", "name": "John", "age": 25}));
    }

    #[test]
    fn test_record_without_key_omits_the_key_field() {
        let record = Record::new(HashMap::from([("name".to_string(), json!("John"))]));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({"name": "John"}));
    }

    #[test]
    fn test_record_deserializes_from_item_json() {
        let record: Record =
            serde_json::from_value(json!({"key": "k1", "name": "John", "tags": ["a", "b"]}))
                .unwrap();

        assert_eq!(record.key.as_deref(), Some("k1"));
        assert_eq!(record.field("name"), Some(&json!("John")));
        assert_eq!(record.field("tags"), Some(&json!(["a", "b"])));
    }

    #[test]
    fn test_expiry_at_uses_the_given_instant() {
        let when = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(Expiry::At(when).unix_timestamp(), 1_735_689_600);
    }

    #[test]
    fn test_expiry_in_is_relative_to_now() {
        let now = Utc::now().timestamp();
        let expires = Expiry::In(300).unix_timestamp();
        assert!(expires >= now + 300);
        assert!(expires <= now + 301);
    }
}
