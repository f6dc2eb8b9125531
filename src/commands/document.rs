//! Firestore Documents
//!
//! Typed mirror of Firestore's REST `Document` and `Value` JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A Firestore field value, e.g. `{"stringValue": "abrigo"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    NullValue(()),
    BooleanValue(bool),
    /// int64 travels as a decimal string
    IntegerValue(String),
    DoubleValue(f64),
    TimestampValue(String),
    StringValue(String),
    BytesValue(String),
    ReferenceValue(String),
    GeoPointValue(GeoPoint),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrayValue {
    #[serde(default)]
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapValue {
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

impl Value {
    pub fn string(value: impl Into<String>) -> Self {
        Value::StringValue(value.into())
    }

    pub fn array(values: Vec<Value>) -> Self {
        Value::ArrayValue(ArrayValue { values })
    }

    pub fn map(fields: BTreeMap<String, Value>) -> Self {
        Value::MapValue(MapValue { fields })
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::StringValue(s) => Some(s),
            _ => None,
        }
    }

    /// Doubles, or integers written by other clients
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::DoubleValue(d) => Some(*d),
            Value::IntegerValue(i) => i.parse::<i64>().ok().map(|i| i as f64),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::ArrayValue(array) => Some(&array.values),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::MapValue(map) => Some(&map.fields),
            _ => None,
        }
    }
}

/// A document as returned by list/get and sent on create/update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// `projects/{p}/databases/{d}/documents/{collection}/{id}`; absent on create
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

impl Document {
    pub fn with_fields(fields: BTreeMap<String, Value>) -> Self {
        Self { name: None, fields }
    }

    /// Last segment of the resource name
    pub fn id(&self) -> Option<&str> {
        self.name
            .as_deref()
            .and_then(|name| name.rsplit('/').next())
            .filter(|id| !id.is_empty())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// String field, empty when missing or of another type
    pub fn string(&self, key: &str) -> String {
        self.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }
}

/// Body of a `documents.list` response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Body of an error response
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorStatus,
}

#[derive(Debug, Deserialize)]
pub struct ErrorStatus {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_response() {
        let raw = r#"{
            "documents": [{
                "name": "projects/mapa/databases/(default)/documents/locais/Xy12",
                "fields": {
                    "nome": {"stringValue": "Abrigo"},
                    "latitude": {"doubleValue": -26.29},
                    "longitude": {"integerValue": "-48"},
                    "ativo": {"booleanValue": true},
                    "obs": {"nullValue": null},
                    "hours": {"arrayValue": {}}
                },
                "createTime": "2024-05-01T12:00:00Z",
                "updateTime": "2024-05-01T12:00:00Z"
            }],
            "nextPageToken": "abc"
        }"#;
        let response: ListDocumentsResponse = serde_json::from_str(raw).expect("parse");

        assert_eq!(response.next_page_token.as_deref(), Some("abc"));
        let document = &response.documents[0];
        assert_eq!(document.id(), Some("Xy12"));
        assert_eq!(document.string("nome"), "Abrigo");
        assert_eq!(document.number("latitude"), Some(-26.29));
        assert_eq!(document.number("longitude"), Some(-48.0));
        assert_eq!(document.get("obs"), Some(&Value::NullValue(())));
        assert_eq!(document.get("hours").and_then(Value::as_array), Some(&[][..]));
        assert_eq!(document.string("missing"), "");
    }

    #[test]
    fn test_empty_collection() {
        let response: ListDocumentsResponse = serde_json::from_str("{}").expect("parse");
        assert!(response.documents.is_empty());
        assert!(response.next_page_token.is_none());
    }

    #[test]
    fn test_serialize_for_create() {
        let mut fields = BTreeMap::new();
        fields.insert("nome".to_string(), Value::string("Casa X"));
        fields.insert("latitude".to_string(), Value::DoubleValue(-26.3));
        let json = serde_json::to_value(Document::with_fields(fields)).expect("serialize");

        assert_eq!(
            json,
            serde_json::json!({
                "fields": {
                    "latitude": {"doubleValue": -26.3},
                    "nome": {"stringValue": "Casa X"}
                }
            })
        );
    }

    #[test]
    fn test_parse_error_envelope() {
        let raw = r#"{"error": {"code": 404, "message": "No document to update", "status": "NOT_FOUND"}}"#;
        let envelope: ErrorEnvelope = serde_json::from_str(raw).expect("parse");
        assert_eq!(envelope.error.code, 404);
        assert_eq!(envelope.error.message, "No document to update");
    }
}
