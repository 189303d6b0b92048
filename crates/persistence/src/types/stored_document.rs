//! Raw records as handed out by a backend.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;

use super::RecordId;

/// The field under which every record carries its identifier.
pub const ID_FIELD: &str = "_id";

/// A record read from the material collection.
///
/// The content is kept as untyped JSON; typed views are built by the layers
/// above. Backends guarantee that `content["_id"]` holds the identifier as a
/// plain hexadecimal string, whatever representation the store uses natively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    id: RecordId,
    content: Value,
}

impl StoredDocument {
    /// Wraps a record, normalizing its `_id` field to the hex string form.
    pub fn new(id: RecordId, mut content: Value) -> Self {
        if let Some(object) = content.as_object_mut() {
            object.insert(ID_FIELD.to_string(), Value::String(id.to_hex()));
        }
        Self { id, content }
    }

    /// Builds a record from raw JSON, reading the identifier from `_id`.
    ///
    /// Accepts both a plain hex string and the extended-JSON form
    /// `{"$oid": "..."}`.
    pub fn from_value(content: Value) -> Result<Self, ValidationError> {
        let id = match content.get(ID_FIELD) {
            Some(raw) => extract_id(raw)?,
            None => {
                return Err(ValidationError::InvalidDocument {
                    message: "missing _id field".to_string(),
                });
            }
        };
        Ok(Self::new(id, content))
    }

    /// Returns the record identifier.
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Returns the record content.
    pub fn content(&self) -> &Value {
        &self.content
    }

    /// Returns a top-level field, treating `null` as absent.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.content.get(name).filter(|v| !v.is_null())
    }

    /// Returns a copy holding only `_id` and the listed top-level fields.
    pub fn project(&self, fields: &[&str]) -> StoredDocument {
        let source = self.content.as_object();
        let mut projected = Map::new();
        for field in fields {
            if let Some(value) = source.and_then(|o| o.get(*field)) {
                projected.insert((*field).to_string(), value.clone());
            }
        }
        StoredDocument::new(self.id, Value::Object(projected))
    }
}

/// Reads an identifier from either `"hex"` or `{"$oid": "hex"}`.
pub(crate) fn extract_id(raw: &Value) -> Result<RecordId, ValidationError> {
    match raw {
        Value::String(s) => RecordId::parse(s),
        Value::Object(o) => match o.get("$oid").and_then(Value::as_str) {
            Some(s) => RecordId::parse(s),
            None => Err(ValidationError::InvalidDocument {
                message: "_id object has no $oid member".to_string(),
            }),
        },
        other => Err(ValidationError::InvalidDocument {
            message: format!("unsupported _id value: {}", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_normalizes_id() {
        let id = RecordId::parse("671e1961ab159a6f6ac9fddb").unwrap();
        let doc = StoredDocument::new(id, json!({"formula": "C8"}));
        assert_eq!(doc.content()["_id"], "671e1961ab159a6f6ac9fddb");
    }

    #[test]
    fn test_from_value_extended_json() {
        let doc = StoredDocument::from_value(json!({
            "_id": {"$oid": "671e1961ab159a6f6ac9fddb"},
            "formula": "C8"
        }))
        .unwrap();
        assert_eq!(doc.id().to_hex(), "671e1961ab159a6f6ac9fddb");
        assert_eq!(doc.content()["_id"], "671e1961ab159a6f6ac9fddb");
    }

    #[test]
    fn test_from_value_missing_id() {
        assert!(StoredDocument::from_value(json!({"formula": "C8"})).is_err());
    }

    #[test]
    fn test_field_treats_null_as_absent() {
        let doc = StoredDocument::new(RecordId::generate(), json!({"structure": null}));
        assert!(doc.field("structure").is_none());
        assert!(doc.field("_id").is_some());
    }

    #[test]
    fn test_project_keeps_only_listed_fields() {
        let doc = StoredDocument::new(
            RecordId::generate(),
            json!({"formula": "C8", "structure": {"sites": []}, "Sites": 8}),
        );
        let projected = doc.project(&["formula", "Sites", "missing"]);
        let object = projected.content().as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert!(object.contains_key("_id"));
        assert!(!object.contains_key("structure"));
    }
}
