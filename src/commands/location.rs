//! Location Documents
//!
//! Codec between `Location` and documents of the `locais` collection.
//! Field names follow the collection's existing (Portuguese) schema.

use std::collections::BTreeMap;

use location_registry::{Location, LocationFields, Position, ScheduleEntry};

use super::document::{Document, Value};
use super::error::FirestoreError;

const TITLE: &str = "nome";
const DESCRIPTION: &str = "descricao";
const CATEGORY: &str = "categoria";
const LATITUDE: &str = "latitude";
const LONGITUDE: &str = "longitude";
const HOURS: &str = "hours";
const INFO: &str = "info";
const FROM: &str = "from";
const TO: &str = "to";

pub fn encode(fields: &LocationFields) -> Document {
    let hours = fields
        .schedule
        .iter()
        .map(|entry| {
            let mut row = BTreeMap::new();
            row.insert(FROM.to_string(), Value::string(&entry.from));
            row.insert(TO.to_string(), Value::string(&entry.to));
            Value::map(row)
        })
        .collect();

    let mut document = BTreeMap::new();
    document.insert(TITLE.to_string(), Value::string(&fields.title));
    document.insert(DESCRIPTION.to_string(), Value::string(&fields.description));
    document.insert(CATEGORY.to_string(), Value::string(&fields.category_id));
    document.insert(LATITUDE.to_string(), Value::DoubleValue(fields.position.latitude));
    document.insert(LONGITUDE.to_string(), Value::DoubleValue(fields.position.longitude));
    document.insert(HOURS.to_string(), Value::array(hours));
    document.insert(INFO.to_string(), Value::string(&fields.info));
    Document::with_fields(document)
}

/// Decode a stored document. `hours` and `info` are optional (older documents
/// lack them); coordinates are required.
pub fn decode(document: &Document) -> Result<Location, FirestoreError> {
    let id = document.id().ok_or(FirestoreError::MissingName)?;
    let latitude = document
        .number(LATITUDE)
        .ok_or(FirestoreError::MissingField(LATITUDE))?;
    let longitude = document
        .number(LONGITUDE)
        .ok_or(FirestoreError::MissingField(LONGITUDE))?;

    let schedule = document
        .get(HOURS)
        .and_then(Value::as_array)
        .unwrap_or_default()
        .iter()
        .filter_map(Value::as_map)
        .map(|row| {
            let text = |key: &str| {
                row.get(key)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            };
            ScheduleEntry::new(text(FROM), text(TO))
        })
        .collect();

    Ok(Location {
        id: id.to_string(),
        position: Position::new(latitude, longitude),
        title: document.string(TITLE),
        description: document.string(DESCRIPTION),
        category_id: document.string(CATEGORY),
        schedule,
        info: document.string(INFO),
    })
}
