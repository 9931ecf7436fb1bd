use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Kind of record, written as the `type` field of every output line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Recipe,
    Item,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Recipe => "recipe",
            RecordKind::Item => "item",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An item with the amount of it, e.g. `6x {{itemlink|Wild Mint|*}}`
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Quantity {
    pub quantity: u32,
    pub item: String,
}

/// What a recipe yields at one crafting tier
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TierOutput {
    pub tier: String,
    pub quantity: u32,
    pub item: String,
}

/// Value of a single record field
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(u64),
    Materials(Vec<Quantity>),
    Produces(Vec<TierOutput>),
    Tags(Vec<String>),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Integer(value)
    }
}

/// A parsed recipe or item.
///
/// Fields keep the order they were inserted in, so the JSON output follows
/// the order of the template arguments. Inserting an existing key replaces its
/// value without moving it.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    kind: RecordKind,
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            fields: Vec::new(),
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Field names in output order, not counting `type`
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    /// Shortcut for reading a string field
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(FieldValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Serializes the record as a single line of JSON, without the newline
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry("type", self.kind.as_str())?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
