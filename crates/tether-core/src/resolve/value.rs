//! Value tree model for structural resolution.
//!
//! A closed enumeration of the shapes the resolver understands: scalars,
//! handles, statuses, and the four container kinds. Closed on purpose — every
//! leaf the walk meets is either a resolvable handle or passes through
//! unchanged, so "unsupported type" errors cannot exist.

use crate::domain::RunStatus;
use crate::handle::RunHandle;

/// Mapping key. Keys are preserved verbatim by the resolver and never
/// traversed, so handles cannot appear in key position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Bool(bool),
    Int(i64),
    Text(String),
}

/// Fixed-schema record: a named shape with explicitly enumerated fields.
///
/// The resolver rebuilds records field by field, keeping the schema name and
/// the field names/order untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    schema: String,
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new(schema: impl Into<String>, fields: Vec<(String, Value)>) -> Self {
        Self {
            schema: schema.into(),
            fields,
        }
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub(crate) fn into_parts(self) -> (String, Vec<(String, Value)>) {
        (self.schema, self.fields)
    }
}

/// An arbitrarily nested value that may embed run handles.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),

    /// Resolvable leaf: replaced by the resolver.
    Handle(RunHandle),

    /// Resolved leaf produced by status resolution. Passes through untouched
    /// if fed back into the resolver.
    Status(RunStatus),

    /// Ordered sequence.
    List(Vec<Value>),

    /// Unordered collection, de-duplicated by equality.
    Set(Vec<Value>),

    /// Mapping with insertion order preserved.
    Map(Vec<(Key, Value)>),

    Record(Record),
}

impl Value {
    /// Build a set, dropping equality-duplicates while keeping first-seen
    /// order. Applied again after resolution: two distinct handles may
    /// resolve to equal values.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        let mut deduped: Vec<Value> = Vec::new();
        for item in items {
            if !deduped.contains(&item) {
                deduped.push(item);
            }
        }
        Value::Set(deduped)
    }

    pub fn map(entries: impl IntoIterator<Item = (Key, Value)>) -> Self {
        Value::Map(entries.into_iter().collect())
    }

    /// Does any handle remain anywhere in this tree?
    pub fn contains_handle(&self) -> bool {
        match self {
            Value::Handle(_) => true,
            Value::List(items) | Value::Set(items) => items.iter().any(Value::contains_handle),
            Value::Map(entries) => entries.iter().any(|(_, v)| v.contains_handle()),
            Value::Record(record) => record.fields.iter().any(|(_, v)| v.contains_handle()),
            _ => false,
        }
    }

    /// Render as JSON. `None` while a handle is still embedded; statuses
    /// serialize through their serde form, sets become arrays, records become
    /// objects keyed by field name.
    pub fn to_json(&self) -> Option<serde_json::Value> {
        match self {
            Value::Null => Some(serde_json::Value::Null),
            Value::Bool(b) => Some(serde_json::Value::Bool(*b)),
            Value::Int(i) => Some(serde_json::Value::from(*i)),
            Value::Float(f) => Some(serde_json::Value::from(*f)),
            Value::Text(s) => Some(serde_json::Value::from(s.clone())),
            Value::Handle(_) => None,
            Value::Status(status) => serde_json::to_value(status).ok(),
            Value::List(items) | Value::Set(items) => items
                .iter()
                .map(Value::to_json)
                .collect::<Option<Vec<_>>>()
                .map(serde_json::Value::Array),
            Value::Map(entries) => entries
                .iter()
                .map(|(k, v)| Some((k.to_json_key(), v.to_json()?)))
                .collect::<Option<serde_json::Map<_, _>>>()
                .map(serde_json::Value::Object),
            Value::Record(record) => record
                .fields
                .iter()
                .map(|(name, v)| Some((name.clone(), v.to_json()?)))
                .collect::<Option<serde_json::Map<_, _>>>()
                .map(serde_json::Value::Object),
        }
    }
}

impl Key {
    fn to_json_key(&self) -> String {
        match self {
            Key::Bool(b) => b.to_string(),
            Key::Int(i) => i.to_string(),
            Key::Text(s) => s.clone(),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (Key::Text(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<RunHandle> for Value {
    fn from(handle: RunHandle) -> Self {
        Value::Handle(handle)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Text(s.to_string())
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}
