use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub const ID_FIELD: &str = "@id";
pub const TIMESTAMP_FIELD: &str = "@timestamp";

//-----------------------------------------------------------------------------
// Submission
//-----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    pub query_string: String,

    /// Relative ("10m") or absolute; passed to the server verbatim.
    pub start: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,

    pub is_live: bool,
}

/// A live query job on the server.
///
/// Deleting a job consumes its handle, so nothing can poll a deleted job.
#[derive(Debug, PartialEq, Eq)]
pub struct JobHandle {
    pub repository: String,
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedJob {
    pub id: String,
}

//-----------------------------------------------------------------------------
// Results
//-----------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResultMetadata {
    #[serde(default)]
    pub is_aggregate: bool,

    /// Milliseconds the server wants us to wait before polling again.
    #[serde(default)]
    pub poll_after: u64,

    #[serde(default)]
    pub total_work: u64,

    #[serde(default)]
    pub work_done: u64,
}

/// One poll's worth of results. Superseded by the next poll, never mutated.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    #[serde(default)]
    pub done: bool,

    #[serde(default)]
    pub events: Vec<Event>,

    #[serde(default, rename = "metaData")]
    pub meta_data: QueryResultMetadata,
}

/// Scalar field value. A missing field is `None` at lookup, never a variant.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    Num(f64),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            FieldValue::Num(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Num(n) => Some(*n),
            FieldValue::Str(_) => None,
        }
    }

    /// Converts a JSON value; `null` has no scalar form and maps to `None`.
    fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(FieldValue::Str(s)),
            Value::Number(n) => match n.as_f64() {
                Some(f) => Some(FieldValue::Num(f)),
                None => Some(FieldValue::Str(n.to_string())),
            },
            Value::Bool(b) => Some(FieldValue::Str(b.to_string())),
            nested @ (Value::Array(_) | Value::Object(_)) => {
                Some(FieldValue::Str(nested.to_string()))
            }
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => f.write_str(s),
            FieldValue::Num(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Str(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Num(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Num(n as f64)
    }
}

/// A single result row. Field order is the order the server sent them in.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "IndexMap<String, Value>")]
pub struct Event {
    fields: IndexMap<String, FieldValue>,
}

impl Event {
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Identity used for de-duplication. Only string ids count.
    pub fn id(&self) -> Option<&str> {
        self.get(ID_FIELD).and_then(FieldValue::as_str)
    }

    /// Epoch milliseconds. Only numeric timestamps count.
    pub fn timestamp(&self) -> Option<f64> {
        self.get(TIMESTAMP_FIELD).and_then(FieldValue::as_f64)
    }
}

impl From<IndexMap<String, Value>> for Event {
    fn from(raw: IndexMap<String, Value>) -> Self {
        let fields = raw
            .into_iter()
            .filter_map(|(k, v)| FieldValue::from_json(v).map(|v| (k, v)))
            .collect();
        Self { fields }
    }
}

impl<K, V> FromIterator<(K, V)> for Event
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
