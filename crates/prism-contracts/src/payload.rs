//! Typed audit payloads.
//!
//! A `Payload` is the redacted event data carried by a log entry.  Keys are
//! held in a `BTreeMap`, so serializing a payload always yields the same
//! bytes regardless of insertion order.  That canonical form is what the
//! chain hash commits to.
//!
//! Floating point values are not representable.  Decimal formatting of
//! floats differs between serializers, which would make `entry_hash`
//! implementation-dependent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single value inside a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PayloadValue {
    Null,
    Bool(bool),
    Integer(i64),
    Text(String),
    List(Vec<PayloadValue>),
    Map(BTreeMap<String, PayloadValue>),
}

impl PayloadValue {
    /// Return the text content if this is a `Text` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PayloadValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for PayloadValue {
    fn from(value: &str) -> Self {
        PayloadValue::Text(value.to_string())
    }
}

impl From<String> for PayloadValue {
    fn from(value: String) -> Self {
        PayloadValue::Text(value)
    }
}

impl From<bool> for PayloadValue {
    fn from(value: bool) -> Self {
        PayloadValue::Bool(value)
    }
}

impl From<i64> for PayloadValue {
    fn from(value: i64) -> Self {
        PayloadValue::Integer(value)
    }
}

impl From<Vec<PayloadValue>> for PayloadValue {
    fn from(value: Vec<PayloadValue>) -> Self {
        PayloadValue::List(value)
    }
}

impl From<Payload> for PayloadValue {
    fn from(value: Payload) -> Self {
        PayloadValue::Map(value.0)
    }
}

impl<T: Into<PayloadValue>> From<Option<T>> for PayloadValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(PayloadValue::Null)
    }
}

/// Redacted event data: string keys mapped to `PayloadValue`s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(BTreeMap<String, PayloadValue>);

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    ///
    /// ```rust,ignore
    /// let payload = Payload::new()
    ///     .with("action", "route_task")
    ///     .with("actor", "bot-1");
    /// ```
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PayloadValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PayloadValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&PayloadValue> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PayloadValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The canonical byte form: compact JSON with keys in sorted order.
    pub fn canonical_json(&self) -> Vec<u8> {
        // A BTreeMap of strings, integers, bools and nulls cannot fail to
        // serialize, so an error here is unreachable; fall back to an empty
        // object rather than panic.
        serde_json::to_vec(&self.0).unwrap_or_else(|_| b"{}".to_vec())
    }

    /// Parse a payload from a JSON object string.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

impl From<BTreeMap<String, PayloadValue>> for Payload {
    fn from(map: BTreeMap<String, PayloadValue>) -> Self {
        Payload(map)
    }
}

impl FromIterator<(String, PayloadValue)> for Payload {
    fn from_iter<I: IntoIterator<Item = (String, PayloadValue)>>(iter: I) -> Self {
        Payload(iter.into_iter().collect())
    }
}
