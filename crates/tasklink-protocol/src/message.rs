//! The structured key/value payload exchanged with the companion.
//!
//! Payloads are loosely typed and come from another process, so every typed
//! accessor returns a `ProtocolResult` naming the offending field instead of
//! assuming the companion got it right.

use crate::error::{ProtocolError, ProtocolResult};
use crate::keys::MessageKey;
use indexmap::IndexMap;
use serde::de::{self, SeqAccess, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Header byte of a packed dictionary.
const PACKED_HEADER_BYTES: usize = 1;
/// Key (4), type (1), and length (2) bytes preceding each packed value.
const PACKED_TUPLE_HEADER_BYTES: usize = 7;
/// Integers travel as 32-bit values.
const PACKED_INT_BYTES: usize = 4;

/// A single payload value.
///
/// Booleans have no wire type of their own; in JSON they are accepted and
/// stored as `Int(0)` or `Int(1)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Text(String),
    Bytes(Vec<u8>),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Bytes this value occupies in a packed dictionary, excluding its tuple header.
    pub fn packed_len(&self) -> usize {
        match self {
            Value::Int(_) => PACKED_INT_BYTES,
            Value::Text(text) => text.len() + 1,
            Value::Bytes(bytes) => bytes.len(),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer, boolean, string, or byte array")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Value, E> {
        Ok(Value::from(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Value, E> {
        Ok(Value::Int(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Value, E> {
        i64::try_from(value)
            .map(Value::Int)
            .map_err(|_| E::invalid_value(Unexpected::Unsigned(value), &self))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Value, E> {
        Ok(Value::Text(value.to_owned()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Value, E> {
        Ok(Value::Text(value))
    }

    fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Value, E> {
        Ok(Value::Bytes(value.to_vec()))
    }

    fn visit_byte_buf<E: de::Error>(self, value: Vec<u8>) -> Result<Value, E> {
        Ok(Value::Bytes(value))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut bytes = Vec::new();
        while let Some(byte) = seq.next_element::<u8>()? {
            bytes.push(byte);
        }
        Ok(Value::Bytes(bytes))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

/// Ordered key/value payload. Keys unknown to this layer are kept and ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionary(IndexMap<String, Value>);

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: MessageKey, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: MessageKey, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.as_str().to_owned(), value.into())
    }

    pub fn get(&self, key: MessageKey) -> Option<&Value> {
        self.0.get(key.as_str())
    }

    pub fn contains(&self, key: MessageKey) -> bool {
        self.0.contains_key(key.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Mandatory integer field.
    pub fn int(&self, key: MessageKey) -> ProtocolResult<i64> {
        let value = self.get(key).ok_or(ProtocolError::MissingField(key))?;
        value.as_int().ok_or(ProtocolError::InvalidType {
            key,
            expected: "integer",
        })
    }

    /// Mandatory integer field that must fit a signed 32-bit wire value.
    pub fn int32(&self, key: MessageKey) -> ProtocolResult<i32> {
        let value = self.int(key)?;
        i32::try_from(value).map_err(|_| ProtocolError::OutOfRange { key, value })
    }

    /// Mandatory non-negative integer field (counts and indices), bounded
    /// like every other 32-bit wire integer.
    pub fn index(&self, key: MessageKey) -> ProtocolResult<usize> {
        let value = self.int(key)?;
        if !(0..=i64::from(i32::MAX)).contains(&value) {
            return Err(ProtocolError::OutOfRange { key, value });
        }
        usize::try_from(value).map_err(|_| ProtocolError::OutOfRange { key, value })
    }

    /// Mandatory boolean field, carried as an integer.
    pub fn flag(&self, key: MessageKey) -> ProtocolResult<bool> {
        Ok(self.int(key)? != 0)
    }

    /// Mandatory text field.
    pub fn text(&self, key: MessageKey) -> ProtocolResult<&str> {
        let value = self.get(key).ok_or(ProtocolError::MissingField(key))?;
        value.as_text().ok_or(ProtocolError::InvalidType {
            key,
            expected: "text",
        })
    }

    /// Optional text field; a mistyped value counts as absent.
    pub fn optional_text(&self, key: MessageKey) -> Option<&str> {
        self.get(key).and_then(Value::as_text)
    }

    /// Size of this dictionary once packed by the host transport.
    pub fn packed_size(&self) -> usize {
        PACKED_HEADER_BYTES
            + self
                .0
                .values()
                .map(|value| PACKED_TUPLE_HEADER_BYTES + value.packed_len())
                .sum::<usize>()
    }
}

impl FromIterator<(MessageKey, Value)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (MessageKey, Value)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.as_str().to_owned(), value))
                .collect(),
        )
    }
}
