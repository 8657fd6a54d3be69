//! Format-agnostic intermediate value representation.
//!
//! Every codec translates between its wire format and [`Value`]; records
//! translate between their fields and `Value` through the
//! [`contexts`](crate::SerializeContext). The serde impls on `Value` make it
//! directly usable with serde-based formats such as JSON.
//!
//! [`FieldValue`] converts scalar field types to and from `Value`.

use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Format-agnostic value tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Null,
    Int(i64),
    Text(String),
    List(Vec<Value>),
    /// A plain record: fields in declaration order.
    Map(Vec<(String, Value)>),
    /// A polymorphic record tagged with its concrete variant name.
    Variant {
        tag: String,
        fields: Vec<(String, Value)>,
    },
}

impl Value {
    /// Short name of this value's kind, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "integer",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Variant { .. } => "variant",
        }
    }

    /// Look up a field of a `Map` or `Variant` by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Map(fields) | Value::Variant { fields, .. } => {
                fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
            }
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

// ---------------------------------------------------------------------------
// Scalar fields
// ---------------------------------------------------------------------------

/// Scalar types that can be stored in a record field.
///
/// Markup formats carry scalars as text, so integer types also accept a
/// [`Value::Text`] holding a decimal integer.
pub trait FieldValue: Sized {
    /// Human-readable type name used in [`ShapeMismatch`](crate::DeserializeError::ShapeMismatch).
    const EXPECTED: &'static str;

    fn to_field(&self) -> Value;

    /// Convert back, returning the original value on failure.
    fn from_field(value: Value) -> Result<Self, Value>;
}

impl FieldValue for i64 {
    const EXPECTED: &'static str = "integer";

    fn to_field(&self) -> Value {
        Value::Int(*self)
    }

    fn from_field(value: Value) -> Result<Self, Value> {
        match value {
            Value::Int(v) => Ok(v),
            Value::Text(ref s) => s.trim().parse().map_err(|_| value),
            other => Err(other),
        }
    }
}

impl FieldValue for i32 {
    const EXPECTED: &'static str = "32-bit integer";

    fn to_field(&self) -> Value {
        Value::Int(i64::from(*self))
    }

    fn from_field(value: Value) -> Result<Self, Value> {
        match value {
            Value::Int(v) => i32::try_from(v).map_err(|_| value),
            Value::Text(ref s) => s.trim().parse().map_err(|_| value),
            other => Err(other),
        }
    }
}

impl FieldValue for String {
    const EXPECTED: &'static str = "text";

    fn to_field(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_field(value: Value) -> Result<Self, Value> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(other),
        }
    }
}

// ---------------------------------------------------------------------------
// serde bridge
// ---------------------------------------------------------------------------

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::Text(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            // The tag is not written: serde formats carry the discriminator
            // as an ordinary field of the record.
            Value::Map(fields) | Value::Variant { fields, .. } => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (key, value) in fields {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
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
        f.write_str("null, an integer, a string, an array or an object")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        i64::try_from(v)
            .map(Value::Int)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::Text(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::Text(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut fields = Vec::new();
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            fields.push((key, value));
        }
        Ok(Value::Map(fields))
    }
}
