//! Serialization and deserialization contexts.
//!
//! [`SerializeContext`] accumulates a record's fields in declaration order.
//! [`DeserializeContext`] hands fields out by name to a blank record that
//! populates itself.

use std::collections::HashMap;

use crate::error::{DeserializeError, SerializeError};
use crate::record::{Blank, Record};
use crate::registry::TypeRegistry;
use crate::value::{FieldValue, Value};

// ---------------------------------------------------------------------------
// SerializeContext
// ---------------------------------------------------------------------------

/// Context for serializing one record's fields.
pub struct SerializeContext<'r> {
    registry: &'r TypeRegistry,
    fields: Vec<(String, Value)>,
}

impl<'r> SerializeContext<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self {
            registry,
            fields: Vec::new(),
        }
    }

    /// The known-type configuration in effect for this encode.
    pub fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    /// Write a pre-built Value for a field.
    pub fn write_field(&mut self, name: &str, value: Value) {
        self.fields.push((name.to_owned(), value));
    }

    pub fn write_scalar<T: FieldValue>(&mut self, name: &str, value: &T) {
        self.write_field(name, value.to_field());
    }

    /// Write an owned nested record as a field.
    pub fn write_record<R: Record>(
        &mut self,
        name: &str,
        record: &R,
    ) -> Result<(), SerializeError> {
        let value = encode_record(record, self.registry)?;
        self.write_field(name, value);
        Ok(())
    }

    /// Write an optional nested record; `None` becomes [`Value::Null`].
    pub fn write_optional_record<R: Record>(
        &mut self,
        name: &str,
        record: &Option<R>,
    ) -> Result<(), SerializeError> {
        match record {
            Some(r) => self.write_record(name, r),
            None => {
                self.write_field(name, Value::Null);
                Ok(())
            }
        }
    }

    /// Finish and return the accumulated fields.
    pub fn finish(self) -> Vec<(String, Value)> {
        self.fields
    }
}

/// Encode a plain record into a [`Value::Map`].
pub fn encode_record<R: Record>(
    record: &R,
    registry: &TypeRegistry,
) -> Result<Value, SerializeError> {
    let mut ctx = SerializeContext::new(registry);
    record.write_fields(&mut ctx)?;
    Ok(Value::Map(ctx.finish()))
}

// ---------------------------------------------------------------------------
// DeserializeContext
// ---------------------------------------------------------------------------

/// Context for populating one blank record from decoded fields.
pub struct DeserializeContext<'r> {
    registry: &'r TypeRegistry,
    record: &'static str,
    fields: HashMap<String, Value>,
}

impl<'r> DeserializeContext<'r> {
    /// Load the fields of a record named `record`.
    ///
    /// Fails with [`DeserializeError::MalformedPayload`] on duplicate field names.
    pub fn new(
        registry: &'r TypeRegistry,
        record: &'static str,
        fields: Vec<(String, Value)>,
    ) -> Result<Self, DeserializeError> {
        let mut map = HashMap::with_capacity(fields.len());
        for (name, value) in fields {
            if map.insert(name.clone(), value).is_some() {
                return Err(DeserializeError::malformed(format!(
                    "duplicate field '{name}' in '{record}'"
                )));
            }
        }
        Ok(Self {
            registry,
            record,
            fields: map,
        })
    }

    pub fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    /// Take a raw field value.
    pub fn read_field(&mut self, name: &str) -> Result<Value, DeserializeError> {
        self.fields
            .remove(name)
            .ok_or_else(|| DeserializeError::missing(self.record, name))
    }

    pub fn read_scalar<T: FieldValue>(&mut self, name: &str) -> Result<T, DeserializeError> {
        let value = self.read_field(name)?;
        T::from_field(value)
            .map_err(|found| DeserializeError::field_type(name, T::EXPECTED, found.kind_name()))
    }

    /// Read a required nested record.
    pub fn read_record<R: Blank>(&mut self, name: &str) -> Result<R, DeserializeError> {
        let value = self.read_field(name)?;
        decode_nested(value, name, self.registry)
    }

    /// Read an optional nested record. A missing field or [`Value::Null`] is `None`.
    pub fn read_optional_record<R: Blank>(
        &mut self,
        name: &str,
    ) -> Result<Option<R>, DeserializeError> {
        match self.fields.remove(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => decode_nested(value, name, self.registry).map(Some),
        }
    }

    /// Finish population. Fields nobody asked for are dropped.
    pub fn finish(self) {
        if !self.fields.is_empty() {
            let mut names: Vec<_> = self.fields.keys().map(String::as_str).collect();
            names.sort_unstable();
            log::debug!("ignoring unknown fields of '{}': {names:?}", self.record);
        }
    }
}

/// Decode a plain record from a [`Value::Map`]: construct blank, then populate.
pub fn decode_record<R: Blank>(
    value: Value,
    registry: &TypeRegistry,
) -> Result<R, DeserializeError> {
    let fields = match value {
        Value::Map(fields) => fields,
        other => return Err(DeserializeError::shape(R::NAME, other.kind_name())),
    };
    let mut ctx = DeserializeContext::new(registry, R::NAME, fields)?;
    let mut record = R::blank();
    record.read_fields(&mut ctx)?;
    ctx.finish();
    Ok(record)
}

/// Decode a nested record, reporting a non-map value against the owning field.
fn decode_nested<R: Blank>(
    value: Value,
    field: &str,
    registry: &TypeRegistry,
) -> Result<R, DeserializeError> {
    match value {
        Value::Map(_) => decode_record(value, registry),
        other => Err(DeserializeError::field_type(field, R::NAME, other.kind_name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polywire_core::{Company, Person};

    #[test]
    fn serialize_scalars_in_order() {
        let registry = TypeRegistry::standard();
        let mut ctx = SerializeContext::new(&registry);
        ctx.write_scalar("name", &"Ann".to_owned());
        ctx.write_scalar("age", &30i32);
        ctx.write_optional_record::<Company>("company", &None).unwrap();
        assert_eq!(
            ctx.finish(),
            vec![
                ("name".to_owned(), Value::Text("Ann".into())),
                ("age".to_owned(), Value::Int(30)),
                ("company".to_owned(), Value::Null),
            ]
        );
    }

    #[test]
    fn missing_field_names_record() {
        let registry = TypeRegistry::standard();
        let mut ctx = DeserializeContext::new(&registry, "Person", vec![]).unwrap();
        assert_eq!(
            ctx.read_field("age"),
            Err(DeserializeError::ShapeMismatch {
                expected: "field 'age' in Person".into(),
                found: "nothing".into()
            })
        );
    }

    #[test]
    fn scalar_type_mismatch() {
        let registry = TypeRegistry::standard();
        let mut ctx = DeserializeContext::new(
            &registry,
            "Person",
            vec![("age".into(), Value::List(vec![]))],
        )
        .unwrap();
        assert_eq!(
            ctx.read_scalar::<i32>("age"),
            Err(DeserializeError::ShapeMismatch {
                expected: "32-bit integer for field 'age'".into(),
                found: "list".into()
            })
        );
    }

    #[test]
    fn duplicate_fields_are_malformed() {
        let registry = TypeRegistry::standard();
        let result = DeserializeContext::new(
            &registry,
            "Company",
            vec![("name".into(), "a".into()), ("name".into(), "b".into())],
        );
        assert!(matches!(result, Err(DeserializeError::MalformedPayload(_))));
    }

    #[test]
    fn optional_record_null_or_absent() {
        let registry = TypeRegistry::standard();
        let mut ctx = DeserializeContext::new(
            &registry,
            "Person",
            vec![("company".into(), Value::Null)],
        )
        .unwrap();
        assert_eq!(ctx.read_optional_record::<Company>("company"), Ok(None));
        assert_eq!(ctx.read_optional_record::<Company>("company"), Ok(None));
    }

    #[test]
    fn nested_record_of_wrong_kind() {
        let registry = TypeRegistry::standard();
        let mut ctx = DeserializeContext::new(
            &registry,
            "Person",
            vec![("company".into(), "Google".into())],
        )
        .unwrap();
        assert_eq!(
            ctx.read_optional_record::<Company>("company"),
            Err(DeserializeError::ShapeMismatch {
                expected: "Company for field 'company'".into(),
                found: "text".into()
            })
        );
    }

    #[test]
    fn record_round_trip_through_value() {
        let registry = TypeRegistry::standard();
        let person = Person::employed("Larry Page", 42, "Google");
        let value = encode_record(&person, &registry).unwrap();
        assert_eq!(decode_record::<Person>(value, &registry), Ok(person));
    }
}
