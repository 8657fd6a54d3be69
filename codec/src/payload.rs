//! Top-level payloads: the Rust types a codec can encode and decode whole.
//!
//! | Type           | Shape                          |
//! |----------------|--------------------------------|
//! | `Person`       | single record                  |
//! | `Company`      | single record                  |
//! | `Vec<i32>`     | ordered primitive collection   |
//! | `Vec<Person>`  | ordered record collection      |
//! | `Vec<Company>` | ordered record collection      |
//! | `Vec<Storage>` | ordered polymorphic collection |

use polywire_core::{Company, Person, Storage};

use crate::context::{decode_record, encode_record};
use crate::error::{DeserializeError, SerializeError};
use crate::record::{Polymorphic, Record, decode_variant, encode_variant};
use crate::registry::TypeRegistry;
use crate::shape::Shape;
use crate::value::{FieldValue, Value};

/// A value that can be the whole payload of a blob.
pub trait Payload: Sized {
    const SHAPE: Shape;

    fn to_value(&self, registry: &TypeRegistry) -> Result<Value, SerializeError>;

    /// Build a fresh value. Either everything is populated or an error is returned.
    fn from_value(value: Value, registry: &TypeRegistry) -> Result<Self, DeserializeError>;
}

fn expect_list(value: Value, shape: Shape) -> Result<Vec<Value>, DeserializeError> {
    match value {
        Value::List(items) => Ok(items),
        other => Err(DeserializeError::shape(shape.to_string(), other.kind_name())),
    }
}

macro_rules! impl_record_payload {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Payload for $ty {
                const SHAPE: Shape = Shape::record(<$ty as Record>::NAME);

                fn to_value(&self, registry: &TypeRegistry) -> Result<Value, SerializeError> {
                    encode_record(self, registry)
                }

                fn from_value(
                    value: Value,
                    registry: &TypeRegistry,
                ) -> Result<Self, DeserializeError> {
                    decode_record(value, registry)
                }
            }

            impl Payload for Vec<$ty> {
                const SHAPE: Shape = Shape::record_list(<$ty as Record>::NAME);

                fn to_value(&self, registry: &TypeRegistry) -> Result<Value, SerializeError> {
                    self.iter()
                        .map(|item| encode_record(item, registry))
                        .collect::<Result<_, _>>()
                        .map(Value::List)
                }

                fn from_value(
                    value: Value,
                    registry: &TypeRegistry,
                ) -> Result<Self, DeserializeError> {
                    expect_list(value, Self::SHAPE)?
                        .into_iter()
                        .map(|item| decode_record(item, registry))
                        .collect()
                }
            }
        )*
    };
}

impl_record_payload!(Person, Company);

impl Payload for Vec<i32> {
    const SHAPE: Shape = Shape::primitive_list("int");

    fn to_value(&self, _registry: &TypeRegistry) -> Result<Value, SerializeError> {
        Ok(Value::List(self.iter().map(FieldValue::to_field).collect()))
    }

    fn from_value(value: Value, _registry: &TypeRegistry) -> Result<Self, DeserializeError> {
        expect_list(value, Self::SHAPE)?
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                i32::from_field(item).map_err(|found| {
                    let field = format!("[{index}]");
                    DeserializeError::field_type(&field, i32::EXPECTED, found.kind_name())
                })
            })
            .collect()
    }
}

impl Payload for Vec<Storage> {
    const SHAPE: Shape = Shape::variant_list(<Storage as Polymorphic>::BASE);

    fn to_value(&self, registry: &TypeRegistry) -> Result<Value, SerializeError> {
        self.iter()
            .map(|item| encode_variant(item, registry))
            .collect::<Result<_, _>>()
            .map(Value::List)
    }

    fn from_value(value: Value, registry: &TypeRegistry) -> Result<Self, DeserializeError> {
        expect_list(value, Self::SHAPE)?
            .into_iter()
            .map(|item| decode_variant(item, registry))
            .collect()
    }
}
