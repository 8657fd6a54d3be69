//! JSON codec.
//!
//! Records are objects, collections are arrays, and output is pretty-printed.
//! Polymorphic elements carry no extra metadata: the `kind` field every
//! storage record already has is the discriminator.

use std::sync::Arc;

use crate::codec::Codec;
use crate::error::{DeserializeError, SerializeError};
use crate::format::Format;
use crate::record::KIND_FIELD;
use crate::registry::TypeRegistry;
use crate::shape::{Shape, ShapeKind};
use crate::value::Value;

/// JSON codec.
#[derive(Debug, Clone)]
pub struct JsonCodec {
    registry: Arc<TypeRegistry>,
}

impl JsonCodec {
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self { registry }
    }
}

/// Lift a decoded object into a variant using its `kind` field.
fn tag_variant(shape: Shape, item: Value) -> Result<Value, DeserializeError> {
    let fields = match item {
        Value::Map(fields) => fields,
        other => {
            return Err(DeserializeError::shape(
                format!("{} object", shape.item),
                other.kind_name(),
            ));
        }
    };
    let tag = match fields.iter().find(|(k, _)| k == KIND_FIELD) {
        Some((_, Value::Text(tag))) => tag.clone(),
        Some((_, other)) => {
            return Err(DeserializeError::field_type(KIND_FIELD, "text", other.kind_name()));
        }
        None => return Err(DeserializeError::missing(shape.item, KIND_FIELD)),
    };
    Ok(Value::Variant { tag, fields })
}

impl Codec for JsonCodec {
    fn format(&self) -> Format {
        Format::Json
    }

    fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    fn write_document(&self, _shape: Shape, value: &Value) -> Result<Vec<u8>, SerializeError> {
        serde_json::to_vec_pretty(value).map_err(|e| SerializeError::Writer(e.to_string()))
    }

    fn read_document(&self, shape: Shape, bytes: &[u8]) -> Result<Value, DeserializeError> {
        let tree: Value = serde_json::from_slice(bytes).map_err(DeserializeError::malformed)?;
        match (shape.kind, tree) {
            (ShapeKind::Record, tree @ Value::Map(_)) => Ok(tree),
            (ShapeKind::PrimitiveList | ShapeKind::RecordList, tree @ Value::List(_)) => Ok(tree),
            (ShapeKind::VariantList, Value::List(items)) => items
                .into_iter()
                .map(|item| tag_variant(shape, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            (_, other) => Err(DeserializeError::shape(shape.to_string(), other.kind_name())),
        }
    }
}
