//! The format codec interface.
//!
//! A [`Codec`] only knows how to move a [`Value`] tree in and out of its wire
//! format. [`CodecExt`] layers typed encode/decode of any [`Payload`] on top,
//! so every codec (including `dyn Codec`) offers the same typed API.

use crate::error::{DeserializeError, SerializeError};
use crate::format::Format;
use crate::payload::Payload;
use crate::registry::TypeRegistry;
use crate::shape::Shape;
use crate::value::Value;

/// A wire format adapter.
pub trait Codec: Send + Sync {
    fn format(&self) -> Format;

    /// The known-type configuration this codec was built with.
    fn registry(&self) -> &TypeRegistry;

    /// Render a value of the given shape as a complete document.
    fn write_document(&self, shape: Shape, value: &Value) -> Result<Vec<u8>, SerializeError>;

    /// Parse a complete document that is expected to hold the given shape.
    fn read_document(&self, shape: Shape, bytes: &[u8]) -> Result<Value, DeserializeError>;
}

/// Typed encode/decode for every [`Codec`].
pub trait CodecExt: Codec {
    fn encode<P: Payload>(&self, value: &P) -> Result<Vec<u8>, SerializeError> {
        let tree = value.to_value(self.registry())?;
        let bytes = self.write_document(P::SHAPE, &tree)?;
        log::debug!(
            "encoded {} as {} ({} bytes)",
            P::SHAPE,
            self.format(),
            bytes.len()
        );
        Ok(bytes)
    }

    fn decode<P: Payload>(&self, bytes: &[u8]) -> Result<P, DeserializeError> {
        let tree = self.read_document(P::SHAPE, bytes)?;
        let value = P::from_value(tree, self.registry())?;
        log::debug!("decoded {} from {}", P::SHAPE, self.format());
        Ok(value)
    }
}

impl<C: Codec + ?Sized> CodecExt for C {}
