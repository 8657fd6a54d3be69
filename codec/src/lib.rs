//! # polywire codec
//!
//! Format-polymorphic serialization for the polywire entity model.
//!
//! This crate provides:
//!
//! - [`Value`]: format-agnostic intermediate representation
//! - [`SerializeContext`] / [`DeserializeContext`]: field-level plumbing that
//!   encodes records in order and populates blank records on decode
//! - [`Record`] / [`Blank`] / [`Polymorphic`]: how entities map onto fields
//! - [`TypeRegistry`]: the closed set of variants a hierarchy may take on the wire
//! - [`Codec`] / [`CodecExt`]: the format contract and its typed API
//! - [`EnvelopeCodec`], [`MarkupCodec`], [`JsonCodec`]: the three adapters
//! - [`Format`] / [`encode`] / [`decode`]: runtime format selection
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use polywire_codec::{CodecExt, Format, TypeRegistry};
//! use polywire_core::{samples, Storage};
//!
//! let registry = Arc::new(TypeRegistry::standard());
//! let codec = Format::Markup.codec(registry);
//!
//! let bytes = codec.encode(&samples::devices()).unwrap();
//! let back: Vec<Storage> = codec.decode(&bytes).unwrap();
//! assert_eq!(back, samples::devices());
//! ```

mod codec;
mod context;
mod envelope;
mod error;
mod format;
mod json;
mod markup;
mod payload;
mod record;
mod registry;
mod shape;
mod value;
mod xml;

pub use codec::{Codec, CodecExt};
pub use context::{DeserializeContext, SerializeContext, decode_record, encode_record};
pub use envelope::EnvelopeCodec;
pub use error::{DeserializeError, SerializeError};
pub use format::{Format, ParseFormatError, decode, encode};
pub use json::JsonCodec;
pub use markup::MarkupCodec;
pub use payload::Payload;
pub use record::{Blank, KIND_FIELD, Polymorphic, Record, decode_variant, encode_variant};
pub use registry::{KnownType, KnownTypes, TypeRegistry};
pub use shape::{Shape, ShapeKind};
pub use value::{FieldValue, Value};
