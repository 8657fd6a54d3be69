//! SOAP-style envelope codec.
//!
//! ```xml
//! <SOAP-ENV:Envelope xmlns:SOAP-ENV="..." xmlns:xsi="...">
//!   <SOAP-ENV:Header>
//!     <shape>Storage[]</shape>
//!     <count>3</count>
//!   </SOAP-ENV:Header>
//!   <SOAP-ENV:Body>
//!     <DVD>...</DVD>
//!     <HDD>...</HDD>
//!     <Flash>...</Flash>
//!   </SOAP-ENV:Body>
//! </SOAP-ENV:Envelope>
//! ```
//!
//! The header is a preamble describing the body: the payload shape and the
//! number of items. Plain records and primitives are named after the
//! declared item type. Polymorphic items are named after their concrete
//! variant, and that name selects the registered variant on decode.

use std::sync::Arc;

use crate::codec::Codec;
use crate::error::{DeserializeError, SerializeError};
use crate::format::Format;
use crate::registry::TypeRegistry;
use crate::shape::{Shape, ShapeKind};
use crate::value::Value;
use crate::xml::{self, Element, NullStyle, XSI_NS, XmlWriter};

const SOAP_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
const ENVELOPE: &str = "SOAP-ENV:Envelope";
const HEADER: &str = "SOAP-ENV:Header";
const BODY: &str = "SOAP-ENV:Body";
const SHAPE: &str = "shape";
const COUNT: &str = "count";

/// Envelope codec.
#[derive(Debug, Clone)]
pub struct EnvelopeCodec {
    registry: Arc<TypeRegistry>,
}

impl EnvelopeCodec {
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self { registry }
    }

    fn write_item(
        writer: &mut XmlWriter,
        shape: Shape,
        item: &Value,
    ) -> Result<(), SerializeError> {
        match item {
            Value::Variant { tag, fields } => {
                writer.start(tag, &[])?;
                writer.fields(fields, NullStyle::Nil)?;
                writer.end(tag)
            }
            other => writer.field(shape.item, other, NullStyle::Nil),
        }
    }

    fn read_item(shape: Shape, element: &Element) -> Result<Value, DeserializeError> {
        match shape.kind {
            // The element name is the discriminator.
            ShapeKind::VariantList => Ok(Value::Variant {
                tag: element.name.clone(),
                fields: xml::record_fields(element),
            }),
            ShapeKind::Record | ShapeKind::RecordList => {
                expect_item_name(shape, element)?;
                Ok(Value::Map(xml::record_fields(element)))
            }
            ShapeKind::PrimitiveList => {
                expect_item_name(shape, element)?;
                Ok(xml::field_value(element))
            }
        }
    }
}

fn expect_item_name(shape: Shape, element: &Element) -> Result<(), DeserializeError> {
    if element.name == shape.item {
        Ok(())
    } else {
        Err(DeserializeError::shape(
            format!("<{}> in {shape}", shape.item),
            format!("<{}>", element.name),
        ))
    }
}

fn required<'e>(parent: &'e Element, name: &str) -> Result<&'e Element, DeserializeError> {
    parent.child(name).ok_or_else(|| {
        DeserializeError::malformed(format!("<{}> has no <{name}>", parent.name))
    })
}

impl Codec for EnvelopeCodec {
    fn format(&self) -> Format {
        Format::Envelope
    }

    fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    fn write_document(&self, shape: Shape, value: &Value) -> Result<Vec<u8>, SerializeError> {
        let items: &[Value] = match (shape.is_list(), value) {
            (true, Value::List(items)) => items.as_slice(),
            (false, record) => std::slice::from_ref(record),
            (true, other) => {
                return Err(SerializeError::Writer(format!(
                    "{shape} payload built as {}",
                    other.kind_name()
                )));
            }
        };

        let mut writer = XmlWriter::new()?;
        writer.start(ENVELOPE, &[("xmlns:SOAP-ENV", SOAP_NS), ("xmlns:xsi", XSI_NS)])?;

        writer.start(HEADER, &[])?;
        writer.text_element(SHAPE, &shape.to_string())?;
        writer.text_element(COUNT, &items.len().to_string())?;
        writer.end(HEADER)?;

        writer.start(BODY, &[])?;
        for item in items {
            Self::write_item(&mut writer, shape, item)?;
        }
        writer.end(BODY)?;

        writer.end(ENVELOPE)?;
        Ok(writer.finish())
    }

    fn read_document(&self, shape: Shape, bytes: &[u8]) -> Result<Value, DeserializeError> {
        let root = xml::parse(bytes)?;
        if root.name != ENVELOPE {
            return Err(DeserializeError::malformed(format!(
                "expected <{ENVELOPE}>, found <{}>",
                root.name
            )));
        }

        let header = required(&root, HEADER)?;
        let declared = required(header, SHAPE)?.text.trim();
        if declared != shape.to_string() {
            return Err(DeserializeError::shape(shape.to_string(), declared));
        }
        let count_text = required(header, COUNT)?.text.trim();
        let count: usize = count_text.parse().map_err(|_| {
            DeserializeError::malformed(format!("header count '{count_text}' is not a number"))
        })?;

        let body = required(&root, BODY)?;
        if body.children.len() != count {
            return Err(DeserializeError::malformed(format!(
                "header announces {count} items, body holds {}",
                body.children.len()
            )));
        }

        let mut items = body
            .children
            .iter()
            .map(|element| Self::read_item(shape, element))
            .collect::<Result<Vec<_>, _>>()?;

        if shape.is_list() {
            return Ok(Value::List(items));
        }
        match (items.pop(), items.is_empty()) {
            (Some(record), true) => Ok(record),
            _ => Err(DeserializeError::shape(shape.to_string(), format!("{count} records"))),
        }
    }
}
