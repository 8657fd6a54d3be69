//! Plain XML codec.
//!
//! Elements are named after declared static types: `<Person>` for a single
//! record, `<ArrayOfInt><int>1</int>...` and `<ArrayOfPerson><Person>...`
//! for collections. Polymorphic items keep the base element name and carry
//! their concrete variant in `xsi:type`:
//!
//! ```xml
//! <ArrayOfStorage xmlns:xsi="..." xmlns:xsd="...">
//!   <Storage xsi:type="DVD">
//!     <kind>DVD</kind>
//!     ...
//!   </Storage>
//! </ArrayOfStorage>
//! ```
//!
//! Null fields are left out.

use std::sync::Arc;

use crate::codec::Codec;
use crate::error::{DeserializeError, SerializeError};
use crate::format::Format;
use crate::registry::TypeRegistry;
use crate::shape::{Shape, ShapeKind};
use crate::value::Value;
use crate::xml::{self, Element, NullStyle, XSD_NS, XSI_NS, XSI_TYPE, XmlWriter};

const NAMESPACES: [(&str, &str); 2] = [("xmlns:xsi", XSI_NS), ("xmlns:xsd", XSD_NS)];

/// Markup codec.
#[derive(Debug, Clone)]
pub struct MarkupCodec {
    registry: Arc<TypeRegistry>,
}

impl MarkupCodec {
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self { registry }
    }
}

fn write_item(writer: &mut XmlWriter, shape: Shape, item: &Value) -> Result<(), SerializeError> {
    match item {
        Value::Variant { tag, fields } => {
            writer.start(shape.item, &[(XSI_TYPE, tag.as_str())])?;
            writer.fields(fields, NullStyle::Omit)?;
            writer.end(shape.item)
        }
        // An empty record must still leave an element behind.
        Value::Map(fields) if fields.is_empty() => writer.empty(shape.item, &[]),
        other => writer.field(shape.item, other, NullStyle::Omit),
    }
}

fn read_item(shape: Shape, element: &Element) -> Result<Value, DeserializeError> {
    if element.name != shape.item {
        return Err(DeserializeError::shape(
            format!("<{}> in <{}>", shape.item, shape.root_name()),
            format!("<{}>", element.name),
        ));
    }
    match shape.kind {
        ShapeKind::PrimitiveList => Ok(xml::field_value(element)),
        ShapeKind::Record | ShapeKind::RecordList => Ok(Value::Map(xml::record_fields(element))),
        ShapeKind::VariantList => {
            let tag = element
                .attr(XSI_TYPE)
                .ok_or_else(|| DeserializeError::missing(shape.item, XSI_TYPE))?;
            Ok(Value::Variant {
                tag: tag.to_owned(),
                fields: xml::record_fields(element),
            })
        }
    }
}

impl Codec for MarkupCodec {
    fn format(&self) -> Format {
        Format::Markup
    }

    fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    fn write_document(&self, shape: Shape, value: &Value) -> Result<Vec<u8>, SerializeError> {
        let root = shape.root_name();
        let mut writer = XmlWriter::new()?;
        match (shape.is_list(), value) {
            (true, Value::List(items)) => {
                writer.start(&root, &NAMESPACES)?;
                for item in items {
                    write_item(&mut writer, shape, item)?;
                }
                writer.end(&root)?;
            }
            (false, Value::Map(fields)) => {
                writer.start(&root, &NAMESPACES)?;
                writer.fields(fields, NullStyle::Omit)?;
                writer.end(&root)?;
            }
            (_, other) => {
                return Err(SerializeError::Writer(format!(
                    "{shape} payload built as {}",
                    other.kind_name()
                )));
            }
        }
        Ok(writer.finish())
    }

    fn read_document(&self, shape: Shape, bytes: &[u8]) -> Result<Value, DeserializeError> {
        let root = xml::parse(bytes)?;
        let expected = shape.root_name();
        if root.name != expected {
            return Err(DeserializeError::shape(
                format!("<{expected}>"),
                format!("<{}>", root.name),
            ));
        }

        if !shape.is_list() {
            return Ok(Value::Map(xml::record_fields(&root)));
        }
        root.children
            .iter()
            .map(|element| read_item(shape, element))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecExt;
    use polywire_core::{Company, Person, Storage, StorageKind, samples};

    fn codec() -> MarkupCodec {
        MarkupCodec::new(Arc::new(TypeRegistry::standard()))
    }

    fn text(bytes: &[u8]) -> &str {
        std::str::from_utf8(bytes).unwrap()
    }

    #[test]
    fn single_person_document() {
        let codec = codec();
        let bytes = codec.encode(&samples::founder()).unwrap();
        let doc = text(&bytes);
        assert!(doc.starts_with("<?xml"));
        assert!(doc.contains("<Person "));
        assert!(doc.contains("<name>Larry Page</name>"));
        assert!(doc.contains("<age>42</age>"));
        assert!(doc.contains("<company>"));
        assert!(doc.contains("<name>Google</name>"));
        assert_eq!(codec.decode::<Person>(&bytes), Ok(samples::founder()));
    }

    #[test]
    fn int_list_layout() {
        let bytes = codec().encode(&vec![1, 2]).unwrap();
        let doc = text(&bytes);
        assert!(doc.contains("<ArrayOfInt"));
        assert!(doc.contains("<int>1</int>"));
        assert!(doc.contains("<int>2</int>"));
    }

    #[test]
    fn variants_carry_xsi_type() {
        let codec = codec();
        let devices = samples::devices();
        let bytes = codec.encode(&devices).unwrap();
        let doc = text(&bytes);
        assert!(doc.contains("<ArrayOfStorage"));
        assert!(doc.contains(r#"<Storage xsi:type="DVD">"#));
        assert!(doc.contains(r#"<Storage xsi:type="HDD">"#));
        assert!(doc.contains(r#"<Storage xsi:type="Flash">"#));
        assert_eq!(codec.decode::<Vec<Storage>>(&bytes), Ok(devices));
    }

    #[test]
    fn null_company_is_omitted() {
        let codec = codec();
        let loner = Person::new("Ann", 30, None);
        let bytes = codec.encode(&loner).unwrap();
        assert!(!text(&bytes).contains("company"));
        assert_eq!(codec.decode::<Person>(&bytes), Ok(loner));
    }

    #[test]
    fn escaping_round_trips() {
        let codec = codec();
        let person = Person::new("O'Neil <\"Q\"> & Co", 1, Some(Company::new("AT&T")));
        let bytes = codec.encode(&person).unwrap();
        assert!(text(&bytes).contains("AT&amp;T"));
        assert_eq!(codec.decode::<Person>(&bytes), Ok(person));
    }

    #[test]
    fn root_must_match_shape() {
        let codec = codec();
        let bytes = codec.encode(&samples::founder()).unwrap();
        let err = codec.decode::<Vec<Person>>(&bytes).unwrap_err();
        assert_eq!(err, DeserializeError::shape("<ArrayOfPerson>", "<Person>"));
    }

    #[test]
    fn deeply_nested_field_is_malformed() {
        let depth = 100_000;
        let doc = format!(
            "<Person><name>{}{}</name><age>1</age></Person>",
            "<a>".repeat(depth),
            "</a>".repeat(depth)
        );
        assert!(matches!(
            codec().decode::<Person>(doc.as_bytes()),
            Err(DeserializeError::MalformedPayload(_))
        ));
    }

    #[test]
    fn missing_xsi_type() {
        let doc = br#"<ArrayOfStorage><Storage><kind>DVD</kind></Storage></ArrayOfStorage>"#;
        assert_eq!(
            codec().decode::<Vec<Storage>>(doc),
            Err(DeserializeError::shape("field 'xsi:type' in Storage", "nothing"))
        );
    }

    #[test]
    fn unknown_xsi_type() {
        let codec = codec();
        let bytes = codec.encode(&vec![Storage::blank(StorageKind::Dvd)]).unwrap();
        let forged = text(&bytes).replace(r#"xsi:type="DVD""#, r#"xsi:type="Tape""#);
        assert_eq!(
            codec.decode::<Vec<Storage>>(forged.as_bytes()),
            Err(DeserializeError::UnknownDiscriminator {
                base: "Storage".into(),
                discriminator: "Tape".into()
            })
        );
    }

    #[test]
    fn kind_field_conflicting_with_xsi_type() {
        let codec = codec();
        let bytes = codec.encode(&vec![Storage::blank(StorageKind::Dvd)]).unwrap();
        let forged = text(&bytes).replace("<kind>DVD</kind>", "<kind>HDD</kind>");
        assert!(matches!(
            codec.decode::<Vec<Storage>>(forged.as_bytes()),
            Err(DeserializeError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn truncated_document() {
        let codec = codec();
        let bytes = codec.encode(&samples::people()).unwrap();
        let cut = &bytes[..bytes.len() / 2];
        assert!(matches!(
            codec.decode::<Vec<Person>>(cut),
            Err(DeserializeError::MalformedPayload(_))
        ));
    }

    #[test]
    fn empty_list_round_trips() {
        let codec = codec();
        let bytes = codec.encode(&Vec::<Person>::new()).unwrap();
        assert_eq!(codec.decode::<Vec<Person>>(&bytes), Ok(vec![]));
    }
}
