//! XML plumbing shared by the envelope and markup codecs.
//!
//! Documents are small, so reading builds a complete [`Element`] tree from
//! quick-xml events and the codecs walk that tree. Writing goes straight to
//! an indenting quick-xml writer.

use std::fmt::Display;

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::{DeserializeError, SerializeError};
use crate::value::Value;

pub(crate) const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub(crate) const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema";
pub(crate) const XSI_NIL: &str = "xsi:nil";
pub(crate) const XSI_TYPE: &str = "xsi:type";

/// Deepest element nesting a document may have. The entity model needs
/// five levels at most (envelope, body, item, nested record, field).
pub(crate) const MAX_DEPTH: usize = 32;

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// A parsed XML element.
#[derive(Debug, Default)]
pub(crate) struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Element>,
    /// Concatenated character data. Only meaningful for leaf elements.
    pub text: String,
}

impl Element {
    fn open(start: &BytesStart<'_>) -> Result<Self, DeserializeError> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(DeserializeError::malformed)?
            .to_owned();
        let mut attrs = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(DeserializeError::malformed)?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(DeserializeError::malformed)?
                .to_owned();
            let value = attr
                .unescape_value()
                .map_err(DeserializeError::malformed)?
                .into_owned();
            attrs.push((key, value));
        }
        Ok(Self {
            name,
            attrs,
            ..Self::default()
        })
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    fn is_nil(&self) -> bool {
        self.attr(XSI_NIL) == Some("true")
    }
}

/// Parse a complete document into its root element.
///
/// Nesting deeper than [`MAX_DEPTH`] is rejected as malformed, so walking or
/// dropping the resulting tree never recurses without bound.
pub(crate) fn parse(bytes: &[u8]) -> Result<Element, DeserializeError> {
    let source = std::str::from_utf8(bytes).map_err(DeserializeError::malformed)?;
    let mut reader = Reader::from_str(source);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event().map_err(DeserializeError::malformed)? {
            Event::Start(start) => {
                check_depth(stack.len())?;
                stack.push(Element::open(&start)?);
            }
            Event::Empty(start) => {
                check_depth(stack.len())?;
                let element = Element::open(&start)?;
                attach(element, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| DeserializeError::malformed("unbalanced end tag"))?;
                attach(element, &mut stack, &mut root)?;
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(DeserializeError::malformed)?;
                push_text(&text, &mut stack)?;
            }
            Event::CData(data) => {
                let data = data.into_inner();
                let text = std::str::from_utf8(&data).map_err(DeserializeError::malformed)?;
                push_text(text, &mut stack)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(DeserializeError::malformed(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }
    root.ok_or_else(|| DeserializeError::malformed("document has no root element"))
}

/// `open` is the number of elements enclosing the one about to start.
fn check_depth(open: usize) -> Result<(), DeserializeError> {
    if open >= MAX_DEPTH {
        return Err(DeserializeError::malformed(format!(
            "elements nested deeper than {MAX_DEPTH} levels"
        )));
    }
    Ok(())
}

fn attach(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), DeserializeError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    } else if root.is_some() {
        return Err(DeserializeError::malformed(format!(
            "second root element <{}>",
            element.name
        )));
    } else {
        *root = Some(element);
    }
    Ok(())
}

fn push_text(text: &str, stack: &mut [Element]) -> Result<(), DeserializeError> {
    match stack.last_mut() {
        Some(open) => open.text.push_str(text),
        None if text.trim().is_empty() => {}
        None => {
            return Err(DeserializeError::malformed(
                "character data outside the root element",
            ));
        }
    }
    Ok(())
}

/// Read an element that stands for a single field value.
///
/// Elements with children are nested records. `xsi:nil="true"` is null.
/// Anything else is text; integer fields parse it on demand.
pub(crate) fn field_value(element: &Element) -> Value {
    if !element.children.is_empty() {
        Value::Map(record_fields(element))
    } else if element.is_nil() {
        Value::Null
    } else {
        Value::Text(element.text.clone())
    }
}

/// Read every child of a record element as a named field.
pub(crate) fn record_fields(element: &Element) -> Vec<(String, Value)> {
    element
        .children
        .iter()
        .map(|child| (child.name.clone(), field_value(child)))
        .collect()
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// How a null field is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NullStyle {
    /// `<field xsi:nil="true"/>`
    Nil,
    /// Left out entirely.
    Omit,
}

fn writer_error(err: impl Display) -> SerializeError {
    SerializeError::Writer(err.to_string())
}

/// Indenting XML writer with an `<?xml?>` declaration already emitted.
pub(crate) struct XmlWriter {
    inner: Writer<Vec<u8>>,
}

impl XmlWriter {
    pub fn new() -> Result<Self, SerializeError> {
        let mut inner = Writer::new_with_indent(Vec::new(), b' ', 2);
        inner
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .map_err(writer_error)?;
        Ok(Self { inner })
    }

    pub fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), SerializeError> {
        let mut start = BytesStart::new(name);
        for &attr in attrs {
            start.push_attribute(attr);
        }
        self.inner
            .write_event(Event::Start(start))
            .map_err(writer_error)
    }

    pub fn end(&mut self, name: &str) -> Result<(), SerializeError> {
        self.inner
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(writer_error)
    }

    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), SerializeError> {
        let mut start = BytesStart::new(name);
        for &attr in attrs {
            start.push_attribute(attr);
        }
        self.inner
            .write_event(Event::Empty(start))
            .map_err(writer_error)
    }

    /// `<name>text</name>`, or `<name/>` for empty text.
    pub fn text_element(&mut self, name: &str, text: &str) -> Result<(), SerializeError> {
        if text.is_empty() {
            return self.empty(name, &[]);
        }
        self.start(name, &[])?;
        self.inner
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(writer_error)?;
        self.end(name)
    }

    /// Write one field value under `name`.
    pub fn field(
        &mut self,
        name: &str,
        value: &Value,
        nulls: NullStyle,
    ) -> Result<(), SerializeError> {
        match value {
            Value::Null => match nulls {
                NullStyle::Nil => self.empty(name, &[(XSI_NIL, "true")]),
                NullStyle::Omit => Ok(()),
            },
            Value::Int(v) => self.text_element(name, &v.to_string()),
            Value::Text(s) => self.text_element(name, s),
            Value::Map(fields) => {
                self.start(name, &[])?;
                self.fields(fields, nulls)?;
                self.end(name)
            }
            Value::List(_) | Value::Variant { .. } => Err(SerializeError::Writer(format!(
                "field '{name}' holds a {}, which has no XML field form",
                value.kind_name()
            ))),
        }
    }

    /// Write every field of a record in order.
    pub fn fields(
        &mut self,
        fields: &[(String, Value)],
        nulls: NullStyle,
    ) -> Result<(), SerializeError> {
        for (name, value) in fields {
            self.field(name, value, nulls)?;
        }
        Ok(())
    }

    pub fn finish(self) -> Vec<u8> {
        self.inner.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_nested_tree() {
        let root = parse(
            br#"<?xml version="1.0"?>
<Person>
  <name>A &amp; B</name>
  <age>3</age>
  <company><name>Co</name></company>
  <note xsi:nil="true"/>
</Person>"#,
        )
        .unwrap();
        assert_eq!(root.name, "Person");
        assert_eq!(
            record_fields(&root),
            vec![
                ("name".into(), Value::Text("A & B".into())),
                ("age".into(), Value::Text("3".into())),
                (
                    "company".into(),
                    Value::Map(vec![("name".into(), Value::Text("Co".into()))])
                ),
                ("note".into(), Value::Null),
            ]
        );
    }

    #[test]
    fn attributes_are_unescaped() {
        let root = parse(br#"<Storage xsi:type="A&amp;B"/>"#).unwrap();
        assert_eq!(root.attr(XSI_TYPE), Some("A&B"));
        assert_eq!(root.attr("missing"), None);
    }

    #[test]
    fn truncated_document_is_malformed() {
        let err = parse(b"<Person><name>x</name>").unwrap_err();
        assert!(matches!(err, DeserializeError::MalformedPayload(_)));
    }

    #[test]
    fn empty_and_garbage_are_malformed() {
        assert!(matches!(parse(b""), Err(DeserializeError::MalformedPayload(_))));
        assert!(matches!(parse(b"not xml"), Err(DeserializeError::MalformedPayload(_))));
        assert!(matches!(
            parse(b"<a></b>"),
            Err(DeserializeError::MalformedPayload(_))
        ));
        assert!(matches!(
            parse(b"<a/><b/>"),
            Err(DeserializeError::MalformedPayload(_))
        ));
    }

    fn nested(depth: usize) -> String {
        format!("{}{}", "<a>".repeat(depth), "</a>".repeat(depth))
    }

    #[test]
    fn depth_limit() {
        let root = parse(nested(MAX_DEPTH).as_bytes()).unwrap();
        assert_eq!(root.children.len(), 1);
        assert!(matches!(
            parse(nested(MAX_DEPTH + 1).as_bytes()),
            Err(DeserializeError::MalformedPayload(_))
        ));
        let leaf = format!("{}<b/>{}", "<a>".repeat(MAX_DEPTH), "</a>".repeat(MAX_DEPTH));
        assert!(matches!(
            parse(leaf.as_bytes()),
            Err(DeserializeError::MalformedPayload(_))
        ));
    }

    #[test]
    fn very_deep_document_is_rejected() {
        let doc = format!("<Person><name>{}</name></Person>", nested(100_000));
        assert!(matches!(
            parse(doc.as_bytes()),
            Err(DeserializeError::MalformedPayload(_))
        ));
    }

    #[test]
    fn writer_escapes_and_nils() {
        let mut writer = XmlWriter::new().unwrap();
        writer.start("Person", &[]).unwrap();
        writer
            .fields(
                &[
                    ("name".into(), Value::Text("<Tom & \"Jerry\">".into())),
                    ("company".into(), Value::Null),
                ],
                NullStyle::Nil,
            )
            .unwrap();
        writer.end("Person").unwrap();
        let bytes = writer.finish();

        let root = parse(&bytes).unwrap();
        assert_eq!(
            record_fields(&root),
            vec![
                ("name".into(), Value::Text("<Tom & \"Jerry\">".into())),
                ("company".into(), Value::Null),
            ]
        );
    }

    #[test]
    fn omitted_nulls_leave_no_element() {
        let mut writer = XmlWriter::new().unwrap();
        writer.start("Person", &[]).unwrap();
        writer
            .field("company", &Value::Null, NullStyle::Omit)
            .unwrap();
        writer.end("Person").unwrap();
        let root = parse(&writer.finish()).unwrap();
        assert!(root.children.is_empty());
    }
}
