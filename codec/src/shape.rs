//! Payload shapes.

use std::fmt;

/// How a payload is structured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// A single record.
    Record,
    /// An ordered collection of primitives.
    PrimitiveList,
    /// An ordered collection of records.
    RecordList,
    /// An ordered collection of polymorphic variants.
    VariantList,
}

/// A shape together with the declared static type of its items.
///
/// Displays as `Person`, `int[]`, `Person[]`, `Storage[]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub kind: ShapeKind,
    /// Declared type of the record or of the collection items.
    pub item: &'static str,
}

impl Shape {
    pub const fn record(item: &'static str) -> Self {
        Self {
            kind: ShapeKind::Record,
            item,
        }
    }

    pub const fn primitive_list(item: &'static str) -> Self {
        Self {
            kind: ShapeKind::PrimitiveList,
            item,
        }
    }

    pub const fn record_list(item: &'static str) -> Self {
        Self {
            kind: ShapeKind::RecordList,
            item,
        }
    }

    pub const fn variant_list(item: &'static str) -> Self {
        Self {
            kind: ShapeKind::VariantList,
            item,
        }
    }

    pub fn is_list(&self) -> bool {
        self.kind != ShapeKind::Record
    }

    /// XML root element name: the item itself for a record, `ArrayOf<Item>`
    /// for collections.
    pub fn root_name(&self) -> String {
        if self.is_list() {
            let mut chars = self.item.chars();
            let capitalized: String = match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            };
            format!("ArrayOf{capitalized}")
        } else {
            self.item.to_owned()
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_list() {
            write!(f, "{}[]", self.item)
        } else {
            f.write_str(self.item)
        }
    }
}
