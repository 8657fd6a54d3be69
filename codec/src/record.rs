//! Field-level mapping between entities and [`Value`].
//!
//! [`Record`] is implemented by every entity a codec can carry. Plain records
//! also implement [`Blank`] so a decoder can construct them empty and then
//! populate their fields. Bases of a closed hierarchy implement
//! [`Polymorphic`]; their blank instance comes from the
//! [`TypeRegistry`] entry selected by the discriminator instead.

use polywire_core::{Company, Person, Storage};

use crate::context::{DeserializeContext, SerializeContext};
use crate::error::{DeserializeError, SerializeError};
use crate::registry::{KnownTypes, TypeRegistry};
use crate::value::Value;

/// A record whose fields can be written to and read from a context.
pub trait Record: Sized {
    /// The declared static type name (e.g. `"Person"`).
    const NAME: &'static str;

    fn write_fields(&self, ctx: &mut SerializeContext<'_>) -> Result<(), SerializeError>;

    /// Populate `self` from the context. `self` starts out blank.
    fn read_fields(&mut self, ctx: &mut DeserializeContext<'_>) -> Result<(), DeserializeError>;
}

/// A record with a no-argument constructor.
pub trait Blank: Record {
    fn blank() -> Self;
}

/// Base type of a closed hierarchy.
pub trait Polymorphic: Record {
    /// Name of the base type (e.g. `"Storage"`).
    const BASE: &'static str;

    /// Name of this value's concrete variant.
    fn discriminator(&self) -> &'static str;

    /// The registered variants of this base.
    fn known_types(registry: &TypeRegistry) -> &KnownTypes<Self>;
}

/// Encode a polymorphic value into a [`Value::Variant`].
///
/// The concrete type is checked against the registry first.
pub fn encode_variant<B: Polymorphic>(
    value: &B,
    registry: &TypeRegistry,
) -> Result<Value, SerializeError> {
    let tag = B::known_types(registry).check(value)?;
    let mut ctx = SerializeContext::new(registry);
    value.write_fields(&mut ctx)?;
    Ok(Value::Variant {
        tag: tag.to_owned(),
        fields: ctx.finish(),
    })
}

/// Decode a [`Value::Variant`]: look the tag up in the registry, construct
/// the blank variant it names, then populate it.
pub fn decode_variant<B: Polymorphic>(
    value: Value,
    registry: &TypeRegistry,
) -> Result<B, DeserializeError> {
    let (tag, fields) = match value {
        Value::Variant { tag, fields } => (tag, fields),
        other => {
            return Err(DeserializeError::shape(
                format!("{} variant", B::BASE),
                other.kind_name(),
            ));
        }
    };
    let mut ctx = DeserializeContext::new(registry, B::BASE, fields)?;
    let mut instance = B::known_types(registry).construct(&tag)?;
    instance.read_fields(&mut ctx)?;
    ctx.finish();
    Ok(instance)
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

impl Record for Company {
    const NAME: &'static str = "Company";

    fn write_fields(&self, ctx: &mut SerializeContext<'_>) -> Result<(), SerializeError> {
        ctx.write_scalar("name", &self.name);
        Ok(())
    }

    fn read_fields(&mut self, ctx: &mut DeserializeContext<'_>) -> Result<(), DeserializeError> {
        self.name = ctx.read_scalar("name")?;
        Ok(())
    }
}

impl Blank for Company {
    fn blank() -> Self {
        Company::blank()
    }
}

impl Record for Person {
    const NAME: &'static str = "Person";

    fn write_fields(&self, ctx: &mut SerializeContext<'_>) -> Result<(), SerializeError> {
        ctx.write_scalar("name", &self.name);
        ctx.write_scalar("age", &self.age);
        ctx.write_optional_record("company", &self.company)
    }

    fn read_fields(&mut self, ctx: &mut DeserializeContext<'_>) -> Result<(), DeserializeError> {
        self.name = ctx.read_scalar("name")?;
        self.age = ctx.read_scalar("age")?;
        self.company = ctx.read_optional_record("company")?;
        Ok(())
    }
}

impl Blank for Person {
    fn blank() -> Self {
        Person::blank()
    }
}

/// Wire name of the discriminator field every storage record carries.
pub const KIND_FIELD: &str = "kind";

impl Record for Storage {
    const NAME: &'static str = "Storage";

    fn write_fields(&self, ctx: &mut SerializeContext<'_>) -> Result<(), SerializeError> {
        let info = self.info();
        ctx.write_field(KIND_FIELD, Value::from(self.kind().as_str()));
        ctx.write_scalar("name", &info.name);
        ctx.write_scalar("model", &info.model);
        ctx.write_scalar("quantity", &info.quantity);
        ctx.write_scalar("price", &info.price);
        match self {
            Storage::Dvd(d) => {
                ctx.write_scalar("writeSpeed", &d.write_speed);
                ctx.write_scalar("readSpeed", &d.read_speed);
            }
            Storage::Hdd(h) => {
                ctx.write_scalar("capacity", &h.capacity);
                ctx.write_scalar("speed", &h.speed);
            }
            Storage::Flash(f) => {
                ctx.write_scalar("capacity", &f.capacity);
                ctx.write_scalar("speed", &f.speed);
            }
        }
        Ok(())
    }

    fn read_fields(&mut self, ctx: &mut DeserializeContext<'_>) -> Result<(), DeserializeError> {
        // The variant was already chosen by the discriminator; the wire copy
        // of `kind` has to agree with it.
        let kind: String = ctx.read_scalar(KIND_FIELD)?;
        let expected = self.kind().as_str();
        if kind != expected {
            return Err(DeserializeError::shape(
                format!("kind '{expected}'"),
                format!("kind '{kind}'"),
            ));
        }

        let info = self.info_mut();
        info.name = ctx.read_scalar("name")?;
        info.model = ctx.read_scalar("model")?;
        info.quantity = ctx.read_scalar("quantity")?;
        info.price = ctx.read_scalar("price")?;

        match self {
            Storage::Dvd(d) => {
                d.write_speed = ctx.read_scalar("writeSpeed")?;
                d.read_speed = ctx.read_scalar("readSpeed")?;
            }
            Storage::Hdd(h) => {
                h.capacity = ctx.read_scalar("capacity")?;
                h.speed = ctx.read_scalar("speed")?;
            }
            Storage::Flash(f) => {
                f.capacity = ctx.read_scalar("capacity")?;
                f.speed = ctx.read_scalar("speed")?;
            }
        }
        Ok(())
    }
}

impl Polymorphic for Storage {
    const BASE: &'static str = "Storage";

    fn discriminator(&self) -> &'static str {
        self.kind().as_str()
    }

    fn known_types(registry: &TypeRegistry) -> &KnownTypes<Self> {
        registry.storage()
    }
}
