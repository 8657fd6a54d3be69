//! Known-type registration for polymorphic hierarchies.
//!
//! A [`KnownTypes`] list declares which concrete variants a base type may
//! materialize as on the wire, and how to build a blank instance of each.
//! [`TypeRegistry`] bundles the lists for every hierarchy. It is an explicit,
//! immutable configuration value handed to each codec when it is built.

use std::fmt;

use polywire_core::{Storage, StorageKind};

use crate::error::{DeserializeError, SerializeError};
use crate::record::Polymorphic;

/// One registered variant: its discriminator and its blank constructor.
pub struct KnownType<B> {
    pub name: &'static str,
    pub construct: fn() -> B,
}

impl<B> Clone for KnownType<B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B> Copy for KnownType<B> {}

/// The closed list of variants eligible for polymorphic encode/decode of `B`.
pub struct KnownTypes<B> {
    entries: Vec<KnownType<B>>,
}

impl<B: Polymorphic> KnownTypes<B> {
    /// An empty list; nothing under `B` can be encoded or decoded.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a variant. A later entry with the same name replaces the earlier one.
    #[must_use]
    pub fn with(mut self, name: &'static str, construct: fn() -> B) -> Self {
        self.entries.retain(|e| e.name != name);
        self.entries.push(KnownType { name, construct });
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Confirm that `value`'s concrete type is registered, returning its discriminator.
    pub fn check(&self, value: &B) -> Result<&'static str, SerializeError> {
        let name = value.discriminator();
        if self.contains(name) {
            Ok(name)
        } else {
            Err(SerializeError::UnregisteredType {
                base: B::BASE.to_owned(),
                variant: name.to_owned(),
            })
        }
    }

    /// Map a discriminator to a blank instance of the registered variant.
    ///
    /// Nothing is constructed unless the discriminator is registered.
    pub fn construct(&self, discriminator: &str) -> Result<B, DeserializeError> {
        self.entries
            .iter()
            .find(|e| e.name == discriminator)
            .map(|e| (e.construct)())
            .ok_or_else(|| DeserializeError::UnknownDiscriminator {
                base: B::BASE.to_owned(),
                discriminator: discriminator.to_owned(),
            })
    }
}

impl<B: Polymorphic> Default for KnownTypes<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> Clone for KnownTypes<B> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<B> fmt::Debug for KnownTypes<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| e.name))
            .finish()
    }
}

/// Known types for every polymorphic hierarchy.
#[derive(Clone, Debug)]
pub struct TypeRegistry {
    storage: KnownTypes<Storage>,
}

impl TypeRegistry {
    /// A registry with no variants registered.
    pub fn empty() -> Self {
        Self {
            storage: KnownTypes::new(),
        }
    }

    /// The standard configuration: `Storage` → {DVD, HDD, Flash}.
    pub fn standard() -> Self {
        Self::empty().with_storage(
            KnownTypes::new()
                .with(StorageKind::Dvd.as_str(), || Storage::blank(StorageKind::Dvd))
                .with(StorageKind::Hdd.as_str(), || Storage::blank(StorageKind::Hdd))
                .with(StorageKind::Flash.as_str(), || {
                    Storage::blank(StorageKind::Flash)
                }),
        )
    }

    #[must_use]
    pub fn with_storage(mut self, storage: KnownTypes<Storage>) -> Self {
        self.storage = storage;
        self
    }

    pub fn storage(&self) -> &KnownTypes<Storage> {
        &self.storage
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
