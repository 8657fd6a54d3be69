//! Storage devices: a closed hierarchy modeled as a sum type.
//!
//! [`Storage`] has exactly three variants. The shared fields live in
//! [`StorageInfo`], embedded in every variant. The `kind` discriminator is
//! derived from the variant ([`Storage::kind`]) so it cannot drift from the
//! concrete type in memory.

use std::fmt;
use std::str::FromStr;

/// Discriminator of a [`Storage`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    Dvd,
    Hdd,
    Flash,
}

impl StorageKind {
    pub const ALL: [StorageKind; 3] = [StorageKind::Dvd, StorageKind::Hdd, StorageKind::Flash];

    /// Wire name of the variant (`"DVD"`, `"HDD"`, `"Flash"`).
    pub const fn as_str(self) -> &'static str {
        match self {
            StorageKind::Dvd => "DVD",
            StorageKind::Hdd => "HDD",
            StorageKind::Flash => "Flash",
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no [`StorageKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown storage kind '{0}'")]
pub struct ParseStorageKindError(pub String);

impl FromStr for StorageKind {
    type Err = ParseStorageKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StorageKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseStorageKindError(s.to_owned()))
    }
}

/// Fields shared by every storage device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageInfo {
    pub name: String,
    pub model: String,
    pub quantity: i32,
    pub price: i32,
}

impl StorageInfo {
    pub fn new(
        name: impl Into<String>,
        model: impl Into<String>,
        quantity: i32,
        price: i32,
    ) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            quantity,
            price,
        }
    }

    /// Placeholder values: `"Name"`, `"Model"`, zero quantity and price.
    pub fn blank() -> Self {
        Self::new("Name", "Model", 0, 0)
    }
}

impl Default for StorageInfo {
    fn default() -> Self {
        Self::blank()
    }
}

/// Optical drive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dvd {
    pub info: StorageInfo,
    pub write_speed: String,
    pub read_speed: String,
}

impl Dvd {
    pub fn new(
        info: StorageInfo,
        write_speed: impl Into<String>,
        read_speed: impl Into<String>,
    ) -> Self {
        Self {
            info,
            write_speed: write_speed.into(),
            read_speed: read_speed.into(),
        }
    }

    pub fn blank() -> Self {
        Self::new(StorageInfo::blank(), "0x", "0x")
    }
}

/// Hard disk drive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hdd {
    pub info: StorageInfo,
    pub capacity: i32,
    pub speed: i32,
}

impl Hdd {
    pub fn new(info: StorageInfo, capacity: i32, speed: i32) -> Self {
        Self {
            info,
            capacity,
            speed,
        }
    }

    pub fn blank() -> Self {
        Self::new(StorageInfo::blank(), 0, 0)
    }
}

/// USB flash drive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub info: StorageInfo,
    pub capacity: i32,
    pub speed: i32,
}

impl Flash {
    pub fn new(info: StorageInfo, capacity: i32, speed: i32) -> Self {
        Self {
            info,
            capacity,
            speed,
        }
    }

    pub fn blank() -> Self {
        Self::new(StorageInfo::blank(), 0, 0)
    }
}

/// A storage device of one of the three known kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Storage {
    Dvd(Dvd),
    Hdd(Hdd),
    Flash(Flash),
}

impl Storage {
    /// Default-constructed device of the given kind.
    pub fn blank(kind: StorageKind) -> Self {
        match kind {
            StorageKind::Dvd => Storage::Dvd(Dvd::blank()),
            StorageKind::Hdd => Storage::Hdd(Hdd::blank()),
            StorageKind::Flash => Storage::Flash(Flash::blank()),
        }
    }

    pub fn kind(&self) -> StorageKind {
        match self {
            Storage::Dvd(_) => StorageKind::Dvd,
            Storage::Hdd(_) => StorageKind::Hdd,
            Storage::Flash(_) => StorageKind::Flash,
        }
    }

    pub fn info(&self) -> &StorageInfo {
        match self {
            Storage::Dvd(d) => &d.info,
            Storage::Hdd(h) => &h.info,
            Storage::Flash(f) => &f.info,
        }
    }

    pub fn info_mut(&mut self) -> &mut StorageInfo {
        match self {
            Storage::Dvd(d) => &mut d.info,
            Storage::Hdd(h) => &mut h.info,
            Storage::Flash(f) => &mut f.info,
        }
    }

    /// One-line report: base fields, then the variant's own fields.
    ///
    /// ```text
    /// Name: Name Model: Model Quantity: 0 Price: 0 Type: DVD WriteSpeed: 0x ReadSpeed: 0x
    /// ```
    pub fn describe(&self) -> String {
        let info = self.info();
        let base = format!(
            "Name: {} Model: {} Quantity: {} Price: {} Type: {}",
            info.name,
            info.model,
            info.quantity,
            info.price,
            self.kind()
        );
        match self {
            Storage::Dvd(d) => format!(
                "{base} WriteSpeed: {} ReadSpeed: {}",
                d.write_speed, d.read_speed
            ),
            Storage::Hdd(h) => format!("{base} Capacity: {} Speed: {}", h.capacity, h.speed),
            Storage::Flash(f) => format!("{base} Capacity: {} Speed: {}", f.capacity, f.speed),
        }
    }
}

impl fmt::Display for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl From<Dvd> for Storage {
    fn from(d: Dvd) -> Self {
        Storage::Dvd(d)
    }
}

impl From<Hdd> for Storage {
    fn from(h: Hdd) -> Self {
        Storage::Hdd(h)
    }
}

impl From<Flash> for Storage {
    fn from(f: Flash) -> Self {
        Storage::Flash(f)
    }
}
