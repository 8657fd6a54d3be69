//! # polywire core
//!
//! Plain-data entity model shared by every codec:
//!
//! - [`Person`] / [`Company`]: records with one owned nested record
//! - [`Storage`]: closed hierarchy of storage devices ([`Dvd`], [`Hdd`], [`Flash`])
//! - [`samples`]: the fixed sample values used by the menu shell and tests
//!
//! Every type offers two construction paths: a fully specified `new` and a
//! `blank` used by decoders that populate fields after construction.

mod person;
pub mod samples;
mod storage;

pub use person::{Company, Person};
pub use storage::{Dvd, Flash, Hdd, ParseStorageKindError, Storage, StorageInfo, StorageKind};

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the core crate version.
pub fn init() {
    log::info!("polywire core v{} initialized", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
