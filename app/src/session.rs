//! Running menu operations against a blob store.

use std::fmt;
use std::sync::Arc;

use polywire_codec::{Codec, CodecExt, TypeRegistry};
use polywire_core::{Person, Storage, samples};
use polywire_vfs::BlobStore;

use crate::error::AppError;
use crate::menu::{Action, MenuOp, Subject};

/// Operator-facing output of one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    lines: Vec<String>,
}

impl Report {
    pub const SAVED: &'static str = "Serialization completed";

    fn saved() -> Self {
        Self {
            lines: vec![Self::SAVED.to_owned()],
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

fn person_line(person: &Person) -> String {
    format!("{}\t{}\t{}", person.name, person.age, person.company_name())
}

/// A blob store plus the type registry every codec is built with.
pub struct Session {
    store: Arc<dyn BlobStore>,
    registry: Arc<TypeRegistry>,
}

impl Session {
    pub fn new(store: Arc<dyn BlobStore>, registry: Arc<TypeRegistry>) -> Self {
        Self { store, registry }
    }

    pub fn store(&self) -> &dyn BlobStore {
        self.store.as_ref()
    }

    /// Run one operation to completion.
    pub fn run(&self, op: MenuOp) -> Result<Report, AppError> {
        log::info!("running {op}");
        let codec = op.format().codec(Arc::clone(&self.registry));
        let report = match op.action() {
            Action::Save => self.save(codec.as_ref(), op)?,
            Action::Load => self.load(codec.as_ref(), op)?,
        };
        Ok(report)
    }

    fn save(&self, codec: &dyn Codec, op: MenuOp) -> Result<Report, AppError> {
        let bytes = match op.subject() {
            Subject::People => codec.encode(&samples::people())?,
            Subject::Numbers => codec.encode(&samples::numbers())?,
            Subject::Person => codec.encode(&samples::founder())?,
            Subject::Devices => codec.encode(&samples::devices())?,
        };
        self.store.write(op.blob_name(), &bytes)?;
        log::info!("wrote {} ({} bytes)", op.blob_name(), bytes.len());
        Ok(Report::saved())
    }

    fn load(&self, codec: &dyn Codec, op: MenuOp) -> Result<Report, AppError> {
        let bytes = self.store.read(op.blob_name())?;
        let lines = match op.subject() {
            Subject::People => codec
                .decode::<Vec<Person>>(&bytes)?
                .iter()
                .map(person_line)
                .collect(),
            Subject::Person => vec![person_line(&codec.decode::<Person>(&bytes)?)],
            Subject::Numbers => {
                let numbers: Vec<i32> = codec.decode(&bytes)?;
                let joined: Vec<String> = numbers.iter().map(i32::to_string).collect();
                vec![joined.join(",")]
            }
            Subject::Devices => codec
                .decode::<Vec<Storage>>(&bytes)?
                .iter()
                .map(Storage::describe)
                .collect(),
        };
        Ok(Report { lines })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polywire_codec::{DeserializeError, KnownTypes, SerializeError};
    use polywire_core::StorageKind;
    use polywire_vfs::{MemoryStore, VfsError};

    fn session(store: &MemoryStore) -> Session {
        Session::new(Arc::new(store.clone()), Arc::new(TypeRegistry::standard()))
    }

    fn run(session: &Session, number: u32) -> Result<Report, AppError> {
        session.run(MenuOp::from_number(number).unwrap())
    }

    #[test]
    fn save_writes_named_blob() {
        let store = MemoryStore::new();
        let session = session(&store);
        let report = run(&session, 5).unwrap();
        assert_eq!(report.lines(), [Report::SAVED]);
        let doc = String::from_utf8(store.get("data.xml").unwrap()).unwrap();
        assert!(doc.contains("<name>Larry Page</name>"));
        assert!(doc.contains("<age>42</age>"));
        assert!(doc.contains("<name>Google</name>"));
    }

    #[test]
    fn load_after_save_in_every_pair() {
        let store = MemoryStore::new();
        let session = session(&store);
        for pair in MenuOp::ALL.chunks(2) {
            run(&session, pair[0].number()).unwrap();
            let report = session.run(pair[1]).unwrap();
            assert!(!report.lines().is_empty(), "{}", pair[1]);
        }
        assert_eq!(store.names().len(), 11);
    }

    #[test]
    fn people_lines() {
        let store = MemoryStore::new();
        let session = session(&store);
        run(&session, 15).unwrap();
        let report = run(&session, 16).unwrap();
        assert_eq!(
            report.lines(),
            [
                "Larry Page\t42\tGoogle",
                "Satya Nadella\t48\tMicrosoft",
                "Tim Cook\t55\tApple",
            ]
        );
    }

    #[test]
    fn numbers_line() {
        let store = MemoryStore::new();
        let session = session(&store);
        run(&session, 3).unwrap();
        let report = run(&session, 4).unwrap();
        assert_eq!(report.to_string(), "1,2,3,4,5,6,7,8,9,10");
    }

    #[test]
    fn device_lines() {
        let store = MemoryStore::new();
        let session = session(&store);
        run(&session, 19).unwrap();
        let report = run(&session, 20).unwrap();
        let expected: Vec<String> = StorageKind::ALL
            .iter()
            .map(|&kind| Storage::blank(kind).describe())
            .collect();
        assert_eq!(report.lines(), expected.as_slice());
        assert!(report.lines()[0].ends_with("Type: DVD WriteSpeed: 0x ReadSpeed: 0x"));
    }

    #[test]
    fn load_without_save_is_not_found() {
        let store = MemoryStore::new();
        let session = session(&store);
        assert!(matches!(
            run(&session, 18),
            Err(AppError::Storage(VfsError::NotFound(name))) if name == "device.json"
        ));
    }

    #[test]
    fn load_reports_decode_errors() {
        let store = MemoryStore::new();
        store.insert("device.json", "[{\"kind\":\"Tape\"}]").unwrap();
        let session = session(&store);
        assert!(matches!(
            run(&session, 18),
            Err(AppError::Deserialize(DeserializeError::UnknownDiscriminator { .. }))
        ));
    }

    #[test]
    fn save_reports_unregistered_devices() {
        let store = MemoryStore::new();
        let registry = TypeRegistry::empty().with_storage(
            KnownTypes::new().with("DVD", || Storage::blank(StorageKind::Dvd)),
        );
        let session = Session::new(Arc::new(store.clone()), Arc::new(registry));
        assert!(matches!(
            run(&session, 21),
            Err(AppError::Serialize(SerializeError::UnregisteredType { .. }))
        ));
        assert!(store.get("device.soap.xml").is_none());
    }

    #[test]
    fn read_only_store_rejects_save() {
        let store = MemoryStore::new();
        let session = Session::new(
            Arc::new(store.read_only()),
            Arc::new(TypeRegistry::standard()),
        );
        assert!(matches!(
            run(&session, 1),
            Err(AppError::Storage(VfsError::ReadOnly))
        ));
        assert!(session.store().is_read_only());
    }
}
