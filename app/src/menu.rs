//! The numbered operation table.

use std::fmt;

use polywire_codec::Format;

/// Whether an operation writes a blob or reads one back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Save,
    Load,
}

/// Which sample payload an operation works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    /// The three sample people.
    People,
    /// The integers 1..=10.
    Numbers,
    /// The founder on their own.
    Person,
    /// One of each storage device.
    Devices,
}

impl Subject {
    fn describe(self) -> &'static str {
        match self {
            Subject::People => "person array",
            Subject::Numbers => "int collection",
            Subject::Person => "single person",
            Subject::Devices => "storage devices",
        }
    }
}

/// One entry of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuOp {
    number: u32,
    action: Action,
    subject: Subject,
    format: Format,
    blob: &'static str,
}

const fn op(
    number: u32,
    action: Action,
    subject: Subject,
    format: Format,
    blob: &'static str,
) -> MenuOp {
    MenuOp {
        number,
        action,
        subject,
        format,
        blob,
    }
}

use self::Action::{Load, Save};
use self::Subject::{Devices, Numbers, People, Person};
use polywire_codec::Format::{Envelope, Json, Markup};

impl MenuOp {
    /// Every operation, in menu order.
    pub const ALL: [MenuOp; 22] = [
        op(1, Save, People, Envelope, "soap.xml"),
        op(2, Load, People, Envelope, "soap.xml"),
        op(3, Save, Numbers, Envelope, "list.soap.xml"),
        op(4, Load, Numbers, Envelope, "list.soap.xml"),
        op(5, Save, Person, Markup, "data.xml"),
        op(6, Load, Person, Markup, "data.xml"),
        op(7, Save, Numbers, Markup, "list.xml"),
        op(8, Load, Numbers, Markup, "list.xml"),
        op(9, Save, People, Markup, "Person.xml"),
        op(10, Load, People, Markup, "Person.xml"),
        op(11, Save, Person, Json, "data.json"),
        op(12, Load, Person, Json, "data.json"),
        op(13, Save, Numbers, Json, "list.json"),
        op(14, Load, Numbers, Json, "list.json"),
        op(15, Save, People, Json, "Person.json"),
        op(16, Load, People, Json, "Person.json"),
        op(17, Save, Devices, Json, "device.json"),
        op(18, Load, Devices, Json, "device.json"),
        op(19, Save, Devices, Markup, "device.xml"),
        op(20, Load, Devices, Markup, "device.xml"),
        op(21, Save, Devices, Envelope, "device.soap.xml"),
        op(22, Load, Devices, Envelope, "device.soap.xml"),
    ];

    pub fn from_number(number: u32) -> Option<MenuOp> {
        Self::ALL.iter().copied().find(|op| op.number == number)
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn subject(&self) -> Subject {
        self.subject
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Name of the blob this operation writes or reads.
    pub fn blob_name(&self) -> &'static str {
        self.blob
    }

    /// Menu text, e.g. `Save storage devices (json)`.
    pub fn label(&self) -> String {
        let verb = match self.action {
            Action::Save => "Save",
            Action::Load => "Load",
        };
        format!("{verb} {} ({})", self.subject.describe(), self.format)
    }
}

impl fmt::Display for MenuOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number, self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn numbered_one_to_twenty_two() {
        let numbers: Vec<_> = MenuOp::ALL.iter().map(MenuOp::number).collect();
        assert_eq!(numbers, (1..=22).collect::<Vec<_>>());
        assert_eq!(MenuOp::from_number(0), None);
        assert_eq!(MenuOp::from_number(23), None);
    }

    #[test]
    fn saves_and_loads_pair_up() {
        for pair in MenuOp::ALL.chunks(2) {
            let (save, load) = (pair[0], pair[1]);
            assert_eq!(save.action(), Action::Save);
            assert_eq!(load.action(), Action::Load);
            assert_eq!(save.subject(), load.subject());
            assert_eq!(save.format(), load.format());
            assert_eq!(save.blob_name(), load.blob_name());
        }
    }

    #[test]
    fn each_pair_owns_its_blob() {
        let blobs: HashSet<_> = MenuOp::ALL.iter().map(MenuOp::blob_name).collect();
        assert_eq!(blobs.len(), 11);
    }

    #[test]
    fn labels() {
        let op = MenuOp::from_number(17).unwrap();
        assert_eq!(op.label(), "Save storage devices (json)");
        assert_eq!(op.to_string(), "17. Save storage devices (json)");
        assert_eq!(
            MenuOp::from_number(4).unwrap().label(),
            "Load int collection (envelope)"
        );
    }
}
