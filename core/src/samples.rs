//! Fixed sample values used by the menu shell and the round-trip tests.

use crate::{Person, Storage, StorageKind};

/// The single person used by the one-record operations.
pub fn founder() -> Person {
    Person::employed("Larry Page", 42, "Google")
}

/// Three people, in a fixed order.
pub fn people() -> Vec<Person> {
    vec![
        founder(),
        Person::employed("Satya Nadella", 48, "Microsoft"),
        Person::employed("Tim Cook", 55, "Apple"),
    ]
}

/// The integers 1 through 10.
pub fn numbers() -> Vec<i32> {
    (1..=10).collect()
}

/// One default device of each kind: DVD, HDD, Flash.
pub fn devices() -> Vec<Storage> {
    StorageKind::ALL.into_iter().map(Storage::blank).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn devices_in_declared_order() {
        let kinds: Vec<_> = devices().iter().map(Storage::kind).collect();
        assert_eq!(kinds, [StorageKind::Dvd, StorageKind::Hdd, StorageKind::Flash]);
    }

    #[test]
    fn numbers_are_one_to_ten() {
        assert_eq!(numbers(), vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn people_all_employed() {
        let people = people();
        assert_eq!(people.len(), 3);
        assert!(people.iter().all(|p| p.company.is_some()));
        assert_eq!(people[0], founder());
    }
}
