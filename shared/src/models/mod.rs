//! Records mirrored from backend DTOs, plus the form models that produce
//! their create/update requests.

pub mod branch;
pub mod centre;
pub mod fundraiser;
pub mod inventory;
pub mod staff;

use crate::validation::FieldErrors;

/// Raw form input that validates into a request body
pub trait FormInput {
    type Request;

    fn validate(&self) -> Result<Self::Request, FieldErrors>;
}

/// Records carrying a backend-issued public id
pub trait Identified {
    fn public_id(&self) -> &str;
}

/// Replace the record with the same id, or append it if it is new
pub fn upsert_by_id<T: Identified>(records: &mut Vec<T>, record: T) {
    match records.iter_mut().find(|r| r.public_id() == record.public_id()) {
        Some(existing) => *existing = record,
        None => records.push(record),
    }
}

/// Drop the record with `public_id`; returns whether anything was removed
pub fn remove_by_id<T: Identified>(records: &mut Vec<T>, public_id: &str) -> bool {
    let before = records.len();
    records.retain(|r| r.public_id() != public_id);
    records.len() != before
}

/// Backends report account state as `enabled`; the console shows `suspended`.
pub(crate) fn default_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Row(&'static str, u32);

    impl Identified for Row {
        fn public_id(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut rows = vec![Row("a", 1), Row("b", 2)];
        upsert_by_id(&mut rows, Row("a", 10));
        upsert_by_id(&mut rows, Row("c", 3));
        assert_eq!(rows, vec![Row("a", 10), Row("b", 2), Row("c", 3)]);
    }

    #[test]
    fn test_remove_by_id() {
        let mut rows = vec![Row("a", 1), Row("b", 2)];
        assert!(remove_by_id(&mut rows, "a"));
        assert!(!remove_by_id(&mut rows, "zzz"));
        assert_eq!(rows, vec![Row("b", 2)]);
    }
}
