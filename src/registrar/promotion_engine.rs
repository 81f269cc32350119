use std::collections::{BTreeMap, BTreeSet};
use rusqlite::Transaction;
use crate::database::roster_table::RosterTable;
use crate::domain::promotion::{PromotionRequest, RejectReason};
use crate::error::LedgerError;
use crate::registrar::roster_repository::RosterRepository;

///
/// Applies one target class to a set of students inside the caller's
/// transaction, in two phases: a read-only validation pass partitioning the
/// request, then the batch of class updates. Per-student validation failures
/// are collected, not fatal; an unknown target class aborts before any write.
/// The facade commits the transaction (retrying transient failures), so
/// either every validated student is reassigned or none is.
///
pub struct PromotionEngine;

impl PromotionEngine {
    /// Partitions the requested student ids into the validated commit set
    /// (sorted, duplicates removed) and the rejections. Touches no rows.
    pub fn validate(&self, tx: &Transaction, roster: &dyn RosterRepository, request: &PromotionRequest)
        -> Result<(Vec<String>, BTreeMap<String, RejectReason>), LedgerError> {

        if !roster.is_valid_class(tx, &request.target_class)? {
            return Err(LedgerError::InvalidTargetClass(request.target_class.clone()));
        }

        let mut valid: BTreeSet<String> = BTreeSet::new();
        let mut rejected: BTreeMap<String, RejectReason> = BTreeMap::new();
        for student_id in &request.student_ids {
            if valid.contains(student_id) || rejected.contains_key(student_id) {
                continue;
            }
            match roster.student_exists(tx, student_id)? {
                true => { valid.insert(student_id.clone()); },
                false => { rejected.insert(student_id.clone(), RejectReason::UnknownStudent); }
            }
        }
        Ok((valid.into_iter().collect(), rejected))
    }

    /// Assigns the target class to every student of the validated commit set.
    /// Each id was validated in this transaction, so an update that changes
    /// no row indicates a broken commit set and fails the batch.
    pub fn update_classes(&self, tx: &Transaction, student_ids: &[String], target_class: &str) -> Result<(), LedgerError> {
        for student_id in student_ids {
            if !RosterTable::update_class(tx, student_id, target_class)? {
                return Err(LedgerError::Storage(rusqlite::Error::StatementChangedRows(0)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use crate::database::class_table::ClassTable;
    use crate::database::roster_table::RosterTable;
    use crate::domain::promotion::{PromotionRequest, RejectReason};
    use crate::domain::roster_member::RosterMember;
    use crate::error::LedgerError;
    use crate::registrar::promotion_engine::PromotionEngine;
    use crate::registrar::sqlite_roster::SqliteRoster;

    #[test]
    fn test_validate_partitions_students() {
        let mut conn = create_connection_and_tables();
        let tx = conn.transaction().unwrap();
        let engine = PromotionEngine;

        let request = PromotionRequest::new(&["S1", "S2", "S3"], "7");
        let partition = engine.validate(&tx, &SqliteRoster, &request);
        assert!(partition.is_ok());
        let (valid, rejected) = partition.unwrap();
        assert_eq!(valid, vec![String::from("S1"), String::from("S2")]);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected.get("S3"), Some(&RejectReason::UnknownStudent));
        // Validation touches nothing
        assert_eq!(RosterTable::select_class_of_student(&tx, "S1").unwrap(), Some(String::from("6")));
    }

    #[test]
    fn test_validate_invalid_target_class() {
        let mut conn = create_connection_and_tables();
        let tx = conn.transaction().unwrap();
        let engine = PromotionEngine;

        let request = PromotionRequest::new(&["S1"], "99");
        let partition = engine.validate(&tx, &SqliteRoster, &request);
        assert!(matches!(partition, Err(LedgerError::InvalidTargetClass(_))));
    }

    #[test]
    fn test_validate_deduplicates_request_ids() {
        let mut conn = create_connection_and_tables();
        let tx = conn.transaction().unwrap();
        let engine = PromotionEngine;

        let request = PromotionRequest::new(&["S1", "S1", "S3", "S3"], "7");
        let partition = engine.validate(&tx, &SqliteRoster, &request);
        assert!(partition.is_ok());
        let (valid, rejected) = partition.unwrap();
        assert_eq!(valid, vec![String::from("S1")]);
        assert_eq!(rejected.len(), 1);
    }

    #[test]
    fn test_validate_rejects_unenrolled_student() {
        let mut conn = create_connection_and_tables();
        {
            let tx = conn.transaction().unwrap();
            let mut former = RosterMember::student("S9", "6", "A");
            former.enrolled = false;
            assert!(RosterTable::insert(&tx, &former).is_ok());
            assert!(tx.commit().is_ok());
        }
        let tx = conn.transaction().unwrap();
        let engine = PromotionEngine;

        let request = PromotionRequest::new(&["S9"], "7");
        let partition = engine.validate(&tx, &SqliteRoster, &request);
        assert!(partition.is_ok());
        let (valid, rejected) = partition.unwrap();
        assert!(valid.is_empty());
        assert_eq!(rejected.get("S9"), Some(&RejectReason::UnknownStudent));
    }

    #[test]
    fn test_update_classes() {
        let mut conn = create_connection_and_tables();
        let tx = conn.transaction().unwrap();
        let engine = PromotionEngine;

        let students = [String::from("S1"), String::from("S2")];
        assert!(engine.update_classes(&tx, &students, "7").is_ok());
        assert_eq!(RosterTable::select_class_of_student(&tx, "S1").unwrap(), Some(String::from("7")));
        assert_eq!(RosterTable::select_class_of_student(&tx, "S2").unwrap(), Some(String::from("7")));

        // Reapplying the same target class is a no-op update
        assert!(engine.update_classes(&tx, &students, "7").is_ok());
        assert_eq!(RosterTable::select_class_of_student(&tx, "S1").unwrap(), Some(String::from("7")));
    }

    #[test]
    fn test_update_classes_requires_student_rows() {
        // A non-student id changes no row and must fail the batch instead of
        // being reported as updated.
        let mut conn = create_connection_and_tables();
        let tx = conn.transaction().unwrap();
        let engine = PromotionEngine;
        assert!(RosterTable::insert(&tx, &RosterMember::teacher("T1", "MATH")).is_ok());

        let result = engine.update_classes(&tx, &[String::from("T1")], "7");
        assert!(matches!(result, Err(LedgerError::Storage(_))));
    }

    fn create_connection_and_tables() -> Connection {
        let conn = Connection::open(":memory:");
        assert!(conn.is_ok());
        let mut conn = conn.unwrap();
        assert!(RosterTable::create_table(&conn).is_ok());
        assert!(ClassTable::create_table(&conn).is_ok());
        let tx = conn.transaction().unwrap();
        assert!(RosterTable::insert(&tx, &RosterMember::student("S1", "6", "A")).is_ok());
        assert!(RosterTable::insert(&tx, &RosterMember::student("S2", "6", "A")).is_ok());
        assert!(ClassTable::insert(&tx, "6", None).is_ok());
        assert!(ClassTable::insert(&tx, "7", None).is_ok());
        assert!(tx.commit().is_ok());
        conn
    }
}
