use chrono::NaiveDate;
use serde::{Serialize, Deserialize};
use crate::domain::attendance_status::AttendanceStatus;
use crate::domain::role::Role;
use crate::domain::scope::Scope;

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    pub person_id: String,
    pub status: AttendanceStatus
}

impl AttendanceEntry {
    /// Convenience function that takes &str literals
    pub fn new(person_id: &str, status: AttendanceStatus) -> AttendanceEntry {
        AttendanceEntry { person_id: String::from(person_id), status }
    }
}

///
/// One stored attendance record. At most one record exists per
/// (date, role, scope); the id is assigned at creation and never changes.
///
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: u32,
    pub date: NaiveDate,
    pub role: Role,
    pub scope: Scope,
    pub entries: Vec<AttendanceEntry>
}

/// Upsert input: an [AttendanceRecord] without an id.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecordDraft {
    pub date: NaiveDate,
    pub role: Role,
    pub scope: Scope,
    pub entries: Vec<AttendanceEntry>
}

impl RecordDraft {
    pub fn new(date: NaiveDate, role: Role, scope: Scope, entries: Vec<AttendanceEntry>) -> RecordDraft {
        RecordDraft { date, role, scope, entries }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
pub enum EntryRejection {
    UnknownPerson
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RejectedEntry {
    pub person_id: String,
    pub reason: EntryRejection
}

///
/// Result of an upsert: the stored record plus the entries that were dropped
/// because their person is not on the roster for the record's scope.
/// A non-empty rejection list does not prevent the record from being saved.
///
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpsertOutcome {
    pub record: AttendanceRecord,

    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedEntry>
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::domain::attendance_record::{AttendanceEntry, AttendanceRecord, RecordDraft, RejectedEntry, EntryRejection, UpsertOutcome};
    use crate::domain::attendance_status::AttendanceStatus;
    use crate::domain::role::Role;
    use crate::domain::scope::Scope;
    use crate::util::serde_and_verify::tests::serde_and_verify;

    #[test]
    pub fn test_serde_record() {
        let record_ref = AttendanceRecord {
            id: 7,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            role: Role::Student,
            scope: Scope::class("6", "A", "MATH"),
            entries: vec![
                AttendanceEntry::new("P1", AttendanceStatus::Present),
                AttendanceEntry::new("P2", AttendanceStatus::Absent)
            ]
        };
        let json_ref = concat!(
            r#"{"id":7,"date":"2024-01-01","role":"Student","#,
            r#""scope":{"classId":"6","section":"A","subjectId":"MATH"},"#,
            r#""entries":[{"personId":"P1","status":"Present"},{"personId":"P2","status":"Absent"}]}"#
        );
        serde_and_verify(&record_ref, json_ref);
    }

    #[test]
    pub fn test_serde_draft() {
        let draft_ref = RecordDraft::new(
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            Role::Staff,
            Scope::department("Admin"),
            vec![AttendanceEntry::new("S1", AttendanceStatus::Leave)]
        );
        let json_ref = concat!(
            r#"{"date":"2024-02-01","role":"Staff","scope":{"department":"Admin"},"#,
            r#""entries":[{"personId":"S1","status":"Leave"}]}"#
        );
        serde_and_verify(&draft_ref, json_ref);
    }

    #[test]
    pub fn test_serde_outcome_without_rejections() {
        let outcome_ref = UpsertOutcome {
            record: AttendanceRecord {
                id: 1,
                date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                role: Role::Teacher,
                scope: Scope::subject("MATH"),
                entries: vec![]
            },
            rejected: vec![]
        };
        let json_ref = r#"{"record":{"id":1,"date":"2024-02-01","role":"Teacher","scope":{"subjectId":"MATH"},"entries":[]}}"#;
        serde_and_verify(&outcome_ref, json_ref);
    }

    #[test]
    pub fn test_serde_rejected_entry() {
        let rejected_ref = RejectedEntry {
            person_id: String::from("P9"),
            reason: EntryRejection::UnknownPerson
        };
        let json_ref = r#"{"personId":"P9","reason":"UnknownPerson"}"#;
        serde_and_verify(&rejected_ref, json_ref);
    }
}
