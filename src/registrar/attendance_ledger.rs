use std::collections::BTreeMap;
use chrono::NaiveDate;
use rusqlite::{Connection, Transaction};
use crate::database::attendance_entry_table::AttendanceEntryTable;
use crate::database::attendance_record_table::AttendanceRecordTable;
use crate::domain::attendance_record::{AttendanceEntry, AttendanceRecord, EntryRejection, RecordDraft, RejectedEntry, UpsertOutcome};
use crate::domain::attendance_status::AttendanceStatus;
use crate::domain::record_filter::RecordFilter;
use crate::domain::role::Role;
use crate::domain::scope::Scope;
use crate::error::LedgerError;
use crate::registrar::roster_repository::RosterRepository;

///
/// Transaction-level attendance record store. Exactly one record exists per
/// (date, role, scope); resubmitting for an existing tuple replaces the
/// entries wholesale instead of creating a duplicate. The facade owns the
/// transaction boundary.
///
pub struct AttendanceLedger;

impl AttendanceLedger {
    pub fn create_tables(conn: &Connection) -> rusqlite::Result<()> {
        AttendanceRecordTable::create_table(conn)?;
        AttendanceEntryTable::create_table(conn)
    }

    pub fn upsert(&self, tx: &Transaction, roster: &dyn RosterRepository, draft: &RecordDraft) -> Result<UpsertOutcome, LedgerError> {
        if draft.scope.role() != draft.role {
            return Err(LedgerError::InvalidScope { role: draft.role });
        }
        let eligible = roster.roster_for(tx, draft.role, &draft.scope, draft.date)?;

        // Split the draft entries: persons on the roster are kept (duplicate
        // person ids collapse, last occurrence wins), the rest is reported
        // back without failing the record.
        let mut accepted: BTreeMap<&str, AttendanceStatus> = BTreeMap::new();
        let mut unknown: BTreeMap<&str, EntryRejection> = BTreeMap::new();
        for entry in &draft.entries {
            match eligible.contains(&entry.person_id) {
                true => { accepted.insert(entry.person_id.as_str(), entry.status); },
                false => { unknown.insert(entry.person_id.as_str(), EntryRejection::UnknownPerson); }
            }
        }
        let entries: Vec<AttendanceEntry> = accepted.into_iter()
            .map(|(person_id, status)| AttendanceEntry::new(person_id, status))
            .collect();
        let rejected: Vec<RejectedEntry> = unknown.into_iter()
            .map(|(person_id, reason)| RejectedEntry { person_id: String::from(person_id), reason })
            .collect();

        let record_id = match AttendanceRecordTable::select_id_by_key(tx, draft.date, draft.role, &draft.scope)? {
            Some(record_id) => record_id,
            None => AttendanceRecordTable::insert(tx, draft.date, draft.role, &draft.scope)?
        };
        AttendanceEntryTable::replace(tx, record_id, &entries)?;

        let record = AttendanceRecord {
            id: record_id,
            date: draft.date,
            role: draft.role,
            scope: draft.scope.clone(),
            entries
        };
        Ok(UpsertOutcome { record, rejected })
    }

    pub fn get(&self, tx: &Transaction, date: NaiveDate, role: Role, scope: &Scope) -> Result<Option<AttendanceRecord>, LedgerError> {
        if scope.role() != role {
            return Err(LedgerError::InvalidScope { role });
        }
        match AttendanceRecordTable::select_id_by_key(tx, date, role, scope)? {
            Some(record_id) => {
                let entries = AttendanceEntryTable::select_for_record(tx, record_id)?;
                Ok(Some(AttendanceRecord { id: record_id, date, role, scope: scope.clone(), entries }))
            },
            None => Ok(None)
        }
    }

    /// Re-executes the filter on every call; no cursor state is retained.
    pub fn list(&self, tx: &Transaction, filter: &RecordFilter) -> Result<Vec<AttendanceRecord>, LedgerError> {
        let heads = AttendanceRecordTable::select_filtered(tx, filter)?;
        let mut records = Vec::with_capacity(heads.len());
        for head in heads {
            let entries = AttendanceEntryTable::select_for_record(tx, head.id)?;
            records.push(AttendanceRecord {
                id: head.id,
                date: head.date,
                role: head.role,
                scope: head.scope,
                entries
            });
        }
        Ok(records)
    }

    pub fn delete(&self, tx: &Transaction, record_id: u32) -> Result<bool, LedgerError> {
        AttendanceEntryTable::replace(tx, record_id, &[])?;
        Ok(AttendanceRecordTable::delete(tx, record_id)?)
    }
}
