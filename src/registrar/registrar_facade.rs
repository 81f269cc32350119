use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use chrono::NaiveDate;
use log::{info, warn};
use rusqlite::{Connection, ErrorCode};
use crate::database::class_table::ClassTable;
use crate::database::roster_table::RosterTable;
use crate::domain::attendance_record::{AttendanceRecord, RecordDraft, UpsertOutcome};
use crate::domain::promotion::{PromotionRequest, PromotionResult};
use crate::domain::record_filter::RecordFilter;
use crate::domain::role::Role;
use crate::domain::roster_member::RosterMember;
use crate::domain::scope::Scope;
use crate::domain::summary_map::SummaryMap;
use crate::error::LedgerError;
use crate::registrar::attendance_ledger::AttendanceLedger;
use crate::registrar::promotion_engine::PromotionEngine;
use crate::registrar::sqlite_roster::SqliteRoster;
use crate::registrar::summary_aggregator::SummaryAggregator;

///
/// This class is the facade to the REST handlers. It delegates to the
/// attendance ledger and the promotion engine, and it creates the
/// transaction boundary for all database operations.
///
pub struct RegistrarFacade {
    connection: Connection,
    ledger: AttendanceLedger,
    engine: PromotionEngine,
    roster: SqliteRoster
}

pub type MutexRegistrar = Arc<Mutex<RegistrarFacade>>;

// Bounded retries for transient (busy/locked) commit failures
const MAX_COMMIT_ATTEMPTS: u32 = 3;

impl RegistrarFacade {
    pub fn new(db_path: &str) -> Result<Self, LedgerError> {
        let connection = Connection::open(db_path)?;
        AttendanceLedger::create_tables(&connection)?;
        RosterTable::create_table(&connection)?;
        ClassTable::create_table(&connection)?;
        Ok(Self {
            connection,
            ledger: AttendanceLedger,
            engine: PromotionEngine,
            roster: SqliteRoster
        })
    }

    pub fn upsert_attendance(&mut self, draft: &RecordDraft) -> Result<UpsertOutcome, LedgerError> {
        let tx = self.connection.transaction()?;
        let outcome = self.ledger.upsert(&tx, &self.roster, draft)?;
        tx.commit()?;
        info!("Stored attendance record {} for {} {:?} with {} entries",
            outcome.record.id, outcome.record.date, outcome.record.role, outcome.record.entries.len());
        if !outcome.rejected.is_empty() {
            warn!("Dropped {} entries with unknown persons", outcome.rejected.len());
        }
        Ok(outcome)
    }

    pub fn get_attendance(&mut self, date: NaiveDate, role: Role, scope: &Scope) -> Result<Option<AttendanceRecord>, LedgerError> {
        let tx = self.connection.transaction()?;
        let record = self.ledger.get(&tx, date, role, scope)?;
        tx.commit()?;
        Ok(record)
    }

    pub fn list_attendance(&mut self, filter: &RecordFilter) -> Result<Vec<AttendanceRecord>, LedgerError> {
        let tx = self.connection.transaction()?;
        let records = self.ledger.list(&tx, filter)?;
        tx.commit()?;
        Ok(records)
    }

    pub fn delete_attendance(&mut self, record_id: u32) -> Result<bool, LedgerError> {
        let tx = self.connection.transaction()?;
        if self.ledger.delete(&tx, record_id)? {
            tx.commit()?;
            info!("Deleted attendance record {}", record_id);
            Ok(true)
        } else {
            tx.rollback()?; // There should be no changes, so tx.commit() would also work
            warn!("Attendance record {} not found", record_id);
            Ok(false)
        }
    }

    pub fn summarize(&mut self, filter: &RecordFilter, person_ids: Option<&[String]>) -> Result<SummaryMap, LedgerError> {
        let records = self.list_attendance(filter)?;
        Ok(SummaryAggregator::summarize(&records, person_ids))
    }

    ///
    /// Runs the promotion as one transaction per attempt: a read-only
    /// validation pass, then the batch of class updates. A transient
    /// (busy/locked) failure rolls the attempt back and retries the whole
    /// batch; exhausted retries surface as
    /// [CommitFailed](crate::error::LedgerError::CommitFailed) with no
    /// student reassigned, carrying the validation rejections.
    ///
    pub fn promote(&mut self, request: &PromotionRequest) -> Result<PromotionResult, LedgerError> {
        let mut attempts = 0;
        let mut rejected = BTreeMap::new();
        loop {
            attempts += 1;
            let tx = self.connection.transaction()?;
            match self.engine.validate(&tx, &self.roster, request) {
                Ok((valid, found_rejected)) => {
                    // Keep the partition; it must survive a failed commit
                    rejected = found_rejected;
                    let committed = self.engine.update_classes(&tx, &valid, &request.target_class)
                        .and_then(|()| tx.commit().map_err(LedgerError::from));
                    match committed {
                        Ok(()) => {
                            info!("Promoted {} students to class {} ({} rejected)",
                                valid.len(), request.target_class, rejected.len());
                            return Ok(PromotionResult { updated: valid, rejected });
                        },
                        Err(LedgerError::Storage(error)) if Self::is_transient(&error) => {
                            warn!("Promotion attempt {} failed: {}", attempts, error);
                        },
                        Err(error) => return Err(error)
                    }
                },
                Err(LedgerError::Storage(error)) if Self::is_transient(&error) => {
                    // The dropped transaction rolls the attempt back
                    warn!("Promotion attempt {} failed: {}", attempts, error);
                },
                Err(error) => return Err(error)
            }
            if attempts >= MAX_COMMIT_ATTEMPTS {
                return Err(LedgerError::CommitFailed { attempts, rejected });
            }
        }
    }

    /// Seeding hook for the surrounding application and for tests.
    pub fn add_roster_member(&mut self, member: &RosterMember) -> Result<(), LedgerError> {
        let tx = self.connection.transaction()?;
        RosterTable::insert(&tx, member)?;
        tx.commit()?;
        Ok(())
    }

    /// Seeding hook for the surrounding application and for tests.
    pub fn add_class(&mut self, class_id: &str, name: Option<&str>) -> Result<(), LedgerError> {
        let tx = self.connection.transaction()?;
        ClassTable::insert(&tx, class_id, name)?;
        tx.commit()?;
        Ok(())
    }

    fn is_transient(error: &rusqlite::Error) -> bool {
        match error {
            rusqlite::Error::SqliteFailure(e, _) =>
                e.code == ErrorCode::DatabaseBusy || e.code == ErrorCode::DatabaseLocked,
            _ => false
        }
    }
}
