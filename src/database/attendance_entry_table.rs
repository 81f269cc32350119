use const_format::formatcp;
use log::debug;
use rusqlite::{Connection, params, Result, Transaction};
use crate::domain::attendance_record::AttendanceEntry;

pub const ATTENDANCE_ENTRY_TABLE: &'static str = "attendance_entry";

// The composite primary key keeps person ids unique within one record.
const CREATE_ATTENDANCE_ENTRY_TABLE: &'static str = formatcp!(
    "CREATE TABLE IF NOT EXISTS {} (
        recordId INTEGER NOT NULL,
        personId TEXT NOT NULL,
        status TEXT NOT NULL,
        PRIMARY KEY (recordId, personId)
    )",
    ATTENDANCE_ENTRY_TABLE
);

const INSERT_ENTRY: &'static str = formatcp!(
    "INSERT INTO {} (recordId, personId, status) VALUES (?, ?, ?)",
    ATTENDANCE_ENTRY_TABLE
);

const DELETE_ENTRIES: &'static str = formatcp!(
    "DELETE FROM {} WHERE recordId = ?",
    ATTENDANCE_ENTRY_TABLE
);

const SELECT_ENTRIES: &'static str = formatcp!(
    "SELECT personId, status FROM {} WHERE recordId = ? ORDER BY personId",
    ATTENDANCE_ENTRY_TABLE
);

// This is just a namespace to keep method names short
pub struct AttendanceEntryTable;

impl AttendanceEntryTable {
    pub fn create_table(conn: &Connection) -> Result<()> {
        debug!("Execute\n{}", CREATE_ATTENDANCE_ENTRY_TABLE);
        conn.execute(CREATE_ATTENDANCE_ENTRY_TABLE, [])?;
        Ok(())
    }

    /// Replaces the entries of a record wholesale (last write wins at the
    /// record level, there is no per-entry merge).
    pub fn replace(tx: &Transaction, record_id: u32, entries: &[AttendanceEntry]) -> Result<()> {
        debug!("Execute\n{} with: {}", DELETE_ENTRIES, record_id);
        tx.execute(DELETE_ENTRIES, params![record_id])?;
        for entry in entries {
            debug!("Execute\n{}\nwith: {:?}", INSERT_ENTRY, entry);
            tx.execute(INSERT_ENTRY, params![record_id, entry.person_id, entry.status])?;
        }
        Ok(())
    }

    pub fn select_for_record(tx: &Transaction, record_id: u32) -> Result<Vec<AttendanceEntry>> {
        debug!("Execute\n{} with: {}", SELECT_ENTRIES, record_id);
        let mut stmt = tx.prepare(SELECT_ENTRIES)?;
        let rows = stmt.query_map([record_id], |row| {
            Ok(AttendanceEntry {
                person_id: row.get(0)?,
                status: row.get(1)?
            })
        })?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }
}
