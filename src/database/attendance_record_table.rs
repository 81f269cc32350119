use chrono::NaiveDate;
use const_format::formatcp;
use log::debug;
use rusqlite::{Connection, params, Result, Row, ToSql, Transaction};
use rusqlite::types::Type;
use crate::domain::record_filter::RecordFilter;
use crate::domain::role::Role;
use crate::domain::scope::Scope;

pub const ATTENDANCE_RECORD_TABLE: &'static str = "attendance_record";

// The UNIQUE constraint on (date, role, scopeKey) is the storage-level
// backstop for the one-record-per-tuple invariant. classId and department
// are denormalized from the scope for filtering.
const CREATE_ATTENDANCE_RECORD_TABLE: &'static str = formatcp!(
    "CREATE TABLE IF NOT EXISTS {} (
        recordId INTEGER NOT NULL PRIMARY KEY,
        date TEXT NOT NULL,
        role TEXT NOT NULL,
        scopeKey TEXT NOT NULL,
        scope TEXT NOT NULL,
        classId TEXT,
        department TEXT,
        UNIQUE (date, role, scopeKey)
    )",
    ATTENDANCE_RECORD_TABLE
);

const INSERT_RECORD: &'static str = formatcp!(
    "INSERT INTO {} (date, role, scopeKey, scope, classId, department) VALUES (?, ?, ?, ?, ?, ?)",
    ATTENDANCE_RECORD_TABLE
);

const SELECT_ID_BY_KEY: &'static str = formatcp!(
    "SELECT recordId FROM {} WHERE date = ? AND role = ? AND scopeKey = ?",
    ATTENDANCE_RECORD_TABLE
);

const SELECT_RECORDS: &'static str = formatcp!(
    "SELECT recordId, date, role, scope FROM {}",
    ATTENDANCE_RECORD_TABLE
);

const DELETE_RECORD: &'static str = formatcp!(
    "DELETE FROM {} WHERE recordId = ?",
    ATTENDANCE_RECORD_TABLE
);

/// A record row without its entries.
#[derive(Debug, Eq, PartialEq)]
pub struct RecordHead {
    pub id: u32,
    pub date: NaiveDate,
    pub role: Role,
    pub scope: Scope
}

// This is just a namespace to keep method names short
pub struct AttendanceRecordTable;

impl AttendanceRecordTable {
    pub fn create_table(conn: &Connection) -> Result<()> {
        debug!("Execute\n{}", CREATE_ATTENDANCE_RECORD_TABLE);
        conn.execute(CREATE_ATTENDANCE_RECORD_TABLE, [])?;
        Ok(())
    }

    pub fn insert(tx: &Transaction, date: NaiveDate, role: Role, scope: &Scope) -> Result<u32> {
        debug!("Execute\n{}\nwith: {} {:?} {:?}", INSERT_RECORD, date, role, scope);
        let scope_json = Self::scope_to_json(scope)?;
        let values = params![date.to_string(), role, scope.key(), scope_json, scope.class_id(), scope.department_name()];
        tx.execute(INSERT_RECORD, values)?;
        Ok(tx.last_insert_rowid() as u32)
    }

    pub fn select_id_by_key(tx: &Transaction, date: NaiveDate, role: Role, scope: &Scope) -> Result<Option<u32>> {
        debug!("Execute\n{} with: {} {:?} {}", SELECT_ID_BY_KEY, date, role, scope.key());
        let mut stmt = tx.prepare(SELECT_ID_BY_KEY)?;
        let mut rows = stmt.query(params![date.to_string(), role, scope.key()])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None)
        }
    }

    pub fn select_filtered(tx: &Transaction, filter: &RecordFilter) -> Result<Vec<RecordHead>> {
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<&dyn ToSql> = Vec::new();
        let (from, to) = filter.bounds();
        let from = from.map(|date| date.to_string());
        let to = to.map(|date| date.to_string());
        if let Some(ref from) = from {
            clauses.push("date >= ?");
            values.push(from);
        }
        if let Some(ref to) = to {
            clauses.push("date <= ?");
            values.push(to);
        }
        if let Some(ref role) = filter.role {
            clauses.push("role = ?");
            values.push(role);
        }
        if let Some(ref class_id) = filter.class_id {
            clauses.push("classId = ?");
            values.push(class_id);
        }
        if let Some(ref department) = filter.department {
            clauses.push("department = ?");
            values.push(department);
        }
        let query = match clauses.is_empty() {
            true => format!("{} ORDER BY date, recordId", SELECT_RECORDS),
            false => format!("{} WHERE {} ORDER BY date, recordId", SELECT_RECORDS, clauses.join(" AND "))
        };
        debug!("Execute\n{}", query);
        let mut stmt = tx.prepare(query.as_str())?;
        let rows = stmt.query_map(values.as_slice(), |row| {
            Self::row_to_record_head(row)
        })?;
        let mut heads = Vec::new();
        for row in rows {
            heads.push(row?);
        }
        Ok(heads)
    }

    pub fn delete(tx: &Transaction, record_id: u32) -> Result<bool> {
        debug!("Execute\n{} with: {}", DELETE_RECORD, record_id);
        let row_count = tx.execute(DELETE_RECORD, params![record_id])?;
        Ok(row_count == 1)
    }

    fn row_to_record_head(row: &Row) -> Result<RecordHead> {
        let date: String = row.get(1)?;
        let date = date.parse::<NaiveDate>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;
        let scope: String = row.get(3)?;
        let scope: Scope = serde_json::from_str(scope.as_str())
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;
        Ok(RecordHead {
            id: row.get(0)?,
            date,
            role: row.get(2)?,
            scope
        })
    }

    fn scope_to_json(scope: &Scope) -> Result<String> {
        serde_json::to_string(scope)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rusqlite::Connection;
    use crate::database::attendance_record_table::AttendanceRecordTable;
    use crate::domain::record_filter::RecordFilter;
    use crate::domain::role::Role;
    use crate::domain::scope::Scope;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_insert() {
        let mut conn = create_connection_and_table();
        let tx = conn.transaction().unwrap();
        let id1 = AttendanceRecordTable::insert(&tx, date(2024, 1, 1), Role::Student, &Scope::class("6", "A", "MATH"));
        assert!(id1.is_ok());
        assert_eq!(id1.unwrap(), 1);
        let id2 = AttendanceRecordTable::insert(&tx, date(2024, 1, 1), Role::Staff, &Scope::department("Admin"));
        assert!(id2.is_ok());
        assert_eq!(id2.unwrap(), 2);
        assert!(tx.commit().is_ok());
    }

    #[test]
    fn test_insert_duplicate_key_fails() {
        let mut conn = create_connection_and_table();
        let tx = conn.transaction().unwrap();
        let scope = Scope::class("6", "A", "MATH");
        assert!(AttendanceRecordTable::insert(&tx, date(2024, 1, 1), Role::Student, &scope).is_ok());
        assert!(AttendanceRecordTable::insert(&tx, date(2024, 1, 1), Role::Student, &scope).is_err());
    }

    #[test]
    fn test_same_scope_value_different_variant() {
        // A teacher subject scope and a staff department scope with the same
        // literal value must map to different keys.
        let mut conn = create_connection_and_table();
        let tx = conn.transaction().unwrap();
        assert!(AttendanceRecordTable::insert(&tx, date(2024, 1, 1), Role::Teacher, &Scope::subject("MATH")).is_ok());
        assert!(AttendanceRecordTable::insert(&tx, date(2024, 1, 1), Role::Staff, &Scope::department("MATH")).is_ok());
        assert!(tx.commit().is_ok());
    }

    #[test]
    fn test_select_id_by_key() {
        let mut conn = create_connection_and_table();
        let tx = conn.transaction().unwrap();
        let scope = Scope::class("6", "A", "MATH");
        assert!(AttendanceRecordTable::insert(&tx, date(2024, 1, 1), Role::Student, &scope).is_ok());

        let found = AttendanceRecordTable::select_id_by_key(&tx, date(2024, 1, 1), Role::Student, &scope);
        assert!(found.is_ok());
        assert_eq!(found.unwrap(), Some(1));

        let missing = AttendanceRecordTable::select_id_by_key(&tx, date(2024, 1, 2), Role::Student, &scope);
        assert!(missing.is_ok());
        assert_eq!(missing.unwrap(), None);
    }

    #[test]
    fn test_select_filtered() {
        let mut conn = create_connection_and_table();
        let tx = conn.transaction().unwrap();
        assert!(AttendanceRecordTable::insert(&tx, date(2024, 1, 1), Role::Student, &Scope::class("6", "A", "MATH")).is_ok());
        assert!(AttendanceRecordTable::insert(&tx, date(2024, 1, 2), Role::Student, &Scope::class("7", "B", "MATH")).is_ok());
        assert!(AttendanceRecordTable::insert(&tx, date(2024, 1, 3), Role::Staff, &Scope::department("Admin")).is_ok());

        let all = AttendanceRecordTable::select_filtered(&tx, &RecordFilter::none());
        assert!(all.is_ok());
        let all = all.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id, 1);
        assert_eq!(all[0].scope, Scope::class("6", "A", "MATH"));

        let filter = RecordFilter { class_id: Some(String::from("7")), ..RecordFilter::default() };
        let by_class = AttendanceRecordTable::select_filtered(&tx, &filter);
        assert!(by_class.is_ok());
        let by_class = by_class.unwrap();
        assert_eq!(by_class.len(), 1);
        assert_eq!(by_class[0].id, 2);

        let filter = RecordFilter { role: Some(Role::Staff), ..RecordFilter::default() };
        let by_role = AttendanceRecordTable::select_filtered(&tx, &filter);
        assert!(by_role.is_ok());
        assert_eq!(by_role.unwrap()[0].scope, Scope::department("Admin"));

        let filter = RecordFilter::for_range(Some(date(2024, 1, 2)), Some(date(2024, 1, 3)));
        let by_range = AttendanceRecordTable::select_filtered(&tx, &filter);
        assert!(by_range.is_ok());
        assert_eq!(by_range.unwrap().len(), 2);
    }

    #[test]
    fn test_delete() {
        let mut conn = create_connection_and_table();
        let tx = conn.transaction().unwrap();
        assert!(AttendanceRecordTable::insert(&tx, date(2024, 1, 1), Role::Teacher, &Scope::subject("MATH")).is_ok());
        let result = AttendanceRecordTable::delete(&tx, 1);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), true);
        assert!(tx.commit().is_ok());
    }

    #[test]
    fn test_delete_missing() {
        let mut conn = create_connection_and_table();
        let tx = conn.transaction().unwrap();
        let result = AttendanceRecordTable::delete(&tx, 1);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), false);
    }

    fn create_connection_and_table() -> Connection {
        let conn = Connection::open(":memory:");
        assert!(conn.is_ok());
        let conn = conn.unwrap();
        assert!(AttendanceRecordTable::create_table(&conn).is_ok());
        conn
    }
}
