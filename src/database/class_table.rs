use const_format::formatcp;
use log::debug;
use rusqlite::{Connection, params, Result, Transaction};

pub const CLASS_TABLE: &'static str = "class";

const CREATE_CLASS_TABLE: &'static str = formatcp!(
    "CREATE TABLE IF NOT EXISTS {} (
        classId TEXT NOT NULL PRIMARY KEY,
        name TEXT
    )",
    CLASS_TABLE
);

const INSERT_CLASS: &'static str = formatcp!(
    "INSERT INTO {} (classId, name) VALUES (?, ?)",
    CLASS_TABLE
);

const EXISTS_CLASS: &'static str = formatcp!(
    "SELECT 1 FROM {} WHERE classId = ?",
    CLASS_TABLE
);

// This is just a namespace to keep method names short
pub struct ClassTable;

impl ClassTable {
    pub fn create_table(conn: &Connection) -> Result<()> {
        debug!("Execute\n{}", CREATE_CLASS_TABLE);
        conn.execute(CREATE_CLASS_TABLE, [])?;
        Ok(())
    }

    pub fn insert(tx: &Transaction, class_id: &str, name: Option<&str>) -> Result<()> {
        debug!("Execute\n{} with: {} {:?}", INSERT_CLASS, class_id, name);
        tx.execute(INSERT_CLASS, params![class_id, name])?;
        Ok(())
    }

    pub fn exists(tx: &Transaction, class_id: &str) -> Result<bool> {
        debug!("Execute\n{} with: {}", EXISTS_CLASS, class_id);
        let mut stmt = tx.prepare(EXISTS_CLASS)?;
        let mut rows = stmt.query([class_id])?;
        match rows.next()? { Some(_) => Ok(true), None => Ok(false) }
    }
}
