use std::collections::HashSet;
use const_format::formatcp;
use log::debug;
use rusqlite::{Connection, params, Result, Transaction};
use crate::domain::role::Role;
use crate::domain::roster_member::RosterMember;

pub const ROSTER_TABLE: &'static str = "roster";

const CREATE_ROSTER_TABLE: &'static str = formatcp!(
    "CREATE TABLE IF NOT EXISTS {} (
        personId TEXT NOT NULL PRIMARY KEY,
        role TEXT NOT NULL,
        classId TEXT,
        section TEXT,
        subjectId TEXT,
        department TEXT,
        enrolled INTEGER NOT NULL
    )",
    ROSTER_TABLE
);

const INSERT_MEMBER: &'static str = formatcp!(
    "INSERT INTO {} (personId, role, classId, section, subjectId, department, enrolled) VALUES (?, ?, ?, ?, ?, ?, ?)",
    ROSTER_TABLE
);

const SELECT_CLASS_ROSTER: &'static str = formatcp!(
    "SELECT personId FROM {} WHERE role = ? AND classId = ? AND section = ? AND enrolled = 1",
    ROSTER_TABLE
);

const SELECT_SUBJECT_ROSTER: &'static str = formatcp!(
    "SELECT personId FROM {} WHERE role = ? AND subjectId = ? AND enrolled = 1",
    ROSTER_TABLE
);

const SELECT_DEPARTMENT_ROSTER: &'static str = formatcp!(
    "SELECT personId FROM {} WHERE role = ? AND department = ? AND enrolled = 1",
    ROSTER_TABLE
);

const EXISTS_ENROLLED: &'static str = formatcp!(
    "SELECT 1 FROM {} WHERE personId = ? AND role = ? AND enrolled = 1",
    ROSTER_TABLE
);

const SELECT_CLASS_OF_STUDENT: &'static str = formatcp!(
    "SELECT classId FROM {} WHERE personId = ?",
    ROSTER_TABLE
);

const UPDATE_CLASS: &'static str = formatcp!(
    "UPDATE {} SET classId = ? WHERE personId = ? AND role = ?",
    ROSTER_TABLE
);

// This is just a namespace to keep method names short
pub struct RosterTable;

impl RosterTable {
    pub fn create_table(conn: &Connection) -> Result<()> {
        debug!("Execute\n{}", CREATE_ROSTER_TABLE);
        conn.execute(CREATE_ROSTER_TABLE, [])?;
        Ok(())
    }

    pub fn insert(tx: &Transaction, member: &RosterMember) -> Result<()> {
        debug!("Execute\n{}\nwith: {:?}", INSERT_MEMBER, member);
        let values = params![
            member.person_id,
            member.role,
            member.class_id,
            member.section,
            member.subject_id,
            member.department,
            member.enrolled
        ];
        tx.execute(INSERT_MEMBER, values)?;
        Ok(())
    }

    pub fn select_class_roster(tx: &Transaction, class_id: &str, section: &str) -> Result<HashSet<String>> {
        debug!("Execute\n{} with: {} {}", SELECT_CLASS_ROSTER, class_id, section);
        let mut stmt = tx.prepare(SELECT_CLASS_ROSTER)?;
        let rows = stmt.query_map(params![Role::Student, class_id, section], |row| row.get(0))?;
        rows.collect()
    }

    pub fn select_subject_roster(tx: &Transaction, subject_id: &str) -> Result<HashSet<String>> {
        debug!("Execute\n{} with: {}", SELECT_SUBJECT_ROSTER, subject_id);
        let mut stmt = tx.prepare(SELECT_SUBJECT_ROSTER)?;
        let rows = stmt.query_map(params![Role::Teacher, subject_id], |row| row.get(0))?;
        rows.collect()
    }

    pub fn select_department_roster(tx: &Transaction, department: &str) -> Result<HashSet<String>> {
        debug!("Execute\n{} with: {}", SELECT_DEPARTMENT_ROSTER, department);
        let mut stmt = tx.prepare(SELECT_DEPARTMENT_ROSTER)?;
        let rows = stmt.query_map(params![Role::Staff, department], |row| row.get(0))?;
        rows.collect()
    }

    /// True when the person exists, has the given role, and is enrolled.
    pub fn exists_enrolled(tx: &Transaction, person_id: &str, role: Role) -> Result<bool> {
        debug!("Execute\n{} with: {} {:?}", EXISTS_ENROLLED, person_id, role);
        let mut stmt = tx.prepare(EXISTS_ENROLLED)?;
        let mut rows = stmt.query(params![person_id, role])?;
        match rows.next()? { Some(_) => Ok(true), None => Ok(false) }
    }

    pub fn select_class_of_student(tx: &Transaction, person_id: &str) -> Result<Option<String>> {
        debug!("Execute\n{} with: {}", SELECT_CLASS_OF_STUDENT, person_id);
        let mut stmt = tx.prepare(SELECT_CLASS_OF_STUDENT)?;
        let mut rows = stmt.query(params![person_id])?;
        match rows.next()? {
            Some(row) => Ok(row.get(0)?),
            None => Ok(None)
        }
    }

    /// Assigns the class to a student row. Reapplying the same class is a
    /// plain no-op update.
    pub fn update_class(tx: &Transaction, person_id: &str, class_id: &str) -> Result<bool> {
        debug!("Execute\n{} with: {} {}", UPDATE_CLASS, person_id, class_id);
        let row_count = tx.execute(UPDATE_CLASS, params![class_id, person_id, Role::Student])?;
        Ok(row_count == 1)
    }
}
