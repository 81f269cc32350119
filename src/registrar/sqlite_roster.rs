use std::collections::HashSet;
use chrono::NaiveDate;
use rusqlite::{Result, Transaction};
use crate::database::class_table::ClassTable;
use crate::database::roster_table::RosterTable;
use crate::domain::role::Role;
use crate::domain::scope::Scope;
use crate::registrar::roster_repository::RosterRepository;

///
/// [RosterRepository](crate::registrar::roster_repository::RosterRepository)
/// over the local roster and class tables. The store keeps no roster history,
/// so the current roster answers for any date.
///
pub struct SqliteRoster;

impl RosterRepository for SqliteRoster {
    fn roster_for(&self, tx: &Transaction, _role: Role, scope: &Scope, _date: NaiveDate) -> Result<HashSet<String>> {
        match scope {
            Scope::Class { class_id, section, .. } => RosterTable::select_class_roster(tx, class_id, section),
            Scope::Subject { subject_id } => RosterTable::select_subject_roster(tx, subject_id),
            Scope::Department { department } => RosterTable::select_department_roster(tx, department)
        }
    }

    fn student_exists(&self, tx: &Transaction, student_id: &str) -> Result<bool> {
        RosterTable::exists_enrolled(tx, student_id, Role::Student)
    }

    fn is_valid_class(&self, tx: &Transaction, class_id: &str) -> Result<bool> {
        ClassTable::exists(tx, class_id)
    }
}
