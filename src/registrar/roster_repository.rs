use std::collections::HashSet;
use chrono::NaiveDate;
use rusqlite::{Result, Transaction};
use crate::domain::role::Role;
use crate::domain::scope::Scope;

///
/// Authoritative source of the persons eligible to appear in a scope's
/// attendance entries. The ledger and the promotion engine only consume this
/// contract; roster maintenance belongs to the surrounding application.
///
pub trait RosterRepository {
    /// All enrolled person ids for the given scope at the given date.
    fn roster_for(&self, tx: &Transaction, role: Role, scope: &Scope, date: NaiveDate) -> Result<HashSet<String>>;

    /// True when the id belongs to a currently enrolled student.
    fn student_exists(&self, tx: &Transaction, student_id: &str) -> Result<bool>;

    /// True when the class id is a recognized class entity.
    fn is_valid_class(&self, tx: &Transaction, class_id: &str) -> Result<bool>;
}
