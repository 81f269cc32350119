use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Serialize, Deserialize};

///
/// Tagged role of an attendance record. All role-dependent behavior goes
/// through exhaustive matches on this enum; there are no string comparisons.
///
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Role {
    Student,
    Teacher,
    Staff
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Teacher => "Teacher",
            Role::Staff => "Staff"
        }
    }

    pub fn from_str(value: &str) -> Option<Role> {
        match value {
            "Student" => Some(Role::Student),
            "Teacher" => Some(Role::Teacher),
            "Staff" => Some(Role::Staff),
            _ => None
        }
    }
}

impl ToSql for Role {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for Role {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Role::from_str(value.as_str()?).ok_or(FromSqlError::InvalidType)
    }
}
