use std::collections::BTreeMap;
use thiserror::Error;
use crate::domain::promotion::RejectReason;
use crate::domain::role::Role;

///
/// Fatal error taxonomy of the ledger and the promotion engine.
/// Per-entry and per-student rejections are not errors; they are carried
/// in the operation results ([UpsertOutcome](crate::domain::attendance_record::UpsertOutcome),
/// [PromotionResult](crate::domain::promotion::PromotionResult)).
/// Missing records are reported as <code>Ok(None)</code> or <code>Ok(false)</code>.
///
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("scope shape does not match role {role:?}")]
    InvalidScope { role: Role },

    #[error("unknown target class '{0}'")]
    InvalidTargetClass(String),

    /// The rejections found during validation survive the failed commit so
    /// the caller still receives them for diagnostics.
    #[error("commit failed after {attempts} attempts")]
    CommitFailed { attempts: u32, rejected: BTreeMap<String, RejectReason> },

    #[error(transparent)]
    Storage(#[from] rusqlite::Error)
}
