use std::collections::BTreeMap;
use std::convert::Infallible;
use chrono::NaiveDate;
use serde::{Serialize, Deserialize};
use warp::http::StatusCode;
use warp::{reply, Reply};
use crate::domain::attendance_record::RecordDraft;
use crate::domain::promotion::{PromotionRequest, RejectReason};
use crate::domain::record_filter::RecordFilter;
use crate::error::LedgerError;
use crate::registrar::registrar_facade::MutexRegistrar;

#[derive(Serialize, Deserialize, Debug, Eq, PartialEq)]
struct ErrorResult {
    error: String,

    // Validation rejections of a promotion whose commit failed
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    rejected: Option<BTreeMap<String, RejectReason>>
}

/// Query parameters of GET /attendance/summary. The person ids arrive as one
/// comma-separated parameter.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    person_ids: Option<String>,
    date: Option<NaiveDate>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>
}

impl SummaryQuery {
    fn person_ids(&self) -> Option<Vec<String>> {
        self.person_ids.as_ref().map(|ids| {
            ids.split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(String::from)
                .collect()
        })
    }

    fn filter(&self) -> RecordFilter {
        RecordFilter {
            date: self.date,
            from: self.from,
            to: self.to,
            ..RecordFilter::default()
        }
    }
}

fn error_status(error: &LedgerError) -> StatusCode {
    match error {
        LedgerError::InvalidScope { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        LedgerError::InvalidTargetClass(_) => StatusCode::UNPROCESSABLE_ENTITY,
        LedgerError::CommitFailed { .. } => StatusCode::SERVICE_UNAVAILABLE,
        LedgerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn error_result(error: &LedgerError) -> ErrorResult {
    let rejected = match error {
        LedgerError::CommitFailed { rejected, .. } if !rejected.is_empty() => Some(rejected.clone()),
        _ => None
    };
    ErrorResult { error: error.to_string(), rejected }
}

fn error_reply(error: LedgerError) -> Box<dyn Reply> {
    let message = error_result(&error);
    Box::new(reply::with_status(reply::json(&message), error_status(&error)))
}

pub async fn put_attendance(registrar: MutexRegistrar, draft: RecordDraft) -> Result<Box<dyn Reply>, Infallible> {
    let mut registrar = registrar.lock().unwrap();
    return match registrar.upsert_attendance(&draft) {
        Ok(outcome) => Ok(Box::new(reply::json(&outcome))),
        Err(error) => Ok(error_reply(error))
    }
}

pub async fn get_attendance(registrar: MutexRegistrar, filter: RecordFilter) -> Result<Box<dyn Reply>, Infallible> {
    let mut registrar = registrar.lock().unwrap();
    return match registrar.list_attendance(&filter) {
        Ok(records) => Ok(Box::new(reply::json(&records))),
        Err(error) => Ok(error_reply(error))
    }
}

pub async fn delete_attendance(registrar: MutexRegistrar, record_id: u32) -> Result<Box<dyn Reply>, Infallible> {
    let mut registrar = registrar.lock().unwrap();
    return match registrar.delete_attendance(record_id) {
        Ok(result) => {
            match result {
                true => Ok(Box::new(reply())),
                false => Ok(Box::new(reply::with_status("Attendance record not found", StatusCode::NOT_FOUND)))
            }
        },
        Err(error) => Ok(error_reply(error))
    }
}

pub async fn get_attendance_summary(registrar: MutexRegistrar, query: SummaryQuery) -> Result<Box<dyn Reply>, Infallible> {
    let mut registrar = registrar.lock().unwrap();
    let person_ids = query.person_ids();
    return match registrar.summarize(&query.filter(), person_ids.as_deref()) {
        Ok(summaries) => Ok(Box::new(reply::json(&summaries))),
        Err(error) => Ok(error_reply(error))
    }
}

pub async fn post_promotions(registrar: MutexRegistrar, request: PromotionRequest) -> Result<Box<dyn Reply>, Infallible> {
    let mut registrar = registrar.lock().unwrap();
    return match registrar.promote(&request) {
        Ok(result) => Ok(Box::new(reply::json(&result))),
        Err(error) => Ok(error_reply(error))
    }
}
