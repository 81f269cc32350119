use chrono::NaiveDate;
use serde::Deserialize;
use crate::domain::role::Role;

///
/// Optional conjunction over stored attendance records. Every field that is
/// present narrows the result; an empty filter matches everything.
/// <code>date</code> is shorthand for <code>from = to = date</code>.
///
#[derive(Deserialize, Debug, Clone, Default, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecordFilter {
    pub date: Option<NaiveDate>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub role: Option<Role>,
    pub class_id: Option<String>,
    pub department: Option<String>
}

impl RecordFilter {
    pub fn none() -> RecordFilter {
        RecordFilter::default()
    }

    pub fn for_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> RecordFilter {
        RecordFilter { from, to, ..RecordFilter::default() }
    }

    /// Effective inclusive date bounds; an exact date wins over from/to.
    pub fn bounds(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        match self.date {
            Some(date) => (Some(date), Some(date)),
            None => (self.from, self.to)
        }
    }
}
