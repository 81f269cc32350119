use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::domain::attendance_status::AttendanceStatus;
use crate::domain::attendance_summary::AttendanceSummary;

///
/// A map of [AttendanceSummary](crate::domain::attendance_summary::AttendanceSummary)
/// objects with person ids as keys. The implementation with an encapsulated
/// map was chosen to produce the desired json output
/// <code>{ <person_id>: <summary>, ... }</code>.
///
#[derive(Serialize, Deserialize, Debug, Eq, PartialEq)]
pub struct SummaryMap(BTreeMap<String, AttendanceSummary>);

impl SummaryMap {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Ensures the person appears in the map, with all-zero counters if
    /// nothing was counted yet.
    pub fn seed(&mut self, person_id: &str) {
        self.0.entry(String::from(person_id)).or_default();
    }

    pub fn count(&mut self, person_id: &str, status: AttendanceStatus) {
        self.0.entry(String::from(person_id)).or_default().count(status);
    }

    pub fn contains(&self, person_id: &str) -> bool {
        self.0.contains_key(person_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, person_id: &str) -> &AttendanceSummary {
        self.0.get(person_id).unwrap() // Panic accepted
    }
}
