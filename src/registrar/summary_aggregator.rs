use crate::domain::attendance_record::AttendanceRecord;
use crate::domain::summary_map::SummaryMap;

// This is just a namespace to keep method names short
pub struct SummaryAggregator;

impl SummaryAggregator {
    ///
    /// Folds a window of attendance records into per-person counters.
    /// Pure over its input: no hidden state, and the result does not depend
    /// on the order of the records.
    ///
    /// With an explicit person id list, only those persons appear in the
    /// result, with all-zero counters if no record mentions them. Without
    /// one, every person found in the records appears.
    ///
    pub fn summarize(records: &[AttendanceRecord], person_ids: Option<&[String]>) -> SummaryMap {
        let mut summaries = SummaryMap::new();
        if let Some(person_ids) = person_ids {
            for person_id in person_ids {
                summaries.seed(person_id);
            }
        }
        for record in records {
            for entry in &record.entries {
                if person_ids.is_some() && !summaries.contains(&entry.person_id) {
                    continue;
                }
                summaries.count(&entry.person_id, entry.status);
            }
        }
        summaries
    }
}
