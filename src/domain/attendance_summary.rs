use serde::{Serialize, Deserialize};
use crate::domain::attendance_status::AttendanceStatus;

///
/// Per-person attendance counters, derived on demand from a window of
/// attendance records. Never persisted.
///
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct AttendanceSummary {
    pub present: u32,
    pub absent: u32,
    pub leave: u32
}

impl AttendanceSummary {
    pub fn new(present: u32, absent: u32, leave: u32) -> AttendanceSummary {
        AttendanceSummary { present, absent, leave }
    }

    pub fn count(&mut self, status: AttendanceStatus) {
        match status {
            AttendanceStatus::Present => self.present += 1,
            AttendanceStatus::Absent => self.absent += 1,
            AttendanceStatus::Leave => self.leave += 1
        }
    }
}
