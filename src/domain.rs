pub mod attendance_record;
pub mod attendance_status;
pub mod attendance_summary;
pub mod promotion;
pub mod record_filter;
pub mod role;
pub mod roster_member;
pub mod scope;
pub mod summary_map;
