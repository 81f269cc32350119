pub mod attendance_entry_table;
pub mod attendance_record_table;
pub mod class_table;
pub mod roster_table;
