pub mod attendance_ledger;
pub mod promotion_engine;
pub mod registrar_facade;
pub mod roster_repository;
pub mod sqlite_roster;
pub mod summary_aggregator;
