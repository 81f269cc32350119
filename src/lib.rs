pub mod database;
pub mod domain;
pub mod error;
pub mod registrar;
pub mod rest;
