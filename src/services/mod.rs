// src/services/mod.rs
pub mod calculations;
pub mod csv_import;
pub mod currency;
pub mod error;
pub mod geocoding;
pub mod market;
pub mod report;
pub mod session;
