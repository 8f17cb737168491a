// src/handlers/mod.rs
pub mod analysis;
pub mod contact;
pub mod currency;
pub mod error;
pub mod geocode;
pub mod history;
pub mod market;
pub mod report;
pub mod upload;
