pub mod cache;
pub mod config;
pub mod crm;
pub mod error;
pub mod geo;
pub mod inspection;
pub mod search;
pub mod telemetry;
