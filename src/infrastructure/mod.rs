pub mod config;
pub mod csv;
pub mod intent_api;
