pub mod config;
pub mod error;
pub mod sink;
pub mod types;
