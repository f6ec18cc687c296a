pub mod config;
pub mod panel;
pub mod types;
