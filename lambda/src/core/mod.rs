//! Configuration, billing data model and reporting window.

pub mod config;
pub mod models;
pub mod period;
