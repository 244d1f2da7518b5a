//! Lambda handler and the fetch → format → post pipeline

pub mod handler;
pub mod report;

// Re-export the main handler for convenience
pub use handler::handler;
pub use report::{BillingReport, BillingReporter};
