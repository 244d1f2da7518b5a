//! All Microsoft Teams specific functionality

pub mod card_builder;
pub mod client;
pub mod message_formatter;

// Re-export main types for convenience
pub use card_builder::{MessageCard, build_message_card};
pub use client::{DeliveryOutcome, TeamsNotifier};
