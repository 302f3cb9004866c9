//! concierge-core — agent records, classification, and question answering
//!
//! This crate provides:
//! - Agent records with the closed category and status enums
//! - Hotel persona classification by recognized display names
//! - Keyword-routed question answering over static topic and category tables
//! - A flat-file JSON store with a monotonic id counter

pub mod agent;
pub mod classifier;
pub mod qa;
pub mod store;

// Re-export main types for convenience
pub use agent::{Agent, AgentCategory, AgentStatus, ParseEnumError};
pub use classifier::{HOTEL_AGENT_NAME, HOTEL_AGENT_NAMES, is_hotel_agent};
pub use qa::{answer_question, resolve_category_answer, resolve_hotel_answer};
pub use store::{AgentStore, AgentUpdate};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_exports() {
        // Just verify that all main types are exported
        let _ = std::mem::size_of::<Agent>();
        let _ = std::mem::size_of::<AgentCategory>();
        let _ = std::mem::size_of::<AgentStore>();
        let _ = std::mem::size_of::<AgentUpdate>();
    }
}
