//! Hotel persona classification — exact display-name matching

use crate::agent::Agent;

/// Display names that identify the hotel Q&A persona.
///
/// The bot was renamed once; both literals stay recognized so records
/// created before the rename keep working. Matching is exact and
/// case-sensitive with no trimming.
pub const HOTEL_AGENT_NAMES: &[&str] = &["Hotel Q&A Bot", "Hotel Bot"];

/// Name used when seeding the hotel persona into an empty store.
pub const HOTEL_AGENT_NAME: &str = "Hotel Q&A Bot";

/// Seed description for the hotel persona.
pub const HOTEL_AGENT_DESCRIPTION: &str =
    "A helpful bot that answers questions about hotel services, amenities, and policies.";

/// Returns true if this agent is the distinguished hotel Q&A persona.
pub fn is_hotel_agent(agent: &Agent) -> bool {
    is_hotel_agent_name(&agent.name)
}

/// Name-only variant, for callers that have not built a full record yet.
pub fn is_hotel_agent_name(name: &str) -> bool {
    HOTEL_AGENT_NAMES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentCategory, AgentStatus};

    fn agent_named(name: &str) -> Agent {
        Agent::new("1", name, AgentCategory::Support, AgentStatus::Active, None)
    }

    #[test]
    fn test_recognizes_current_name() {
        assert!(is_hotel_agent(&agent_named("Hotel Q&A Bot")));
    }

    #[test]
    fn test_recognizes_historical_name() {
        assert!(is_hotel_agent(&agent_named("Hotel Bot")));
    }

    #[test]
    fn test_rejects_other_agents() {
        assert!(!is_hotel_agent(&agent_named("Sales Agent")));
        assert!(!is_hotel_agent(&agent_named("")));
    }

    #[test]
    fn test_rejects_near_misses() {
        // Exact match only: case variants and padding do not count
        assert!(!is_hotel_agent_name("hotel q&a bot"));
        assert!(!is_hotel_agent_name("HOTEL BOT"));
        assert!(!is_hotel_agent_name(" Hotel Q&A Bot"));
        assert!(!is_hotel_agent_name("Hotel Q&A Bot "));
        assert!(!is_hotel_agent_name("Hotel"));
        assert!(!is_hotel_agent_name("Hotel Q&A"));
    }

    #[test]
    fn test_category_does_not_matter() {
        let mut agent = agent_named("Hotel Q&A Bot");
        agent.category = AgentCategory::Marketing;
        agent.status = AgentStatus::Inactive;
        assert!(is_hotel_agent(&agent));
    }
}
