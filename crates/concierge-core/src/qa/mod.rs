//! Question answering — keyword-routed replies for every agent persona
//!
//! Questions addressed to the hotel bot are resolved against the topic
//! table; everyone else is answered by their category's response desk. Both
//! paths are pure lookups over static tables and always produce an answer.

pub mod categories;
pub mod topics;

pub use categories::{category_greeting, resolve_category_answer};
pub use topics::resolve_hotel_answer;

use crate::agent::Agent;
use crate::classifier::is_hotel_agent;

/// Answer a question on behalf of an agent.
///
/// Dispatches on classification: the hotel persona gets topic-table
/// resolution, all other agents get their category desk. Pure and
/// infallible for any input strings.
pub fn answer_question(agent: &Agent, question: &str) -> String {
    if is_hotel_agent(agent) {
        resolve_hotel_answer(question)
    } else {
        resolve_category_answer(agent.category.as_str(), &agent.name, question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentCategory, AgentStatus};

    fn agent(name: &str, category: AgentCategory) -> Agent {
        Agent::new("1", name, category, AgentStatus::Active, None)
    }

    #[test]
    fn test_hotel_agent_uses_topic_table() {
        let bot = agent("Hotel Q&A Bot", AgentCategory::Support);
        let answer = answer_question(&bot, "What time is check-in?");
        assert!(answer.contains("3:00 PM"));
    }

    #[test]
    fn test_renamed_hotel_agent_still_routes_to_topics() {
        let bot = agent("Hotel Bot", AgentCategory::Support);
        let answer = answer_question(&bot, "Is there parking?");
        assert!(answer.contains("self-parking"));
    }

    #[test]
    fn test_other_agents_use_their_category_desk() {
        let bot = agent("Deal Closer", AgentCategory::Sales);
        let answer = answer_question(&bot, "What are your prices?");
        assert!(answer.to_lowercase().contains("pricing"));
    }

    #[test]
    fn test_support_agent_is_not_the_hotel_bot() {
        // Support category alone does not reach the hotel tables; only the
        // recognized display names do.
        let bot = agent("Help Desk", AgentCategory::Support);
        let answer = answer_question(&bot, "What time is check-in?");
        assert!(!answer.contains("3:00 PM"));
        assert!(answer.contains("Help Desk"));
    }
}
