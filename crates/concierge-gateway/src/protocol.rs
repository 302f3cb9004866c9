//! Agent API wire types — JSON bodies shared by the server and CLI client

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response body for `POST /api/agents/{id}/ask`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskResponse {
    pub agent_id: String,
    pub agent_name: String,
    /// The question as answered, trimmed of surrounding whitespace.
    pub question: String,
    pub answer: String,
    pub timestamp: DateTime<Utc>,
}
