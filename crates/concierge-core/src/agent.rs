//! Agent records — identity, category, and activation status

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a string is not a recognized enum member.
///
/// Matching is exact and case-sensitive: `"sales"` is not a category.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseEnumError {
    #[error("invalid agent category '{0}' (expected Sales, Support, or Marketing)")]
    Category(String),
    #[error("invalid agent status '{0}' (expected Active or Inactive)")]
    Status(String),
}

/// Generic agent classification, one per category desk
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AgentCategory {
    Sales,
    Support,
    Marketing,
}

impl AgentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sales => "Sales",
            Self::Support => "Support",
            Self::Marketing => "Marketing",
        }
    }
}

impl FromStr for AgentCategory {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Sales" => Ok(Self::Sales),
            "Support" => Ok(Self::Support),
            "Marketing" => Ok(Self::Marketing),
            other => Err(ParseEnumError::Category(other.to_string())),
        }
    }
}

impl std::fmt::Display for AgentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether an agent accepts questions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AgentStatus {
    Active,
    Inactive,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl FromStr for AgentStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "Inactive" => Ok(Self::Inactive),
            other => Err(ParseEnumError::Status(other.to_string())),
        }
    }
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An agent record as stored and served over the wire.
///
/// The JSON form is camelCase with the category under the legacy field
/// name `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub category: AgentCategory,
    pub status: AgentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Agent {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: AgentCategory,
        status: AgentStatus,
        description: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            status,
            description,
            created_at: Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == AgentStatus::Active
    }
}
