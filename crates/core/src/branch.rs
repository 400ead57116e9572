//! Branch, fact and context payloads returned by the routing service.
//!
//! All wire types use camelCase field names. Optional fields default when
//! absent; the shapes are the service's contract and are not validated
//! beyond deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::message::{ContextMessage, ConversationId, Role};

/// Body of a route call: one message to file under a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub conversation_id: ConversationId,
    pub content: String,
    #[serde(default)]
    pub role: Role,
}

impl RouteRequest {
    /// A user message; use [`RouteRequest::with_role`] for anything else.
    pub fn new(conversation_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            conversation_id: ConversationId(conversation_id.into()),
            content: content.into(),
            role: Role::default(),
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

/// What the router did with a routed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RouteAction {
    /// The message continues the current branch.
    #[serde(alias = "stay")]
    Stay,
    /// The message opened a new branch.
    #[serde(alias = "branch")]
    Branch,
    /// The message was routed back to an existing, non-current branch.
    #[serde(alias = "route")]
    Route,
    /// An action this client version does not know about.
    #[serde(other)]
    Unknown,
}

/// The routing service's decision for a single message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDecision {
    pub action: RouteAction,
    pub branch_id: String,
    #[serde(default)]
    pub branch_topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default)]
    pub is_new_branch: bool,
}

impl RouteDecision {
    /// Whether this decision created a branch that did not exist before.
    pub fn creates_branch(&self) -> bool {
        self.is_new_branch || self.action == RouteAction::Branch
    }
}

/// A conversation branch as listed by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub message_count: u64,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A key/value pair extracted from a branch's messages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fact {
    pub key: String,
    pub value: String,
}

impl Fact {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One branch's fact snapshot, as returned alongside a context fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchFactSet {
    #[serde(default)]
    pub branch_id: String,
    #[serde(default)]
    pub branch_topic: String,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default)]
    pub facts: Vec<Fact>,
}

/// A branch's messages together with the fact sets of every branch in the
/// conversation.
///
/// The service marks exactly one fact set as current. That is not enforced
/// here: zero or several current sets are passed through as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
    #[serde(default)]
    pub branch_topic: String,
    #[serde(default)]
    pub messages: Vec<ContextMessage>,
    #[serde(default)]
    pub all_facts: Vec<BranchFactSet>,
}

/// The facts currently held for one branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactsSnapshot {
    #[serde(default)]
    pub branch_id: String,
    #[serde(default)]
    pub facts: Vec<Fact>,
}
