//! `drift route` and `drift branches`.

use drift_client::DriftClient;
use drift_core::{ConversationId, Role};
use serde_json::json;
use tracing::info;

use super::print_json;

pub async fn route(
    client: &DriftClient,
    conversation: Option<String>,
    content: &str,
    role: Role,
) -> Result<(), Box<dyn std::error::Error>> {
    let conversation_id = match conversation {
        Some(id) => ConversationId::from(&id),
        None => {
            let id = ConversationId::new();
            info!(conversation_id = %id, "Starting a new conversation");
            id
        }
    };

    let decision = client
        .route(conversation_id.as_str(), content, Some(role))
        .await?;

    print_json(&json!({
        "conversationId": conversation_id,
        "decision": decision,
    }))
}

pub async fn branches(
    client: &DriftClient,
    conversation_id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let branches = client.get_branches(conversation_id).await?;
    print_json(&branches)
}
