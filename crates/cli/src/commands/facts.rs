//! `drift context`, `drift extract`, `drift facts`.

use drift_client::DriftClient;

use super::print_json;

pub async fn context(client: &DriftClient, branch_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let context = client.get_context(branch_id).await?;
    print_json(&context)
}

pub async fn extract(client: &DriftClient, branch_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = client.extract_facts(branch_id).await?;
    print_json(&snapshot)
}

pub async fn facts(client: &DriftClient, branch_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = client.get_facts(branch_id).await?;
    print_json(&snapshot)
}
