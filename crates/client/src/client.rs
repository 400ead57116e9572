//! The Drift client: named operations over a [`Transport`].

use drift_config::{ClientConfig, PathPrefixMode};
use drift_core::error::{Result, TransportError};
use drift_core::transport::Transport;
use drift_core::{Branch, Context, FactsSnapshot, Role, RouteDecision, RouteRequest};
use drift_prompt::{AssembledPrompt, PromptAssembler, PromptInput};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::http::HttpTransport;
use crate::paths::ApiPath;

/// Client for the routing service.
///
/// Holds no mutable state: the transport and the path-prefix mode are fixed
/// at construction, so one client can serve concurrent calls.
pub struct DriftClient<T = HttpTransport> {
    transport: T,
    prefix_mode: PathPrefixMode,
}

impl DriftClient<HttpTransport> {
    /// Create an HTTP-backed client. The path-prefix mode is resolved here,
    /// once, from the config.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let config = config.normalized();
        let prefix_mode = config.path_prefix_mode();
        let transport = HttpTransport::new(&config)?;
        debug!(base_url = %config.base_url, ?prefix_mode, "Created Drift client");
        Ok(Self {
            transport,
            prefix_mode,
        })
    }

    /// Create a client from `~/.drift/config.toml` and `DRIFT_*` variables.
    pub fn from_default_config() -> Result<Self> {
        Self::new(ClientConfig::load()?)
    }
}

impl<T: Transport> DriftClient<T> {
    /// Create a client over a custom transport.
    pub fn with_transport(transport: T, prefix_mode: PathPrefixMode) -> Self {
        Self {
            transport,
            prefix_mode,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn prefix_mode(&self) -> PathPrefixMode {
        self.prefix_mode
    }

    /// Route a message into a conversation. `role` defaults to user.
    pub async fn route(
        &self,
        conversation_id: &str,
        content: &str,
        role: Option<Role>,
    ) -> Result<RouteDecision> {
        let request = RouteRequest::new(conversation_id, content).with_role(role.unwrap_or_default());
        self.route_request(&request).await
    }

    /// Route a prepared [`RouteRequest`].
    pub async fn route_request(&self, request: &RouteRequest) -> Result<RouteDecision> {
        let body = serde_json::to_value(request)?;
        self.call(ApiPath::Route, Some(body)).await
    }

    /// List the branches of a conversation.
    pub async fn get_branches(&self, conversation_id: &str) -> Result<Vec<Branch>> {
        self.call(ApiPath::Branches { conversation_id }, None).await
    }

    /// Fetch a branch's messages and the fact sets of every branch.
    pub async fn get_context(&self, branch_id: &str) -> Result<Context> {
        self.call(ApiPath::Context { branch_id }, None).await
    }

    /// Ask the service to (re-)extract facts from a branch.
    pub async fn extract_facts(&self, branch_id: &str) -> Result<FactsSnapshot> {
        self.call(ApiPath::ExtractFacts { branch_id }, None).await
    }

    /// Fetch the facts currently held for a branch.
    pub async fn get_facts(&self, branch_id: &str) -> Result<FactsSnapshot> {
        self.call(ApiPath::Facts { branch_id }, None).await
    }

    /// Fetch a branch's context and assemble a prompt from it.
    ///
    /// Accepts [`PromptOptions`](drift_prompt::PromptOptions), a bare
    /// system-prompt string, or `None::<PromptOptions>`. Every call performs
    /// its own context fetch.
    pub async fn build_prompt(
        &self,
        branch_id: &str,
        options: impl Into<PromptInput>,
    ) -> Result<AssembledPrompt> {
        let assembler = PromptAssembler::new(options);
        let context = self.get_context(branch_id).await?;
        Ok(assembler.assemble(&context))
    }

    async fn call<R: DeserializeOwned>(&self, path: ApiPath<'_>, body: Option<Value>) -> Result<R> {
        let resolved = path.resolve(self.prefix_mode);
        let data = self.transport.request(path.method(), &resolved, body).await?;
        serde_json::from_value(data).map_err(|e| {
            TransportError::Protocol(format!("unexpected {} payload: {e}", path.name())).into()
        })
    }
}
