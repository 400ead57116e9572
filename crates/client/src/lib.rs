//! Client for the Drift conversation-routing service.
//!
//! [`DriftClient`] exposes the service's operations (route, branches,
//! context, facts) and assembles LLM-ready prompts from a branch's context.
//! Requests go through a [`Transport`](drift_core::Transport); the default
//! is [`HttpTransport`].
//!
//! ```ignore
//! use drift_client::{ClientConfig, DriftClient, PromptOptions};
//!
//! let client = DriftClient::new(ClientConfig::new("http://localhost:3000").with_api_key(key))?;
//! let decision = client.route("conv-1", "I want to plan a trip to Paris", None).await?;
//! let prompt = client.build_prompt(&decision.branch_id, PromptOptions::default()).await?;
//! ```

pub mod client;
pub mod http;
pub mod paths;

pub use client::DriftClient;
pub use http::HttpTransport;
pub use paths::{API_PREFIX, ApiPath};

pub use drift_config::{ClientConfig, PathPrefixMode};
pub use drift_prompt::{AssembledPrompt, PromptInput, PromptOptions, PromptTemplate, TemplateContext};
