//! Endpoint paths of the routing service.
//!
//! Every path is defined in its prefixed (`/api/v1/...`) form. Hosted
//! deployments get the same path with the prefix stripped; which form is
//! used is decided once per client from its [`PathPrefixMode`].

use drift_config::PathPrefixMode;
use drift_core::HttpMethod;

/// Prefix carried by every endpoint on a self-hosted service.
pub const API_PREFIX: &str = "/api/v1";

/// One endpoint of the routing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiPath<'a> {
    Route,
    Branches { conversation_id: &'a str },
    Context { branch_id: &'a str },
    ExtractFacts { branch_id: &'a str },
    Facts { branch_id: &'a str },
}

impl ApiPath<'_> {
    /// Short operation name, for logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ApiPath::Route => "route",
            ApiPath::Branches { .. } => "branches",
            ApiPath::Context { .. } => "context",
            ApiPath::ExtractFacts { .. } => "extract_facts",
            ApiPath::Facts { .. } => "facts",
        }
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            ApiPath::Route | ApiPath::ExtractFacts { .. } => HttpMethod::Post,
            ApiPath::Branches { .. } | ApiPath::Context { .. } | ApiPath::Facts { .. } => {
                HttpMethod::Get
            }
        }
    }

    /// The path with its `/api/v1` prefix.
    pub fn prefixed(&self) -> String {
        match self {
            ApiPath::Route => format!("{API_PREFIX}/drift/route"),
            ApiPath::Branches { conversation_id } => {
                format!("{API_PREFIX}/drift/branches/{conversation_id}")
            }
            ApiPath::Context { branch_id } => format!("{API_PREFIX}/context/{branch_id}"),
            ApiPath::ExtractFacts { branch_id } => format!("{API_PREFIX}/facts/{branch_id}/extract"),
            ApiPath::Facts { branch_id } => format!("{API_PREFIX}/facts/{branch_id}"),
        }
    }

    /// The path to send for the given deployment.
    pub fn resolve(&self, mode: PathPrefixMode) -> String {
        let full = self.prefixed();
        match mode {
            PathPrefixMode::WithPrefix => full,
            PathPrefixMode::NoPrefix => full
                .strip_prefix(API_PREFIX)
                .map(str::to_string)
                .unwrap_or(full),
        }
    }
}
