//! # Drift Core
//!
//! Domain types, the response envelope, and the transport seam for the Drift
//! conversation-routing client. This crate has **no HTTP framework
//! dependencies** — it defines the model that the client, prompt and CLI
//! crates build against.
//!
//! ## Layout
//!
//! - [`message`] — conversation ids, roles and context messages
//! - [`branch`] — branches, facts, contexts and routing decisions
//! - [`envelope`] — the `{success, data, error}` wrapper on every response
//! - [`transport`] — the [`Transport`] trait the client issues requests through
//! - [`error`] — the error hierarchy

pub mod branch;
pub mod envelope;
pub mod error;
pub mod message;
pub mod transport;

// Re-export key types at crate root for ergonomics
pub use branch::{
    Branch, BranchFactSet, Context, Fact, FactsSnapshot, RouteAction, RouteDecision, RouteRequest,
};
pub use envelope::{Envelope, EnvelopeError};
pub use error::{Error, Result, TransportError};
pub use message::{ContextMessage, ConversationId, Role};
pub use transport::{HttpMethod, Transport};
