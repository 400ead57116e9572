//! Prompt assembly for branch-aware conversations.
//!
//! Turns a branch [`Context`](drift_core::Context) (its messages plus the fact
//! sets of every branch) into a system prompt and a message list ready to be
//! sent to a language model.
//!
//! # Algorithm
//!
//! | Step | Input | Output |
//! |------|-------|--------|
//! | 1. Normalize options | [`PromptInput`] | [`PromptOptions`] |
//! | 2. Select facts | current (or all) fact sets | flat `key: value` list |
//! | 3. Select other topics | non-current fact sets | topic list |
//! | 4. Render | [`PromptTemplate`] or the default layout | system string |
//! | 5. Project messages | context messages | `{role, content}` list |
//!
//! Assembly is pure and deterministic. Malformed contexts (no current
//! branch, several current branches) degrade to partial output; assembly
//! never fails.

pub mod assembler;
pub mod options;

pub use assembler::{AssembledPrompt, PromptAssembler, build_prompt};
pub use options::{DEFAULT_SYSTEM_PROMPT, PromptInput, PromptOptions, PromptTemplate, TemplateContext};
