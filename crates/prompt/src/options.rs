//! Prompt options, the legacy string form, and the template strategy.

use std::sync::Arc;

use drift_core::Fact;
use serde::{Deserialize, Serialize};

/// System prompt used when the caller does not supply one.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// The finalized inputs handed to a custom [`PromptTemplate`].
///
/// `system_prompt` is the configured prompt before any augmentation. Raw
/// messages are deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateContext {
    pub system_prompt: String,
    pub branch_topic: String,
    pub facts: Vec<Fact>,
    pub other_topics: Vec<String>,
}

/// Caller-supplied rendering of the system prompt.
///
/// Implement this for a type, or pass any `Fn(&TemplateContext) -> String`.
/// The returned string is used verbatim.
pub trait PromptTemplate: Send + Sync {
    fn render(&self, ctx: &TemplateContext) -> String;
}

impl<F> PromptTemplate for F
where
    F: Fn(&TemplateContext) -> String + Send + Sync,
{
    fn render(&self, ctx: &TemplateContext) -> String {
        self(ctx)
    }
}

/// What to include in an assembled prompt.
#[derive(Clone)]
pub struct PromptOptions {
    /// Base system prompt
    pub system_prompt: String,
    /// List the topics of the other branches
    pub include_other_topics: bool,
    /// Include extracted facts
    pub include_facts: bool,
    /// Take facts from every branch instead of only the current one
    pub facts_from_all_branches: bool,
    /// Replaces the default layout when set
    pub template: Option<Arc<dyn PromptTemplate>>,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
            include_other_topics: true,
            include_facts: true,
            facts_from_all_branches: false,
            template: None,
        }
    }
}

impl std::fmt::Debug for PromptOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptOptions")
            .field("system_prompt", &self.system_prompt)
            .field("include_other_topics", &self.include_other_topics)
            .field("include_facts", &self.include_facts)
            .field("facts_from_all_branches", &self.facts_from_all_branches)
            .field("template", &self.template.as_ref().map(|_| "<custom>"))
            .finish()
    }
}

impl PromptOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn with_facts(mut self, include: bool) -> Self {
        self.include_facts = include;
        self
    }

    pub fn with_other_topics(mut self, include: bool) -> Self {
        self.include_other_topics = include;
        self
    }

    pub fn with_facts_from_all_branches(mut self, all: bool) -> Self {
        self.facts_from_all_branches = all;
        self
    }

    pub fn with_template(mut self, template: impl PromptTemplate + 'static) -> Self {
        self.template = Some(Arc::new(template));
        self
    }
}

/// The two accepted shapes of the options argument.
///
/// The bare-string form is kept for older callers and means "this system
/// prompt, everything else default". It is resolved once, at the entry
/// point, by [`PromptInput::into_options`].
#[derive(Debug, Clone)]
pub enum PromptInput {
    Options(PromptOptions),
    Legacy(String),
}

impl PromptInput {
    pub fn into_options(self) -> PromptOptions {
        match self {
            PromptInput::Options(options) => options,
            PromptInput::Legacy(system_prompt) => PromptOptions {
                system_prompt,
                ..PromptOptions::default()
            },
        }
    }
}

impl Default for PromptInput {
    fn default() -> Self {
        PromptInput::Options(PromptOptions::default())
    }
}

impl From<PromptOptions> for PromptInput {
    fn from(options: PromptOptions) -> Self {
        PromptInput::Options(options)
    }
}

impl From<String> for PromptInput {
    fn from(system_prompt: String) -> Self {
        PromptInput::Legacy(system_prompt)
    }
}

impl From<&str> for PromptInput {
    fn from(system_prompt: &str) -> Self {
        PromptInput::Legacy(system_prompt.to_string())
    }
}

impl From<Option<PromptOptions>> for PromptInput {
    fn from(options: Option<PromptOptions>) -> Self {
        options.map(PromptInput::Options).unwrap_or_default()
    }
}
