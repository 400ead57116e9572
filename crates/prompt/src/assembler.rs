//! The prompt assembler.
//!
//! Stateless apart from its resolved options: build one and reuse it across
//! contexts. Identical inputs always produce identical outputs.

use drift_core::{BranchFactSet, Context, ContextMessage, Fact, Role};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::options::{PromptInput, PromptOptions, TemplateContext};

/// A system prompt plus the branch's messages, ready for an LLM call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembledPrompt {
    pub system: String,
    pub messages: Vec<ContextMessage>,
}

impl AssembledPrompt {
    /// The system prompt as a leading system message, followed by the
    /// conversation messages.
    pub fn to_chat_messages(&self) -> Vec<ContextMessage> {
        let mut out = Vec::with_capacity(self.messages.len() + 1);
        out.push(ContextMessage::new(Role::System, self.system.clone()));
        out.extend(self.messages.iter().cloned());
        out
    }
}

/// Assembles prompts from branch contexts.
#[derive(Debug, Clone, Default)]
pub struct PromptAssembler {
    options: PromptOptions,
}

impl PromptAssembler {
    /// Create an assembler, resolving the legacy string form up front.
    pub fn new(input: impl Into<PromptInput>) -> Self {
        Self {
            options: input.into().into_options(),
        }
    }

    pub fn options(&self) -> &PromptOptions {
        &self.options
    }

    /// Assemble the prompt for one context.
    pub fn assemble(&self, context: &Context) -> AssembledPrompt {
        let template_ctx = self.template_context(context);

        let system = match &self.options.template {
            Some(template) => template.render(&template_ctx),
            None => self.render_default(&template_ctx),
        };

        trace!(
            facts = template_ctx.facts.len(),
            other_topics = template_ctx.other_topics.len(),
            messages = context.messages.len(),
            system_len = system.len(),
            "Assembled prompt"
        );

        AssembledPrompt {
            system,
            messages: context
                .messages
                .iter()
                .map(|m| ContextMessage::new(m.role.clone(), m.content.clone()))
                .collect(),
        }
    }

    /// The exact inputs a custom template would receive for `context`.
    pub fn template_context(&self, context: &Context) -> TemplateContext {
        TemplateContext {
            system_prompt: self.options.system_prompt.clone(),
            branch_topic: context.branch_topic.clone(),
            facts: self.select_facts(&context.all_facts),
            other_topics: self.select_other_topics(&context.all_facts),
        }
    }

    /// Facts of the current branch, or of every branch when configured.
    /// Branch order first, then fact order within each branch.
    fn select_facts(&self, sets: &[BranchFactSet]) -> Vec<Fact> {
        if !self.options.include_facts {
            return Vec::new();
        }
        sets.iter()
            .filter(|set| self.options.facts_from_all_branches || set.is_current)
            .flat_map(|set| set.facts.iter().cloned())
            .collect()
    }

    /// Topics of every non-current branch, in order, duplicates kept.
    fn select_other_topics(&self, sets: &[BranchFactSet]) -> Vec<String> {
        if !self.options.include_other_topics {
            return Vec::new();
        }
        sets.iter()
            .filter(|set| !set.is_current)
            .map(|set| set.branch_topic.clone())
            .collect()
    }

    fn render_default(&self, ctx: &TemplateContext) -> String {
        let mut system = ctx.system_prompt.clone();
        system.push_str("\nCurrent topic: ");
        system.push_str(&ctx.branch_topic);

        if self.options.include_facts && !ctx.facts.is_empty() {
            let lines: Vec<String> = ctx
                .facts
                .iter()
                .map(|f| format!("- {}: {}", f.key, f.value))
                .collect();
            system.push_str("\nKnown facts:\n");
            system.push_str(&lines.join("\n"));
        }

        if self.options.include_other_topics && !ctx.other_topics.is_empty() {
            system.push_str("\nOther topics discussed: ");
            system.push_str(&ctx.other_topics.join(", "));
        }

        system.trim().to_string()
    }
}

/// Assemble a prompt for `context` in one call.
///
/// Accepts [`PromptOptions`], a bare system-prompt string, or an
/// `Option<PromptOptions>` (defaults when `None`).
pub fn build_prompt(context: &Context, input: impl Into<PromptInput>) -> AssembledPrompt {
    PromptAssembler::new(input).assemble(context)
}
