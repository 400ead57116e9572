//! `drift prompt` — Assemble an LLM prompt from a branch's context.

use drift_client::{AssembledPrompt, DriftClient, PromptOptions};

use super::print_json;

/// How the assembled prompt is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// The system text, verbatim
    System,
    /// `{system, messages}` as JSON
    Json,
    /// Chat-completions messages as JSON
    Chat,
}

impl OutputFormat {
    pub fn from_flags(chat: bool, json: bool) -> Self {
        if chat {
            OutputFormat::Chat
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::System
        }
    }
}

/// Build assembler options from the command-line flags.
pub fn options(
    system: Option<String>,
    no_facts: bool,
    no_other_topics: bool,
    all_branches: bool,
) -> PromptOptions {
    let mut options = PromptOptions::new()
        .with_facts(!no_facts)
        .with_other_topics(!no_other_topics)
        .with_facts_from_all_branches(all_branches);
    if let Some(system) = system {
        options = options.with_system_prompt(system);
    }
    options
}

pub async fn run(
    client: &DriftClient,
    branch_id: &str,
    options: PromptOptions,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let prompt = client.build_prompt(branch_id, options).await?;
    render(&prompt, format)
}

fn render(prompt: &AssembledPrompt, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::System => {
            println!("{}", prompt.system);
            Ok(())
        }
        OutputFormat::Json => print_json(prompt),
        OutputFormat::Chat => print_json(&prompt.to_chat_messages()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_prompt::DEFAULT_SYSTEM_PROMPT;

    #[test]
    fn default_flags_match_default_options() {
        let options = options(None, false, false, false);
        let defaults = PromptOptions::default();
        assert_eq!(options.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(options.include_facts, defaults.include_facts);
        assert_eq!(options.include_other_topics, defaults.include_other_topics);
        assert_eq!(options.facts_from_all_branches, defaults.facts_from_all_branches);
    }

    #[test]
    fn flags_invert_defaults() {
        let options = options(Some("You are terse.".into()), true, true, true);
        assert_eq!(options.system_prompt, "You are terse.");
        assert!(!options.include_facts);
        assert!(!options.include_other_topics);
        assert!(options.facts_from_all_branches);
    }

    #[test]
    fn chat_wins_over_json() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::System);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Chat);
    }
}
