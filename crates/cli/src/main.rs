//! Drift CLI — command-line front end for the conversation-routing service.
//!
//! Commands:
//! - `route`     — Route a message into a conversation
//! - `branches`  — List a conversation's branches
//! - `context`   — Show a branch's messages and facts
//! - `extract`   — Re-extract facts from a branch
//! - `facts`     — Show a branch's facts
//! - `prompt`    — Assemble an LLM prompt from a branch
//! - `config`    — Inspect or initialize configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use drift_client::{ClientConfig, DriftClient};
use drift_config::ConfigError;
use drift_core::Role;

mod commands;

#[derive(Parser)]
#[command(
    name = "drift",
    about = "Drift — conversation routing and prompt assembly",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to load instead of ~/.drift/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the service base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Override the API key
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Override the request timeout in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Treat the service as the hosted gateway (no /api/v1 prefix)
    #[arg(long, global = true, conflicts_with = "self_hosted")]
    hosted: bool,

    /// Treat the service as self-hosted (keep the /api/v1 prefix)
    #[arg(long, global = true)]
    self_hosted: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Route a message into a conversation
    Route {
        /// Message content
        content: String,

        /// Conversation to route into; a new one is started if omitted
        #[arg(short, long)]
        conversation: Option<String>,

        /// Message author (user, assistant, system, tool, or any other role name)
        #[arg(short, long, default_value = "user")]
        role: Role,
    },

    /// List the branches of a conversation
    Branches { conversation_id: String },

    /// Show a branch's messages and the facts of every branch
    Context { branch_id: String },

    /// Ask the service to extract facts from a branch
    Extract { branch_id: String },

    /// Show the facts held for a branch
    Facts { branch_id: String },

    /// Assemble an LLM prompt from a branch's context
    Prompt {
        branch_id: String,

        /// Replace the default system prompt
        #[arg(short, long)]
        system: Option<String>,

        /// Leave the "Known facts" section out
        #[arg(long)]
        no_facts: bool,

        /// Leave the "Other topics discussed" line out
        #[arg(long)]
        no_other_topics: bool,

        /// Include facts from every branch, not only the current one
        #[arg(long)]
        all_branches: bool,

        /// Print chat-completions messages instead of the system text
        #[arg(long, conflicts_with = "json")]
        chat: bool,

        /// Print the assembled prompt as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect or initialize configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration (API key redacted)
    Show,
    /// Print the config file path
    Path,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(ClientConfig::config_path)
    }

    fn hosted_override(&self) -> Option<bool> {
        match (self.hosted, self.self_hosted) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    /// File, then `DRIFT_*` variables, then command-line flags.
    fn resolve_config(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<ClientConfig, ConfigError> {
        let mut config = ClientConfig::load_from(&self.config_path())?;
        config.apply_overrides(env)?;

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(api_key) = &self.api_key {
            config.api_key = Some(api_key.clone());
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
        if let Some(hosted) = self.hosted_override() {
            config.hosted = Some(hosted);
        }

        let config = config.normalized();
        config.validate()?;
        Ok(config)
    }

    fn client(&self) -> Result<DriftClient, Box<dyn std::error::Error>> {
        let config = self.resolve_config(|name| std::env::var(name).ok())?;
        Ok(DriftClient::new(config)?)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Route {
            content,
            conversation,
            role,
        } => commands::route::route(&cli.client()?, conversation.clone(), content, role.clone()).await?,
        Commands::Branches { conversation_id } => {
            commands::route::branches(&cli.client()?, conversation_id).await?
        }
        Commands::Context { branch_id } => commands::facts::context(&cli.client()?, branch_id).await?,
        Commands::Extract { branch_id } => commands::facts::extract(&cli.client()?, branch_id).await?,
        Commands::Facts { branch_id } => commands::facts::facts(&cli.client()?, branch_id).await?,
        Commands::Prompt {
            branch_id,
            system,
            no_facts,
            no_other_topics,
            all_branches,
            chat,
            json,
        } => {
            let options =
                commands::prompt::options(system.clone(), *no_facts, *no_other_topics, *all_branches);
            let format = commands::prompt::OutputFormat::from_flags(*chat, *json);
            commands::prompt::run(&cli.client()?, branch_id, options, format).await?
        }
        Commands::Config { action } => match action {
            Some(ConfigAction::Path) => commands::config_cmd::path(&cli.config_path())?,
            Some(ConfigAction::Init { force }) => {
                commands::config_cmd::init(&cli.config_path(), *force)?
            }
            Some(ConfigAction::Show) | None => {
                let config = cli.resolve_config(|name| std::env::var(name).ok())?;
                commands::config_cmd::show(&config, &cli.config_path())?
            }
        },
    }

    Ok(())
}
