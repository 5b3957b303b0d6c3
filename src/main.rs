//! litellm-router - inspect routing decisions for a router configuration
//!
//! # Usage
//!
//! ```bash
//! # Validate a configuration and list its model groups
//! litellm-router --config config/router.yaml check
//!
//! # Show which deployment serves a model
//! LITELLM_ROUTER_CONFIG=config/router.yaml litellm-router select --model claude-sonnet
//!
//! # Classify an upstream failure
//! litellm-router classify --deployment anthropic-primary --status 400 \
//!     --message "Your credit balance is too low" --provider anthropic
//! ```

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use litellm_router::config::Config;
use litellm_router::core::router::{
    DeploymentRegistry, FailureClassifier, FailureDescriptor, ProviderFamily, RequestOutcome,
    Router, UpstreamErrorKind,
};
use litellm_router::utils::logging::{LogFormat, init_logging};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "litellm-router", author, version, about, long_about = None)]
struct Cli {
    /// Path to the router configuration file
    #[arg(short, long, env = "LITELLM_ROUTER_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log output format (plain or json)
    #[arg(long, default_value = "plain", global = true)]
    log_format: LogFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and validate the configuration, then list model groups
    Check,

    /// Print the deployment the selector picks for a model
    Select {
        /// Model group or alias
        #[arg(short, long)]
        model: String,
    },

    /// Classify an upstream failure and print the resulting signal as JSON
    Classify {
        /// Deployment that produced the failure
        #[arg(short, long)]
        deployment: String,

        /// HTTP status returned by the upstream
        #[arg(short, long)]
        status: u16,

        /// Provider error message
        #[arg(short, long)]
        message: String,

        /// Provider family (defaults to the configured deployment's provider)
        #[arg(short, long)]
        provider: Option<ProviderFamily>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    init_logging(cli.log_format, level);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Check => {
            let config = load_config(cli.config.as_deref()).await?;
            check(&config)
        }
        Command::Select { model } => {
            let config = load_config(cli.config.as_deref()).await?;
            select(&config, &model)
        }
        Command::Classify {
            deployment,
            status,
            message,
            provider,
        } => {
            let config = match cli.config.as_deref() {
                Some(path) => Some(load_config(Some(path)).await?),
                None => None,
            };
            classify(config.as_ref(), deployment, status, message, provider)
        }
    }
}

async fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = path.context("no configuration file given (use --config or LITELLM_ROUTER_CONFIG)")?;
    Config::from_file(path)
        .await
        .with_context(|| format!("failed to load {}", path.display()))
}

fn check(config: &Config) -> Result<()> {
    let registry = DeploymentRegistry::from_config(config);
    let models = registry.list_models();

    println!(
        "Configuration OK: {} deployments in {} model groups",
        registry.len(),
        models.len()
    );

    for model in &models {
        println!("{}", model);
        for deployment in registry.deployments_for_model(model)? {
            println!(
                "  {:<24} {:<40} provider={} weight={} rpm={} tpm={}",
                deployment.id,
                deployment.model,
                deployment.provider,
                deployment.params.weight(),
                deployment.params.rpm(),
                deployment.params.tpm(),
            );
        }
    }

    for (alias, target) in &config.router_settings.model_group_alias {
        println!("alias {} -> {}", alias, target);
    }

    Ok(())
}

fn select(config: &Config, model: &str) -> Result<()> {
    let router = Router::from_config(config)?;
    let (deployment, tier) = router.route_with_tier(model)?;

    println!(
        "{} -> {} ({}) [tier: {}]",
        model, deployment.id, deployment.model, tier
    );
    Ok(())
}

fn classify(
    config: Option<&Config>,
    deployment_id: String,
    status: u16,
    message: String,
    provider: Option<ProviderFamily>,
) -> Result<()> {
    let mut failure = FailureDescriptor::new(deployment_id, UpstreamErrorKind::from_status(status))
        .with_status(status)
        .with_message(message);

    let classifier = match config {
        Some(config) => {
            if provider.is_none() {
                failure.provider = DeploymentRegistry::from_config(config)
                    .get_deployment(&failure.deployment_id)
                    .map(|d| d.provider.clone());
            }
            config.classifier()?
        }
        None => FailureClassifier::default(),
    };

    if let Some(provider) = provider {
        failure = failure.with_provider(provider);
    }

    let signal = classifier.classify(&RequestOutcome::failure(failure));
    println!("{}", serde_json::to_string_pretty(&signal)?);
    Ok(())
}
