//! LifeLoom CLI - Command line interface for LifeLoom
//!
//! Turn a goal and a timeframe into a weekly plan.

mod commands;

use clap::{Parser, Subcommand};
use lifeloom_core::{Config, Secrets};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{ParseArgs, PlanArgs, PromptArgs, SecretsArgs};

/// LifeLoom: weekly plans for your goals
#[derive(Parser, Debug)]
#[command(name = "lifeloom")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Model to use (overrides config and env)
    #[arg(long, global = true, env = "LIFELOOM_MODEL")]
    model: Option<String>,

    /// Sampling temperature (overrides config and env)
    #[arg(long, global = true)]
    temperature: Option<f32>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Generate a weekly plan for a goal
    #[command(visible_alias = "p")]
    Plan(PlanArgs),

    /// Parse plan markdown from a file or stdin
    Parse(ParseArgs),

    /// Show the prompt that would be sent to the model
    Prompt(PromptArgs),

    /// Manage the secrets file
    Secrets(SecretsArgs),

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    // Load configuration with overrides
    let config = Config::load_with_overrides(cli.model.clone(), cli.temperature)?;

    if cli.verbose {
        tracing::info!(
            model = %config.llm.model,
            temperature = config.llm.temperature,
            api_url = %config.llm.api_url,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("lifeloom {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Plan(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        Some(Commands::Parse(args)) => {
            args.execute(cli.verbose)?;
        }
        Some(Commands::Prompt(args)) => {
            args.execute()?;
        }
        Some(Commands::Secrets(args)) => {
            args.execute()?;
        }
        Some(Commands::Config) => {
            println!("LifeLoom Configuration");
            println!("======================");
            println!();
            println!("LLM Settings:");
            println!("  model: {}", config.llm.model);
            println!("  temperature: {}", config.llm.temperature);
            println!("  api_url: {}", config.llm.api_url);
            println!("  timeout: {}s", config.llm.timeout.as_secs());
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
            let api_key = match Secrets::load().map(|s| s.groq_api_key()) {
                Ok(Some(key)) => format!("set (from {})", key.source()),
                Ok(None) => "not set".to_string(),
                Err(e) => format!("unavailable ({})", e),
            };
            println!("Groq API key: {}", api_key);
        }
        None => {
            println!("LifeLoom - weekly plans for your goals");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
