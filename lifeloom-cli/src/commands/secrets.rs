//! Secrets commands

use clap::{Args, Subcommand};
use lifeloom_core::Secrets;

/// Secrets management commands
#[derive(Args, Debug)]
pub struct SecretsArgs {
    #[command(subcommand)]
    pub command: SecretsCommand,
}

#[derive(Subcommand, Debug)]
pub enum SecretsCommand {
    /// Create a secrets file template (chmod 600)
    Init,
}

impl SecretsArgs {
    /// Execute the secrets command
    pub fn execute(&self) -> anyhow::Result<()> {
        match self.command {
            SecretsCommand::Init => {
                let path = Secrets::create_template()?;
                println!("Created {}", path.display());
                println!("Add your Groq API key, or set GROQ_API_KEY instead.");
                Ok(())
            }
        }
    }
}
