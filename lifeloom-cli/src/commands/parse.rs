//! Parse command - Run the plan parser on existing markdown

use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use lifeloom_core::parse_plan;

use super::{format_weeks, OutputFormat};

/// Arguments for the parse command
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Markdown file to parse (reads stdin when omitted or "-")
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl ParseArgs {
    /// Execute the parse command
    pub fn execute(&self, verbose: bool) -> anyhow::Result<()> {
        let content = match &self.file {
            Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)?,
            _ => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };

        let plan = parse_plan(&content);

        if verbose {
            let tasks: usize = plan.iter().map(|w| w.tasks.len()).sum();
            tracing::info!(weeks = plan.len(), tasks, "Parsed plan");
        }

        if self.format == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        } else {
            print!("{}", format_weeks(&plan, self.format));
        }

        Ok(())
    }
}
