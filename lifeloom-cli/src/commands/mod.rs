//! CLI command implementations

pub mod parse;
pub mod plan;
pub mod prompt;
pub mod secrets;

pub use parse::ParseArgs;
pub use plan::PlanArgs;
pub use prompt::PromptArgs;
pub use secrets::SecretsArgs;

use clap::ValueEnum;
use lifeloom_core::{render_markdown, render_text, WeekRecord};

/// How a plan is printed
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Indented list for the terminal
    #[default]
    Text,
    /// Markdown in the format the parser reads
    Markdown,
    /// JSON
    Json,
}

/// Render weeks in the requested format (JSON is handled by the caller)
pub(crate) fn format_weeks(plan: &[WeekRecord], format: OutputFormat) -> String {
    match format {
        OutputFormat::Markdown => render_markdown(plan),
        OutputFormat::Text | OutputFormat::Json => render_text(plan),
    }
}
