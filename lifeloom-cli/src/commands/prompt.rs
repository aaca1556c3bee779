//! Prompt command - Show the messages that would be sent to the provider

use clap::Args;
use lifeloom_core::PlanRequest;

/// Arguments for the prompt command
#[derive(Args, Debug)]
pub struct PromptArgs {
    /// The goal to plan for
    #[arg(required = true)]
    pub goal: String,

    /// Time available for the goal
    #[arg(short, long)]
    pub timeframe: String,
}

impl PromptArgs {
    /// Execute the prompt command
    pub fn execute(&self) -> anyhow::Result<()> {
        let request = PlanRequest::new(self.goal.trim(), self.timeframe.trim());

        for message in request.messages() {
            println!("[{}]", message.role);
            println!("{}", message.content);
            println!();
        }

        Ok(())
    }
}
