//! Plan command - Generate a weekly plan for a goal

use clap::Args;
use lifeloom_core::{Config, PlanGenerator, PlanResult, Planner, Secrets};

use super::{format_weeks, OutputFormat};

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// The goal to plan for
    #[arg(required = true)]
    pub goal: String,

    /// Time available for the goal (e.g. "3 months")
    #[arg(short, long)]
    pub timeframe: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// What a finished plan run writes, and where
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    /// Print to stdout and exit successfully
    Output(String),
    /// Print to stdout and exit with a failure status
    FailedOutput(String),
    /// Report on stderr
    Error(String),
}

impl PlanArgs {
    /// Execute the plan command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let goal = self.goal.trim();
        let timeframe = self.timeframe.trim();

        if goal.is_empty() {
            anyhow::bail!("Goal must not be empty");
        }
        if timeframe.is_empty() {
            anyhow::bail!("Timeframe must not be empty");
        }

        if verbose {
            tracing::info!(goal = %goal, timeframe = %timeframe, "Starting plan generation");
        }

        let secrets = Secrets::load()?;
        let planner = Planner::new(PlanGenerator::from_config(config, &secrets));

        let result = planner.create_plan(goal, timeframe).await;

        match self.outcome(&result)? {
            Outcome::Output(text) => print!("{}", text),
            Outcome::FailedOutput(text) => {
                print!("{}", text);
                std::process::exit(1);
            }
            Outcome::Error(error) => anyhow::bail!(error),
        }

        Ok(())
    }

    /// Decide the output for a result. In JSON mode a failure stays inside
    /// the JSON body on stdout; otherwise it goes to stderr only.
    fn outcome(&self, result: &PlanResult) -> anyhow::Result<Outcome> {
        if self.format == OutputFormat::Json {
            let body = format!("{}\n", serde_json::to_string_pretty(result)?);
            return Ok(if result.is_error() {
                Outcome::FailedOutput(body)
            } else {
                Outcome::Output(body)
            });
        }

        if let Some(error) = &result.error {
            return Ok(Outcome::Error(error.clone()));
        }

        if result.plan.is_empty() {
            let notice = "No plan could be extracted from the model output.\n";
            return Ok(Outcome::Output(notice.to_string()));
        }

        let mut text = String::new();
        if self.format == OutputFormat::Text {
            text.push_str(&format!(
                "Plan for: {} ({})\n\n",
                self.goal.trim(),
                self.timeframe.trim()
            ));
        }
        text.push_str(&format_weeks(&result.plan, self.format));

        Ok(Outcome::Output(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifeloom_core::WeekRecord;

    fn args(format: OutputFormat) -> PlanArgs {
        PlanArgs {
            goal: " Run a 5k ".to_string(),
            timeframe: "6 weeks".to_string(),
            format,
        }
    }

    fn failed() -> PlanResult {
        PlanResult {
            plan: Vec::new(),
            error: Some("Groq API key not found".to_string()),
        }
    }

    #[test]
    fn test_json_error_only_on_stdout() {
        let outcome = args(OutputFormat::Json).outcome(&failed()).unwrap();

        let body = match outcome {
            Outcome::FailedOutput(body) => body,
            other => panic!("unexpected outcome: {:?}", other),
        };
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], "Groq API key not found");
        assert_eq!(json["plan"], serde_json::json!([]));
    }

    #[test]
    fn test_text_error_only_on_stderr() {
        let outcome = args(OutputFormat::Text).outcome(&failed()).unwrap();
        let expected = Outcome::Error("Groq API key not found".to_string());
        assert_eq!(outcome, expected);
    }

    #[test]
    fn test_json_success() {
        let plan = vec![WeekRecord::new("Week 1", vec!["Jog".to_string()])];
        let outcome = args(OutputFormat::Json)
            .outcome(&PlanResult::success(plan))
            .unwrap();

        let body = match outcome {
            Outcome::Output(body) => body,
            other => panic!("unexpected outcome: {:?}", other),
        };
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["plan"][0]["title"], "Week 1");
        assert!(json["error"].is_null());
    }

    #[test]
    fn test_text_has_heading() {
        let plan = vec![WeekRecord::new("Week 1", vec!["Jog".to_string()])];
        let outcome = args(OutputFormat::Text)
            .outcome(&PlanResult::success(plan))
            .unwrap();

        let text = match outcome {
            Outcome::Output(text) => text,
            other => panic!("unexpected outcome: {:?}", other),
        };
        assert!(text.starts_with("Plan for: Run a 5k (6 weeks)\n\n"));
        assert!(text.contains("Jog"));
    }

    #[test]
    fn test_empty_plan_notice() {
        let outcome = args(OutputFormat::Markdown)
            .outcome(&PlanResult::success(Vec::new()))
            .unwrap();
        let text = match outcome {
            Outcome::Output(text) => text,
            other => panic!("unexpected outcome: {:?}", other),
        };
        assert!(text.starts_with("No plan"));
    }
}
