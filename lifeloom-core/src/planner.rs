//! Goal-to-plan pipeline
//!
//! Runs generation then parsing and always hands back a [`PlanResult`]:
//! errors are returned as data and never escape to the caller.

use std::any::Any;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::generator::{PlanGenerator, PlanRequest};
use crate::plan::{parse_plan, ParsedPlan};
use crate::Error;

/// Outcome of a single planning request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanResult {
    /// Parsed weeks; empty on error
    pub plan: ParsedPlan,
    /// User-facing error text
    pub error: Option<String>,
}

impl PlanResult {
    /// A successful result
    pub fn success(plan: ParsedPlan) -> Self {
        Self { plan, error: None }
    }

    /// A failed result with an empty plan
    pub fn failure(error: &Error) -> Self {
        Self {
            plan: Vec::new(),
            error: Some(error.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Turns goals into structured weekly plans
#[derive(Debug, Clone)]
pub struct Planner {
    generator: Arc<PlanGenerator>,
}

impl Planner {
    pub fn new(generator: PlanGenerator) -> Self {
        Self {
            generator: Arc::new(generator),
        }
    }

    /// Generate and parse a plan for the goal
    ///
    /// The pipeline runs on its own task so that a panic anywhere inside it
    /// is reported as an unexpected error instead of unwinding into the caller.
    pub async fn create_plan(
        &self,
        goal: impl Into<String>,
        timeframe: impl Into<String>,
    ) -> PlanResult {
        let request = PlanRequest::new(goal, timeframe);
        let generator = Arc::clone(&self.generator);

        let handle = tokio::spawn(async move { run_pipeline(&generator, &request).await });

        match handle.await {
            Ok(result) => result,
            Err(e) => {
                let message = if e.is_panic() {
                    panic_message(e.into_panic())
                } else {
                    e.to_string()
                };
                error!(error = %message, "Plan pipeline aborted");
                PlanResult::failure(&Error::Unexpected(message))
            }
        }
    }
}

async fn run_pipeline(generator: &PlanGenerator, request: &PlanRequest) -> PlanResult {
    let markdown = match generator.generate(request).await {
        Ok(markdown) => markdown,
        Err(e) => return PlanResult::failure(&e),
    };

    let plan = parse_plan(&markdown);

    if plan.is_empty() && !markdown.is_empty() {
        warn!(raw_markdown = %markdown, "Parsing produced no structured plan");
    }

    PlanResult::success(plan)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "task panicked".to_string()
    }
}
