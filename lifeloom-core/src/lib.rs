//! LifeLoom Core - turn a goal and a timeframe into a weekly plan
//!
//! A completion provider is asked for a markdown plan, which is then parsed
//! into ordered weeks of tasks. Parsing is best-effort and never fails;
//! generation errors are returned to the caller as data.

pub mod config;
pub mod error;
pub mod generator;
pub mod llm;
pub mod plan;
pub mod planner;
pub mod prompts;
pub mod secrets;

pub use config::{Config, LlmConfig};
pub use error::{Error, Result};
pub use generator::{PlanGenerator, PlanRequest};
pub use llm::{ChatMessage, CompletionProvider, GroqProvider, Role};
pub use plan::{parse_plan, render_markdown, render_text, ParsedPlan, WeekRecord, FALLBACK_TITLE};
pub use planner::{PlanResult, Planner};
pub use secrets::{ApiKey, KeySource, Secrets};
