//! Weekly plan parsing and rendering
//!
//! Plans arrive as loosely formatted markdown from the completion provider
//! and are turned into ordered [`WeekRecord`]s.

mod parser;
mod render;

pub use parser::{parse_plan, ParsedPlan, WeekRecord, FALLBACK_TITLE};
pub use render::{render_markdown, render_text};
