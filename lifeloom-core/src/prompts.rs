//! Prompt templates for plan generation
//!
//! Templates use `{{VARIABLE}}` placeholders that are rendered with a
//! [`PromptContext`]. Substituted values are inserted verbatim and are never
//! themselves scanned for placeholders.

use std::collections::HashMap;

use crate::llm::ChatMessage;

/// Instruction fixing the output contract for the model
const SYSTEM_PROMPT: &str = include_str!("prompts/system.md");

/// Human message carrying the goal and timeframe
const HUMAN_PROMPT: &str = include_str!("prompts/human.md");

/// Get the system instruction
pub fn system_prompt() -> &'static str {
    SYSTEM_PROMPT.trim()
}

/// Get the raw human message template
pub fn human_template() -> &'static str {
    HUMAN_PROMPT.trim()
}

/// Context for rendering a prompt template
#[derive(Debug, Clone, Default)]
pub struct PromptContext {
    variables: HashMap<String, String>,
}

impl PromptContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Set a variable value (builder pattern)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set the user's goal
    pub fn with_goal(self, goal: impl Into<String>) -> Self {
        self.with("GOAL", goal)
    }

    /// Set the timeframe
    pub fn with_timeframe(self, timeframe: impl Into<String>) -> Self {
        self.with("TIMEFRAME", timeframe)
    }
}

/// Build the system + human message pair for a goal and timeframe
pub fn plan_messages(goal: &str, timeframe: &str) -> Vec<ChatMessage> {
    let context = PromptContext::new()
        .with_goal(goal)
        .with_timeframe(timeframe);

    vec![
        ChatMessage::system(system_prompt()),
        ChatMessage::user(render_template(human_template(), &context)),
    ]
}

/// Render a template string with variable substitution
///
/// Unknown uppercase placeholders become "(not specified)"; anything else
/// between braces is left untouched.
pub fn render_template(template: &str, context: &PromptContext) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find("}}") else {
            result.push_str(&rest[start..]);
            return result;
        };

        let name = &after[..end];
        if let Some(value) = context.variables.get(name) {
            result.push_str(value);
        } else if !name.is_empty() && name.chars().all(|c| c.is_ascii_uppercase() || c == '_') {
            result.push_str("(not specified)");
        } else {
            result.push_str(&rest[start..start + 2 + end + 2]);
        }

        rest = &after[end + 2..];
    }

    result.push_str(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;

    #[test]
    fn test_system_prompt_fixes_format() {
        let prompt = system_prompt();
        assert!(prompt.contains("## Week X: [Week Title]"));
        assert!(prompt.contains("Do not include any introductory or concluding text"));
    }

    #[test]
    fn test_plan_messages() {
        let messages = plan_messages("Learn intermediate Spanish", "3 months");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(
            messages[1].content,
            "Goal: Learn intermediate Spanish\nTimeframe: 3 months\n\nProvide a weekly plan."
        );
    }

    #[test]
    fn test_values_inserted_verbatim() {
        let messages = plan_messages("Write {{TIMEFRAME}} daily", "{{GOAL}}");
        assert_eq!(
            messages[1].content,
            "Goal: Write {{TIMEFRAME}} daily\nTimeframe: {{GOAL}}\n\nProvide a weekly plan."
        );
    }

    #[test]
    fn test_unset_placeholder() {
        let rendered = render_template("Goal: {{GOAL}}", &PromptContext::new());
        assert_eq!(rendered, "Goal: (not specified)");
    }

    #[test]
    fn test_non_placeholder_braces_preserved() {
        let context = PromptContext::new().with_goal("run");
        assert_eq!(
            render_template("{{lower}} {{GOAL}} {{ unterminated", &context),
            "{{lower}} run {{ unterminated"
        );
    }
}
