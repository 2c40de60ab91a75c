//! Goal decomposition prompt
//!
//! The prompt template is compiled into the binary and rendered with
//! Handlebars for each goal.

use chrono::{Days, NaiveDate};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use super::PlanError;

/// Decomposition prompt template
pub const DECOMPOSE_TEMPLATE: &str = include_str!("../../prompts/decompose.pmt");

/// System prompt sent alongside the decomposition prompt
pub const SYSTEM_PROMPT: &str =
    "You are a helpful project planning assistant. Always respond with valid JSON only.";

/// Values substituted into the template
#[derive(Debug, Clone, Serialize)]
struct PromptContext<'a> {
    goal: &'a str,
    today: String,
    example_deadline: String,
}

/// Renders the decomposition prompt
pub struct PromptBuilder {
    hbs: Handlebars<'static>,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBuilder {
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        // Plain text output; goals must reach the model verbatim
        hbs.register_escape_fn(handlebars::no_escape);
        Self { hbs }
    }

    /// Render the prompt for a goal as of `today`
    pub fn render(&self, goal: &str, today: NaiveDate) -> Result<String, PlanError> {
        debug!(goal_len = goal.len(), %today, "PromptBuilder::render: called");
        let example_deadline = today.checked_add_days(Days::new(2)).unwrap_or(today);
        let context = PromptContext {
            goal,
            today: today.format("%Y-%m-%d").to_string(),
            example_deadline: example_deadline.format("%Y-%m-%d").to_string(),
        };

        self.hbs
            .render_template(DECOMPOSE_TEMPLATE, &context)
            .map_err(|e| PlanError::Configuration(format!("Failed to render decomposition prompt: {}", e)))
    }
}
