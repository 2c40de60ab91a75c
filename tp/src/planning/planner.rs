//! TaskPlanner - goal to task plan via one LLM call

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

use super::parser::parse_tasks;
use super::prompt::{PromptBuilder, SYSTEM_PROMPT};
use super::PlanError;
use crate::domain::{Task, TaskPlan};
use crate::llm::{CompletionRequest, LlmClient};

/// Token budget requested for a decomposition
const DECOMPOSE_MAX_TOKENS: u32 = 2000;

/// Generates task plans for goals
///
/// Holds no per-goal state, so one planner can serve concurrent goals.
pub struct TaskPlanner {
    llm: Arc<dyn LlmClient>,
    prompts: PromptBuilder,
}

impl TaskPlanner {
    /// Create a new planner around a provider client
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            prompts: PromptBuilder::new(),
        }
    }

    /// Break a goal into validated tasks
    pub async fn generate_task_plan(&self, goal: &str) -> Result<Vec<Task>, PlanError> {
        self.generate_task_plan_on(goal, Utc::now().date_naive()).await
    }

    /// Break a goal into validated tasks, with deadlines counted from `today`
    pub async fn generate_task_plan_on(&self, goal: &str, today: NaiveDate) -> Result<Vec<Task>, PlanError> {
        info!(provider = self.llm.provider(), "Calling {} API", self.llm.provider());

        let prompt = self.prompts.render(goal, today)?;
        let request = CompletionRequest::single(SYSTEM_PROMPT, prompt, DECOMPOSE_MAX_TOKENS);

        let response = self.llm.complete(request).await?;
        debug!(
            content_len = response.content.len(),
            tokens = response.usage.total(),
            "generate_task_plan_on: got response"
        );

        let tasks = parse_tasks(&response.content, today)?;
        info!(task_count = tasks.len(), "Generated {} tasks", tasks.len());
        Ok(tasks)
    }

    /// Generate tasks for a goal and assemble the plan aggregate
    pub async fn build_plan(&self, goal: &str) -> Result<TaskPlan, PlanError> {
        let tasks = self.generate_task_plan(goal).await?;
        Ok(TaskPlan::new(goal, tasks))
    }
}
