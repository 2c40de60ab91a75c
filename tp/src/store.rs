//! PlanStore - append-only JSONL history of generated plans

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::TaskPlan;

const PLANS_FILE: &str = "plans.jsonl";

/// A plan as persisted, tagged with its storage id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPlan {
    pub id: String,
    #[serde(flatten)]
    pub plan: TaskPlan,
}

/// File-backed plan history
///
/// One JSON object per line in `<dir>/plans.jsonl`. Lines that fail to
/// deserialize are skipped on read rather than failing the whole listing.
pub struct PlanStore {
    base_path: PathBuf,
}

impl PlanStore {
    /// Open or create a plan store at the given directory
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).context("Failed to create plan store directory")?;
        debug!(?base_path, "Opened plan store");
        Ok(Self { base_path })
    }

    fn plans_path(&self) -> PathBuf {
        self.base_path.join(PLANS_FILE)
    }

    /// Append a plan, returning it with its new id
    pub fn save(&self, plan: &TaskPlan) -> Result<StoredPlan> {
        let stored = StoredPlan {
            id: Uuid::now_v7().to_string(),
            plan: plan.clone(),
        };

        let line = serde_json::to_string(&stored).context("Failed to serialize plan")?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.plans_path())
            .context("Failed to open plan store")?;
        writeln!(file, "{}", line).context("Failed to write plan")?;

        info!(id = %stored.id, task_count = plan.task_count(), "Saved plan");
        Ok(stored)
    }

    /// All stored plans, newest first
    pub fn list(&self) -> Result<Vec<StoredPlan>> {
        let path = self.plans_path();
        if !path.exists() {
            debug!(?path, "list: no plan file yet");
            return Ok(Vec::new());
        }

        let file = fs::File::open(&path).context("Failed to open plan store")?;
        let mut plans = Vec::new();
        for (lineno, line) in BufReader::new(file).lines().enumerate() {
            let line = line.context("Failed to read plan store")?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<StoredPlan>(&line) {
                Ok(plan) => plans.push(plan),
                Err(e) => warn!(line = lineno + 1, error = %e, "Skipping malformed plan record"),
            }
        }

        // Stable sort keeps append order for equal timestamps; reverse after
        plans.sort_by_key(|p| p.plan.generated_at());
        plans.reverse();
        Ok(plans)
    }

    /// Look up a plan by id
    pub fn get(&self, id: &str) -> Result<Option<StoredPlan>> {
        Ok(self.list()?.into_iter().find(|p| p.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Priority, Task};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn plan(goal: &str, hour: u32) -> TaskPlan {
        let task = Task {
            id: 1,
            task_name: "Research".to_string(),
            description: "Look around".to_string(),
            estimated_days: 2,
            priority: Priority::High,
            depends_on: vec![],
            deadline: "2026-10-19".to_string(),
        };
        TaskPlan::with_generated_at(goal, vec![task], Utc.with_ymd_and_hms(2026, 10, 17, hour, 0, 0).unwrap())
    }

    #[test]
    fn test_open_creates_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested").join("plans");
        PlanStore::open(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        let temp = TempDir::new().unwrap();
        let store = PlanStore::open(temp.path()).unwrap();
        assert!(store.list().unwrap().is_empty());
        assert!(store.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_save_and_get() {
        let temp = TempDir::new().unwrap();
        let store = PlanStore::open(temp.path()).unwrap();

        let saved = store.save(&plan("Launch a podcast", 9)).unwrap();
        let loaded = store.get(&saved.id).unwrap().unwrap();

        assert_eq!(loaded, saved);
        assert_eq!(loaded.plan.goal(), "Launch a podcast");
        assert_eq!(loaded.plan.tasks()[0].priority, Priority::High);
    }

    #[test]
    fn test_list_newest_first() {
        let temp = TempDir::new().unwrap();
        let store = PlanStore::open(temp.path()).unwrap();

        store.save(&plan("Morning goal here", 8)).unwrap();
        store.save(&plan("Evening goal here", 20)).unwrap();
        store.save(&plan("Noon goal here!!", 12)).unwrap();

        let goals: Vec<String> = store
            .list()
            .unwrap()
            .into_iter()
            .map(|p| p.plan.goal().to_string())
            .collect();
        assert_eq!(goals, vec!["Evening goal here", "Noon goal here!!", "Morning goal here"]);
    }

    #[test]
    fn test_record_layout_is_flat() {
        let temp = TempDir::new().unwrap();
        let store = PlanStore::open(temp.path()).unwrap();
        let saved = store.save(&plan("Write a novel draft", 10)).unwrap();

        let raw = fs::read_to_string(temp.path().join(PLANS_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(raw.trim()).unwrap();
        assert_eq!(value["id"], saved.id);
        assert_eq!(value["goal"], "Write a novel draft");
        assert_eq!(value["taskCount"], 1);
        assert_eq!(value["taskPlan"][0]["taskName"], "Research");
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let temp = TempDir::new().unwrap();
        let store = PlanStore::open(temp.path()).unwrap();
        store.save(&plan("Learn to play chess", 10)).unwrap();

        let mut file = OpenOptions::new().append(true).open(temp.path().join(PLANS_FILE)).unwrap();
        writeln!(file, "{{not json").unwrap();
        writeln!(file).unwrap();

        store.save(&plan("Learn to play piano", 11)).unwrap();

        assert_eq!(store.list().unwrap().len(), 2);
    }
}
