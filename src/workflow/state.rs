use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const STATE_SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    STATE_SCHEMA_VERSION
}

/// The single mutable record per session: which workflow is active and how
/// far it has progressed. `sequence` and `commandMapping` are denormalized
/// copies taken at activation so catalog edits cannot derail an in-flight
/// run. A finished workflow is represented by the absence of this record;
/// `currentStep == sequence.len()` is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowState {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub workflow_id: String,
    #[serde(default)]
    pub workflow_name: String,
    pub sequence: Vec<String>,
    pub current_step: usize,
    #[serde(default)]
    pub completed_steps: Vec<String>,
    #[serde(default)]
    pub original_prompt: String,
    #[serde(default)]
    pub started_at: i64,
    #[serde(default)]
    pub last_updated_at: i64,
    #[serde(default)]
    pub command_mapping: BTreeMap<String, String>,
}

impl WorkflowState {
    /// Shape check applied on load. Records that fail it (including legacy
    /// schemas that never carried a `currentStep` cursor) are discarded as
    /// "no active workflow".
    pub fn is_structurally_valid(&self) -> bool {
        self.schema_version == STATE_SCHEMA_VERSION
            && !self.workflow_id.is_empty()
            && !self.sequence.is_empty()
            && self.current_step < self.sequence.len()
    }

    pub fn current_step_id(&self) -> Option<&str> {
        self.sequence.get(self.current_step).map(String::as_str)
    }

    pub fn command_for(&self, step_id: &str) -> Option<&str> {
        self.command_mapping.get(step_id).map(String::as_str)
    }

    /// Command for a step, falling back to the bare step id when the mapping
    /// copy is missing an entry.
    pub fn display_command(&self, step_id: &str) -> String {
        self.command_for(step_id).unwrap_or(step_id).to_string()
    }

    pub fn display_name(&self) -> &str {
        if self.workflow_name.is_empty() {
            &self.workflow_id
        } else {
            &self.workflow_name
        }
    }

    pub fn total_steps(&self) -> usize {
        self.sequence.len()
    }
}

/// Derived view of the step the workflow currently expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepInfo {
    pub step_id: String,
    /// 1-based, for display.
    pub step_number: usize,
    pub total_steps: usize,
    pub command: Option<String>,
    pub remaining: Vec<String>,
    pub command_mapping: BTreeMap<String, String>,
}
