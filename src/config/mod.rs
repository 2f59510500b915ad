pub mod error;
pub mod load;

pub use error::ConfigError;
pub use load::{default_config_path, load_workflows_config};

use crate::shared::ids::{StepId, WorkflowId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

/// The assistant-invocable form of a workflow step, e.g. `/plan`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepCommand {
    pub command: String,
}

/// One-shot instructions emitted when a workflow is activated. Never
/// persisted into workflow state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreActions {
    #[serde(default)]
    pub activate_skill: Option<String>,
    #[serde(default)]
    pub read_files: Vec<String>,
    #[serde(default)]
    pub inject_context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    pub name: String,
    pub sequence: Vec<StepId>,
    pub when_to_use: String,
    #[serde(default)]
    pub when_not_to_use: String,
    #[serde(default)]
    pub confirm_first: bool,
    #[serde(default)]
    pub pre_actions: Option<PreActions>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowsConfig {
    #[serde(default)]
    pub command_mapping: BTreeMap<StepId, StepCommand>,
    #[serde(default)]
    pub workflows: BTreeMap<WorkflowId, WorkflowDefinition>,
    /// Prompt prefix that bypasses workflow handling for one turn.
    #[serde(default)]
    pub override_prefix: Option<String>,
}

impl WorkflowsConfig {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Configuration defects are loud: an unmapped step, an empty sequence, a
    /// duplicate step id within a sequence, or missing usage guidance all fail
    /// validation instead of surfacing mid-render at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (workflow_id, workflow) in &self.workflows {
            if workflow.name.trim().is_empty() {
                return Err(ConfigError::Workflows(format!(
                    "workflow `{workflow_id}` must have a display name"
                )));
            }
            if workflow.sequence.is_empty() {
                return Err(ConfigError::Workflows(format!(
                    "workflow `{workflow_id}` must have at least one step"
                )));
            }
            if workflow.when_to_use.trim().is_empty() {
                return Err(ConfigError::Workflows(format!(
                    "workflow `{workflow_id}` must describe when to use it"
                )));
            }
            let mut seen: HashSet<&str> = HashSet::new();
            for step in &workflow.sequence {
                if !seen.insert(step.as_str()) {
                    return Err(ConfigError::Workflows(format!(
                        "workflow `{workflow_id}` repeats step `{step}`"
                    )));
                }
                if !self.command_mapping.contains_key(step.as_str()) {
                    return Err(ConfigError::UnmappedStep {
                        workflow_id: workflow_id.to_string(),
                        step_id: step.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn workflow(&self, workflow_id: &str) -> Option<&WorkflowDefinition> {
        self.workflows.get(workflow_id)
    }

    pub fn command_for(&self, step_id: &str) -> Option<&str> {
        self.command_mapping
            .get(step_id)
            .map(|entry| entry.command.as_str())
    }
}
