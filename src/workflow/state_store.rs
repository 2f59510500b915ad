use super::state::{StepInfo, WorkflowState, STATE_SCHEMA_VERSION};
use crate::shared::fs_atomic::atomic_write_json;
use chrono::Utc;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to create state directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write workflow state {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to delete workflow state {path}: {source}")]
    Delete {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to resolve home directory for workflow state dir")]
    HomeDirectoryUnavailable,
}

pub const STATE_DIR_RELATIVE_PATH: &str = ".claude/workflow-state";

pub fn default_state_dir() -> Result<PathBuf, StateError> {
    if let Some(project_dir) = std::env::var_os("CLAUDE_PROJECT_DIR") {
        return Ok(PathBuf::from(project_dir).join(STATE_DIR_RELATIVE_PATH));
    }
    let home = std::env::var_os("HOME").ok_or(StateError::HomeDirectoryUnavailable)?;
    Ok(PathBuf::from(home).join(STATE_DIR_RELATIVE_PATH))
}

/// Inputs for activating a workflow. `sequence` and `command_mapping` are the
/// caller's denormalized copies of the catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewWorkflowState {
    pub workflow_id: String,
    pub workflow_name: String,
    pub sequence: Vec<String>,
    pub command_mapping: BTreeMap<String, String>,
    pub original_prompt: String,
}

/// One JSON file per session key under `state_dir`. Invocations for the same
/// session run sequentially, so there is no locking; crash safety comes from
/// rename-atomic writes plus `load`'s discard-on-parse-failure behavior.
#[derive(Debug, Clone)]
pub struct WorkflowStateStore {
    state_dir: PathBuf,
}

impl WorkflowStateStore {
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
        }
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    pub fn bootstrap(&self) -> Result<(), StateError> {
        fs::create_dir_all(&self.state_dir).map_err(|source| StateError::CreateDir {
            path: self.state_dir.display().to_string(),
            source,
        })
    }

    pub fn state_path(&self, session_key: &str) -> PathBuf {
        self.state_dir.join(format!("{session_key}.json"))
    }

    /// Read the session's record. Absent, unparseable, or structurally
    /// invalid content all read as "no active workflow"; invalid records are
    /// deleted on the way out so the next invocation starts clean.
    pub fn load(&self, session_key: &str) -> Option<WorkflowState> {
        let path = self.state_path(session_key);
        let raw = fs::read_to_string(&path).ok()?;
        match serde_json::from_str::<WorkflowState>(&raw) {
            Ok(state) if state.is_structurally_valid() => Some(state),
            _ => {
                let _ = fs::remove_file(&path);
                None
            }
        }
    }

    /// Overwrite the session's record, refreshing `lastUpdatedAt`. The write
    /// is rename-atomic and synced before the process can exit.
    pub fn save(&self, session_key: &str, state: &mut WorkflowState) -> Result<(), StateError> {
        state.last_updated_at = Utc::now().timestamp();
        let path = self.state_path(session_key);
        atomic_write_json(&path, state).map_err(|source| StateError::Write {
            path: path.display().to_string(),
            source,
        })
    }

    /// Idempotent: clearing an absent record is not an error.
    pub fn clear(&self, session_key: &str) -> Result<(), StateError> {
        let path = self.state_path(session_key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StateError::Delete {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    pub fn create(
        &self,
        session_key: &str,
        params: NewWorkflowState,
    ) -> Result<WorkflowState, StateError> {
        let now = Utc::now().timestamp();
        let mut state = WorkflowState {
            schema_version: STATE_SCHEMA_VERSION,
            workflow_id: params.workflow_id,
            workflow_name: params.workflow_name,
            sequence: params.sequence,
            current_step: 0,
            completed_steps: Vec::new(),
            original_prompt: params.original_prompt,
            started_at: now,
            last_updated_at: now,
            command_mapping: params.command_mapping,
        };
        self.save(session_key, &mut state)?;
        Ok(state)
    }

    /// Move the cursor forward one step. `record_completed` distinguishes the
    /// complete path (step lands in `completedSteps`) from the skip path.
    /// Returns `Ok(None)` when the advance finished the workflow, in which
    /// case the record has been cleared.
    pub fn advance_step(
        &self,
        session_key: &str,
        mut state: WorkflowState,
        record_completed: bool,
    ) -> Result<Option<WorkflowState>, StateError> {
        if record_completed {
            if let Some(step_id) = state.current_step_id().map(str::to_string) {
                if !state.completed_steps.contains(&step_id) {
                    state.completed_steps.push(step_id);
                }
            }
        }
        state.current_step += 1;
        if state.current_step >= state.sequence.len() {
            self.clear(session_key)?;
            return Ok(None);
        }
        self.save(session_key, &mut state)?;
        Ok(Some(state))
    }

    /// Complete the current step, if `step_id` is in fact the current step.
    /// Out-of-order or already-passed steps are a no-op returning the state
    /// unchanged; no active state returns `Ok(None)`, as does completing the
    /// final step (the record is cleared, terminal state is file absence).
    pub fn mark_step_complete(
        &self,
        session_key: &str,
        step_id: &str,
    ) -> Result<Option<WorkflowState>, StateError> {
        let Some(state) = self.load(session_key) else {
            return Ok(None);
        };
        if state.current_step_id() != Some(step_id) {
            return Ok(Some(state));
        }
        self.advance_step(session_key, state, true)
    }

    pub fn current_step_info(&self, session_key: &str) -> Option<StepInfo> {
        let state = self.load(session_key)?;
        let step_id = state.current_step_id()?.to_string();
        Some(StepInfo {
            step_number: state.current_step + 1,
            total_steps: state.sequence.len(),
            command: state.command_for(&step_id).map(str::to_string),
            remaining: state.sequence[state.current_step..].to_vec(),
            command_mapping: state.command_mapping.clone(),
            step_id,
        })
    }
}
