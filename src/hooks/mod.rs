pub mod payload;

use crate::config::{load_workflows_config, WorkflowsConfig};
use crate::shared::logging::append_hook_log_line;
use crate::workflow::control::activate_workflow;
use crate::workflow::router::route_prompt;
use crate::workflow::session::session_key_from_env;
use crate::workflow::state_store::{default_state_dir, WorkflowStateStore};
use crate::workflow::tracker::track_tool_completion;
use payload::{read_prompt_payload, read_tool_payload};
use std::io::Read;

// Every entry point here fails open: any missing payload, unresolvable
// state dir, or config defect produces silence (None), never an error the
// host could surface into the conversation. Degraded paths leave a line in
// the hook log instead.

fn open_store() -> Option<(WorkflowStateStore, String)> {
    let state_dir = default_state_dir().ok()?;
    let store = WorkflowStateStore::new(state_dir);
    store.bootstrap().ok()?;
    Some((store, session_key_from_env()))
}

fn load_config_logged(store: &WorkflowStateStore) -> Option<WorkflowsConfig> {
    match load_workflows_config() {
        Ok(config) => Some(config),
        Err(err) => {
            let _ = append_hook_log_line(store.state_dir(), &format!("config error: {err}"));
            None
        }
    }
}

/// UserPromptSubmit: catalog injection, continuation reminders, and control
/// commands.
pub fn run_prompt_hook(reader: &mut impl Read) -> Option<String> {
    let payload = read_prompt_payload(reader)?;
    let (store, session_key) = open_store()?;
    let config = load_config_logged(&store)?;
    route_prompt(&store, &session_key, &config, &payload.prompt)
}

/// PostToolUse: advance the active workflow when a matching skill completed.
pub fn run_tool_hook(reader: &mut impl Read) -> Option<String> {
    let payload = read_tool_payload(reader)?;
    let (store, session_key) = open_store()?;
    let skill = payload.skill_identifier()?;
    track_tool_completion(&store, &session_key, &payload.tool_name, skill)
}

/// Explicit activation of a workflow by id. The optional stdin payload
/// carries the originating prompt for continuation messaging.
pub fn run_workflow_start(workflow_id: &str, reader: &mut impl Read) -> Option<String> {
    let prompt = read_prompt_payload(reader)
        .map(|payload| payload.prompt)
        .unwrap_or_default();
    let (store, session_key) = open_store()?;
    let config = load_config_logged(&store)?;
    match activate_workflow(&store, &session_key, &config, workflow_id, &prompt) {
        Ok(message) => message,
        Err(err) => {
            let _ = append_hook_log_line(store.state_dir(), &format!("activation error: {err}"));
            None
        }
    }
}
