use super::catalog::{build_catalog, should_inject_catalog};
use super::control::{apply_control, detect_control};
use super::state::WorkflowState;
use super::state_store::WorkflowStateStore;
use crate::config::WorkflowsConfig;
use chrono::Utc;

/// Active state untouched for longer than this is treated as abandoned and
/// cleared on the next prompt instead of nagging about a forgotten workflow.
pub const STALE_STATE_SECS: i64 = 24 * 60 * 60;

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    // get() avoids panicking when prefix.len() lands mid-codepoint.
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// The prompt already is (or begins with) the command the workflow expects
/// next; repeating the reminder would just interrupt. The command must be a
/// whole token: `/scoutmaster setup` is not `/scout`.
fn prompt_matches_expected_command(state: &WorkflowState, prompt: &str) -> bool {
    let Some(step_id) = state.current_step_id() else {
        return false;
    };
    let command = state.display_command(step_id);
    if !starts_with_ignore_case(prompt, &command) {
        return false;
    }
    // Slicing is safe: starts_with_ignore_case proved the boundary exists.
    prompt[command.len()..]
        .chars()
        .next()
        .map_or(true, char::is_whitespace)
}

fn render_continuation(state: &WorkflowState) -> String {
    let step_id = state.current_step_id().unwrap_or_default();
    format!(
        "Active Workflow: {} (Step {}/{})\nNext step: {}\nControls: \"done\" marks the step complete, \"skip\" skips it, \"abort\" stops the workflow.",
        state.display_name(),
        state.current_step + 1,
        state.total_steps(),
        state.display_command(step_id),
    )
}

/// Entry point for user-submitted prompts. Returns the message to inject
/// into the conversation, or `None` when this turn has nothing workflow
/// related to say.
pub fn route_prompt(
    store: &WorkflowStateStore,
    session_key: &str,
    config: &WorkflowsConfig,
    prompt: &str,
) -> Option<String> {
    let trimmed = prompt.trim();

    // The override prefix short-circuits everything for this turn.
    if let Some(prefix) = config.override_prefix.as_deref() {
        if !prefix.is_empty() && starts_with_ignore_case(trimmed, prefix) {
            let _ = store.clear(session_key);
            return None;
        }
    }

    if let Some(control) = detect_control(trimmed) {
        return apply_control(store, session_key, control);
    }

    if let Some(state) = store.load(session_key) {
        let age = Utc::now().timestamp() - state.last_updated_at;
        if age > STALE_STATE_SECS {
            let _ = store.clear(session_key);
        } else if prompt_matches_expected_command(&state, trimmed) {
            return None;
        } else {
            return Some(render_continuation(&state));
        }
    }

    if !config.workflows.is_empty() && should_inject_catalog(trimmed) {
        return build_catalog(config).ok();
    }
    None
}
