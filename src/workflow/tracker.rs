use super::state_store::WorkflowStateStore;

/// Tool name the host uses for assistant skill invocations. Every other tool
/// type is ignored without output or state mutation.
pub const SKILL_TOOL_NAME: &str = "Skill";

fn normalize(raw: &str) -> String {
    raw.trim().trim_start_matches('/').to_ascii_lowercase()
}

/// Candidate step ids a skill identifier could correspond to. Colon
/// namespacing maps both ways: `docs:update` yields `docs-update`, and
/// `review:codebase` yields `codebase-review` plus the bare final segment.
fn normalized_candidates(skill: &str) -> Vec<String> {
    let normalized = normalize(skill);
    let mut candidates = vec![normalized.clone()];
    if normalized.contains(':') {
        let segments: Vec<&str> = normalized.split(':').filter(|s| !s.is_empty()).collect();
        candidates.push(segments.join("-"));
        let mut reversed = segments.clone();
        reversed.reverse();
        candidates.push(reversed.join("-"));
        if let Some(last) = segments.last() {
            candidates.push((*last).to_string());
        }
    }
    candidates
}

/// Whether an invoked skill counts as the expected step. Besides the
/// normalized candidates, a skill matches when it is exactly the command the
/// catalog maps that step to (e.g. step `code-review` mapped to
/// `/review:codebase`).
pub fn skill_matches_step(skill: &str, step_id: &str, mapped_command: Option<&str>) -> bool {
    let expected = step_id.to_ascii_lowercase();
    if normalized_candidates(skill)
        .iter()
        .any(|candidate| *candidate == expected)
    {
        return true;
    }
    mapped_command
        .map(|command| normalize(command) == normalize(skill))
        .unwrap_or(false)
}

/// Observe a completed tool invocation. Non-skill tools, missing state, and
/// skills unrelated to the current step are all silent no-ops.
pub fn track_tool_completion(
    store: &WorkflowStateStore,
    session_key: &str,
    tool_name: &str,
    skill: &str,
) -> Option<String> {
    if tool_name != SKILL_TOOL_NAME {
        return None;
    }
    track_skill_completion(store, session_key, skill)
}

/// Advance the active workflow when `skill` matches its current step, using
/// the same transition as the controller's complete path.
pub fn track_skill_completion(
    store: &WorkflowStateStore,
    session_key: &str,
    skill: &str,
) -> Option<String> {
    let state = store.load(session_key)?;
    let expected = state.current_step_id()?.to_string();
    if !skill_matches_step(skill, &expected, state.command_for(&expected)) {
        return None;
    }
    let workflow_name = state.display_name().to_string();
    match store.mark_step_complete(session_key, &expected).ok()? {
        Some(next) => {
            let next_step = next.current_step_id()?;
            Some(format!(
                "Step Completed: {expected}\nNext step: {}",
                next.display_command(next_step)
            ))
        }
        None => Some(format!("Workflow Complete: {workflow_name}")),
    }
}
