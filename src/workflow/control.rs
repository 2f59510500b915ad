use super::state_store::{NewWorkflowState, WorkflowStateStore};
use crate::config::{ConfigError, WorkflowsConfig};
use std::collections::BTreeMap;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    Abort,
    Skip,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchKind {
    /// Pattern must be the entire (normalized) message.
    Whole,
    /// Pattern may also appear inside a longer message.
    Phrase,
}

/// Evaluated top to bottom; abort rules outrank skip rules outrank complete
/// rules. Single-word keywords only match whole messages so unrelated prose
/// that happens to contain "next" or "stop" never fires.
const CONTROL_RULES: &[(&str, MatchKind, ControlCommand)] = &[
    ("abort workflow", MatchKind::Phrase, ControlCommand::Abort),
    ("cancel workflow", MatchKind::Phrase, ControlCommand::Abort),
    ("abort", MatchKind::Whole, ControlCommand::Abort),
    ("stop", MatchKind::Whole, ControlCommand::Abort),
    ("cancel", MatchKind::Whole, ControlCommand::Abort),
    ("skip this step", MatchKind::Phrase, ControlCommand::Skip),
    ("skip step", MatchKind::Phrase, ControlCommand::Skip),
    ("skip", MatchKind::Whole, ControlCommand::Skip),
    ("complete step", MatchKind::Phrase, ControlCommand::Complete),
    ("complete", MatchKind::Whole, ControlCommand::Complete),
    ("done", MatchKind::Whole, ControlCommand::Complete),
    ("next", MatchKind::Whole, ControlCommand::Complete),
];

fn normalize_control_text(text: &str) -> String {
    text.trim()
        .trim_end_matches(['.', '!', '?'])
        .trim()
        .to_ascii_lowercase()
}

/// Classify free-form text as a workflow control intent, or `None` for
/// anything ambiguous.
pub fn detect_control(text: &str) -> Option<ControlCommand> {
    let normalized = normalize_control_text(text);
    if normalized.is_empty() {
        return None;
    }
    for (pattern, kind, command) in CONTROL_RULES {
        let matched = match kind {
            MatchKind::Whole => normalized == *pattern,
            MatchKind::Phrase => normalized.contains(pattern),
        };
        if matched {
            return Some(*command);
        }
    }
    None
}

/// Apply a control intent to the session's active workflow. `None` means
/// there was nothing to control (no active state) or persistence failed, in
/// which case the degraded behavior is silence.
pub fn apply_control(
    store: &WorkflowStateStore,
    session_key: &str,
    control: ControlCommand,
) -> Option<String> {
    let state = store.load(session_key)?;
    let workflow_name = state.display_name().to_string();
    match control {
        ControlCommand::Abort => {
            store.clear(session_key).ok()?;
            Some(format!("Workflow Aborted: {workflow_name}"))
        }
        ControlCommand::Skip => {
            let skipped = state.current_step_id()?.to_string();
            match store.advance_step(session_key, state, false).ok()? {
                Some(next) => {
                    let next_step = next.current_step_id()?;
                    Some(format!(
                        "Step Skipped: {skipped}\nNext step: {}",
                        next.display_command(next_step)
                    ))
                }
                None => Some(format!("Workflow Complete: {workflow_name}")),
            }
        }
        ControlCommand::Complete => {
            let completed = state.current_step_id()?.to_string();
            match store.mark_step_complete(session_key, &completed).ok()? {
                Some(next) => {
                    let next_step = next.current_step_id()?;
                    Some(format!(
                        "Step Completed: {completed}\nNext step: {}",
                        next.display_command(next_step)
                    ))
                }
                None => Some(format!("Workflow Complete: {workflow_name}")),
            }
        }
    }
}

/// Activate a workflow by id: denormalize its sequence and command mapping
/// into a fresh state record and render the activation message, including any
/// one-shot pre-actions. A failed persist degrades to `Ok(None)` so the user
/// is never told they are in a workflow that is not being tracked.
pub fn activate_workflow(
    store: &WorkflowStateStore,
    session_key: &str,
    config: &WorkflowsConfig,
    workflow_id: &str,
    prompt: &str,
) -> Result<Option<String>, ConfigError> {
    let workflow = config
        .workflow(workflow_id)
        .ok_or_else(|| ConfigError::MissingWorkflow {
            workflow_id: workflow_id.to_string(),
        })?;

    let mut command_mapping = BTreeMap::new();
    for step in &workflow.sequence {
        let command =
            config
                .command_for(step.as_str())
                .ok_or_else(|| ConfigError::UnmappedStep {
                    workflow_id: workflow_id.to_string(),
                    step_id: step.to_string(),
                })?;
        command_mapping.insert(step.to_string(), command.to_string());
    }

    let params = NewWorkflowState {
        workflow_id: workflow_id.to_string(),
        workflow_name: workflow.name.clone(),
        sequence: workflow.sequence.iter().map(ToString::to_string).collect(),
        command_mapping,
        original_prompt: prompt.to_string(),
    };
    let Ok(state) = store.create(session_key, params) else {
        return Ok(None);
    };

    let mut message = format!(
        "Workflow Started: {} ({} steps)\n",
        state.display_name(),
        state.total_steps()
    );
    if let Some(pre) = &workflow.pre_actions {
        if let Some(context) = pre.inject_context.as_deref() {
            let _ = writeln!(message, "{context}");
        }
        if !pre.read_files.is_empty() {
            let _ = writeln!(message, "Read first: {}", pre.read_files.join(", "));
        }
        if let Some(skill) = pre.activate_skill.as_deref() {
            let _ = writeln!(message, "Activate skill first: {skill}");
        }
    }
    let first_step = state.current_step_id().unwrap_or_default();
    let _ = write!(message, "First step: {}", state.display_command(first_step));
    Ok(Some(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_word_rules_require_the_entire_message() {
        assert_eq!(detect_control("abort"), Some(ControlCommand::Abort));
        assert_eq!(detect_control("Stop!"), Some(ControlCommand::Abort));
        assert_eq!(detect_control("done."), Some(ControlCommand::Complete));
        assert_eq!(detect_control("what's next on the roadmap"), None);
        assert_eq!(detect_control("please stop by the office later"), None);
    }

    #[test]
    fn phrase_rules_match_inside_longer_messages() {
        assert_eq!(
            detect_control("let's abort workflow now"),
            Some(ControlCommand::Abort)
        );
        assert_eq!(
            detect_control("just skip this step please"),
            Some(ControlCommand::Skip)
        );
        assert_eq!(
            detect_control("ok, complete step"),
            Some(ControlCommand::Complete)
        );
    }

    #[test]
    fn abort_rules_outrank_skip_and_complete() {
        // "cancel workflow and skip step" hits the abort phrase first.
        assert_eq!(
            detect_control("cancel workflow and skip step"),
            Some(ControlCommand::Abort)
        );
    }

    #[test]
    fn ambiguous_text_returns_none() {
        assert_eq!(detect_control(""), None);
        assert_eq!(detect_control("refactor the parser module"), None);
        assert_eq!(detect_control("the work is nearly complete I think"), None);
    }
}
