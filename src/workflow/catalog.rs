use crate::config::{ConfigError, WorkflowsConfig};
use std::fmt::Write as _;

/// Prompts shorter than this never trigger catalog injection. The length
/// floor is the only predicate here; slash-command and override-prefix
/// filtering belongs to the prompt router and downstream gates.
pub const CATALOG_PROMPT_FLOOR: usize = 15;

pub fn should_inject_catalog(prompt: &str) -> bool {
    prompt.trim().chars().count() >= CATALOG_PROMPT_FLOOR
}

/// Render every workflow in the catalog, sorted by workflow id, followed by
/// the activation instruction. A step with no command mapping is a
/// configuration defect and fails the render rather than being skipped.
pub fn build_catalog(config: &WorkflowsConfig) -> Result<String, ConfigError> {
    let mut out = String::from("Available Workflows:\n");
    // BTreeMap iteration order is the required alphabetical-by-id order.
    for (workflow_id, workflow) in &config.workflows {
        let mut commands = Vec::with_capacity(workflow.sequence.len());
        for step in &workflow.sequence {
            let command =
                config
                    .command_for(step.as_str())
                    .ok_or_else(|| ConfigError::UnmappedStep {
                        workflow_id: workflow_id.to_string(),
                        step_id: step.to_string(),
                    })?;
            commands.push(command.to_string());
        }
        let _ = write!(out, "\n{} ({workflow_id})", workflow.name);
        if workflow.confirm_first {
            out.push_str(" [confirm with the user first]");
        }
        out.push('\n');
        let _ = writeln!(out, "  Use: {}", workflow.when_to_use);
        if !workflow.when_not_to_use.is_empty() {
            let _ = writeln!(out, "  Not for: {}", workflow.when_not_to_use);
        }
        let _ = writeln!(out, "  Steps: {}", commands.join(" -> "));
    }
    out.push_str("\nTo start a workflow, run: hookflow workflow start <workflow-id>\n");
    if let Some(prefix) = config.override_prefix.as_deref() {
        if !prefix.is_empty() {
            let _ = writeln!(
                out,
                "Prefix a request with \"{prefix}\" to skip workflow suggestions for that turn."
            );
        }
    }
    Ok(out)
}
