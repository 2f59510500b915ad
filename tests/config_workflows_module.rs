use hookflow::config::{ConfigError, WorkflowsConfig};
use std::fs;
use tempfile::tempdir;

const VALID_YAML: &str = r#"
command_mapping:
  scout: { command: "/scout" }
  debug: { command: "/debug" }
  fix: { command: "/fix" }
override_prefix: "quick:"
workflows:
  bug-fix:
    name: Bug Fix
    sequence: [scout, debug, fix]
    when_to_use: Reproducible defects with an unknown cause.
    when_not_to_use: Feature work or refactors.
    confirm_first: true
"#;

#[test]
fn valid_config_parses_and_validates() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("workflows.yaml");
    fs::write(&path, VALID_YAML).expect("write config");

    let config = WorkflowsConfig::from_path(&path).expect("parse");
    config.validate().expect("validate");

    let workflow = config.workflow("bug-fix").expect("workflow exists");
    assert_eq!(workflow.name, "Bug Fix");
    assert!(workflow.confirm_first);
    assert_eq!(config.command_for("debug"), Some("/debug"));
    assert_eq!(config.override_prefix.as_deref(), Some("quick:"));
}

#[test]
fn optional_fields_default_when_absent() {
    let yaml = r#"
command_mapping:
  plan: { command: "/plan" }
workflows:
  quick:
    name: Quick
    sequence: [plan]
    when_to_use: Small tasks.
"#;
    let config: WorkflowsConfig = serde_yaml::from_str(yaml).expect("parse");
    config.validate().expect("validate");

    let workflow = config.workflow("quick").expect("workflow");
    assert!(workflow.when_not_to_use.is_empty());
    assert!(!workflow.confirm_first);
    assert!(workflow.pre_actions.is_none());
    assert!(config.override_prefix.is_none());
}

#[test]
fn unmapped_step_is_a_configuration_error() {
    let yaml = r#"
command_mapping:
  scout: { command: "/scout" }
workflows:
  bug-fix:
    name: Bug Fix
    sequence: [scout, debug]
    when_to_use: Defects.
"#;
    let config: WorkflowsConfig = serde_yaml::from_str(yaml).expect("parse");
    match config.validate() {
        Err(ConfigError::UnmappedStep {
            workflow_id,
            step_id,
        }) => {
            assert_eq!(workflow_id, "bug-fix");
            assert_eq!(step_id, "debug");
        }
        other => panic!("expected UnmappedStep, got {other:?}"),
    }
}

#[test]
fn empty_sequence_fails_validation() {
    let yaml = r#"
command_mapping: {}
workflows:
  empty:
    name: Empty
    sequence: []
    when_to_use: Never.
"#;
    let config: WorkflowsConfig = serde_yaml::from_str(yaml).expect("parse");
    assert!(matches!(config.validate(), Err(ConfigError::Workflows(_))));
}

#[test]
fn duplicate_step_within_a_sequence_fails_validation() {
    let yaml = r#"
command_mapping:
  plan: { command: "/plan" }
workflows:
  loopy:
    name: Loopy
    sequence: [plan, plan]
    when_to_use: Planning twice.
"#;
    let config: WorkflowsConfig = serde_yaml::from_str(yaml).expect("parse");
    assert!(matches!(config.validate(), Err(ConfigError::Workflows(_))));
}

#[test]
fn missing_when_to_use_fails_validation() {
    let yaml = r#"
command_mapping:
  plan: { command: "/plan" }
workflows:
  silent:
    name: Silent
    sequence: [plan]
    when_to_use: "  "
"#;
    let config: WorkflowsConfig = serde_yaml::from_str(yaml).expect("parse");
    assert!(matches!(config.validate(), Err(ConfigError::Workflows(_))));
}

#[test]
fn pre_actions_parse_with_partial_fields() {
    let yaml = r#"
command_mapping:
  plan: { command: "/plan" }
workflows:
  feature:
    name: Feature
    sequence: [plan]
    when_to_use: New functionality.
    pre_actions:
      inject_context: Check CONTRIBUTING.md conventions first.
      read_files: [docs/architecture.md]
"#;
    let config: WorkflowsConfig = serde_yaml::from_str(yaml).expect("parse");
    let pre = config
        .workflow("feature")
        .and_then(|w| w.pre_actions.as_ref())
        .expect("pre_actions");
    assert!(pre.activate_skill.is_none());
    assert_eq!(pre.read_files, vec!["docs/architecture.md".to_string()]);
    assert!(pre.inject_context.as_deref().unwrap().contains("CONTRIBUTING"));
}

#[test]
fn invalid_step_identifier_fails_the_parse() {
    let yaml = r#"
command_mapping:
  "bad step!": { command: "/x" }
workflows: {}
"#;
    assert!(serde_yaml::from_str::<WorkflowsConfig>(yaml).is_err());
}

#[test]
fn missing_file_reports_read_error() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("absent.yaml");
    assert!(matches!(
        WorkflowsConfig::from_path(&path),
        Err(ConfigError::Read { .. })
    ));
}
