use super::{ConfigError, WorkflowsConfig};
use std::path::PathBuf;

pub const CONFIG_FILE_RELATIVE_PATH: &str = ".claude/workflows.yaml";

/// Project-scoped config wins over the user-global one.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    if let Some(project_dir) = std::env::var_os("CLAUDE_PROJECT_DIR") {
        return Ok(PathBuf::from(project_dir).join(CONFIG_FILE_RELATIVE_PATH));
    }
    let home = std::env::var_os("HOME").ok_or(ConfigError::HomeDirectoryUnavailable)?;
    Ok(PathBuf::from(home).join(CONFIG_FILE_RELATIVE_PATH))
}

pub fn load_workflows_config() -> Result<WorkflowsConfig, ConfigError> {
    let path = default_config_path()?;
    let config = WorkflowsConfig::from_path(&path)?;
    config.validate()?;
    Ok(config)
}
