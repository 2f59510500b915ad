#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid yaml in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("workflow validation failed: {0}")]
    Workflows(String),
    #[error("workflow `{workflow_id}` is not configured")]
    MissingWorkflow { workflow_id: String },
    #[error("workflow `{workflow_id}` references step `{step_id}` with no command mapping")]
    UnmappedStep {
        workflow_id: String,
        step_id: String,
    },
    #[error("failed to resolve home directory for workflow config path")]
    HomeDirectoryUnavailable,
}
