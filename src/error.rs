use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read rows: {0}")]
    Io(#[from] std::io::Error),
    #[error("row json parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("row {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("query failed: {0}")]
    Query(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("config json parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
