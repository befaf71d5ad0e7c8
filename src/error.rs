use std::path::PathBuf;

/// Errors raised while reading the sales file at startup.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("data file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot open data file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("line {line}: invalid {column} value {value:?}")]
    InvalidField {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {name}: {value:?}")]
    InvalidVar { name: &'static str, value: String },
}
