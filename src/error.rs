use std::path::PathBuf;

/// Errors raised outside the pure decision logic: config I/O, kubectl
/// invocation, and the interactive prompt.
#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    #[error("could not determine home directory")]
    HomeDirUnavailable,

    #[error("invalid config path {path:?}: {reason}")]
    ConfigPath { path: String, reason: String },

    #[error("config I/O error at {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error in {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// The current context could not be determined. The engine turns this
    /// into `Decision::Allow`; it only surfaces from the provider itself.
    #[error("could not get current context: {0}")]
    ContextLookup(String),

    #[error("failed to run {program}: {source}")]
    KubectlSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to exec {program}: {source}")]
    Exec {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GuardError>;
