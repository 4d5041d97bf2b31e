use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GuardError, Result};

/// Default location of the config file, before `~` expansion.
const DEFAULT_CONFIG_PATH: &str = "~/.config/kubectl-guard/config.toml";

/// Env var overriding the config file location (`~` and `$VAR` are expanded).
pub const CONFIG_ENV_VAR: &str = "KUBECTL_GUARD_CONFIG";

/// Written at the top of every saved config file.
const CONFIG_HEADER: &str = "# kubectl-guard configuration\n\
# Protect production contexts from accidental commands.\n\
# Entries are glob patterns: `*`, `?` and `[...]` are supported.\n\n";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Glob patterns naming protected contexts, in the order the user added them.
    #[serde(default)]
    pub protected_contexts: Vec<String>,
}

impl Config {
    /// Add a pattern. Returns `false` (and changes nothing) if it is already present.
    pub fn add_context(&mut self, context: &str) -> bool {
        if self.protected_contexts.iter().any(|c| c == context) {
            return false;
        }
        self.protected_contexts.push(context.to_string());
        true
    }

    /// Remove a pattern. Returns `false` (and changes nothing) if it is absent.
    pub fn remove_context(&mut self, context: &str) -> bool {
        let before = self.protected_contexts.len();
        self.protected_contexts.retain(|c| c != context);
        self.protected_contexts.len() != before
    }

    /// Parse a config from TOML text. An empty document is a valid, empty config.
    pub fn from_toml(path: &Path, content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|source| GuardError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Render the config as TOML, prefixed with the comment header.
    pub fn to_toml(&self) -> Result<String> {
        let body = toml::to_string(self)?;
        Ok(format!("{CONFIG_HEADER}{body}"))
    }
}

/// Persistent storage for the protected pattern set.
pub trait ConfigStore {
    /// Location of the backing file.
    fn path(&self) -> &Path;
    /// Whether a config has been written yet. Absence triggers first-run setup.
    fn exists(&self) -> Result<bool>;
    fn load(&self) -> Result<Config>;
    fn save(&self, config: &Config) -> Result<()>;

    /// Load the config, or start from an empty one if none exists yet.
    fn load_or_default(&self) -> Result<Config> {
        if self.exists()? {
            self.load()
        } else {
            Ok(Config::default())
        }
    }
}

/// TOML file on disk.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve the config location:
    /// 1. `$KUBECTL_GUARD_CONFIG` if set and non-empty
    /// 2. `~/.config/kubectl-guard/config.toml`
    pub fn from_env() -> Result<Self> {
        let raw = std::env::var(CONFIG_ENV_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        Ok(Self::new(expand_path(&raw)?))
    }
}

/// Expand `~` and environment variables in a path.
fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw).map_err(|e| GuardError::ConfigPath {
        path: raw.to_string(),
        reason: e.to_string(),
    })?;
    // shellexpand leaves `~` in place when the home directory is unknown.
    if expanded.starts_with('~') {
        return Err(GuardError::HomeDirUnavailable);
    }
    Ok(PathBuf::from(expanded.as_ref()))
}

impl ConfigStore for FileConfigStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn exists(&self) -> Result<bool> {
        self.path.try_exists().map_err(|source| GuardError::ConfigIo {
            path: self.path.clone(),
            source,
        })
    }

    fn load(&self) -> Result<Config> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| GuardError::ConfigIo {
            path: self.path.clone(),
            source,
        })?;
        let config = Config::from_toml(&self.path, &content)?;
        log::debug!(
            "loaded {} protected pattern(s) from {}",
            config.protected_contexts.len(),
            self.path.display()
        );
        Ok(config)
    }

    fn save(&self, config: &Config) -> Result<()> {
        let io_err = |source| GuardError::ConfigIo {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(&self.path, config.to_toml()?).map_err(io_err)?;
        log::debug!("saved config to {}", self.path.display());
        Ok(())
    }
}
