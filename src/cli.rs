//! Top-level argument routing and the `config` management commands.

use clap::{Parser, Subcommand};

use crate::config::{Config, ConfigStore};
use crate::error::Result;
use crate::kubectl::ContextProvider;
use crate::setup;
use crate::ui::{self, Prompt};

/// `config` subcommands owned by kubectl-guard. Every other `config ...`
/// invocation belongs to kubectl (`config use-context`, `config view`, ...).
pub const MANAGEMENT_SUBCOMMANDS: &[&str] = &["setup", "list", "add", "remove", "path"];

pub const HELP: &str = "\
kubectl-guard - Protect production clusters from accidental commands

Usage:
  kubectl-guard [kubectl args...]     Run kubectl with protection
  kubectl-guard config <subcommand>   Manage configuration
  kubectl-guard --version             Print version
  kubectl-guard --help                Print this help

Config subcommands:
  setup          Run the setup wizard
  list [--json]  List protected contexts
  add <ctx>      Add a context pattern to the protected list
  remove <ctx>   Remove a context pattern from the protected list
  path           Print the config file path

Examples:
  # First run triggers setup wizard
  kubectl-guard get pods

  # Run kubectl commands normally (alias recommended)
  alias kubectl='kubectl-guard'
  kubectl delete pod nginx   # Prompts for confirmation on protected contexts

  # Manage configuration
  kubectl-guard config list
  kubectl-guard config add 'prod-*'
  kubectl-guard config remove staging

Environment:
  KUBECTL_GUARD_CONFIG   Config file (default ~/.config/kubectl-guard/config.toml)
  KUBECTL_GUARD_KUBECTL  kubectl binary to wrap (default: kubectl on PATH)
  KUBECTL_GUARD_LOG      Diagnostic log level on stderr (error..trace)
";

/// What the binary should do with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Version,
    Help,
    /// `config <management subcommand> ...`; holds the args after `config`.
    Manage(Vec<String>),
    /// Anything else is a kubectl invocation.
    Guard(Vec<String>),
}

/// Route the argument list (program name excluded).
///
/// `--version` and `--help` are only ours when they are the sole argument;
/// `kubectl get --help` still reaches kubectl.
pub fn route(args: Vec<String>) -> Route {
    let ours = match args.as_slice() {
        [only] if only == "--version" => Some(Route::Version),
        [only] if only == "--help" || only == "-h" => Some(Route::Help),
        [first, sub, rest @ ..]
            if first == "config" && MANAGEMENT_SUBCOMMANDS.contains(&sub.as_str()) =>
        {
            let mut tail = vec![sub.clone()];
            tail.extend_from_slice(rest);
            Some(Route::Manage(tail))
        }
        _ => None,
    };
    ours.unwrap_or_else(|| Route::Guard(args))
}

#[derive(Parser, Debug)]
#[command(
    name = "kubectl-guard",
    bin_name = "kubectl-guard config",
    about = "Manage kubectl-guard configuration"
)]
pub struct ConfigCli {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Run the setup wizard
    Setup,
    /// List protected contexts
    List {
        /// Print the list as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Add a context pattern to the protected list
    Add { context: String },
    /// Remove a context pattern from the protected list
    Remove { context: String },
    /// Print the config file path
    Path,
}

impl ConfigCli {
    /// Parse the args following `config`. On bad input clap prints usage and exits.
    pub fn parse_args(args: &[String]) -> Self {
        let argv = std::iter::once("kubectl-guard config").chain(args.iter().map(String::as_str));
        Self::parse_from(argv)
    }
}

/// Names of all contexts in the kubeconfig.
pub fn context_names(contexts: &dyn ContextProvider) -> Result<Vec<String>> {
    Ok(contexts
        .list_contexts()?
        .into_iter()
        .map(|c| c.name)
        .collect())
}

/// The protected list as a pretty-printed JSON array of strings.
pub fn list_json(config: &Config) -> Result<String> {
    Ok(serde_json::to_string_pretty(&config.protected_contexts)?)
}

/// Execute a management command.
pub fn run_config(
    command: ConfigCommand,
    store: &dyn ConfigStore,
    contexts: &dyn ContextProvider,
    prompt: &dyn Prompt,
) -> Result<()> {
    match command {
        ConfigCommand::Setup => {
            let names = context_names(contexts)?;
            setup::run_setup(&names, store, prompt)?;
        }
        ConfigCommand::List { json } => {
            if !store.exists()? {
                ui::print_info(
                    "No configuration found. Run 'kubectl-guard config setup' to configure.",
                );
                return Ok(());
            }
            let config = store.load()?;
            if json {
                println!("{}", list_json(&config)?);
            } else if config.protected_contexts.is_empty() {
                ui::print_info("No protected contexts.");
            } else {
                ui::print_info("Protected contexts:");
                for ctx in &config.protected_contexts {
                    println!("  - {ctx}");
                }
            }
        }
        ConfigCommand::Add { context } => {
            let mut config = store.load_or_default()?;
            if config.add_context(&context) {
                store.save(&config)?;
                ui::print_success(&format!("Added: {context}"));
            } else {
                ui::print_info(&format!("Context already protected: {context}"));
            }
        }
        ConfigCommand::Remove { context } => {
            if !store.exists()? {
                ui::print_info("No configuration found.");
                return Ok(());
            }
            let mut config = store.load()?;
            if config.remove_context(&context) {
                store.save(&config)?;
                ui::print_success(&format!("Removed: {context}"));
            } else {
                ui::print_info(&format!("Context not in protected list: {context}"));
            }
        }
        ConfigCommand::Path => {
            println!("{}", store.path().display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::path::Path;

    use crate::config::FileConfigStore;
    use crate::error::GuardError;
    use crate::kubectl::KubeContext;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn route_version_and_help() {
        assert_eq!(route(args(&["--version"])), Route::Version);
        assert_eq!(route(args(&["--help"])), Route::Help);
        assert_eq!(route(args(&["-h"])), Route::Help);
    }

    #[test]
    fn route_kubectl_help_is_forwarded() {
        assert_eq!(
            route(args(&["get", "--help"])),
            Route::Guard(args(&["get", "--help"]))
        );
    }

    #[test]
    fn route_verbosity_flag_is_forwarded() {
        assert_eq!(
            route(args(&["-v", "6", "get", "pods"])),
            Route::Guard(args(&["-v", "6", "get", "pods"]))
        );
    }

    #[test]
    fn route_management_commands() {
        assert_eq!(
            route(args(&["config", "add", "prod-*"])),
            Route::Manage(args(&["add", "prod-*"]))
        );
        assert_eq!(route(args(&["config", "list"])), Route::Manage(args(&["list"])));
    }

    #[test]
    fn route_kubectl_config_is_forwarded() {
        assert_eq!(
            route(args(&["config", "use-context", "prod"])),
            Route::Guard(args(&["config", "use-context", "prod"]))
        );
        assert_eq!(route(args(&["config"])), Route::Guard(args(&["config"])));
    }

    #[test]
    fn route_empty_is_guard() {
        assert_eq!(route(vec![]), Route::Guard(vec![]));
    }

    #[test]
    fn parse_config_commands() {
        assert_eq!(
            ConfigCli::parse_args(&args(&["add", "prod-*"])).command,
            ConfigCommand::Add {
                context: "prod-*".into()
            }
        );
        assert_eq!(
            ConfigCli::parse_args(&args(&["list", "--json"])).command,
            ConfigCommand::List { json: true }
        );
        assert_eq!(
            ConfigCli::parse_args(&args(&["path"])).command,
            ConfigCommand::Path
        );
    }

    // ── run_config against a file store ──

    /// File store that counts writes.
    struct CountingStore {
        inner: FileConfigStore,
        saves: Cell<usize>,
    }

    impl CountingStore {
        fn new(dir: &tempfile::TempDir) -> Self {
            Self {
                inner: FileConfigStore::new(dir.path().join("config.toml")),
                saves: Cell::new(0),
            }
        }

        fn with(dir: &tempfile::TempDir, patterns: &[&str]) -> Self {
            let store = Self::new(dir);
            let config = Config {
                protected_contexts: patterns.iter().map(|p| p.to_string()).collect(),
            };
            store.inner.save(&config).unwrap();
            store
        }
    }

    impl ConfigStore for CountingStore {
        fn path(&self) -> &Path {
            self.inner.path()
        }

        fn exists(&self) -> Result<bool> {
            self.inner.exists()
        }

        fn load(&self) -> Result<Config> {
            self.inner.load()
        }

        fn save(&self, config: &Config) -> Result<()> {
            self.saves.set(self.saves.get() + 1);
            self.inner.save(config)
        }
    }

    struct StaticContexts(&'static [&'static str]);

    impl ContextProvider for StaticContexts {
        fn current_context(&self) -> Result<String> {
            self.0
                .first()
                .map(|s| s.to_string())
                .ok_or_else(|| GuardError::ContextLookup("no contexts".into()))
        }

        fn list_contexts(&self) -> Result<Vec<KubeContext>> {
            Ok(self
                .0
                .iter()
                .map(|name| KubeContext {
                    name: name.to_string(),
                    ..Default::default()
                })
                .collect())
        }
    }

    /// Picks every offered item; never confirms.
    struct PickAll;

    impl Prompt for PickAll {
        fn confirm(&self, _message: &str) -> Result<bool> {
            Ok(false)
        }

        fn multi_select(&self, _title: &str, items: &[String]) -> Result<Option<Vec<String>>> {
            Ok(Some(items.to_vec()))
        }
    }

    fn run(command: ConfigCommand, store: &CountingStore) -> Result<()> {
        run_config(command, store, &StaticContexts(&["prod", "dev"]), &PickAll)
    }

    fn stored(store: &CountingStore) -> Vec<String> {
        store.load().unwrap().protected_contexts
    }

    #[test]
    fn add_creates_config() {
        let dir = tempfile::tempdir().unwrap();
        let store = CountingStore::new(&dir);
        run(ConfigCommand::Add { context: "prod-*".into() }, &store).unwrap();
        assert_eq!(stored(&store), vec!["prod-*"]);
        assert_eq!(store.saves.get(), 1);
    }

    #[test]
    fn add_appends_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = CountingStore::with(&dir, &["prod-*"]);
        run(ConfigCommand::Add { context: "*-production".into() }, &store).unwrap();
        assert_eq!(stored(&store), vec!["prod-*", "*-production"]);
    }

    #[test]
    fn duplicate_add_does_not_save() {
        let dir = tempfile::tempdir().unwrap();
        let store = CountingStore::with(&dir, &["prod-*"]);
        let before = std::fs::read_to_string(store.path()).unwrap();
        run(ConfigCommand::Add { context: "prod-*".into() }, &store).unwrap();
        assert_eq!(store.saves.get(), 0);
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
    }

    #[test]
    fn remove_existing_saves() {
        let dir = tempfile::tempdir().unwrap();
        let store = CountingStore::with(&dir, &["prod-*", "staging"]);
        run(ConfigCommand::Remove { context: "staging".into() }, &store).unwrap();
        assert_eq!(stored(&store), vec!["prod-*"]);
        assert_eq!(store.saves.get(), 1);
    }

    #[test]
    fn remove_absent_does_not_save() {
        let dir = tempfile::tempdir().unwrap();
        let store = CountingStore::with(&dir, &["prod-*"]);
        run(ConfigCommand::Remove { context: "staging".into() }, &store).unwrap();
        assert_eq!(store.saves.get(), 0);
        assert_eq!(stored(&store), vec!["prod-*"]);
    }

    #[test]
    fn remove_without_config_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = CountingStore::new(&dir);
        run(ConfigCommand::Remove { context: "prod-*".into() }, &store).unwrap();
        assert_eq!(store.saves.get(), 0);
        assert!(!store.exists().unwrap());
    }

    #[test]
    fn list_without_config_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = CountingStore::new(&dir);
        run(ConfigCommand::List { json: true }, &store).unwrap();
        run(ConfigCommand::List { json: false }, &store).unwrap();
        assert!(!store.exists().unwrap());
    }

    #[test]
    fn list_propagates_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let store = CountingStore::new(&dir);
        std::fs::write(store.path(), "protected_contexts = 1\n").unwrap();
        assert!(matches!(
            run(ConfigCommand::List { json: false }, &store),
            Err(GuardError::ConfigParse { .. })
        ));
    }

    #[test]
    fn list_json_is_string_array() {
        let config = Config {
            protected_contexts: vec!["prod-*".into(), "arn:aws:eks:*:*:cluster/prod".into()],
        };
        let value: serde_json::Value = serde_json::from_str(&list_json(&config).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!(["prod-*", "arn:aws:eks:*:*:cluster/prod"])
        );
        assert_eq!(list_json(&Config::default()).unwrap().trim(), "[]");
    }

    #[test]
    fn path_does_not_touch_config() {
        let dir = tempfile::tempdir().unwrap();
        let store = CountingStore::new(&dir);
        run(ConfigCommand::Path, &store).unwrap();
        assert_eq!(store.saves.get(), 0);
        assert!(!store.exists().unwrap());
    }

    #[test]
    fn setup_saves_selection() {
        let dir = tempfile::tempdir().unwrap();
        let store = CountingStore::new(&dir);
        run(ConfigCommand::Setup, &store).unwrap();
        assert_eq!(stored(&store), vec!["prod", "dev"]);
        assert_eq!(store.saves.get(), 1);
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        ConfigCli::command().debug_assert();
    }
}
