//! kubectl-guard: a kubectl wrapper that guards protected contexts.
//!
//! Every invocation is classified into one of three decisions:
//! [`guard::Decision::Allow`], [`guard::Decision::RequireConfirmation`], or
//! [`guard::Decision::SetupRequired`]. A command needs confirmation only when
//! the current context matches a protected glob pattern *and* the command
//! mutates cluster state.
//!
//! # Architecture
//!
//! - **[`guard`]**: Decision engine: policy tables, argument classifier, context matcher.
//! - **[`config`]**: Protected pattern store (TOML file).
//! - **[`kubectl`]**: Context lookups and process handoff to the real kubectl.
//! - **[`ui`]**: Confirmation and checklist prompts.
//! - **[`setup`]**: First-run wizard.
//! - **[`cli`]**: Top-level routing and `config` management commands.
//! - **[`logging`]**: Opt-in diagnostic logging on stderr.

/// Top-level routing and `config` management commands.
pub mod cli;
/// Protected pattern set and its on-disk store.
pub mod config;
/// Error type shared across the crate.
pub mod error;
/// Decision engine: policy tables, classifier, matcher, decision.
pub mod guard;
/// kubectl context lookups and exec.
pub mod kubectl;
/// Diagnostic logging setup.
pub mod logging;
/// First-run setup wizard.
pub mod setup;
/// Interactive prompts and status output.
pub mod ui;

pub use error::{GuardError, Result};

use guard::Decision;

/// Decide an invocation against an in-memory pattern set and a known context.
///
/// This is the main entry point for tests and simple usage. The binary uses
/// [`guard::Guard`] with the file store and the real kubectl instead.
pub fn evaluate(patterns: &[&str], context: &str, args: &[&str]) -> Decision {
    let config = config::Config {
        protected_contexts: patterns.iter().map(|p| p.to_string()).collect(),
    };
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    guard::decide(Some(&config), Some(context), &args)
}
