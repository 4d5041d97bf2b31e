//! Decision engine: combines config state, the current context and the
//! argument classifier into a [`Decision`].

pub mod classify;
pub mod decision;
pub mod matcher;
pub mod policy;

pub use classify::{Command, classify};
pub use decision::Decision;
pub use matcher::ContextMatcher;

use crate::config::{Config, ConfigStore};
use crate::error::Result;
use crate::kubectl::ContextProvider;

/// Decide what to do with one invocation.
///
/// Pure function of the loaded config (`None` when no config file exists),
/// the current context (`None` when it could not be determined) and the raw
/// arguments.
///
/// 1. No config → `SetupRequired`
/// 2. Unknown context → `Allow` (fail-open, kubectl reports its own errors)
/// 3. Unprotected context → `Allow`
/// 4. Protected context → `RequireConfirmation` if state-altering, else `Allow`
pub fn decide(config: Option<&Config>, context: Option<&str>, args: &[String]) -> Decision {
    let Some(config) = config else {
        return Decision::SetupRequired;
    };
    let Some(context) = context else {
        return Decision::Allow;
    };

    let matcher = ContextMatcher::new(&config.protected_contexts);
    let Some(pattern) = matcher.find(context) else {
        log::debug!("context {context} is not protected");
        return Decision::Allow;
    };

    let cmd = classify(args);
    if policy::is_state_altering(&cmd) {
        log::debug!(
            "context {context} matches {pattern:?}; {:?} is state-altering",
            cmd.description()
        );
        Decision::RequireConfirmation {
            context: context.to_string(),
            command: cmd.description(),
        }
    } else {
        if !policy::is_safe(&cmd) {
            log::debug!("{:?} is unclassified; allowing", cmd.description());
        }
        log::debug!(
            "context {context} matches {pattern:?}; {:?} is not state-altering",
            cmd.description()
        );
        Decision::Allow
    }
}

/// The decision engine bound to its two lookups.
pub struct Guard<'a> {
    store: &'a dyn ConfigStore,
    contexts: &'a dyn ContextProvider,
}

impl<'a> Guard<'a> {
    pub fn new(store: &'a dyn ConfigStore, contexts: &'a dyn ContextProvider) -> Self {
        Self { store, contexts }
    }

    /// Evaluate an invocation. Config I/O and parse errors propagate; a
    /// failed context lookup does not.
    ///
    /// The context is fetched fresh on every call so a `use-context` between
    /// runs is seen immediately.
    pub fn check(&self, args: &[String]) -> Result<Decision> {
        if !self.store.exists()? {
            return Ok(Decision::SetupRequired);
        }
        let config = self.store.load()?;

        let context = match self.contexts.current_context() {
            Ok(ctx) => Some(ctx),
            Err(e) => {
                log::debug!("{e}; allowing");
                None
            }
        };

        let decision = decide(Some(&config), context.as_deref(), args);
        log::debug!("decision: {}", decision.as_str());
        Ok(decision)
    }
}
