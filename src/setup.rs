//! First-run setup: choose which contexts to protect.

use crate::config::{Config, ConfigStore};
use crate::error::Result;
use crate::ui::{self, Prompt};

const SETUP_TITLE: &str = "kubectl-guard: First-time Setup";

/// Run the setup wizard over the given context names.
///
/// Returns `Ok(true)` when a config was saved (possibly protecting nothing),
/// `Ok(false)` when there was nothing to choose from or the user cancelled.
pub fn run_setup(
    context_names: &[String],
    store: &dyn ConfigStore,
    prompt: &dyn Prompt,
) -> Result<bool> {
    if context_names.is_empty() {
        ui::print_warning("No kubectl contexts found.");
        ui::print_info("Configure kubectl first, then re-run your command.");
        return Ok(false);
    }

    let Some(selected) = prompt.multi_select(SETUP_TITLE, context_names)? else {
        ui::print_info("Setup cancelled.");
        return Ok(false);
    };

    let mut config = Config::default();
    for name in &selected {
        config.add_context(name);
    }
    store.save(&config)?;

    ui::print_success(&format!("Saved to {}", store.path().display()));
    if config.protected_contexts.is_empty() {
        ui::print_info("No contexts protected.");
    } else {
        ui::print_info(&format!(
            "Protected: {}",
            config.protected_contexts.join(", ")
        ));
    }
    println!();
    ui::print_info("Re-run your command to continue.");

    Ok(true)
}
