//! kubectl-guard: drop-in kubectl wrapper.
//!
//! Forwards every invocation to kubectl, except state-altering commands on
//! a protected context, which need an interactive confirmation first.
//!
//! Handles:
//!   - First run: setup wizard to pick protected contexts
//!   - `config setup|list|add|remove|path`: manage the protected list
//!   - `--version`, `--help`
//!   - everything else: guard, then exec kubectl with the argv unchanged

use std::ffi::OsString;

use kubectl_guard::cli::{self, ConfigCli, Route};
use kubectl_guard::config::FileConfigStore;
use kubectl_guard::guard::{Decision, Guard};
use kubectl_guard::kubectl::Kubectl;
use kubectl_guard::ui::{self, TerminalPrompt};
use kubectl_guard::{Result, logging, setup};

/// Exit status when the user declines a confirmation.
const ABORTED_EXIT_CODE: i32 = 1;

fn main() {
    logging::init();

    let raw: Vec<OsString> = std::env::args_os().skip(1).collect();
    if let Err(e) = run(raw) {
        eprintln!("kubectl-guard: {e}");
        std::process::exit(1);
    }
}

fn run(raw: Vec<OsString>) -> Result<()> {
    let args: Vec<String> = raw
        .iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();

    match cli::route(args) {
        Route::Version => println!("kubectl-guard {}", env!("CARGO_PKG_VERSION")),
        Route::Help => print!("{}", cli::HELP),
        Route::Manage(rest) => {
            let parsed = ConfigCli::parse_args(&rest);
            let store = FileConfigStore::from_env()?;
            cli::run_config(parsed.command, &store, &Kubectl::from_env(), &TerminalPrompt)?;
        }
        Route::Guard(args) => run_guard(&args, &raw)?,
    }
    Ok(())
}

/// Guard one kubectl invocation. `args` drive the decision; `raw` is what
/// kubectl receives, byte for byte.
fn run_guard(args: &[String], raw: &[OsString]) -> Result<()> {
    let kubectl = Kubectl::from_env();

    let decision = match FileConfigStore::from_env()
        .and_then(|store| Guard::new(&store, &kubectl).check(args))
    {
        Ok(decision) => decision,
        Err(e) => {
            // A broken config must not make kubectl unusable.
            ui::print_warning(&format!("{e}; running kubectl unguarded"));
            Decision::Allow
        }
    };

    match &decision {
        Decision::Allow => {}
        Decision::RequireConfirmation { .. } => {
            let message = decision.prompt_message().unwrap_or_default();
            if !ui::confirm_or_decline(&TerminalPrompt, &message) {
                eprintln!("Aborted.");
                std::process::exit(ABORTED_EXIT_CODE);
            }
        }
        Decision::SetupRequired => {
            let store = FileConfigStore::from_env()?;
            match cli::context_names(&kubectl) {
                Ok(names) => {
                    setup::run_setup(&names, &store, &TerminalPrompt)?;
                }
                Err(e) => {
                    ui::print_warning(&format!("Could not get kubectl contexts: {e}"));
                    ui::print_info("Make sure kubectl is installed and configured.");
                }
            }
            return Ok(());
        }
    }

    match kubectl.exec(raw)? {}
}
