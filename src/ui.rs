//! Interactive terminal prompts and status output.

use dialoguer::console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, MultiSelect};

use crate::error::Result;

/// User interaction needed by the guard and the setup wizard.
pub trait Prompt {
    /// Ask a yes/no question. Defaults to no.
    fn confirm(&self, message: &str) -> Result<bool>;

    /// Present a checklist. Returns the chosen items in list order, or
    /// `None` if the user cancelled.
    fn multi_select(&self, title: &str, items: &[String]) -> Result<Option<Vec<String>>>;
}

/// Prompts rendered on the controlling terminal via `dialoguer`.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn confirm(&self, message: &str) -> Result<bool> {
        print_warning(message);
        let answer = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Confirm?")
            .default(false)
            .interact_opt()?;
        Ok(answer.unwrap_or(false))
    }

    fn multi_select(&self, title: &str, items: &[String]) -> Result<Option<Vec<String>>> {
        println!("{}", style(title).cyan().bold());
        println!(
            "{}",
            style("space to toggle, a to toggle all, enter to confirm, esc to cancel").dim()
        );
        let chosen = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt("Select contexts to protect")
            .items(items)
            .interact_opt()?;
        Ok(chosen.map(|indices| {
            indices
                .into_iter()
                .filter_map(|i| items.get(i).cloned())
                .collect()
        }))
    }
}

/// Ask for confirmation, treating any terminal failure (no tty, closed
/// stdin) as a refusal.
pub fn confirm_or_decline(prompt: &dyn Prompt, message: &str) -> bool {
    match prompt.confirm(message) {
        Ok(answer) => answer,
        Err(e) => {
            log::debug!("confirmation failed, treating as no: {e}");
            false
        }
    }
}

pub fn print_success(message: &str) {
    println!("{}", style(format!("✓ {message}")).green());
}

pub fn print_warning(message: &str) {
    eprintln!("{}", style(format!("⚠️  {message}")).yellow());
}

pub fn print_info(message: &str) {
    println!("{message}");
}
