/// Outcome of guarding one kubectl invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Forward the command to kubectl unchanged.
    Allow,
    /// State-altering command on a protected context: ask first.
    RequireConfirmation {
        /// The protected context the command would run against.
        context: String,
        /// `"command subcommand"` for display.
        command: String,
    },
    /// No configuration yet: run the first-time setup wizard.
    SetupRequired,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Allow => "allow",
            Decision::RequireConfirmation { .. } => "confirm",
            Decision::SetupRequired => "setup",
        }
    }

    /// Message shown by the confirmation prompt, if confirmation is required.
    pub fn prompt_message(&self) -> Option<String> {
        match self {
            Decision::RequireConfirmation { context, command } => {
                Some(format!("{command} on protected context: {context}"))
            }
            _ => None,
        }
    }
}
