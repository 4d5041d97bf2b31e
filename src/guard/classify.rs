//! Extract the effective kubectl command from a raw argument list.

use super::policy;

/// The command name and first positional subcommand of an invocation.
///
/// Both fields are empty when the argument list holds no positional words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    /// First positional word (e.g. `delete`).
    pub name: String,
    /// Second positional word (e.g. `pod`), empty if absent.
    pub subcommand: String,
}

impl Command {
    /// Human-readable `"command subcommand"`, or just `"command"`.
    pub fn description(&self) -> String {
        if self.subcommand.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.name, self.subcommand)
        }
    }
}

/// Classify an argument list into its command and subcommand, skipping
/// flags and the values they consume.
///
/// This is not a kubectl grammar: unrecognized flags are assumed to be
/// boolean, and `--flag=value` is always a single self-contained token.
/// Scanning stops once the subcommand is found.
pub fn classify(args: &[String]) -> Command {
    let mut cmd = Command::default();
    let mut skip_next = false;

    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }

        if let Some(long) = arg.strip_prefix("--") {
            if !long.contains('=') && policy::long_flag_takes_value(arg) {
                skip_next = true;
            }
            continue;
        }

        if arg.starts_with('-') {
            if policy::short_flag_takes_value(arg) {
                skip_next = true;
            }
            continue;
        }

        if cmd.name.is_empty() {
            cmd.name = arg.clone();
        } else {
            cmd.subcommand = arg.clone();
            break;
        }
    }

    cmd
}
