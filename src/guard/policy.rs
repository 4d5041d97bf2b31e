//! Safety policy tables: which kubectl commands are read-only, which mutate
//! cluster state, and which flags consume the following argument.
//!
//! The tables are constant for the life of the process. Adjust them here to
//! change what counts as dangerous.

use super::classify::Command;

/// Read-only commands that never modify cluster state.
pub const SAFE_COMMANDS: &[&str] = &[
    "get",
    "describe",
    "logs",
    "top",
    "explain",
    "api-resources",
    "api-versions",
    "version",
    "cluster-info",
    "config",
    "auth",
    "wait",
    "diff",
];

/// Commands that modify cluster state and need confirmation on a protected context.
pub const STATE_ALTERING_COMMANDS: &[&str] = &[
    "apply",
    "create",
    "delete",
    "patch",
    "replace",
    "edit",
    "scale",
    "rollout",
    "autoscale",
    "expose",
    "run",
    "set",
    "label",
    "annotate",
    "taint",
    "drain",
    "cordon",
    "uncordon",
    "exec",
    "cp",
    "debug",
    "attach",
];

/// `(command, subcommand)` pairs that only report state even though the
/// command itself is state-altering.
pub const SAFE_SUBCOMMAND_OVERRIDES: &[(&str, &str)] =
    &[("rollout", "status"), ("rollout", "history")];

/// Short flags whose value is the next argument (`-n default`).
pub const VALUE_SHORT_FLAGS: &[&str] = &["-n", "-l", "-f", "-o", "-c", "-s", "-p", "-k", "-v"];

/// Long flags whose value may be the next argument (`--namespace default`).
/// The `--flag=value` form never consumes the next argument.
pub const VALUE_LONG_FLAGS: &[&str] = &[
    "--context",
    "--namespace",
    "--selector",
    "--filename",
    "--output",
    "--container",
    "--kubeconfig",
    "--cluster",
    "--user",
    "--server",
    "--token",
    "--as",
    "--as-group",
    "--as-uid",
    "--request-timeout",
    "--certificate-authority",
    "--client-certificate",
    "--client-key",
    "--tls-server-name",
    "--cache-dir",
    "--username",
    "--password",
    "--profile",
    "--profile-output",
];

fn in_set(set: &[&str], val: &str) -> bool {
    set.contains(&val)
}

fn is_safe_override(cmd: &Command) -> bool {
    SAFE_SUBCOMMAND_OVERRIDES
        .iter()
        .any(|(name, sub)| *name == cmd.name && *sub == cmd.subcommand)
}

/// Whether a short flag takes its value from the next argument.
pub fn short_flag_takes_value(flag: &str) -> bool {
    in_set(VALUE_SHORT_FLAGS, flag)
}

/// Whether a long flag (without `=`) takes its value from the next argument.
pub fn long_flag_takes_value(flag: &str) -> bool {
    in_set(VALUE_LONG_FLAGS, flag)
}

/// Whether the command mutates cluster state.
///
/// Evaluation order:
/// 1. Safe subcommand override (`rollout status`) → not altering
/// 2. Known state-altering command → altering
/// 3. Everything else → not altering
///
/// Step 3 is a deliberate fail-open: unknown commands and kubectl plugins
/// are forwarded without confirmation. Add them to
/// [`STATE_ALTERING_COMMANDS`] to guard them.
pub fn is_state_altering(cmd: &Command) -> bool {
    if cmd.name.is_empty() || is_safe_override(cmd) {
        return false;
    }
    in_set(STATE_ALTERING_COMMANDS, &cmd.name)
}

/// Whether the command is known to be read-only. Informational only: the
/// decision engine uses [`is_state_altering`].
pub fn is_safe(cmd: &Command) -> bool {
    if cmd.name.is_empty() || is_safe_override(cmd) {
        return true;
    }
    in_set(SAFE_COMMANDS, &cmd.name)
}
