//! The wrapped kubectl binary: context lookups and process handoff.

use std::convert::Infallible;
use std::ffi::{OsStr, OsString};
use std::process::Command;

use crate::error::{GuardError, Result};

/// Env var naming the kubectl binary to wrap (defaults to `kubectl` on `PATH`).
pub const KUBECTL_ENV_VAR: &str = "KUBECTL_GUARD_KUBECTL";

/// One row of `kubectl config get-contexts`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KubeContext {
    pub name: String,
    pub cluster: String,
    pub auth_info: String,
    pub namespace: String,
    /// Marked with `*` in the CURRENT column.
    pub current: bool,
}

/// Source of kubeconfig context information.
pub trait ContextProvider {
    /// Name of the active context. Looked up on every call, never cached.
    fn current_context(&self) -> Result<String>;
    /// All contexts known to the kubeconfig.
    fn list_contexts(&self) -> Result<Vec<KubeContext>>;
}

/// Parse one line of `kubectl config get-contexts --no-headers`.
///
/// Columns are CURRENT, NAME, CLUSTER, AUTHINFO, NAMESPACE. CURRENT is `*`
/// or blank; trailing columns may be missing and default to empty.
pub fn parse_context_line(line: &str) -> KubeContext {
    let (current, rest) = match line.strip_prefix('*') {
        Some(rest) => (true, rest),
        None => (false, line),
    };

    let mut fields = rest.split_whitespace().map(String::from);
    KubeContext {
        name: fields.next().unwrap_or_default(),
        cluster: fields.next().unwrap_or_default(),
        auth_info: fields.next().unwrap_or_default(),
        namespace: fields.next().unwrap_or_default(),
        current,
    }
}

/// Parse the full `get-contexts --no-headers` output, skipping blank rows.
pub fn parse_contexts(output: &str) -> Vec<KubeContext> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_context_line)
        .filter(|ctx| !ctx.name.is_empty())
        .collect()
}

/// The real kubectl binary.
#[derive(Debug, Clone)]
pub struct Kubectl {
    program: OsString,
}

impl Default for Kubectl {
    fn default() -> Self {
        Self::new("kubectl")
    }
}

impl Kubectl {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Use `$KUBECTL_GUARD_KUBECTL` if set, else `kubectl` from `PATH`.
    pub fn from_env() -> Self {
        match std::env::var_os(KUBECTL_ENV_VAR) {
            Some(program) if !program.is_empty() => Self::new(program),
            _ => Self::default(),
        }
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// Run kubectl with `args` and capture stdout. A non-zero exit is an error
    /// carrying kubectl's stderr.
    pub fn output(&self, args: &[&str]) -> Result<String> {
        let out = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| GuardError::KubectlSpawn {
                program: self.program_name(),
                source,
            })?;
        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            return Err(GuardError::ContextLookup(format!(
                "{} {} exited with {}: {}",
                self.program_name(),
                args.join(" "),
                out.status,
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }

    /// Replace the current process with kubectl, passing `args` and the
    /// environment through unchanged. Only returns on failure.
    #[cfg(unix)]
    pub fn exec<S: AsRef<OsStr>>(&self, args: &[S]) -> Result<Infallible> {
        use std::os::unix::process::CommandExt;

        log::debug!("exec {} {}", self.program_name(), quote_args(args));
        let source = Command::new(&self.program).args(args).exec();
        Err(GuardError::Exec {
            program: self.program_name(),
            source,
        })
    }

    /// Run kubectl to completion and exit with its status, for targets
    /// without process image replacement.
    #[cfg(not(unix))]
    pub fn exec<S: AsRef<OsStr>>(&self, args: &[S]) -> Result<Infallible> {
        log::debug!("spawn {} {}", self.program_name(), quote_args(args));
        let status = Command::new(&self.program)
            .args(args)
            .status()
            .map_err(|source| GuardError::Exec {
                program: self.program_name(),
                source,
            })?;
        std::process::exit(status.code().unwrap_or(1));
    }
}

/// Shell-quote arguments for diagnostics.
fn quote_args<S: AsRef<OsStr>>(args: &[S]) -> String {
    let words: Vec<String> = args
        .iter()
        .map(|a| a.as_ref().to_string_lossy().into_owned())
        .collect();
    shlex::try_join(words.iter().map(String::as_str)).unwrap_or_else(|_| words.join(" "))
}

impl ContextProvider for Kubectl {
    fn current_context(&self) -> Result<String> {
        let name = self.output(&["config", "current-context"])?;
        let name = name.trim();
        if name.is_empty() {
            return Err(GuardError::ContextLookup("no current context set".into()));
        }
        Ok(name.to_string())
    }

    fn list_contexts(&self) -> Result<Vec<KubeContext>> {
        let out = self.output(&["config", "get-contexts", "--no-headers"])?;
        Ok(parse_contexts(&out))
    }
}
