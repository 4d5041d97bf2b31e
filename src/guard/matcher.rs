//! Match context names against protected glob patterns.

use glob::{MatchOptions, Pattern};

/// Shell-style matching over the whole name. `*` crosses `/` and `:` so
/// EKS ARNs like `arn:aws:eks:*:*:cluster/prod-*` work. Patterns go through
/// [`to_glob`] first, so `**` and backslash escapes behave as in a shell.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// A compiled set of protected-context patterns.
///
/// Patterns that fail to compile are dropped with a warning and can never
/// match anything.
#[derive(Debug, Clone)]
pub struct ContextMatcher {
    /// Compiled pattern alongside the text the user wrote.
    patterns: Vec<(String, Pattern)>,
}

impl ContextMatcher {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let patterns = patterns
            .iter()
            .filter_map(|raw| {
                let raw = raw.as_ref();
                match compile(raw) {
                    Ok(p) => Some((raw.to_string(), p)),
                    Err(e) => {
                        log::warn!("ignoring malformed pattern {raw:?}: {e}");
                        None
                    }
                }
            })
            .collect();
        Self { patterns }
    }

    /// The first pattern matching `context`, if any.
    pub fn find(&self, context: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|(_, p)| p.matches_with(context, MATCH_OPTIONS))
            .map(|(raw, _)| raw.as_str())
    }

    /// True iff at least one pattern matches `context`.
    pub fn is_protected(&self, context: &str) -> bool {
        self.find(context).is_some()
    }
}

/// Match a single pattern against a context name. Malformed patterns never match.
pub fn matches(pattern: &str, context: &str) -> bool {
    compile(pattern).is_ok_and(|p| p.matches_with(context, MATCH_OPTIONS))
}

fn compile(raw: &str) -> Result<Pattern, glob::PatternError> {
    Pattern::new(&to_glob(raw))
}

/// Rewrite shell glob syntax into the dialect the `glob` crate accepts.
///
/// Runs of `*` collapse to one (`glob` only allows `**` as a whole path
/// component). `\x` outside a bracket class becomes `[x]` for the
/// metacharacters `* ? [ ]` and plain `x` otherwise. A trailing lone `\`
/// stays literal. Bracket classes are copied through, with a leading `^`
/// spelled as `!`.
fn to_glob(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' => {
                while chars.next_if_eq(&'*').is_some() {}
                out.push('*');
            }
            '\\' => match chars.next() {
                Some(meta @ ('*' | '?' | '[' | ']')) => {
                    out.push('[');
                    out.push(meta);
                    out.push(']');
                }
                Some(other) => out.push(other),
                None => out.push('\\'),
            },
            '[' => {
                out.push('[');
                if let Some(neg) = chars.next_if(|&n| n == '!' || n == '^') {
                    out.push(if neg == '^' { '!' } else { neg });
                }
                // A `]` right after the opener is a member, not the close.
                if chars.next_if_eq(&']').is_some() {
                    out.push(']');
                }
                for member in chars.by_ref() {
                    out.push(member);
                    if member == ']' {
                        break;
                    }
                }
            }
            _ => out.push(c),
        }
    }
    out
}
