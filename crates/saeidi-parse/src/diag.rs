use std::fmt::Write as _;
use thiserror::Error;

/// One syntax error, recorded in parse order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[error - line {line}] {message}\n  found: '{found}'\n  expected: {expected}")]
pub struct Diagnostic {
    pub line: u32,
    pub message: String,
    /// Lexeme of the offending token (empty at end of input).
    pub found: String,
    pub expected: String,
}

impl Diagnostic {
    pub fn new(
        line: u32,
        message: impl Into<String>,
        found: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self {
            line,
            message: message.into(),
            found: found.into(),
            expected: expected.into(),
        }
    }
}

/// Every diagnostic of a failed parse, rendered as one report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render_report(.0))]
pub struct ParseErrors(pub Vec<Diagnostic>);

/// Render a diagnostics list for display.
pub fn render_report(diags: &[Diagnostic]) -> String {
    if diags.is_empty() {
        return "no errors".to_string();
    }
    let mut out = format!("===== errors ({}) =====\n", diags.len());
    for d in diags {
        let _ = writeln!(out, "{d}\n");
    }
    out
}
