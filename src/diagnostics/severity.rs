//! Diagnostic severity levels

/// Severity level of a diagnostic message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Error: indicates a problem the evaluator must raise to the script.
    Error,
    /// Warning: deprecation notices and the like; execution continues.
    Warning,
}
