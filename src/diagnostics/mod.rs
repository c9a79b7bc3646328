//! Diagnostics: the single channel through which the object model and the
//! parser report failures (spec.md §7, "Error Handling Design").
//!
//! Every raise site in this crate builds a [`Diagnostic`] rather than
//! returning a bare `String` or reaching for an external error-derive
//! crate; the teacher crate's own `Diagnostic` (builder struct with
//! severity/title/span/hints) is the model followed here, trimmed to the
//! five named conditions spec.md actually enumerates.

pub mod position;
pub mod severity;

use std::fmt;

pub use position::{Position, Span};
pub use severity::Severity;

use crate::syntax::token_type::TokenType;

/// The five named error conditions from spec.md §7. `SyntaxError` is the
/// only one the parser itself raises; the rest come from the object model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NameError,
    TypeError,
    ArgumentError,
    LocalJumpError,
    SyntaxError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::NameError => "NameError",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::ArgumentError => "ArgumentError",
            ErrorKind::LocalJumpError => "LocalJumpError",
            ErrorKind::SyntaxError => "SyntaxError",
        };
        write!(f, "{s}")
    }
}

/// Extra detail carried only by `SyntaxError` diagnostics (spec.md §4.2
/// Diagnostics: "SyntaxError { line, expected, actual_token_type }").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxErrorDetail {
    pub line: usize,
    pub expected: &'static str,
    pub actual: TokenType,
}

/// A raised condition. Named conditions carry a formatted, user-visible
/// message and are surfaced to the evaluator unwound, never caught inside
/// this crate (spec.md §7: "The object model performs no catch internally").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub severity: Severity,
    pub message: String,
    pub span: Option<Span>,
    pub syntax_detail: Option<SyntaxErrorDetail>,
}

impl Diagnostic {
    pub fn error(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: Severity::Error,
            message: message.into(),
            span: None,
            syntax_detail: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::NameError,
            severity: Severity::Warning,
            message: message.into(),
            span: None,
            syntax_detail: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn name_error(message: impl Into<String>) -> Self {
        Self::error(ErrorKind::NameError, message)
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::error(ErrorKind::TypeError, message)
    }

    pub fn argument_error(message: impl Into<String>) -> Self {
        Self::error(ErrorKind::ArgumentError, message)
    }

    pub fn local_jump_error(message: impl Into<String>) -> Self {
        Self::error(ErrorKind::LocalJumpError, message)
    }

    pub fn syntax_error(
        message: impl Into<String>,
        line: usize,
        expected: &'static str,
        actual: TokenType,
        span: Span,
    ) -> Self {
        Self {
            kind: ErrorKind::SyntaxError,
            severity: Severity::Error,
            message: message.into(),
            span: Some(span),
            syntax_detail: Some(SyntaxErrorDetail {
                line,
                expected,
                actual,
            }),
        }
    }

    /// Render as a one-line message in the style the original interpreter
    /// this spec was distilled from uses: `KIND: message (line N)`.
    pub fn render(&self) -> String {
        match &self.syntax_detail {
            Some(detail) => format!(
                "{}: {} (line {}, expected {}, got {})",
                self.kind, self.message, detail.line, detail.expected, detail.actual
            ),
            None => format!("{}: {}", self.kind, self.message),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl std::error::Error for Diagnostic {}
