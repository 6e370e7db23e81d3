//! beryl_diagnostics: Diagnostic messages and the fatal parse error.
//!
//! The parser has exactly one failure channel: a `ParseError` built from a
//! `DiagnosticMessage` template plus the scan position at which the grammar
//! rule gave up. There is no recovery and no multi-error batching; the first
//! hard failure aborts the whole parse.

use beryl_core::{LineAndColumn, LineMap, TextSpan};
use std::fmt;
use thiserror::Error;

/// Diagnostic category. The parser only ever emits errors, but the catalog
/// keeps the category explicit so messages stay self-describing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic error code (e.g., 1002).
    pub code: u32,
    /// The category of this diagnostic.
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A fatal parse error: a realized diagnostic with location information.
///
/// Soft rule failures never produce one of these; they are ordinary
/// backtracking. A `ParseError` means a rule committed to a grammatical
/// shape and a required token was missing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{category} BRL{code}: {message_text} at {location} (near {context:?})")]
pub struct ParseError {
    /// The diagnostic error code.
    pub code: u32,
    /// The category (always `Error` in practice).
    pub category: DiagnosticCategory,
    /// The resolved message text.
    pub message_text: String,
    /// The source span where the parse gave up.
    pub span: TextSpan,
    /// Line and column of the span start.
    pub location: LineAndColumn,
    /// The unconsumed remainder of the offending line.
    pub context: String,
}

impl ParseError {
    /// Realize a message template at a source span, resolving line/column
    /// through the given line map.
    pub fn at(
        message: &DiagnosticMessage,
        args: &[&str],
        span: TextSpan,
        line_map: &LineMap,
        context: &str,
    ) -> Self {
        Self {
            code: message.code,
            category: message.category,
            message_text: format_message(message.message, args),
            span,
            location: line_map.line_and_column_of(span.start),
            context: context.to_string(),
        }
    }

    /// Whether this is an error diagnostic.
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

// ============================================================================
// Diagnostic messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage {
                code: $code,
                category: DiagnosticCategory::Error,
                message: $msg,
            }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage {
                code: $code,
                category: DiagnosticCategory::Warning,
                message: $msg,
            }
        };
    }

    pub const EXPRESSION_EXPECTED: DiagnosticMessage = diag!(1001, Error, "Expression expected.");
    pub const SEPARATOR_EXPECTED: DiagnosticMessage =
        diag!(1002, Error, "';' or newline expected.");
    pub const METHOD_NAME_EXPECTED: DiagnosticMessage =
        diag!(1003, Error, "Method name expected after 'def'.");
    pub const END_EXPECTED: DiagnosticMessage =
        diag!(1004, Error, "'end' expected to close method body.");
    pub const MESSAGE_EXPECTED_AFTER_DOT: DiagnosticMessage =
        diag!(1005, Error, "Method call expected after '.'.");
    pub const EXPRESSION_EXPECTED_AFTER_OPERATOR: DiagnosticMessage =
        diag!(1006, Error, "Expression expected after operator '{0}'.");
    pub const CLOSE_PAREN_EXPECTED: DiagnosticMessage = diag!(1007, Error, "')' expected.");
    pub const ARGUMENT_EXPRESSION_EXPECTED: DiagnosticMessage =
        diag!(1008, Error, "Argument expression expected.");
    pub const NESTING_TOO_DEEP: DiagnosticMessage =
        diag!(1009, Error, "Expression nesting too deep.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        assert_eq!(
            format_message("Expression expected after operator '{0}'.", &["+"]),
            "Expression expected after operator '+'."
        );
        assert_eq!(format_message("no placeholders", &[]), "no placeholders");
    }

    #[test]
    fn test_parse_error_display() {
        let map = LineMap::new("x = 1\ny ~\n");
        let err = ParseError::at(
            &messages::SEPARATOR_EXPECTED,
            &[],
            TextSpan::empty(8),
            &map,
            "~",
        );
        let text = err.to_string();
        assert!(text.contains("BRL1002"));
        assert!(text.contains("line 2, column 3"));
        assert!(err.is_error());
    }
}
