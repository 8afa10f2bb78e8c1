use std::fmt::{Display, Formatter};

/// The two discriminable failure kinds the interpreter can report.
///
/// Both variants carry a short diagnostic message for [`Display`]/logging; the
/// message text itself carries no semantic weight — callers distinguish errors
/// only by variant (see [`SchemeError::is_syntax`] / [`SchemeError::is_runtime`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemeError {
    /// Lexically or structurally malformed input: illegal byte, truncated
    /// stream, stray `)`, misplaced `.`, or unread trailing tokens.
    Syntax(String),
    /// Well-formed input that cannot be evaluated: wrong arity, type
    /// mismatch, application of a non-function head, or a degenerate AST.
    Runtime(String),
}

impl SchemeError {
    pub fn syntax(message: impl Into<String>) -> Self {
        SchemeError::Syntax(message.into())
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        SchemeError::Runtime(message.into())
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, SchemeError::Syntax(_))
    }

    pub fn is_runtime(&self) -> bool {
        matches!(self, SchemeError::Runtime(_))
    }
}

impl Display for SchemeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemeError::Syntax(message) => write!(f, "SyntaxError: {}", message),
            SchemeError::Runtime(message) => write!(f, "RuntimeError: {}", message),
        }
    }
}

impl std::error::Error for SchemeError {}

pub type SchemeResult<T> = Result<T, SchemeError>;
