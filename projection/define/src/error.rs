//! Error types for schema model parsing.

use thiserror::Error;

/// Errors produced while parsing a field's type expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeExprError {
    /// The expression (or a container's element) is blank.
    #[error("type expression is empty")]
    Empty,

    /// Opening and closing brackets do not pair up.
    #[error("unbalanced brackets in type expression '{0}'")]
    UnbalancedBrackets(String),

    /// A bracketed expression uses a container other than `array` or `map`.
    #[error("unknown container '{0}' (expected 'array' or 'map')")]
    UnknownContainer(String),

    /// A container keyword was used without an element type.
    #[error("container '{0}' requires an element type, e.g. '{0}[string]'")]
    MissingElementType(String),

    /// A primitive or reference name contains characters that cannot name a type.
    #[error("invalid type name '{0}'")]
    InvalidName(String),
}
