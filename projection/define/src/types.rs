//! Value types for resource fields.
//!
//! This module provides the type vocabulary of a schema document:
//!
//! - [`Primitive`] - Scalar wire types (string, boolean, int, ...)
//! - [`ValueType`] - A primitive, a reference to another resource, or a
//!   container (`array[T]`, `map[T]`) of any value type
//!
//! Value types are written in schema documents as *type expressions* and
//! parsed with [`str::parse`].

use std::fmt;
use std::str::FromStr;

use strum::{Display, EnumIter, EnumString};

use crate::error::TypeExprError;

/// Scalar wire types understood by the generator.
///
/// Parsing accepts a few aliases (`bool`, `int64`, `integer`, `float64`,
/// `number`); display always uses the canonical name.
///
/// ## Examples
///
/// ```
/// use std::str::FromStr;
/// use projection_define::Primitive;
///
/// assert_eq!(Primitive::from_str("bool").unwrap(), Primitive::Boolean);
/// assert_eq!(Primitive::Boolean.to_string(), "boolean");
/// assert_eq!(Primitive::from_str("int64").unwrap(), Primitive::Int);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumString,
)]
pub enum Primitive {
    /// UTF-8 string
    #[strum(to_string = "string")]
    String,
    /// true/false
    #[strum(to_string = "boolean", serialize = "bool")]
    Boolean,
    /// 64-bit signed integer
    #[strum(to_string = "int", serialize = "int64", serialize = "integer")]
    Int,
    /// 64-bit float
    #[strum(to_string = "float", serialize = "float64", serialize = "number")]
    Float,
    /// Timestamp carried as a string on the wire
    #[strum(to_string = "date")]
    Date,
    /// String restricted to a set of options
    #[strum(to_string = "enum")]
    Enum,
    /// Secret string
    #[strum(to_string = "password")]
    Password,
    /// Base64-encoded payload carried as a string
    #[strum(to_string = "base64")]
    Base64,
    /// Arbitrary JSON value
    #[strum(to_string = "json")]
    Json,
}

/// Container keyword for ordered sequences.
const ARRAY_KEYWORD: &str = "array";
/// Container keyword for string-keyed mappings.
const MAP_KEYWORD: &str = "map";

/// The value type of a field.
///
/// References hold the name used in the schema document until the
/// generator resolves them; afterwards they hold the target's type tag.
///
/// ## Examples
///
/// ```
/// use projection_define::{Primitive, ValueType};
///
/// let ty: ValueType = "array[map[string]]".parse().unwrap();
/// assert_eq!(
///     ty,
///     ValueType::list(ValueType::map(ValueType::Primitive(Primitive::String)))
/// );
/// assert_eq!(ty.to_string(), "array[map[string]]");
///
/// let reference: ValueType = "AlertStatus".parse().unwrap();
/// assert_eq!(reference, ValueType::Reference("AlertStatus".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// A scalar wire type.
    Primitive(Primitive),
    /// A nested object of another resource kind.
    Reference(String),
    /// An ordered sequence of values.
    List(Box<ValueType>),
    /// A mapping from string keys to values.
    Map(Box<ValueType>),
}

impl ValueType {
    /// Wraps `element` in an ordered sequence.
    pub fn list(element: ValueType) -> Self {
        Self::List(Box::new(element))
    }

    /// Wraps `element` in a string-keyed mapping.
    pub fn map(element: ValueType) -> Self {
        Self::Map(Box::new(element))
    }

    /// Returns `true` for `array[..]` types.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Returns `true` for `map[..]` types.
    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    /// Returns `true` for sequences and mappings.
    pub fn is_container(&self) -> bool {
        self.is_list() || self.is_map()
    }

    /// Returns the referenced resource name when this is a singular reference.
    pub fn as_reference(&self) -> Option<&str> {
        match self {
            Self::Reference(target) => Some(target),
            _ => None,
        }
    }

    /// Visits every primitive and reference, descending through containers.
    pub fn leaves(&self) -> Vec<&ValueType> {
        match self {
            Self::List(inner) | Self::Map(inner) => inner.leaves(),
            leaf => vec![leaf],
        }
    }

    /// Mutable variant of [`ValueType::leaves`].
    pub fn leaves_mut(&mut self) -> Vec<&mut ValueType> {
        match self {
            Self::List(inner) | Self::Map(inner) => inner.leaves_mut(),
            leaf => vec![leaf],
        }
    }

    /// Returns `true` if any leaf is the given primitive.
    pub fn contains_primitive(&self, primitive: Primitive) -> bool {
        self.leaves()
            .into_iter()
            .any(|leaf| *leaf == ValueType::Primitive(primitive))
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(primitive) => write!(f, "{primitive}"),
            Self::Reference(target) => write!(f, "{target}"),
            Self::List(inner) => write!(f, "{ARRAY_KEYWORD}[{inner}]"),
            Self::Map(inner) => write!(f, "{MAP_KEYWORD}[{inner}]"),
        }
    }
}

impl FromStr for ValueType {
    type Err = TypeExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_type_expr(s)
    }
}

/// Parses a type expression such as `string`, `Condition` or `array[map[int]]`.
fn parse_type_expr(source: &str) -> Result<ValueType, TypeExprError> {
    let expr = source.trim();
    if expr.is_empty() {
        return Err(TypeExprError::Empty);
    }

    match expr.find('[') {
        Some(open) => {
            if !expr.ends_with(']') {
                return Err(TypeExprError::UnbalancedBrackets(expr.to_string()));
            }
            let head = expr[..open].trim();
            let element = parse_type_expr(&expr[open + 1..expr.len() - 1])?;
            match head {
                ARRAY_KEYWORD => Ok(ValueType::list(element)),
                MAP_KEYWORD => Ok(ValueType::map(element)),
                other => Err(TypeExprError::UnknownContainer(other.to_string())),
            }
        }
        None if expr.contains(']') => Err(TypeExprError::UnbalancedBrackets(expr.to_string())),
        None => {
            if expr == ARRAY_KEYWORD || expr == MAP_KEYWORD {
                return Err(TypeExprError::MissingElementType(expr.to_string()));
            }
            if !is_type_name(expr) {
                return Err(TypeExprError::InvalidName(expr.to_string()));
            }
            Ok(Primitive::from_str(expr)
                .map(ValueType::Primitive)
                .unwrap_or_else(|_| ValueType::Reference(expr.to_string())))
        }
    }
}

/// A type name starts with a letter and continues with letters, digits or `_`.
fn is_type_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
