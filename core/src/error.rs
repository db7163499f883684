//! Error types of the core crate.

use thiserror::Error;

/// A textual value could not be parsed into a value kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} value \"{text}\"")]
pub struct ValueParseError {
    /// Name of the value kind, e.g. `size`.
    pub kind: &'static str,
    /// The rejected text.
    pub text: String,
}

impl ValueParseError {
    /// Creates a parse error for `kind`.
    pub fn new(kind: &'static str, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Reasons a property write is rejected.
///
/// A rejected write leaves the property map untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropertyError {
    /// The widget does not know the tag.
    #[error("\"{0}\" property is not supported")]
    UnknownTag(String),
    /// The value kind cannot be coerced to the kind of the tag.
    #[error("\"{kind}\" value is not compatible with \"{tag}\" property")]
    Incompatible {
        /// Canonical tag.
        tag: String,
        /// Kind of the rejected value.
        kind: &'static str,
    },
    /// A textual value is ill-formed.
    #[error("invalid value \"{text}\" of \"{tag}\" property")]
    Parse {
        /// Canonical tag.
        tag: String,
        /// The rejected text.
        text: String,
    },
    /// A number is outside the range accepted by the tag.
    #[error("value {value} is out of range [{min}, {max}] of \"{tag}\" property")]
    OutOfRange {
        /// Canonical tag.
        tag: String,
        /// The rejected number.
        value: f64,
        /// Smallest accepted value.
        min: f64,
        /// Largest accepted value.
        max: f64,
    },
    /// A string or index does not name a value of the enum.
    #[error("\"{text}\" is not a valid value of \"{tag}\" property")]
    NotInEnum {
        /// Canonical tag.
        tag: String,
        /// The rejected text or index.
        text: String,
    },
    /// An animated property script misses its `from` or `to` value.
    #[error("animated property \"{0}\" needs both \"from\" and \"to\" values")]
    IncompleteAnimatedProperty(String),
    /// An animation attached to the `animation` property animates nothing.
    #[error("animation has no animated property")]
    EmptyAnimation,
}

impl PropertyError {
    /// An [`PropertyError::Incompatible`] error.
    #[must_use]
    pub fn incompatible(tag: &str, kind: &'static str) -> Self {
        Self::Incompatible {
            tag: tag.to_string(),
            kind,
        }
    }

    /// A [`PropertyError::Parse`] error.
    #[must_use]
    pub fn parse(tag: &str, text: impl Into<String>) -> Self {
        Self::Parse {
            tag: tag.to_string(),
            text: text.into(),
        }
    }
}

/// Errors of the data-text format parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// The text ended inside a node.
    #[error("unexpected end of data")]
    UnexpectedEnd,
    /// A character that cannot start or continue the current token.
    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar {
        /// The offending character.
        ch: char,
        /// Byte offset into the text.
        offset: usize,
    },
    /// A quoted string without its closing quote.
    #[error("unterminated string starting at offset {0}")]
    UnterminatedString(usize),
    /// A malformed backslash escape.
    #[error("invalid escape sequence at offset {0}")]
    InvalidEscape(usize),
}

/// Errors raised while invoking a listener given by binding name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    /// Neither the view nor any ancestor has a `binding` target.
    #[error("no binding target")]
    NoTarget,
    /// The binding target has no method with the name.
    #[error("binding method \"{0}\" not found")]
    MissingMethod(String),
    /// The method expects more arguments than the event provides.
    #[error("binding method \"{name}\" expects {expected} arguments, the event provides {got}")]
    Arity {
        /// Method name.
        name: String,
        /// Parameters of the method.
        expected: usize,
        /// Arguments available.
        got: usize,
    },
    /// An event argument has a type the method does not accept.
    #[error("event argument is not a {0}")]
    ArgumentType(String),
}

/// Errors of the remote bridge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// The transport was closed.
    #[error("bridge is closed")]
    Closed,
    /// No answer arrived before the deadline.
    #[error("no answer for request {answer_id} before the deadline")]
    Timeout {
        /// Id of the abandoned request.
        answer_id: u64,
    },
    /// The transport failed to deliver a message.
    #[error("transport error: {0}")]
    Transport(String),
    /// An answer arrived without a required field.
    #[error("answer has no \"{0}\" field")]
    MissingAnswerField(&'static str),
}
