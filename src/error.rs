//! Errors reported by the parsing and synthesis pipeline

use thiserror::Error;

use crate::expr::Token;

/// Failure of a parse, evaluation or synthesis call
///
/// All errors are fatal to the current call: no partial result is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A symbol outside of the recognized alphabet, with its position in the normalized text
    #[error("Unknown character '{character}' at position {position}")]
    UnknownCharacter {
        /// The offending character
        character: char,
        /// Character index in the normalized expression
        position: usize,
    },

    /// The token stream ended while an operand was expected
    #[error("Unexpected end of expression")]
    UnexpectedEndOfInput,

    /// An opening parenthesis was never closed
    #[error("Expected closing parenthesis")]
    MissingClosingParenthesis,

    /// A token appears where the grammar expects something else
    #[error("Unexpected token: {0}")]
    UnexpectedToken(Token),

    /// A complete expression was parsed but tokens remain
    #[error("Unexpected tokens at end of expression")]
    TrailingTokens,

    /// The input text exceeds the configured length
    #[error("Expression is {length} characters long, the limit is {limit}")]
    InputTooLong {
        /// Length of the normalized expression
        length: usize,
        /// Configured limit
        limit: usize,
    },

    /// The expression nests deeper than the configured limit
    #[error("Expression nesting exceeds {limit} levels")]
    NestingTooDeep {
        /// Configured limit
        limit: usize,
    },

    /// The truth table would exceed the configured number of variables
    #[error("Expression has {found} variables, the limit is {limit}")]
    TooManyVariables {
        /// Number of distinct variables in the expression
        found: usize,
        /// Configured limit
        limit: usize,
    },

    /// The expanded transistor network would exceed the configured size
    #[error("Synthesized network would have {devices} devices, the limit is {limit}")]
    NetworkTooLarge {
        /// Number of devices in the pull-down network (saturated)
        devices: u64,
        /// Configured limit
        limit: usize,
    },

    /// A variable has no value in the symbol table
    #[error("Variable '{0}' is not assigned")]
    UnassignedVariable(char),

    /// A node or result that the pipeline should never produce
    #[error("Internal consistency fault: {0}")]
    InternalConsistencyFault(String),
}
