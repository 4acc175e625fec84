//! Parsing of boolean expressions: normalization, tokenization and recursive-descent parsing
//!
//! ```
//! # use boolcmos::expr::{Expr, Expression};
//! let e = Expression::parse("A*B+C").unwrap();
//! assert_eq!(e.variables(), &['a', 'b', 'c']);
//! assert_eq!(
//!     e.ast(),
//!     &Expr::or(Expr::and(Expr::var('a'), Expr::var('b')), Expr::var('c'))
//! );
//! ```

mod ast;
pub mod generators;
mod lexer;
mod normalize;
mod parser;

use std::fmt;

use itertools::Itertools;
use log::debug;

pub use ast::{constant_value, BinaryOp, Expr};
pub use lexer::{tokenize, Token, TokenKind};
pub use normalize::normalize;
pub use parser::parse;

use crate::cmos::{synthesize, CmosCircuit};
use crate::eval::TruthTable;
use crate::Error;

/// Resource limits applied by the pipeline
///
/// Truth tables grow exponentially with the number of variables, and the De Morgan expansion
/// of nested Xor grows exponentially with the nesting: both are bounded explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of characters in the normalized expression
    pub max_length: usize,
    /// Maximum nesting of parentheses and prefix complements
    pub max_depth: usize,
    /// Maximum number of distinct variables in a truth table
    pub max_variables: usize,
    /// Maximum number of devices in a synthesized pull-down network
    pub max_devices: usize,
}

impl Limits {
    /// No limit at all
    pub fn unbounded() -> Limits {
        Limits {
            max_length: usize::MAX,
            max_depth: usize::MAX,
            max_variables: usize::MAX,
            max_devices: usize::MAX,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_length: 4096,
            max_depth: 256,
            max_variables: 16,
            max_devices: 65536,
        }
    }
}

/// A parsed expression, with the intermediate results of the pipeline
///
/// This is the context handed to consumers: the syntax tree is shared read-only by the
/// truth table generation and the CMOS synthesis.
#[derive(Debug, Clone)]
pub struct Expression {
    source: String,
    normalized: String,
    variables: Vec<char>,
    ast: Expr,
    limits: Limits,
}

impl Expression {
    /// Parse an expression with the default limits
    pub fn parse(text: &str) -> Result<Expression, Error> {
        Expression::parse_with(text, &Limits::default())
    }

    /// Parse an expression with explicit limits
    pub fn parse_with(text: &str, limits: &Limits) -> Result<Expression, Error> {
        let normalized = normalize(text);
        let length = normalized.chars().count();
        if length > limits.max_length {
            return Err(Error::InputTooLong {
                length,
                limit: limits.max_length,
            });
        }
        let tokens = tokenize(&normalized)?;
        debug!("Normalized {text:?} to {normalized:?} ({} tokens)", tokens.len());
        let ast = parse(&tokens, limits.max_depth)?;
        let variables = ast.variables();
        debug!(
            "Parsed expression {ast} with variables [{}]",
            variables.iter().join(", ")
        );
        Ok(Expression {
            source: text.to_string(),
            normalized,
            variables,
            ast,
            limits: *limits,
        })
    }

    /// Text as given by the user
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Text in canonical keyword form
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Sorted, deduplicated variable names
    pub fn variables(&self) -> &[char] {
        &self.variables
    }

    /// Syntax tree
    pub fn ast(&self) -> &Expr {
        &self.ast
    }

    /// Limits used for this expression
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Generate the truth table, with the first variable as the most significant bit
    pub fn truth_table(&self) -> Result<TruthTable, Error> {
        TruthTable::build(&self.ast, &self.variables, self.limits.max_variables)
    }

    /// Synthesize a complementary CMOS implementation
    pub fn synthesize(&self) -> Result<CmosCircuit, Error> {
        synthesize(&self.ast, &self.limits)
    }

    /// Render the expression in LaTeX notation
    pub fn to_latex(&self) -> String {
        self.ast.to_latex()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.normalized)
    }
}
