//! Recursive-descent parser
//!
//! One production per precedence level, from loosest to tightest:
//! ```text
//!     Or      := Xor ( (or | nor) Xor )*
//!     Xor     := And ( (xor | xnor) And )*
//!     And     := Not ( (and | nand) Not )*
//!     Not     := (not | !) Not | Postfix
//!     Postfix := Primary !*
//!     Primary := VAR | '(' Or ')'
//! ```
//! Binary operators are left-associative. A `!` directly after an operand is a postfix
//! complement, so that `a'` (normalized to `a!`) reads as "not a".

use crate::expr::ast::{BinaryOp, Expr};
use crate::expr::lexer::{Token, TokenKind};
use crate::Error;

struct Parser<'a> {
    tokens: &'a [Token],
    position: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    /// Consume the next token if it is one of the given binary operators
    fn next_binary(&mut self, ops: &[(TokenKind, BinaryOp)]) -> Option<BinaryOp> {
        let kind = self.peek()?.kind;
        let (_, op) = ops.iter().find(|(k, _)| *k == kind)?;
        self.position += 1;
        Some(*op)
    }

    fn enter(&mut self) -> Result<(), Error> {
        self.depth += 1;
        if self.depth > self.max_depth {
            Err(Error::NestingTooDeep {
                limit: self.max_depth,
            })
        } else {
            Ok(())
        }
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_or(&mut self) -> Result<Expr, Error> {
        let ops = [(TokenKind::Or, BinaryOp::Or), (TokenKind::Nor, BinaryOp::Nor)];
        let mut left = self.parse_xor()?;
        while let Some(op) = self.next_binary(&ops) {
            let right = self.parse_xor()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_xor(&mut self) -> Result<Expr, Error> {
        let ops = [
            (TokenKind::Xor, BinaryOp::Xor),
            (TokenKind::Xnor, BinaryOp::Xnor),
        ];
        let mut left = self.parse_and()?;
        while let Some(op) = self.next_binary(&ops) {
            let right = self.parse_and()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, Error> {
        let ops = [
            (TokenKind::And, BinaryOp::And),
            (TokenKind::Nand, BinaryOp::Nand),
        ];
        let mut left = self.parse_not()?;
        while let Some(op) = self.next_binary(&ops) {
            let right = self.parse_not()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expr, Error> {
        match self.peek() {
            Some(t) if t.kind == TokenKind::Not => {
                self.position += 1;
                self.enter()?;
                let operand = self.parse_not()?;
                self.leave();
                Ok(Expr::not(operand))
            }
            _ => self.parse_postfix(),
        }
    }

    fn parse_postfix(&mut self) -> Result<Expr, Error> {
        let mut operand = self.parse_primary()?;
        while self.peek().is_some_and(|t| t.is_bang()) {
            self.position += 1;
            operand = Expr::not(operand);
        }
        Ok(operand)
    }

    fn parse_primary(&mut self) -> Result<Expr, Error> {
        let token = self.peek().ok_or(Error::UnexpectedEndOfInput)?;
        match token.kind {
            TokenKind::LParen => {
                self.position += 1;
                self.enter()?;
                let inner = self.parse_or()?;
                self.leave();
                match self.peek() {
                    Some(t) if t.kind == TokenKind::RParen => {
                        self.position += 1;
                        Ok(inner)
                    }
                    _ => Err(Error::MissingClosingParenthesis),
                }
            }
            TokenKind::Var => {
                let name = token.text.chars().next().ok_or_else(|| {
                    Error::InternalConsistencyFault(format!(
                        "empty variable token at position {}",
                        token.position
                    ))
                })?;
                self.position += 1;
                Ok(Expr::var(name))
            }
            _ => Err(Error::UnexpectedToken(token.clone())),
        }
    }
}

/// Parse a token sequence into an expression
///
/// Parentheses and prefix complements may be nested at most `max_depth` levels deep.
pub fn parse(tokens: &[Token], max_depth: usize) -> Result<Expr, Error> {
    let mut parser = Parser {
        tokens,
        position: 0,
        depth: 0,
        max_depth,
    };
    let ast = parser.parse_or()?;
    if parser.position < tokens.len() {
        return Err(Error::TrailingTokens);
    }
    Ok(ast)
}
