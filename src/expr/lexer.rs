//! Tokenizer for normalized expressions
//!
//! Keywords are matched greedily, longest spelling first, before falling back to
//! single-character variables. Whitespace is discarded.

use std::fmt;

use crate::Error;

/// Kinds of tokens in a normalized expression
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum TokenKind {
    /// (
    LParen,
    /// )
    RParen,
    /// `not` or `!`
    Not,
    /// `and`
    And,
    /// `or`
    Or,
    /// `nand`
    Nand,
    /// `nor`
    Nor,
    /// `xor`
    Xor,
    /// `xnor`
    Xnor,
    /// Variable letter or constant digit
    Var,
}

/// A token with its source text and its character position in the normalized expression
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct Token {
    /// Kind of the token
    pub kind: TokenKind,
    /// Text of the token
    pub text: String,
    /// Character index of the first character of the token
    pub position: usize,
}

impl Token {
    fn new(kind: TokenKind, text: &str, position: usize) -> Token {
        Token {
            kind,
            text: text.to_string(),
            position,
        }
    }

    /// Returns whether this is the `!` symbol, which may also be used after an operand
    pub fn is_bang(&self) -> bool {
        self.kind == TokenKind::Not && self.text == "!"
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Keyword operators, in matching order: a keyword never follows one of its own prefixes
const KEYWORDS: [(&str, TokenKind); 7] = [
    ("nand", TokenKind::Nand),
    ("nor", TokenKind::Nor),
    ("not", TokenKind::Not),
    ("xnor", TokenKind::Xnor),
    ("xor", TokenKind::Xor),
    ("and", TokenKind::And),
    ("or", TokenKind::Or),
];

fn match_keyword(chars: &[char]) -> Option<(&'static str, TokenKind)> {
    KEYWORDS
        .iter()
        .find(|(kw, _)| {
            kw.len() <= chars.len() && kw.chars().zip(chars.iter()).all(|(a, b)| a == *b)
        })
        .copied()
}

/// Split a normalized expression into tokens
///
/// Fails on the first character outside of the alphabet: lowercase letters,
/// the constants `0` and `1`, parentheses, `!` and whitespace.
pub fn tokenize(expr: &str) -> Result<Vec<Token>, Error> {
    let chars: Vec<char> = expr.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => {
                i += 1;
            }
            '(' => {
                tokens.push(Token::new(TokenKind::LParen, "(", i));
                i += 1;
            }
            ')' => {
                tokens.push(Token::new(TokenKind::RParen, ")", i));
                i += 1;
            }
            '!' => {
                tokens.push(Token::new(TokenKind::Not, "!", i));
                i += 1;
            }
            'a'..='z' => {
                if let Some((kw, kind)) = match_keyword(&chars[i..]) {
                    tokens.push(Token::new(kind, kw, i));
                    i += kw.len();
                } else {
                    tokens.push(Token {
                        kind: TokenKind::Var,
                        text: c.to_string(),
                        position: i,
                    });
                    i += 1;
                }
            }
            '0' | '1' => {
                tokens.push(Token {
                    kind: TokenKind::Var,
                    text: c.to_string(),
                    position: i,
                });
                i += 1;
            }
            _ => {
                return Err(Error::UnknownCharacter {
                    character: c,
                    position: i,
                })
            }
        }
    }
    Ok(tokens)
}
