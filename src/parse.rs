//! Turning one side of an equation into [`Token`]s.

use crate::Options;
use smol_str::SmolStr;
use std::fmt::{self, Display, Formatter};

/// Split an expression into [`Token`]s, treating `x` as the only unknown.
pub fn tokenize(expr: &str) -> Result<Vec<Token>, ParseError> {
    tokenize_with(expr, &Options::default())
}

/// Split an expression into [`Token`]s using the variable name from some
/// [`Options`].
///
/// All whitespace is removed before scanning, so `"1 2"` is the number `12`
/// and any [`ParseError::InvalidCharacter`] index refers to the stripped
/// text. Implicit multiplication (`3x`, `2(x + 1)`) is made explicit before
/// returning.
pub fn tokenize_with(
    expr: &str,
    options: &Options,
) -> Result<Vec<Token>, ParseError> {
    let stripped: String =
        expr.chars().filter(|c| !c.is_whitespace()).collect();

    let tokens = Tokens::new(&stripped, &options.variable)
        .collect::<Result<Vec<_>, _>>()?;
    tracing::trace!(expr = %stripped, count = tokens.len(), "Tokenized");

    Ok(insert_implicit_multiplication(tokens))
}

/// Insert a [`Operator::Times`] wherever two operands are written next to
/// each other.
///
/// A number, the variable or a closing paren followed by a number, the
/// variable or an opening paren is treated as a multiplication.
pub fn insert_implicit_multiplication(tokens: Vec<Token>) -> Vec<Token> {
    let mut output = Vec::with_capacity(tokens.len() * 2);

    for token in tokens {
        if let Some(previous) = output.last() {
            if ends_operand(previous) && starts_operand(&token) {
                output.push(Token::Operator(Operator::Times));
            }
        }

        output.push(token);
    }

    output
}

pub(crate) fn ends_operand(token: &Token) -> bool {
    match token {
        Token::Number(_) | Token::Variable | Token::RightParen => true,
        _ => false,
    }
}

fn starts_operand(token: &Token) -> bool {
    match token {
        Token::Number(_) | Token::Variable | Token::LeftParen => true,
        _ => false,
    }
}

/// Possible errors that may occur while parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("Unexpected character '{character}' at position {index}")]
    InvalidCharacter { character: char, index: usize },
    #[error("Invalid number: {text}")]
    InvalidNumber { text: SmolStr },
    #[error("Unknown symbol: {symbol}")]
    UnknownSymbol { symbol: SmolStr },
    #[error("Mismatched parentheses")]
    MismatchedParentheses,
}

/// A single lexical item in an expression.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    /// The unknown we are solving for.
    Variable,
    Operator(Operator),
    LeftParen,
    RightParen,
}

/// Renders tokens the way they'd be written in an expression.
///
/// A [`Token::Variable`] doesn't remember what it was called, so it is always
/// written as `x`, even when it was tokenized with a different
/// [`Options::variable`].
impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(value) => write!(f, "{}", value),
            Token::Variable => write!(f, "x"),
            Token::Operator(op) => write!(f, "{}", op),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
        }
    }
}

/// An operation that can be applied to two operands.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operator {
    Plus,
    Minus,
    Times,
    Divide,
}

impl Operator {
    fn from_char(c: char) -> Option<Operator> {
        match c {
            '+' => Some(Operator::Plus),
            '-' => Some(Operator::Minus),
            '*' => Some(Operator::Times),
            '/' => Some(Operator::Divide),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Plus => '+',
            Operator::Minus => '-',
            Operator::Times => '*',
            Operator::Divide => '/',
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Tokens<'a> {
    src: &'a str,
    cursor: usize,
    variable: &'a str,
}

impl<'a> Tokens<'a> {
    fn new(src: &'a str, variable: &'a str) -> Self {
        Tokens {
            src,
            cursor: 0,
            variable,
        }
    }

    fn rest(&self) -> &'a str { &self.src[self.cursor..] }

    fn peek(&self) -> Option<char> { self.rest().chars().next() }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.cursor += c.len_utf8();
        Some(c)
    }

    fn chomp(&mut self, token: Token) -> Option<Result<Token, ParseError>> {
        self.advance()?;
        Some(Ok(token))
    }

    fn take_while<P>(&mut self, mut predicate: P) -> &'a str
    where
        P: FnMut(char) -> bool,
    {
        let start = self.cursor;

        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }

            self.advance();
        }

        &self.src[start..self.cursor]
    }

    fn chomp_number(&mut self) -> Result<Token, ParseError> {
        let text = self.take_while(|c| c.is_ascii_digit() || c == '.');

        // "1.2.3" and "." are rejected here rather than left to the float
        // parser
        let dots = text.matches('.').count();
        let has_digits = text.chars().any(|c| c.is_ascii_digit());

        if dots > 1 || !has_digits {
            return Err(ParseError::InvalidNumber { text: text.into() });
        }

        match text.parse::<f64>() {
            // too many digits overflows to infinity
            Ok(value) if value.is_finite() => Ok(Token::Number(value)),
            _ => Err(ParseError::InvalidNumber { text: text.into() }),
        }
    }

    fn chomp_identifier(&mut self) -> Result<Token, ParseError> {
        let text = self.take_while(char::is_alphabetic);

        if text == self.variable {
            Ok(Token::Variable)
        } else {
            Err(ParseError::UnknownSymbol {
                symbol: text.into(),
            })
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let c = self.peek()?;

        if let Some(op) = Operator::from_char(c) {
            return self.chomp(Token::Operator(op));
        }

        match c {
            '(' => self.chomp(Token::LeftParen),
            ')' => self.chomp(Token::RightParen),
            '0'..='9' | '.' => Some(self.chomp_number()),
            letter if letter.is_alphabetic() => Some(self.chomp_identifier()),
            other => {
                let index = self.cursor;
                // make sure we don't keep reporting the same character
                self.cursor = self.src.len();
                Some(Err(ParseError::InvalidCharacter {
                    character: other,
                    index,
                }))
            },
        }
    }
}
