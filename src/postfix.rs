//! Reordering infix [`Token`]s into Reverse Polish Notation using the
//! shunting-yard algorithm.

use crate::parse::{self, Operator, ParseError, Token};

/// Convert an infix token stream into postfix (RPN) order.
///
/// Prefix minuses are rewritten with [`normalize_unary_minus()`] first, so
/// the operator stack only ever sees binary operators.
///
/// ```rust
/// use linear_solver::{to_postfix, tokenize};
///
/// let tokens = tokenize("1 + 2x").unwrap();
/// let rpn = to_postfix(tokens).unwrap();
///
/// let rendered: Vec<String> = rpn.iter().map(|t| t.to_string()).collect();
/// assert_eq!(rendered.join(" "), "1 2 x * +");
/// ```
pub fn to_postfix(tokens: Vec<Token>) -> Result<Vec<Token>, ParseError> {
    let tokens = normalize_unary_minus(tokens);

    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(_) | Token::Variable => output.push(token),
            Token::Operator(op) => {
                // everything is left-associative, so equal precedence pops too
                while let Some(&Token::Operator(top)) = stack.last() {
                    if precedence(top) < precedence(op) {
                        break;
                    }

                    stack.pop();
                    output.push(Token::Operator(top));
                }

                stack.push(token);
            },
            Token::LeftParen => stack.push(token),
            Token::RightParen => loop {
                match stack.pop() {
                    Some(Token::LeftParen) => break,
                    Some(other) => output.push(other),
                    None => return Err(ParseError::MismatchedParentheses),
                }
            },
        }
    }

    while let Some(token) = stack.pop() {
        match token {
            Token::Operator(_) => output.push(token),
            _ => return Err(ParseError::MismatchedParentheses),
        }
    }

    tracing::trace!(count = output.len(), "Converted to postfix");

    Ok(output)
}

fn precedence(op: Operator) -> u8 {
    match op {
        Operator::Plus | Operator::Minus => 1,
        Operator::Times | Operator::Divide => 2,
    }
}

/// Rewrite every prefix `-` as a subtraction from an implicit zero.
///
/// A minus is in prefix position when it starts the expression or directly
/// follows an operator or `(`. It becomes `( 0 - operand )`, where the
/// operand is the next number, variable, parenthesised group or prefix
/// minus, so `2*-x` means `2*(0 - x)` and `x--3` means `x - (0 - 3)`.
///
/// This is a single pass over the tokens, so arbitrarily long chains like
/// `-----x` cost time and memory linear in their length.
pub fn normalize_unary_minus(tokens: Vec<Token>) -> Vec<Token> {
    let mut output = Vec::with_capacity(tokens.len());
    // the paren depth each unfinished `( 0 -` group was opened at
    let mut pending: Vec<usize> = Vec::new();
    let mut depth = 0_usize;

    for (i, &token) in tokens.iter().enumerate() {
        let in_prefix_position =
            i == 0 || !parse::ends_operand(&tokens[i - 1]);

        match token {
            Token::Operator(Operator::Minus) if in_prefix_position => {
                output.push(Token::LeftParen);
                output.push(Token::Number(0.0));
                output.push(Token::Operator(Operator::Minus));
                pending.push(depth);
            },
            Token::Number(_) | Token::Variable => {
                output.push(token);
                close_groups(&mut pending, depth, &mut output);
            },
            Token::LeftParen => {
                output.push(token);
                depth += 1;
            },
            Token::RightParen => {
                // a `( 0 -` directly before the `)` never got an operand
                close_groups(&mut pending, depth, &mut output);
                output.push(token);
                depth = depth.saturating_sub(1);
                close_groups(&mut pending, depth, &mut output);
            },
            Token::Operator(_) => {
                close_groups(&mut pending, depth, &mut output);
                output.push(token);
            },
        }
    }

    // anything still open either lacks an operand or wraps an unclosed group
    for _ in pending.drain(..) {
        output.push(Token::RightParen);
    }

    output
}

/// Close every pending `( 0 -` group opened at `depth`, because the operand
/// they were waiting for has just finished.
fn close_groups(
    pending: &mut Vec<usize>,
    depth: usize,
    output: &mut Vec<Token>,
) {
    while pending.last() == Some(&depth) {
        pending.pop();
        output.push(Token::RightParen);
    }
}
