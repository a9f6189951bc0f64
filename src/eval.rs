//! Evaluating postfix [`Token`]s down to a single [`LinearTerm`].

use crate::{
    parse::{Operator, Token},
    term::{ArithmeticError, LinearTerm},
};
use smol_str::SmolStr;

/// Evaluate a postfix token stream, treating `x` as the unknown.
pub fn evaluate(rpn: &[Token]) -> Result<LinearTerm, EvalError> {
    evaluate_named(rpn, "x")
}

/// Evaluate a postfix token stream, using `variable` when describing what
/// went wrong.
pub fn evaluate_named(
    rpn: &[Token],
    variable: &str,
) -> Result<LinearTerm, EvalError> {
    let mut stack: Vec<LinearTerm> = Vec::with_capacity(rpn.len());

    for token in rpn {
        let term = match *token {
            Token::Number(value) => LinearTerm::constant(value),
            Token::Variable => LinearTerm::variable(),
            Token::Operator(op) => {
                let right = stack.pop().ok_or(EvalError::MalformedExpression)?;
                let left = stack.pop().ok_or(EvalError::MalformedExpression)?;

                apply(op, left, right)
                    .map_err(|e| EvalError::from_arithmetic(e, variable))?
            },
            Token::LeftParen | Token::RightParen => {
                return Err(EvalError::MalformedExpression)
            },
        };

        stack.push(term);
    }

    match stack.as_slice() {
        [term] => Ok(*term),
        _ => Err(EvalError::MalformedExpression),
    }
}

fn apply(
    op: Operator,
    left: LinearTerm,
    right: LinearTerm,
) -> Result<LinearTerm, ArithmeticError> {
    match op {
        Operator::Plus => Ok(left + right),
        Operator::Minus => Ok(left - right),
        Operator::Times => left.checked_mul(right),
        Operator::Divide => left.checked_div(right),
    }
}

/// Reasons an expression can't be reduced to a [`LinearTerm`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    #[error("Nonlinear term ({variable}·{variable}) is not supported")]
    NonlinearTerm { variable: SmolStr },
    #[error("Division by an expression with {variable} is not supported")]
    DivisionByVariable { variable: SmolStr },
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Malformed expression")]
    MalformedExpression,
}

impl EvalError {
    fn from_arithmetic(e: ArithmeticError, variable: &str) -> Self {
        match e {
            ArithmeticError::Nonlinear => EvalError::NonlinearTerm {
                variable: variable.into(),
            },
            ArithmeticError::DivisionByVariable => {
                EvalError::DivisionByVariable {
                    variable: variable.into(),
                }
            },
            ArithmeticError::DivisionByZero => EvalError::DivisionByZero,
        }
    }
}
