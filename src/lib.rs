//! A step-by-step solver for linear equations in a single unknown.
//!
//! Each side of an equation goes through the same pipeline:
//!
//! 1. [`tokenize()`] turns the text into [`Token`]s, making implicit
//!    multiplication (`3x`, `2(x + 1)`) explicit
//! 2. [`to_postfix()`] reorders the tokens into Reverse Polish Notation with
//!    the shunting-yard algorithm
//! 3. [`evaluate()`] reduces the RPN to a [`LinearTerm`], `a·x + b`
//!
//! [`solve()`] then combines both sides into `a·x = c` and works out whether
//! there is one solution, infinitely many, or none.
//!
//! ```rust
//! use linear_solver::SolutionResult;
//!
//! let got = SolutionResult::from(linear_solver::solve("2(x + 1) = 8"));
//! assert_eq!(got, SolutionResult::Unique(3.0));
//!
//! let got = SolutionResult::from(linear_solver::solve("x*x = 4"));
//! assert_eq!(
//!     got,
//!     SolutionResult::Error("Nonlinear term (x·x) is not supported".into())
//! );
//! ```

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

mod eval;
mod options;
mod parse;
mod postfix;
mod solve;
mod term;

pub use eval::{evaluate, evaluate_named, EvalError};
pub use options::Options;
pub use parse::{
    insert_implicit_multiplication, tokenize, tokenize_with, Operator,
    ParseError, Token,
};
pub use postfix::{normalize_unary_minus, to_postfix};
pub use solve::{
    simplify, solve, solve_with, Equation, Outcome, Solution, SolutionResult,
    SolveError, Steps,
};
pub use term::{ArithmeticError, LinearTerm};
