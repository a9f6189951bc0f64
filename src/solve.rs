use crate::{
    eval::{self, EvalError},
    parse::{self, ParseError},
    postfix,
    term::{self, LinearTerm},
    Options,
};
use arrayvec::ArrayVec;
use smol_str::SmolStr;
use std::{
    fmt::{self, Display, Formatter},
    slice,
};

/// Solve a linear equation in `x`.
///
/// ```rust
/// use linear_solver::Outcome;
///
/// let solution = linear_solver::solve("4x + 2 = 2x + 12").unwrap();
///
/// assert_eq!(solution.outcome, Outcome::Unique(5.0));
/// assert_eq!(solution.to_string(), "x = 5");
/// ```
pub fn solve(input: &str) -> Result<Solution, SolveError> {
    solve_with(input, &Options::default())
}

/// Solve a linear equation using custom [`Options`].
///
/// The input is checked for exactly one `=` before anything gets parsed.
/// Each side is then reduced to `a·x + b` independently, the two sides are
/// combined into `a·x = c`, and the result is classified.
#[tracing::instrument(level = "debug", skip(options))]
pub fn solve_with(
    input: &str,
    options: &Options,
) -> Result<Solution, SolveError> {
    let stripped: String =
        input.chars().filter(|c| !c.is_whitespace()).collect();
    let equation = Equation::split(&stripped)?;

    let left = simplify(equation.left, options)?;
    let right = simplify(equation.right, options)?;
    tracing::trace!(%left, %right, "Simplified both sides");

    // a·x = c
    let coefficient = left.a - right.a;
    let constant = right.b - left.b;
    let outcome = classify(coefficient, constant);
    tracing::debug!(?outcome, "Classified");

    let steps = if options.record_steps {
        Steps::record(
            &left,
            &right,
            coefficient,
            constant,
            outcome,
            &options.variable,
        )
    } else {
        Steps::default()
    };

    Ok(Solution {
        outcome,
        left,
        right,
        steps,
        variable: options.variable.clone(),
    })
}

/// Reduce one side of an equation to a [`LinearTerm`].
pub fn simplify(
    expr: &str,
    options: &Options,
) -> Result<LinearTerm, SolveError> {
    let tokens = parse::tokenize_with(expr, options)?;
    let rpn = postfix::to_postfix(tokens)?;
    let term = eval::evaluate_named(&rpn, &options.variable)?;

    Ok(term)
}

fn classify(coefficient: f64, constant: f64) -> Outcome {
    if coefficient != 0.0 {
        Outcome::Unique(term::tidy(constant / coefficient))
    } else if constant == 0.0 {
        Outcome::Identity
    } else {
        Outcome::Contradiction
    }
}

/// The two sides of an equation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Equation<'a> {
    pub left: &'a str,
    pub right: &'a str,
}

impl<'a> Equation<'a> {
    /// Split some text on its `=` sign.
    pub fn split(src: &'a str) -> Result<Self, SolveError> {
        if src.chars().all(char::is_whitespace) {
            return Err(SolveError::EmptyInput);
        }

        let mut pieces = src.split('=');

        match (pieces.next(), pieces.next(), pieces.next()) {
            (Some(left), Some(right), None) => Ok(Equation { left, right }),
            _ => Err(SolveError::EqualsSign),
        }
    }
}

/// Everything that can go wrong while solving an equation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolveError {
    #[error("Please enter an equation.")]
    EmptyInput,
    #[error("Please include exactly one '=' sign.")]
    EqualsSign,
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Eval(#[from] EvalError),
}

/// How many values of `x` satisfy an equation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Outcome {
    /// Exactly one value.
    Unique(f64),
    /// Every value (e.g. `x + 1 = x + 1`).
    Identity,
    /// No value at all (e.g. `x + 1 = x + 2`).
    Contradiction,
}

impl Outcome {
    fn describe(&self, f: &mut Formatter<'_>, variable: &str) -> fmt::Result {
        match self {
            Outcome::Unique(value) => write!(f, "{} = {}", variable, value),
            Outcome::Identity => write!(f, "Infinitely many solutions"),
            Outcome::Contradiction => write!(f, "No solution"),
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.describe(f, "x")
    }
}

/// A solved equation.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub outcome: Outcome,
    /// The left-hand side, simplified.
    pub left: LinearTerm,
    /// The right-hand side, simplified.
    pub right: LinearTerm,
    pub steps: Steps,
    variable: SmolStr,
}

impl Display for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.outcome.describe(f, &self.variable)
    }
}

/// The flattened result of a call to [`solve()`], ready to be shown to a
/// user.
#[derive(Debug, Clone, PartialEq)]
pub enum SolutionResult {
    Unique(f64),
    Identity,
    Contradiction,
    Error(String),
}

impl From<Result<Solution, SolveError>> for SolutionResult {
    fn from(result: Result<Solution, SolveError>) -> Self {
        match result {
            Ok(solution) => match solution.outcome {
                Outcome::Unique(value) => SolutionResult::Unique(value),
                Outcome::Identity => SolutionResult::Identity,
                Outcome::Contradiction => SolutionResult::Contradiction,
            },
            Err(e) => SolutionResult::Error(e.to_string()),
        }
    }
}

impl Display for SolutionResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SolutionResult::Unique(value) => {
                write!(f, "{}", Outcome::Unique(*value))
            },
            SolutionResult::Identity => write!(f, "{}", Outcome::Identity),
            SolutionResult::Contradiction => {
                write!(f, "{}", Outcome::Contradiction)
            },
            SolutionResult::Error(msg) => write!(f, "{}", msg),
        }
    }
}

/// A human-readable explanation of how an equation was solved.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Steps {
    lines: ArrayVec<[String; 4]>,
}

impl Steps {
    fn record(
        left: &LinearTerm,
        right: &LinearTerm,
        coefficient: f64,
        constant: f64,
        outcome: Outcome,
        variable: &str,
    ) -> Self {
        let mut lines = ArrayVec::new();
        let collected = LinearTerm::new(coefficient, 0.0);
        let constant = term::tidy(constant);

        lines.push(format!(
            "Simplify the left side: {}",
            left.display_with(variable)
        ));
        lines.push(format!(
            "Simplify the right side: {}",
            right.display_with(variable)
        ));
        lines.push(format!(
            "Collect like terms: {} = {}",
            collected.display_with(variable),
            constant
        ));
        lines.push(match outcome {
            Outcome::Unique(value) => format!(
                "Divide both sides by {}: {} = {}",
                coefficient, variable, value
            ),
            Outcome::Identity => format!(
                "0 = 0 holds for every {}: infinitely many solutions",
                variable
            ),
            Outcome::Contradiction => {
                format!("0 = {} never holds: no solution", constant)
            },
        });

        Steps { lines }
    }

    pub fn len(&self) -> usize { self.lines.len() }

    pub fn is_empty(&self) -> bool { self.lines.is_empty() }

    pub fn iter(&self) -> slice::Iter<'_, String> { self.lines.iter() }

    pub fn as_slice(&self) -> &[String] { &self.lines }
}

impl<'a> IntoIterator for &'a Steps {
    type IntoIter = slice::Iter<'a, String>;
    type Item = &'a String;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! solve_test {
        ($name:ident, $src:expr, $should_be:expr) => {
            #[test]
            fn $name() {
                let got = SolutionResult::from(solve($src));

                assert_eq!(got, $should_be);
            }
        };
    }

    solve_test!(whole_number, "4x+2=2x+12", SolutionResult::Unique(5.0));
    solve_test!(implicit_multiplication, "2(x+1)=8", SolutionResult::Unique(3.0));
    solve_test!(unary_minus, "-x+5=2", SolutionResult::Unique(3.0));
    solve_test!(with_spaces, " 3 x - 7 =  2 ", SolutionResult::Unique(3.0));
    solve_test!(variable_on_the_right, "10 = 5x", SolutionResult::Unique(2.0));
    solve_test!(fractional_answer, "2x = 1", SolutionResult::Unique(0.5));
    solve_test!(negative_answer, "2*-x = 6", SolutionResult::Unique(-3.0));
    solve_test!(subtracting_a_negative, "x--3=5", SolutionResult::Unique(2.0));
    solve_test!(zero_is_not_negative, "-2x = 0", SolutionResult::Unique(0.0));
    solve_test!(decimals, "0.5x + 1.5 = 2.5", SolutionResult::Unique(2.0));
    solve_test!(division_by_a_constant, "x/4 = 2", SolutionResult::Unique(8.0));
    solve_test!(identity, "x+1=x+1", SolutionResult::Identity);
    solve_test!(identity_without_x, "2 = 2", SolutionResult::Identity);
    solve_test!(contradiction, "x+1=x+2", SolutionResult::Contradiction);
    solve_test!(
        nonlinear,
        "x*x=4",
        SolutionResult::Error(String::from(
            "Nonlinear term (x·x) is not supported"
        ))
    );
    solve_test!(
        divide_by_x,
        "1/x=2",
        SolutionResult::Error(String::from(
            "Division by an expression with x is not supported"
        ))
    );
    solve_test!(
        divide_by_zero,
        "x/0=1",
        SolutionResult::Error(String::from("Division by zero"))
    );
    solve_test!(
        too_many_equals_signs,
        "x=1=2",
        SolutionResult::Error(String::from(
            "Please include exactly one '=' sign."
        ))
    );
    solve_test!(
        missing_equals_sign,
        "x+1",
        SolutionResult::Error(String::from(
            "Please include exactly one '=' sign."
        ))
    );
    solve_test!(
        empty_input,
        "   ",
        SolutionResult::Error(String::from("Please enter an equation."))
    );
    solve_test!(
        unknown_symbol,
        "y+1=2",
        SolutionResult::Error(String::from("Unknown symbol: y"))
    );
    solve_test!(
        mismatched_parens,
        "2(x+1=8",
        SolutionResult::Error(String::from("Mismatched parentheses"))
    );
    solve_test!(
        empty_side,
        "=5",
        SolutionResult::Error(String::from("Malformed expression"))
    );
    solve_test!(
        bad_number,
        "1.2.3x=1",
        SolutionResult::Error(String::from("Invalid number: 1.2.3"))
    );

    #[test]
    fn long_chains_of_negation() {
        let even = format!("{}x=1", "-".repeat(100_000));
        let odd = format!("{}x=1", "-".repeat(100_001));

        assert_eq!(
            SolutionResult::from(solve(&even)),
            SolutionResult::Unique(1.0)
        );
        assert_eq!(
            SolutionResult::from(solve(&odd)),
            SolutionResult::Unique(-1.0)
        );
    }

    #[test]
    fn literals_too_big_for_a_float() {
        let nines = "9".repeat(400);

        let got = solve(&format!("{}x=1", nines)).unwrap_err();

        assert_eq!(got.to_string(), format!("Invalid number: {}", nines));
    }

    #[test]
    fn equals_sign_is_checked_before_parsing() {
        // "$" would be a tokenizer error if we got that far
        let got = solve("$=1=2").unwrap_err();

        assert_eq!(got, SolveError::EqualsSign);
    }

    #[test]
    fn both_sides_are_kept() {
        let got = solve("2(x+1)=8").unwrap();

        assert_eq!(got.left, LinearTerm::new(2.0, 2.0));
        assert_eq!(got.right, LinearTerm::constant(8.0));
    }

    #[test]
    fn steps_for_a_unique_solution() {
        let got = solve("4x+2=2x+12").unwrap();

        let should_be = vec![
            "Simplify the left side: 4x + 2",
            "Simplify the right side: 2x + 12",
            "Collect like terms: 2x = 10",
            "Divide both sides by 2: x = 5",
        ];
        assert_eq!(got.steps.as_slice(), should_be.as_slice());
    }

    #[test]
    fn steps_for_an_identity() {
        let got = solve("x+1=x+1").unwrap();

        let last = got.steps.iter().last().unwrap();
        assert_eq!(got.steps.len(), 4);
        assert_eq!(got.steps.as_slice()[2], "Collect like terms: 0 = 0");
        assert_eq!(
            last,
            "0 = 0 holds for every x: infinitely many solutions"
        );
    }

    #[test]
    fn steps_for_a_contradiction() {
        let got = solve("x+1=x+2").unwrap();

        let last = got.steps.iter().last().unwrap();
        assert_eq!(last, "0 = 1 never holds: no solution");
    }

    #[test]
    fn steps_can_be_skipped() {
        let options = Options::default().without_steps();

        let got = solve_with("4x+2=2x+12", &options).unwrap();

        assert!(got.steps.is_empty());
        assert_eq!(got.outcome, Outcome::Unique(5.0));
    }

    #[test]
    fn solve_for_another_variable() {
        let options = Options::default().with_variable("t");

        let got = solve_with("3t - 1 = 2t + 4", &options).unwrap();

        assert_eq!(got.outcome, Outcome::Unique(5.0));
        assert_eq!(got.to_string(), "t = 5");
        assert_eq!(got.steps.as_slice()[2], "Collect like terms: t = 5");
    }

    #[test]
    fn solving_is_deterministic() {
        let inputs = vec!["4x+2=2x+12", "0.1x + 0.2 = 0.3", "x/3 = 1/7"];

        for input in inputs {
            let first = solve(input).unwrap();
            let second = solve(input).unwrap();

            match (first.outcome, second.outcome) {
                (Outcome::Unique(a), Outcome::Unique(b)) => {
                    assert_eq!(a.to_bits(), b.to_bits())
                },
                (a, b) => assert_eq!(a, b),
            }
            assert_eq!(first.steps, second.steps);
        }
    }

    #[test]
    fn errors_expose_their_cause() {
        use std::error::Error;

        let got = solve("y=1").unwrap_err();

        let source = got.source().unwrap();
        assert_eq!(source.to_string(), "Unknown symbol: y");
    }

    #[test]
    fn display_outcomes() {
        let inputs = vec![
            (SolutionResult::Unique(-1.5), "x = -1.5"),
            (SolutionResult::Identity, "Infinitely many solutions"),
            (SolutionResult::Contradiction, "No solution"),
            (SolutionResult::Error("Oops".to_string()), "Oops"),
        ];

        for (result, should_be) in inputs {
            assert_eq!(result.to_string(), should_be);
        }
    }

    #[test]
    fn split_an_equation() {
        let got = Equation::split("4x+2=2x+12").unwrap();

        assert_eq!(got, Equation {
            left: "4x+2",
            right: "2x+12",
        });
    }
}
