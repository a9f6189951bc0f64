//! Solve one equation per line from stdin.
//!
//! An empty line shows the current answer again and `clear` throws it away.
//! Set `RUST_LOG=linear_solver=trace` to watch each stage of the pipeline.

use linear_solver::{solve, Solution, SolveError};
use std::io::{BufRead, BufReader};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let stdin = std::io::stdin();
    let mut session = Session::default();

    for line in BufReader::new(stdin.lock()).lines() {
        let line = line?;

        match session.handle(&line) {
            Ok(output) => {
                for text in output {
                    println!("{}", text);
                }
            },
            Err(e) => eprintln!("Unable to solve \"{}\": {}", line.trim(), e),
        }
    }

    Ok(())
}

/// The answer currently on screen.
#[derive(Debug, Default)]
struct Session {
    last: Option<Solution>,
}

impl Session {
    /// Handle one line of input, returning the lines to print.
    fn handle(&mut self, line: &str) -> Result<Vec<String>, SolveError> {
        let line = line.trim();

        if line.eq_ignore_ascii_case("clear") {
            tracing::debug!(had_answer = self.last.is_some(), "Clearing");
            self.last = None;
            return Ok(vec![String::from("Cleared")]);
        }

        if line.is_empty() {
            return Ok(self.last.iter().map(ToString::to_string).collect());
        }

        match solve(line) {
            Ok(solution) => {
                let mut output: Vec<String> =
                    solution.steps.iter().map(|s| format!("  {}", s)).collect();
                output.push(solution.to_string());
                self.last = Some(solution);
                Ok(output)
            },
            Err(e) => {
                self.last = None;
                Err(e)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solving_prints_the_steps_and_answer() {
        let mut session = Session::default();

        let got = session.handle("2(x + 1) = 8").unwrap();

        assert_eq!(got.len(), 5);
        assert_eq!(got[0], "  Simplify the left side: 2x + 2");
        assert_eq!(got[4], "x = 3");
    }

    #[test]
    fn an_empty_line_repeats_the_answer() {
        let mut session = Session::default();
        session.handle("x = 4").unwrap();

        let got = session.handle("   ").unwrap();

        assert_eq!(got, vec![String::from("x = 4")]);
    }

    #[test]
    fn clear_forgets_the_answer() {
        let mut session = Session::default();
        session.handle("x = 4").unwrap();

        assert_eq!(session.handle("clear").unwrap(), vec!["Cleared"]);
        assert!(session.handle("").unwrap().is_empty());
    }

    #[test]
    fn errors_replace_the_answer() {
        let mut session = Session::default();
        session.handle("x = 4").unwrap();

        let got = session.handle("x = 1 = 2").unwrap_err();

        assert_eq!(got, SolveError::EqualsSign);
        assert!(session.handle("").unwrap().is_empty());
    }
}
