use smol_str::SmolStr;

/// Settings which tweak how an equation is parsed and reported.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// The name of the only unknown an expression may refer to.
    pub variable: SmolStr,
    /// Should [`crate::solve_with()`] record a human-readable trace of how
    /// it got to the answer?
    pub record_steps: bool,
}

impl Options {
    pub fn new() -> Self { Options::default() }

    pub fn with_variable<S: Into<SmolStr>>(mut self, variable: S) -> Self {
        self.variable = variable.into();
        self
    }

    pub fn without_steps(mut self) -> Self {
        self.record_steps = false;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Options {
            variable: SmolStr::new("x"),
            record_steps: true,
        }
    }
}
