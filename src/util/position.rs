use std::fmt::{Display, Formatter};

use super::Position;

impl Position {
    /// Create a new line/column position. Both are 1-indexed.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
