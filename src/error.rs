use std::fmt;

/// Problems found while reading a scheduler input description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A required directive or `process` field is absent.
    MissingParameter {
        line: Option<usize>,
        name: &'static str,
    },
    /// `use rr` without a `quantum` line.
    MissingQuantum,
    UnknownPolicy(String),
    /// A key at the end of a line with nothing after it.
    MissingValue { line: usize, key: String },
    InvalidNumber {
        line: usize,
        key: String,
        value: String,
    },
    DuplicateProcess { line: usize, name: String },
    ZeroBurst { line: usize, name: String },
    ZeroQuantum,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingParameter {
                line: Some(line),
                name,
            } => write!(f, "line {line}: Missing parameter {name}."),
            ParseError::MissingParameter { line: None, name } => {
                write!(f, "Missing parameter {name}.")
            }
            ParseError::MissingQuantum => write!(f, "Missing quantum parameter when use is 'rr'"),
            ParseError::UnknownPolicy(name) => {
                write!(f, "Unknown scheduling algorithm '{name}'")
            }
            ParseError::MissingValue { line, key } => {
                write!(f, "line {line}: '{key}' has no value")
            }
            ParseError::InvalidNumber { line, key, value } => {
                write!(f, "line {line}: '{key}' expects a non-negative integer, got '{value}'")
            }
            ParseError::DuplicateProcess { line, name } => {
                write!(f, "line {line}: process name '{name}' is already used")
            }
            ParseError::ZeroBurst { line, name } => {
                write!(f, "line {line}: process '{name}' has a zero burst")
            }
            ParseError::ZeroQuantum => write!(f, "quantum must be at least 1"),
        }
    }
}

impl std::error::Error for ParseError {}
