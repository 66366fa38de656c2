use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Error during parsing (e.g., syntax error)
    ParseError {
        /// A human-readable message explaining the error
        message: String,
        /// The line number (1-based)
        line: usize,
        /// The column number (1-based)
        column: usize,
        /// The snippet of input where the error occurred
        snippet: String,
    },
    /// Bad configuration (e.g., a branching factor below 2)
    InvalidArgument(String),
    /// A requested tip name is absent from the tree
    NameNotFound(String),
    /// Subtree reduction yielded nothing
    EmptyResult,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::ParseError {
                message,
                line,
                column,
                snippet,
            } => {
                write!(
                    f,
                    "Parse error at line {}, column {}:\n{}\nSnippet: \"{}\"",
                    line, column, message, snippet
                )
            }
            TreeError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            TreeError::NameNotFound(name) => {
                write!(f, "Name \"{}\" not found among the tips of the tree", name)
            }
            TreeError::EmptyResult => write!(f, "Subtree reduction yielded an empty tree"),
        }
    }
}

impl std::error::Error for TreeError {}
