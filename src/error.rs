use thiserror::Error;

/// Errors raised by graph lookups.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// No node with this name has been added to the graph.
    #[error("could not find node: {0}")]
    NotFound(String),
}

/// Errors raised while reading a graph script.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// The script does not start with `digraph` or `graph`.
    #[error("graph script must start with `digraph` or `graph`")]
    MissingKind,

    /// A statement could not be parsed.
    #[error("syntax error in graph script at line {line}: unexpected `{context}`")]
    Syntax { line: usize, context: String },
}
