// src/error.rs
//! Error taxonomy for the engine's public surface. Resolution itself
//! never raises: unification failure, exhausted rules and unsatisfied
//! constraints are silent (zero solutions), per spec. These types only
//! cover the three observable error classes from the host-facing API.

use thiserror::Error;

/// A source position for parse diagnostics, 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Raised by `parse_kb`/`parse_rule`/`parse_query` and by anything that
/// calls them (`consult`, `assertz`, `retract`, `retractall`, `query`).
#[derive(Debug, Error)]
#[error("parse error at {position}: {message}")]
pub struct ParseError {
    pub message: String,
    pub position: Position,
}

/// Raised by `assertz` when given syntactically invalid clause text.
#[derive(Debug, Error)]
#[error("cannot assert clause: {0}")]
pub struct AssertError(#[from] pub ParseError);

/// Raised by `query` when given syntactically invalid query text.
/// Built-in precondition failures are semantic-silent (zero solutions),
/// never an error — see `builtins`.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("cannot parse query: {0}")]
    Parse(#[from] ParseError),
}

/// Raised by `load` and by file-mode `consult` when the target path
/// does not exist.
#[derive(Debug, Error)]
#[error("not found: {0}")]
pub struct NotFoundError(pub String);

/// The union of every error a KB-facade operation can surface.
#[derive(Debug, Error)]
pub enum KbError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Assert(#[from] AssertError),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("persistence error: {0}")]
    Serde(#[from] serde_json::Error),
}
