use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// An error reported by the neo4j server for a statement or request
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Neo4jError {
    pub code: String,
    pub message: String,
}

impl fmt::Display for Neo4jError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

#[derive(Debug, Error)]
pub enum GraphError {
    /// The server could not be reached, or the request timed out
    #[error("connection error: {0}")]
    Connection(String),

    /// The server answered with a 5xx status or a body that could not be understood
    #[error("server error{}: {message}", status_suffix(.status))]
    Server { status: Option<u16>, message: String },

    /// The server rejected the request or one of its statements
    #[error("query error: {}", join_errors(.0))]
    Query(Vec<Neo4jError>),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl GraphError {
    pub(crate) fn server(status: Option<u16>, message: impl Into<String>) -> Self {
        GraphError::Server {
            status,
            message: message.into(),
        }
    }

    /// Returns the errors sent by the server, if this is a `Query` error
    pub fn neo4j_errors(&self) -> Option<&[Neo4jError]> {
        match *self {
            GraphError::Query(ref errors) => Some(errors),
            _ => None,
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    match *status {
        Some(status) => format!(" (status {})", status),
        None => String::new(),
    }
}

fn join_errors(errors: &[Neo4jError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<reqwest::Error> for GraphError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_builder() {
            GraphError::Config(error.to_string())
        } else if error.is_decode() {
            GraphError::server(error.status().map(|s| s.as_u16()), error.to_string())
        } else {
            GraphError::Connection(error.to_string())
        }
    }
}

impl From<url::ParseError> for GraphError {
    fn from(error: url::ParseError) -> Self {
        GraphError::Config(format!("invalid url: {}", error))
    }
}
