use std::ops::Deref;

use serde::Deserialize;

use crate::error::Neo4jError;

pub trait ResultTrait {
    type Row;

    fn results(&self) -> &Vec<CypherResult<Self::Row>>;
    fn errors(&self) -> &Vec<Neo4jError>;
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct QueryResult<T> {
    pub results: Vec<CypherResult<T>>,
    #[serde(default)]
    errors: Vec<Neo4jError>,
}

impl<T> ResultTrait for QueryResult<T> {
    type Row = T;

    fn results(&self) -> &Vec<CypherResult<T>> {
        &self.results
    }

    fn errors(&self) -> &Vec<Neo4jError> {
        &self.errors
    }
}

/// Holds the result of a cypher query
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CypherResult<T> {
    columns: Vec<String>,
    data: Vec<RowResult<T>>,
}

impl<T> CypherResult<T> {
    /// Returns the names of the columns of the result
    pub fn columns(&self) -> &Vec<String> {
        &self.columns
    }

    /// Returns the rows of the result
    pub fn rows(&self) -> &Vec<RowResult<T>> {
        &self.data
    }

    pub(crate) fn into_rows(self) -> Vec<T> {
        self.data.into_iter().map(|result| result.row).collect()
    }
}

/// Holds a single row of the result of a cypher query
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RowResult<T> {
    row: T,
}

impl<T> RowResult<T> {
    pub fn data(&self) -> &T {
        &self.row
    }
}

impl<T> Deref for RowResult<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.row
    }
}
