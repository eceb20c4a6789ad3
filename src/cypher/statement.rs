use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::GraphError;

/// Helper macro to simplify the creation of complex statements
///
/// Pass in the statement text as the first argument followed by the (optional) parameters, which
/// must be in the format `"param" => value` and wrapped in `{}`
///
/// # Examples
///
/// ```
/// # #[macro_use] extern crate rusted_neoclient;
/// # fn main() {
/// // Without parameters
/// let statement = cypher_stmt!("MATCH n RETURN n");
/// // With parameters
/// let statement = cypher_stmt!("MATCH n RETURN n" {
///     "param1" => "value1",
///     "param2" => 2,
///     "param3" => 3.0
/// });
/// # }
/// ```
#[macro_export]
macro_rules! cypher_stmt {
    ( $s:tt { $( $k:expr => $v:expr ),+ } ) => {
        $crate::Statement::new($s)
            $(.with_param($k, $v))*
    };
    ( $s:expr ) => { $crate::Statement::new($s) };
}

/// Formats the server can use for the data of a statement
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultDataContent {
    /// Plain values, one per column
    Row,
    /// Nodes and relationships referenced by the row
    Graph,
    /// The legacy REST representation of entities
    #[serde(rename = "REST")]
    Rest,
}

/// Represents a statement to be sent to the server
#[derive(Clone, Debug, Serialize)]
pub struct Statement {
    statement: String,
    parameters: BTreeMap<String, Value>,
    #[serde(rename = "resultDataContents", skip_serializing_if = "Vec::is_empty")]
    result_data_contents: Vec<ResultDataContent>,
}

impl Statement {
    pub fn new(statement: &str) -> Self {
        Statement {
            statement: statement.to_owned(),
            parameters: BTreeMap::new(),
            result_data_contents: Vec::new(),
        }
    }

    /// Returns the statement text
    pub fn statement(&self) -> &str {
        &self.statement
    }

    /// Adds parameter in builder style
    ///
    /// This method consumes `self` and returns it with the parameter added, so the binding does
    /// not need to be mutable
    ///
    /// # Examples
    ///
    /// ```
    /// # use rusted_neoclient::Statement;
    /// let statement = Statement::new("MATCH n RETURN n")
    ///     .with_param("param1", "value1")
    ///     .with_param("param2", 2)
    ///     .with_param("param3", 3.0);
    /// ```
    pub fn with_param<V: Into<Value>>(mut self, key: &str, value: V) -> Self {
        self.add_param(key, value);
        self
    }

    /// Adds any serializable value as a parameter, e.g. a struct used as a property map
    pub fn with_serialized_param<V: Serialize>(mut self, key: &str, value: &V) -> Result<Self, GraphError> {
        let value = serde_json::to_value(value)
            .map_err(|e| GraphError::InvalidArgument(format!("parameter '{}': {}", key, e)))?;
        self.add_param(key, value);
        Ok(self)
    }

    /// Adds parameter to the `Statement`
    pub fn add_param<V: Into<Value>>(&mut self, key: &str, value: V) {
        self.parameters.insert(key.to_owned(), value.into());
    }

    /// Gets the value of the parameter
    ///
    /// Returns `None` if there is no parameter with the given name
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.parameters.get(key)
    }

    /// Gets a reference to the underlying parameters `BTreeMap`
    pub fn parameters(&self) -> &BTreeMap<String, Value> {
        &self.parameters
    }

    /// Sets the parameters `BTreeMap`, overriding current values
    pub fn set_parameters(&mut self, params: BTreeMap<String, Value>) {
        self.parameters = params;
    }

    /// Removes parameter from the statment
    ///
    /// Trying to remove a non-existent parameter has no effect
    pub fn remove_param(&mut self, key: &str) {
        self.parameters.remove(key);
    }

    /// Asks the server for the given data formats in builder style
    pub fn with_result_data_contents(mut self, contents: &[ResultDataContent]) -> Self {
        self.result_data_contents = contents.to_vec();
        self
    }

    pub fn result_data_contents(&self) -> &[ResultDataContent] {
        &self.result_data_contents
    }
}

impl<'a> From<&'a str> for Statement {
    fn from(stmt: &str) -> Self {
        Statement::new(stmt)
    }
}

impl From<String> for Statement {
    fn from(stmt: String) -> Self {
        Statement::new(&stmt)
    }
}
