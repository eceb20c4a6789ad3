//! Decodes query responses into nodes and relationships
//!
//! Statements sent with the `graph` result data content come back with, for every row, the nodes
//! and relationships the row references. A `GraphResult` merges those per-row graphs into one,
//! keeping each node and relationship once by its server id.
//!
//! ```
//! use rusted_neoclient::GraphResult;
//! use serde_json::json;
//!
//! let raw = json!({
//!     "results": [{
//!         "columns": ["n"],
//!         "data": [{
//!             "row": [{"title": "The Matrix"}],
//!             "graph": {
//!                 "nodes": [{"id": "1", "labels": ["Movie"], "properties": {"title": "The Matrix"}}],
//!                 "relationships": []
//!             }
//!         }]
//!     }],
//!     "errors": []
//! });
//!
//! let result = GraphResult::decode(&raw).unwrap();
//! assert_eq!(result.node_count(), 1);
//! assert_eq!(result.single_node("Movie").unwrap().property("title").unwrap(), "The Matrix");
//! ```

use std::collections::BTreeMap;

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{GraphError, Neo4jError};

fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Number(u64),
        Text(String),
    }

    match Id::deserialize(deserializer)? {
        Id::Number(id) => Ok(id),
        Id::Text(id) => id.parse().map_err(de::Error::custom),
    }
}

/// A node as returned by the server
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Node {
    #[serde(deserialize_with = "deserialize_id")]
    id: u64,
    #[serde(default)]
    labels: Vec<String>,
    #[serde(default)]
    properties: BTreeMap<String, Value>,
}

impl Node {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The first label of the node, if it has any
    pub fn label(&self) -> Option<&str> {
        self.labels.first().map(|l| l.as_str())
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn properties(&self) -> &BTreeMap<String, Value> {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// A relationship as returned by the server
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Relationship {
    #[serde(deserialize_with = "deserialize_id")]
    id: u64,
    #[serde(rename = "type")]
    rel_type: String,
    #[serde(rename = "startNode", deserialize_with = "deserialize_id")]
    start_node: u64,
    #[serde(rename = "endNode", deserialize_with = "deserialize_id")]
    end_node: u64,
    #[serde(default)]
    properties: BTreeMap<String, Value>,
}

impl Relationship {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn rel_type(&self) -> &str {
        &self.rel_type
    }

    pub fn start_node(&self) -> u64 {
        self.start_node
    }

    pub fn end_node(&self) -> u64 {
        self.end_node
    }

    pub fn properties(&self) -> &BTreeMap<String, Value> {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

#[derive(Deserialize)]
struct RawResponse {
    #[serde(default)]
    results: Vec<RawResult>,
    #[serde(default)]
    errors: Vec<Neo4jError>,
}

#[derive(Deserialize)]
struct RawResult {
    #[serde(default)]
    columns: Vec<String>,
    #[serde(default)]
    data: Vec<RawData>,
}

#[derive(Deserialize)]
struct RawData {
    #[serde(default)]
    row: Option<Vec<Value>>,
    #[serde(default)]
    graph: Option<RawGraph>,
}

#[derive(Deserialize)]
struct RawGraph {
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    relationships: Vec<Relationship>,
}

/// Nodes, relationships and rows decoded from a query response
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphResult {
    columns: Vec<Vec<String>>,
    rows: Vec<Vec<Value>>,
    /// Index in `columns` of the statement each row came from
    row_statements: Vec<usize>,
    nodes: BTreeMap<u64, Node>,
    relationships: BTreeMap<u64, Relationship>,
}

impl GraphResult {
    /// Decodes the JSON body of the transaction endpoint
    ///
    /// The graphs of every statement are merged and the rows of all statements are appended in
    /// order. Each row keeps the columns of its own statement.
    pub fn decode(raw: &Value) -> Result<GraphResult, GraphError> {
        let response = RawResponse::deserialize(raw)
            .map_err(|e| GraphError::server(None, format!("malformed query response: {}", e)))?;

        if !response.errors.is_empty() {
            return Err(GraphError::Query(response.errors));
        }

        let mut result = GraphResult::default();

        for raw_result in response.results {
            let statement = result.columns.len();
            result.columns.push(raw_result.columns);

            for data in raw_result.data {
                if let Some(row) = data.row {
                    result.rows.push(row);
                    result.row_statements.push(statement);
                }

                if let Some(graph) = data.graph {
                    for node in graph.nodes {
                        result.nodes.entry(node.id).or_insert(node);
                    }
                    for relationship in graph.relationships {
                        result.relationships.entry(relationship.id).or_insert(relationship);
                    }
                }
            }
        }

        Ok(result)
    }

    /// Columns of the first statement
    pub fn columns(&self) -> &[String] {
        self.columns.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Columns of every statement, in the order they were sent
    pub fn statement_columns(&self) -> &[Vec<String>] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Values of the column `name` in every row of the statements that return it
    ///
    /// Returns `None` if no statement has such a column
    pub fn column_values(&self, name: &str) -> Option<Vec<&Value>> {
        let indexes: Vec<Option<usize>> = self
            .columns
            .iter()
            .map(|columns| columns.iter().position(|c| c == name))
            .collect();

        if indexes.iter().all(Option::is_none) {
            return None;
        }

        Some(
            self.rows
                .iter()
                .zip(&self.row_statements)
                .filter_map(|(row, &statement)| indexes[statement].and_then(|i| row.get(i)))
                .collect(),
        )
    }

    /// All distinct nodes, ordered by id
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All distinct relationships, ordered by id
    pub fn relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.values()
    }

    pub fn node(&self, id: u64) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn relationship(&self, id: u64) -> Option<&Relationship> {
        self.relationships.get(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    pub fn nodes_with_label(&self, label: &str) -> Vec<&Node> {
        self.nodes().filter(|n| n.has_label(label)).collect()
    }

    /// Nodes carrying at least one of `labels`, each node listed once
    pub fn nodes_with_any_label(&self, labels: &[&str]) -> Vec<&Node> {
        self.nodes()
            .filter(|n| labels.iter().any(|label| n.has_label(label)))
            .collect()
    }

    /// Nodes grouped under each of `labels`
    ///
    /// Every requested label is a key of the map, even when no node carries it. A node with
    /// several of the requested labels is listed under each of them.
    pub fn nodes_grouped_by_label(&self, labels: &[&str]) -> BTreeMap<String, Vec<&Node>> {
        labels
            .iter()
            .map(|label| (label.to_string(), self.nodes_with_label(label)))
            .collect()
    }

    /// The node with `label`, if exactly one is present
    pub fn single_node(&self, label: &str) -> Option<&Node> {
        match self.nodes_with_label(label).as_slice() {
            [node] => Some(*node),
            _ => None,
        }
    }

    pub fn relationships_of_type(&self, rel_type: &str) -> Vec<&Relationship> {
        self.relationships().filter(|r| r.rel_type == rel_type).collect()
    }

    /// Relationships starting or ending at the node `id`
    pub fn relationships_of(&self, id: u64) -> Vec<&Relationship> {
        self.relationships()
            .filter(|r| r.start_node == id || r.end_node == id)
            .collect()
    }
}
