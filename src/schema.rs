//! Labels, indexes and uniqueness constraints
//!
//! ```no_run
//! # use rusted_neoclient::{ClientConfig, GraphClient};
//! # let client = GraphClient::new(ClientConfig::new().with_default_local_connection().unwrap()).unwrap();
//! client.create_unique_constraint("Person", "email").unwrap();
//! client.create_unique_constraint("User", "username").unwrap();
//!
//! let constraints = client.get_unique_constraints().unwrap();
//! assert!(constraints["Person"].contains("email"));
//!
//! let renamed = client.rename_label("Person", "User").unwrap();
//! println!("{} nodes relabeled", renamed);
//! ```

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use serde::Deserialize;

use crate::cypher::Statement;
use crate::error::GraphError;
use crate::graph::{GraphClient, QueryResponse};

/// Nodes relabeled per statement by `rename_label`
pub const RENAME_BATCH_SIZE: u64 = 10_000;

const CONSTRAINT_PATH: &str = "db/data/schema/constraint";
const INDEX_PATH: &str = "db/data/schema/index";
const LABELS_PATH: &str = "db/data/labels";

/// Properties grouped by the label they apply to
pub type SchemaMap = BTreeMap<String, BTreeSet<String>>;

/// A uniqueness rule the server enforces on a label and property
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Constraint {
    pub label: String,
    pub property: String,
}

#[derive(Debug, Deserialize)]
struct SchemaEntry {
    #[serde(default)]
    label: Option<String>,
    #[serde(rename = "relationshipType", default)]
    relationship_type: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    property_keys: Vec<String>,
}

/// Quotes a label or property name so it can be spliced into a statement
pub fn quote_identifier(name: &str) -> Result<String, GraphError> {
    if name.is_empty() {
        return Err(GraphError::InvalidArgument("label and property names cannot be empty".to_owned()));
    }

    Ok(format!("`{}`", name.replace('`', "``")))
}

fn group(entries: impl IntoIterator<Item = (String, String)>) -> SchemaMap {
    let mut map = SchemaMap::new();
    for (label, property) in entries {
        map.entry(label).or_default().insert(property);
    }
    map
}

/// `(label, property)` pairs of the entries on node labels, skipping those on relationship types
fn label_properties(entries: Vec<SchemaEntry>) -> impl Iterator<Item = (String, String)> {
    entries
        .into_iter()
        .filter_map(|e| match e.label {
            Some(label) => Some((label, e.property_keys)),
            None => {
                debug!(
                    "Skipping schema entry on relationship type {}",
                    e.relationship_type.as_deref().unwrap_or("<unknown>")
                );
                None
            }
        })
        .flat_map(|(label, properties)| properties.into_iter().map(move |p| (label.clone(), p)))
}

fn unique_constraints(entries: Vec<SchemaEntry>) -> Vec<Constraint> {
    let unique = entries
        .into_iter()
        .filter(|e| e.kind.as_deref().map_or(true, |kind| kind == "UNIQUENESS"))
        .collect();

    label_properties(unique)
        .map(|(label, property)| Constraint { label, property })
        .collect()
}

impl GraphClient {
    /// Moves every node labeled `old` to the label `new`, returning how many were relabeled
    pub fn rename_label(&self, old: &str, new: &str) -> Result<u64, GraphError> {
        let old = quote_identifier(old)?;
        let new = quote_identifier(new)?;

        if old == new {
            return Ok(0);
        }

        let query = format!(
            "MATCH (n:{old}) WITH n LIMIT {limit} REMOVE n:{old} SET n:{new} RETURN count(n)",
            old = old,
            new = new,
            limit = RENAME_BATCH_SIZE
        );

        let mut total = 0;
        loop {
            let renamed = self
                .query_scalar(Statement::new(&query))?
                .and_then(|count| count.as_u64())
                .unwrap_or(0);

            debug!("Relabeled {} nodes from {} to {}", renamed, old, new);

            if renamed == 0 {
                return Ok(total);
            }
            total += renamed;
        }
    }

    pub fn create_unique_constraint(&self, label: &str, property: &str) -> Result<QueryResponse, GraphError> {
        let query = format!(
            "CREATE CONSTRAINT ON (n:{}) ASSERT n.{} IS UNIQUE",
            quote_identifier(label)?,
            quote_identifier(property)?
        );
        self.send_cypher_query(query)
    }

    pub fn drop_unique_constraint(&self, label: &str, property: &str) -> Result<QueryResponse, GraphError> {
        let query = format!(
            "DROP CONSTRAINT ON (n:{}) ASSERT n.{} IS UNIQUE",
            quote_identifier(label)?,
            quote_identifier(property)?
        );
        self.send_cypher_query(query)
    }

    /// Every uniqueness constraint of the server, one per label and property
    pub fn get_constraints(&self) -> Result<Vec<Constraint>, GraphError> {
        let entries: Vec<SchemaEntry> = self.get(CONSTRAINT_PATH)?;
        Ok(unique_constraints(entries))
    }

    /// Uniqueness constraints grouped by label
    pub fn get_unique_constraints(&self) -> Result<SchemaMap, GraphError> {
        let constraints = self.get_constraints()?;
        Ok(group(constraints.into_iter().map(|c| (c.label, c.property))))
    }

    pub fn create_index(&self, label: &str, property: &str) -> Result<QueryResponse, GraphError> {
        let query = format!(
            "CREATE INDEX ON :{}({})",
            quote_identifier(label)?,
            quote_identifier(property)?
        );
        self.send_cypher_query(query)
    }

    pub fn drop_index(&self, label: &str, property: &str) -> Result<QueryResponse, GraphError> {
        let query = format!(
            "DROP INDEX ON :{}({})",
            quote_identifier(label)?,
            quote_identifier(property)?
        );
        self.send_cypher_query(query)
    }

    /// Indexed properties grouped by label
    pub fn get_indexes(&self) -> Result<SchemaMap, GraphError> {
        let entries: Vec<SchemaEntry> = self.get(INDEX_PATH)?;
        Ok(group(label_properties(entries)))
    }

    /// Every label in use on the server
    pub fn get_labels(&self) -> Result<Vec<String>, GraphError> {
        self.get(LABELS_PATH)
    }
}
