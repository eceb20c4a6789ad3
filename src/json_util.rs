use log::error;
use reqwest::blocking::Response;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{GraphError, Neo4jError};

/// Error body of the non-transactional endpoints
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<Neo4jError>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    exception: Option<String>,
}

/// Reads the body of `res` and decodes it as `T`, turning error statuses into `GraphError`s
pub fn decode_response<T: DeserializeOwned>(res: Response) -> Result<T, GraphError> {
    let status = res.status().as_u16();
    let body = res.text()?;

    decode_body(status, &body)
}

pub fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, GraphError> {
    match status {
        200..=299 => {}
        400..=499 => return Err(client_error(status, body)),
        _ => return Err(GraphError::server(Some(status), body)),
    }

    serde_json::from_str(body).map_err(|e| {
        error!("Unable to parse response: {}", e);
        GraphError::server(Some(status), format!("malformed response: {}", e))
    })
}

fn client_error(status: u16, body: &str) -> GraphError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

    if !parsed.errors.is_empty() {
        return GraphError::Query(parsed.errors);
    }

    let code = parsed.exception.unwrap_or_else(|| format!("HTTP {}", status));
    let message = parsed.message.unwrap_or_else(|| body.to_owned());

    GraphError::Query(vec![Neo4jError { code, message }])
}
