use std::time::Duration;

use crate::connection::{Connection, ConnectionRegistry};
use crate::error::GraphError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything a `GraphClient` needs to be built
///
/// Setters consume `self` so a configuration can be written as a single expression:
///
/// ```
/// use rusted_neoclient::{ClientConfig, Connection};
///
/// let config = ClientConfig::new()
///     .with_default_local_connection().unwrap()
///     .with_connection(Connection::new("replica", "http", "10.0.0.2", 7474)).unwrap()
///     .with_auto_format_response(true);
///
/// assert_eq!(config.registry().len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct ClientConfig {
    registry: ConnectionRegistry,
    auto_format_response: bool,
    timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            registry: ConnectionRegistry::new(),
            auto_format_response: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        ClientConfig::default()
    }

    /// A configuration holding a single connection built from `url`
    pub fn from_url(url: &str) -> Result<Self, GraphError> {
        ClientConfig::new().with_connection(Connection::from_url(crate::connection::DEFAULT_ALIAS, url)?)
    }

    pub fn with_connection(mut self, connection: Connection) -> Result<Self, GraphError> {
        self.registry.register(connection)?;
        Ok(self)
    }

    pub fn with_default_local_connection(mut self) -> Result<Self, GraphError> {
        self.registry.register_default_local()?;
        Ok(self)
    }

    /// Decode every query response into a `GraphResult`
    pub fn with_auto_format_response(mut self, enabled: bool) -> Self {
        self.auto_format_response = enabled;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ConnectionRegistry {
        &mut self.registry
    }

    pub fn auto_format_response(&self) -> bool {
        self.auto_format_response
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
