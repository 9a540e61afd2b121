/// Registry of known database engines and their JDBC drivers

use serde::{Deserialize, Serialize};

/// JDBC driver known for a database engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverInfo {
    /// Substring identifying the driver in a JDBC URI (e.g. "postgresql")
    pub name: String,
    /// Fully qualified driver class (e.g. "org.postgresql.Driver")
    pub class_name: String,
}

/// A database engine enabled for imports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseEngine {
    pub name: String,
    #[serde(default)]
    pub drivers: Vec<DriverInfo>,
}

/// Ordered driver lookup; the first driver whose name occurs in the URI wins
#[derive(Debug, Clone, Default)]
pub struct DriverRegistry {
    engines: Vec<DatabaseEngine>,
}

impl DriverRegistry {
    pub fn new(engines: Vec<DatabaseEngine>) -> Self {
        Self { engines }
    }

    pub fn engines(&self) -> &[DatabaseEngine] {
        &self.engines
    }

    /// Driver class for a JDBC URI, if any registered driver matches
    pub fn resolve(&self, jdbc_uri: &str) -> Option<&str> {
        self.engines
            .iter()
            .flat_map(|engine| engine.drivers.iter())
            .find(|driver| jdbc_uri.contains(&driver.name))
            .map(|driver| driver.class_name.as_str())
    }
}
