/// Configuration management for the import scheduler
///
/// Handles server configuration, workspace location, Oozie endpoints and the
/// parameters the validators and normalizer need.

use crate::import::driver::DatabaseEngine;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Workspace (job artifact storage) configuration
    pub workspace: WorkspaceConfig,
    /// Workflow engine configuration
    pub oozie: OozieConfig,
    /// Schedule constraints
    pub schedule: ScheduleConfig,
    /// Known database engines, scanned in order for driver inference
    pub databases: Vec<DatabaseEngine>,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address (e.g., "0.0.0.0")
    pub host: String,
    /// Server port number
    pub port: u16,
}

/// Workspace configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Root directory holding one subtree per organization
    pub root_dir: String,
}

/// Oozie and Sqoop endpoints shared by every submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OozieConfig {
    /// Base URL of the Oozie REST API (e.g. "http://localhost:11000/oozie")
    pub api_url: String,
    /// Resource manager address handed to actions as ${jobTracker}
    pub job_tracker: String,
    /// Filesystem URI handed to actions as ${nameNode}
    pub name_node: String,
    /// Sqoop metastore JDBC URL for saved jobs
    pub sqoop_metastore: String,
    /// User the jobs are submitted as
    pub user: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Smallest allowed period for minute-based schedules
    pub minimum_frequency_seconds: u64,
}

impl Default for Config {
    /// Default configuration with ENV_VAR support for k8s/container deployment
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env_or("SCHEDULER_HOST", "0.0.0.0"),
                port: env_or("SCHEDULER_PORT", "8080").parse().unwrap_or(8080),
            },
            workspace: WorkspaceConfig {
                root_dir: env_or("SCHEDULER_WORKSPACE_DIR", "data"),
            },
            oozie: OozieConfig {
                api_url: env_or("SCHEDULER_OOZIE_URL", "http://localhost:11000/oozie"),
                job_tracker: env_or("SCHEDULER_JOB_TRACKER", "localhost:8032"),
                name_node: env_or("SCHEDULER_NAME_NODE", "hdfs://localhost:8020"),
                sqoop_metastore: env_or(
                    "SCHEDULER_SQOOP_METASTORE",
                    "jdbc:hsqldb:hsql://localhost:16000/sqoop",
                ),
                user: env_or("SCHEDULER_USER", "oozie"),
            },
            schedule: ScheduleConfig {
                minimum_frequency_seconds: env_or("SCHEDULER_MIN_FREQUENCY_SECONDS", "300")
                    .parse()
                    .unwrap_or(300),
            },
            databases: Vec::new(),
        }
    }
}

impl Config {
    /// Default configuration plus the driver registry file, if one is configured
    ///
    /// SCHEDULER_DATABASES_FILE points at a JSON array of database engines:
    /// `[{ "name": "postgresql", "drivers": [{ "name": "postgresql", "className": "org.postgresql.Driver" }] }]`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("SCHEDULER_DATABASES_FILE") {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read database registry '{}'", path))?;
            config.databases = parse_databases(&raw)
                .with_context(|| format!("Invalid database registry '{}'", path))?;
        }

        Ok(config)
    }
}

fn parse_databases(raw: &str) -> Result<Vec<DatabaseEngine>> {
    Ok(serde_json::from_str(raw)?)
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
