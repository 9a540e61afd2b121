/// Canonical rewriting of import jobs
///
/// Applied once per submission, before any id, path or command is derived
/// from the job. Every step is deterministic and idempotent.

use crate::import::driver::DriverRegistry;
use crate::import::types::{ImportJob, ImportMode, ImportSpec, ScheduledImportJob};

/// Username recurring jobs run as when the client leaves it blank
pub const DEFAULT_USERNAME: &str = "tap";

const ORACLE_THIN_PREFIX: &str = "jdbc:oracle:thin";

#[derive(Debug, Clone)]
pub struct ImportSpecNormalizer {
    registry: DriverRegistry,
    default_username: String,
}

impl ImportSpecNormalizer {
    pub fn new(registry: DriverRegistry) -> Self {
        Self {
            registry,
            default_username: DEFAULT_USERNAME.to_string(),
        }
    }

    pub fn with_default_username(mut self, username: impl Into<String>) -> Self {
        self.default_username = username.into();
        self
    }

    pub fn normalize_one_shot(&self, job: &mut ImportJob) {
        job.name = normalize_name(&job.name);
        self.normalize_spec(&mut job.sqoop_import);
    }

    pub fn normalize_recurring(&self, job: &mut ScheduledImportJob) {
        job.name = normalize_name(&job.name);
        self.normalize_spec(&mut job.sqoop_import);

        job.schedule.frequency.unit = job.schedule.frequency.unit.to_lowercase();

        if job.sqoop_import.username.trim().is_empty() {
            tracing::info!("Empty username detected, using '{}'", self.default_username);
            job.sqoop_import.username = self.default_username.clone();
        }
    }

    fn normalize_spec(&self, spec: &mut ImportSpec) {
        match spec.mode() {
            Some(ImportMode::Overwrite) => {
                spec.incremental = false;
                spec.overwrite = true;
            }
            Some(ImportMode::Incremental) => {
                spec.incremental = true;
                spec.overwrite = false;
            }
            _ => {}
        }

        if is_oracle(&spec.jdbc_uri) {
            adjust_for_oracle(spec);
        } else {
            spec.jdbc_uri = spec.jdbc_uri.replace(":@", "://");
        }

        if spec.driver.is_empty() {
            if let Some(class_name) = self.registry.resolve(&spec.jdbc_uri) {
                tracing::debug!("Inferred driver {} for {}", class_name, spec.jdbc_uri);
                spec.driver = class_name.to_string();
            }
        }
    }
}

/// Job names end up in paths and ids, so spaces become underscores
pub fn normalize_name(name: &str) -> String {
    name.replace(' ', "_")
}

pub fn is_oracle(jdbc_uri: &str) -> bool {
    jdbc_uri.to_lowercase().contains(ORACLE_THIN_PREFIX)
}

/// Oracle thin URIs use ":@" and Oracle has no separate schema argument
fn adjust_for_oracle(spec: &mut ImportSpec) {
    spec.jdbc_uri = spec.jdbc_uri.replace("://", ":@");

    if !spec.schema.is_empty() && !spec.table.contains('.') {
        spec.table = format!("{}.{}", spec.schema, spec.table);
        spec.schema.clear();
    }
}
