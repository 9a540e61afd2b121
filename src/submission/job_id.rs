/// Workspace-unique job identifiers
///
/// An id is the normalized job name plus a one-second timestamp. Two
/// requests for the same name within a second would collide, so the whole
/// check-and-claim sequence runs under one lock and every handed out id is
/// remembered until the timestamp moves on.

use crate::import::normalizer::normalize_name;
use crate::workspace::Workspace;
use anyhow::Result;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;

const SUFFIX_LEN: usize = 2;
const TIMESTAMP_FORMAT: &str = "%y%m%d-%H%M%S";

/// Source of the current time
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Default)]
struct Claims {
    stamp: String,
    /// Workflow directories handed out under `stamp`
    paths: HashSet<String>,
}

pub struct JobIdAllocator {
    clock: Clock,
    claims: Mutex<Claims>,
}

impl Default for JobIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl JobIdAllocator {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(Utc::now))
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            clock,
            claims: Mutex::new(Claims::default()),
        }
    }

    /// Allocates an id whose workflow directory is free in `workspace`
    pub async fn allocate(&self, name: &str, workspace: &dyn Workspace) -> Result<JobId> {
        let mut claims = self.claims.lock().await;

        let stamp = (self.clock)().format(TIMESTAMP_FORMAT).to_string();
        if claims.stamp != stamp {
            claims.stamp = stamp.clone();
            claims.paths.clear();
        }

        let base = format!("{}-{}", normalize_name(name), stamp);
        let mut candidate = base.clone();
        let mut path = workspace.resolve_workflow_dir(&candidate, "");
        tracing::debug!("Trying path {}", path);

        while claims.paths.contains(&path) || workspace.exists(&path).await? {
            tracing::warn!("⚠️ Path already taken: {}", path);
            candidate.push('-');
            candidate.push_str(&random_suffix());
            path = workspace.resolve_workflow_dir(&candidate, "");
        }

        tracing::info!("🆔 Accepted path {}", path);
        claims.paths.insert(path);
        Ok(JobId(candidate))
    }
}

fn random_suffix() -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(SUFFIX_LEN)
        .map(char::from)
        .collect()
}
