/// Local directory workspace
///
/// Layout under the configured root:
/// - org/{org}/oozie-jobs/{job_id}/{app_path}: workflow and coordinator
/// - org/{org}/sqoop-imports/{job_id}: default import target
///
/// Organization workspaces are created lazily and cached.

use crate::workspace::{Workspace, WorkspaceProvider, COORDINATOR_FILE, WORKFLOW_FILE};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

const JOBS_DIR: &str = "oozie-jobs";
const IMPORTS_DIR: &str = "sqoop-imports";

/// Workspace of one organization on the local filesystem
#[derive(Debug, Clone)]
pub struct LocalWorkspace {
    org_dir: PathBuf,
}

impl LocalWorkspace {
    pub fn new(org_dir: impl Into<PathBuf>) -> Self {
        Self {
            org_dir: org_dir.into(),
        }
    }

    async fn write_definition(&self, dir: &str, file_name: &str, xml: &str) -> Result<String> {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create directory '{}'", dir))?;

        let path = Path::new(dir).join(file_name).display().to_string();
        self.create_file(&path, xml.as_bytes()).await?;
        tracing::debug!("💾 Wrote {}", path);
        Ok(path)
    }
}

#[async_trait]
impl Workspace for LocalWorkspace {
    async fn exists(&self, path: &str) -> Result<bool> {
        tokio::fs::try_exists(path)
            .await
            .with_context(|| format!("Failed to check '{}'", path))
    }

    async fn create_file(&self, path: &str, bytes: &[u8]) -> Result<()> {
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await
            .with_context(|| format!("Failed to create file '{}'", path))?;
        file.write_all(bytes)
            .await
            .with_context(|| format!("Failed to write file '{}'", path))?;
        file.flush().await?;
        Ok(())
    }

    fn resolve_workflow_dir(&self, job_id: &str, app_path: &str) -> String {
        let dir = self.org_dir.join(JOBS_DIR).join(job_id);
        let app_path = app_path.trim_matches('/');
        if app_path.is_empty() {
            dir.display().to_string()
        } else {
            dir.join(app_path).display().to_string()
        }
    }

    fn resolve_target_dir(&self, job_id: &str, dir: &str) -> String {
        let dir = dir.trim_matches('/');
        if dir.is_empty() {
            self.org_dir.join(IMPORTS_DIR).join(job_id).display().to_string()
        } else {
            self.org_dir.join(dir).display().to_string()
        }
    }

    async fn write_workflow_definition(&self, dir: &str, xml: &str) -> Result<String> {
        self.write_definition(dir, WORKFLOW_FILE, xml).await
    }

    async fn write_coordinator_definition(&self, dir: &str, xml: &str) -> Result<String> {
        self.write_definition(dir, COORDINATOR_FILE, xml).await
    }

    fn org_dir(&self) -> String {
        self.org_dir.display().to_string()
    }
}

/// Lazily creates and caches one [`LocalWorkspace`] per organization
#[derive(Debug)]
pub struct LocalWorkspaceProvider {
    root_dir: PathBuf,
    workspaces: RwLock<HashMap<String, Arc<LocalWorkspace>>>,
}

impl LocalWorkspaceProvider {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            workspaces: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl WorkspaceProvider for LocalWorkspaceProvider {
    async fn workspace(&self, org_id: &str) -> Result<Arc<dyn Workspace>> {
        {
            let workspaces = self.workspaces.read().await;
            if let Some(workspace) = workspaces.get(org_id) {
                return Ok(workspace.clone() as Arc<dyn Workspace>);
            }
        }

        let mut workspaces = self.workspaces.write().await;

        // Double-check, another request may have created it meanwhile
        if let Some(workspace) = workspaces.get(org_id) {
            return Ok(workspace.clone() as Arc<dyn Workspace>);
        }

        let org_dir = self.root_dir.join("org").join(org_id);
        tokio::fs::create_dir_all(&org_dir)
            .await
            .with_context(|| format!("Failed to create organization directory '{}'", org_dir.display()))?;
        tracing::info!("📁 Organization workspace ready: {}", org_dir.display());

        let workspace = Arc::new(LocalWorkspace::new(org_dir));
        workspaces.insert(org_id.to_string(), workspace.clone());
        Ok(workspace as Arc<dyn Workspace>)
    }
}
