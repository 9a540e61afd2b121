#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use sqoop_scheduler::import::{DatabaseEngine, DriverInfo, DriverRegistry};
use sqoop_scheduler::scheduler::{EngineJobId, JobContext, SchedulerClient};
use sqoop_scheduler::submission::{JobIdAllocator, SubmissionOrchestrator};
use sqoop_scheduler::workspace::{Workspace, WorkspaceProvider};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Workspace keeping every file in memory, keyed by path
#[derive(Default)]
pub struct MemoryWorkspace {
    pub org: String,
    pub files: Mutex<BTreeMap<String, Vec<u8>>>,
    pub fail_writes: bool,
}

impl MemoryWorkspace {
    pub fn file(&self, path: &str) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn paths(&self) -> Vec<String> {
        self.files.lock().unwrap().keys().cloned().collect()
    }

    fn put(&self, path: &str, bytes: &[u8]) -> Result<()> {
        if self.fail_writes {
            anyhow::bail!("disk quota exceeded");
        }
        let mut files = self.files.lock().unwrap();
        if files.contains_key(path) {
            anyhow::bail!("{} already exists", path);
        }
        files.insert(path.to_string(), bytes.to_vec());
        Ok(())
    }
}

#[async_trait]
impl Workspace for MemoryWorkspace {
    async fn exists(&self, path: &str) -> Result<bool> {
        let prefix = format!("{}/", path);
        Ok(self
            .files
            .lock()
            .unwrap()
            .keys()
            .any(|p| p == path || p.starts_with(&prefix)))
    }

    async fn create_file(&self, path: &str, bytes: &[u8]) -> Result<()> {
        self.put(path, bytes)
    }

    fn resolve_workflow_dir(&self, job_id: &str, app_path: &str) -> String {
        if app_path.is_empty() {
            format!("/org/{}/oozie-jobs/{}", self.org, job_id)
        } else {
            format!("/org/{}/oozie-jobs/{}/{}", self.org, job_id, app_path)
        }
    }

    fn resolve_target_dir(&self, job_id: &str, dir: &str) -> String {
        if dir.is_empty() {
            format!("/org/{}/sqoop-imports/{}", self.org, job_id)
        } else {
            format!("/org/{}/{}", self.org, dir)
        }
    }

    async fn write_workflow_definition(&self, dir: &str, xml: &str) -> Result<String> {
        let path = format!("{}/workflow.xml", dir);
        self.put(&path, xml.as_bytes())?;
        Ok(path)
    }

    async fn write_coordinator_definition(&self, dir: &str, xml: &str) -> Result<String> {
        let path = format!("{}/coordinator.xml", dir);
        self.put(&path, xml.as_bytes())?;
        Ok(path)
    }

    fn org_dir(&self) -> String {
        format!("/org/{}", self.org)
    }
}

/// Hands out one shared in-memory workspace per organization
#[derive(Default)]
pub struct MemoryWorkspaces {
    pub workspaces: Mutex<BTreeMap<String, Arc<MemoryWorkspace>>>,
    pub fail_writes: bool,
}

impl MemoryWorkspaces {
    pub fn get(&self, org: &str) -> Arc<MemoryWorkspace> {
        let mut workspaces = self.workspaces.lock().unwrap();
        workspaces
            .entry(org.to_string())
            .or_insert_with(|| {
                Arc::new(MemoryWorkspace {
                    org: org.to_string(),
                    fail_writes: self.fail_writes,
                    ..Default::default()
                })
            })
            .clone()
    }
}

#[async_trait]
impl WorkspaceProvider for MemoryWorkspaces {
    async fn workspace(&self, org_id: &str) -> Result<Arc<dyn Workspace>> {
        let workspace: Arc<dyn Workspace> = self.get(org_id);
        Ok(workspace)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    Workflow { app_path: String, target_dir: String },
    Coordinator { app_path: String, target_dir: String },
}

/// Scheduler client recording every submission
#[derive(Default)]
pub struct RecordingClient {
    pub submitted: Mutex<Vec<Submitted>>,
}

impl RecordingClient {
    pub fn submitted(&self) -> Vec<Submitted> {
        self.submitted.lock().unwrap().clone()
    }

    fn record(&self, submission: Submitted) -> EngineJobId {
        let mut submitted = self.submitted.lock().unwrap();
        submitted.push(submission);
        EngineJobId(format!("{:07}-oozie", submitted.len()))
    }
}

#[async_trait]
impl SchedulerClient for RecordingClient {
    async fn submit_workflow_job(&self, app_path: &str, target_dir: &str) -> Result<EngineJobId> {
        Ok(self.record(Submitted::Workflow {
            app_path: app_path.to_string(),
            target_dir: target_dir.to_string(),
        }))
    }

    async fn submit_coordinated_job(&self, app_path: &str, target_dir: &str) -> Result<EngineJobId> {
        Ok(self.record(Submitted::Coordinator {
            app_path: app_path.to_string(),
            target_dir: target_dir.to_string(),
        }))
    }
}

pub const METASTORE: &str = "jdbc:hsqldb:hsql://meta:16000/sqoop";

pub fn job_context() -> JobContext {
    JobContext {
        oozie_api_url: "http://oozie:11000/oozie".into(),
        job_tracker: "rm:8032".into(),
        name_node: "hdfs://nn:8020".into(),
        sqoop_metastore: METASTORE.into(),
        user: "oozie".into(),
    }
}

pub fn registry() -> DriverRegistry {
    DriverRegistry::new(vec![
        DatabaseEngine {
            name: "mysql".into(),
            drivers: vec![DriverInfo {
                name: "mysql".into(),
                class_name: "com.mysql.jdbc.Driver".into(),
            }],
        },
        DatabaseEngine {
            name: "oracle".into(),
            drivers: vec![DriverInfo {
                name: "oracle".into(),
                class_name: "oracle.jdbc.OracleDriver".into(),
            }],
        },
    ])
}

pub struct Harness {
    pub workspaces: Arc<MemoryWorkspaces>,
    pub client: Arc<RecordingClient>,
    pub orchestrator: Arc<SubmissionOrchestrator>,
}

pub fn harness_with(workspaces: MemoryWorkspaces, allocator: JobIdAllocator) -> Harness {
    let workspaces = Arc::new(workspaces);
    let client = Arc::new(RecordingClient::default());
    let orchestrator = SubmissionOrchestrator::new(
        workspaces.clone(),
        client.clone(),
        &job_context(),
        registry(),
        300,
    )
    .with_allocator(allocator);

    Harness {
        workspaces,
        client,
        orchestrator: Arc::new(orchestrator),
    }
}

pub fn harness() -> Harness {
    harness_with(MemoryWorkspaces::default(), JobIdAllocator::new())
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn get(app: axum::Router, uri: &str) -> axum::response::Response {
    use tower::ServiceExt;
    let request = axum::http::Request::builder()
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: axum::Router, uri: &str, body: serde_json::Value) -> axum::response::Response {
    use tower::ServiceExt;
    let request = axum::http::Request::builder()
        .method(axum::http::Method::POST)
        .uri(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}
