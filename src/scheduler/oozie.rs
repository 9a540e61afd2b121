/// Oozie REST client
///
/// Jobs are started with a single `POST {api}/v2/jobs?action=start` carrying
/// an XML job configuration. The engine answers with `{"id": "..."}`.

use crate::scheduler::{EngineJobId, JobContext, SchedulerClient};
use crate::workflow::xml::XmlWriter;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

const WORKFLOW_PATH_KEY: &str = "oozie.wf.application.path";
const COORDINATOR_PATH_KEY: &str = "oozie.coord.application.path";

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    id: String,
}

#[derive(Debug, Clone)]
pub struct OozieClient {
    http: reqwest::Client,
    context: JobContext,
}

impl OozieClient {
    pub fn new(context: JobContext) -> Self {
        Self {
            http: reqwest::Client::new(),
            context,
        }
    }

    /// Job configuration document for a submission
    pub fn job_configuration(&self, path_key: &str, app_path: &str, target_dir: &str) -> String {
        let mut xml = XmlWriter::new();
        xml.open("configuration", &[]);

        let properties = [
            ("user.name", self.context.user.as_str()),
            (path_key, app_path),
            ("jobTracker", self.context.job_tracker.as_str()),
            ("nameNode", self.context.name_node.as_str()),
            ("targetDir", target_dir),
            ("oozie.use.system.libpath", "true"),
        ];
        for (name, value) in properties {
            xml.open("property", &[])
                .text("name", &[], name)
                .text("value", &[], value)
                .close();
        }

        xml.finish()
    }

    async fn start(&self, path_key: &str, app_path: &str, target_dir: &str) -> Result<EngineJobId> {
        let url = format!("{}/v2/jobs?action=start", self.context.oozie_api_url);
        let body = self.job_configuration(path_key, app_path, target_dir);

        tracing::debug!("🌍 Submitting {} to {}", app_path, url);
        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/xml;charset=UTF-8")
            .body(body)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Oozie request failed: {}", e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read Oozie response: {}", e))?;

        if !status.is_success() {
            return Err(anyhow::anyhow!("Oozie rejected job (status {}): {}", status, text));
        }

        let parsed: SubmitResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow::anyhow!("Unexpected Oozie response '{}': {}", text, e))?;

        tracing::info!("✅ Oozie accepted job {}", parsed.id);
        Ok(EngineJobId(parsed.id))
    }
}

#[async_trait]
impl SchedulerClient for OozieClient {
    async fn submit_workflow_job(&self, app_path: &str, target_dir: &str) -> Result<EngineJobId> {
        self.start(WORKFLOW_PATH_KEY, app_path, target_dir).await
    }

    async fn submit_coordinated_job(&self, app_path: &str, target_dir: &str) -> Result<EngineJobId> {
        self.start(COORDINATOR_PATH_KEY, app_path, target_dir).await
    }
}
