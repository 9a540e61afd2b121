/// Engine parameters shared by every job of a deployment

use crate::config::OozieConfig;
use serde::Serialize;

/// Values the workflow engine substitutes into job definitions
///
/// Action nodes only reference `${jobTracker}` and `${nameNode}`; the
/// concrete values travel with the submission request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobContext {
    pub oozie_api_url: String,
    pub job_tracker: String,
    pub name_node: String,
    pub sqoop_metastore: String,
    /// User jobs are submitted as
    pub user: String,
}

impl From<&OozieConfig> for JobContext {
    fn from(config: &OozieConfig) -> Self {
        Self {
            oozie_api_url: config.api_url.trim_end_matches('/').to_string(),
            job_tracker: config.job_tracker.clone(),
            name_node: config.name_node.clone(),
            sqoop_metastore: config.sqoop_metastore.clone(),
            user: config.user.clone(),
        }
    }
}
