/// Submission layer
///
/// Composes validation, normalization, command and graph construction into
/// the one-shot and recurring import pipelines:
/// - Job id allocation, serialized across concurrent requests
/// - The two workflow shapes submitted for imports
/// - The orchestrator driving workspace writes and engine submission
/// - The configuration view offered to clients

pub mod configuration;
pub mod graphs;
pub mod job_id;
pub mod orchestrator;

pub use configuration::ConfigurationView;
pub use job_id::{Clock, JobId, JobIdAllocator};
pub use orchestrator::{driver_properties, JobHandle, SubmissionOrchestrator};
