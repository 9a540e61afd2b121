/// Sqoop import scheduler
///
/// Turns relational import requests into Oozie workflows and coordinators,
/// stores them in an organization workspace and submits them to the engine.

// Core configuration and setup
pub mod config;

// Error types shared by every layer
pub mod error;

// Import requests - types, validation, normalization, Sqoop commands
pub mod import;

// Workflow and coordinator definitions with XML serialization
pub mod workflow;

// Job id allocation and the submission pipelines
pub mod submission;

// Artifact storage per organization
pub mod workspace;

// Workflow engine client
pub mod scheduler;

// HTTP API layer
pub mod api;

// Server setup and initialization
pub mod server;

pub use error::{SubmissionError, ValidationErrors};
pub use server::start_server;
pub use submission::{JobHandle, SubmissionOrchestrator};
