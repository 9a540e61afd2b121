/// Import submission pipelines
///
/// Both pipelines follow the same sequence: validate, normalize, allocate an
/// id, resolve paths, build commands and graphs, write the artifacts and hand
/// the job to the engine. Artifacts are written one by one with no rollback;
/// a failure midway leaves whatever was already written in the workspace.

use crate::config::Config;
use crate::error::{FieldError, Result, ValidationErrors};
use crate::import::{
    validate_job_location, CommandBuilder, DriverRegistry, ImportJob, ImportSpecNormalizer,
    ImportSpecValidator, Schedule, ScheduleValidator, ScheduledImportJob, DRIVER_PROPERTIES_FILE,
};
use crate::scheduler::{EngineJobId, JobContext, SchedulerClient};
use crate::submission::configuration::{supported_timezones, ConfigurationView};
use crate::submission::graphs::{one_shot_workflow, recurring_workflow, FLAG_FILE, TARGET_DIR_PLACEHOLDER};
use crate::submission::job_id::{JobId, JobIdAllocator};
use crate::workflow::CoordinatorBuilder;
use crate::workspace::{parent_dir, Workspace, WorkspaceProvider};
use serde::Serialize;
use std::sync::Arc;

/// Longest session user name Oracle accepts
const MAX_OSUSER_LEN: usize = 29;

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobHandle {
    pub job_id: JobId,
    pub engine_job_id: EngineJobId,
}

pub struct SubmissionOrchestrator {
    workspaces: Arc<dyn WorkspaceProvider>,
    client: Arc<dyn SchedulerClient>,
    allocator: JobIdAllocator,
    spec_validator: ImportSpecValidator,
    schedule_validator: ScheduleValidator,
    normalizer: ImportSpecNormalizer,
    commands: CommandBuilder,
    registry: DriverRegistry,
}

impl SubmissionOrchestrator {
    pub fn new(
        workspaces: Arc<dyn WorkspaceProvider>,
        client: Arc<dyn SchedulerClient>,
        context: &JobContext,
        registry: DriverRegistry,
        minimum_frequency_seconds: u64,
    ) -> Self {
        Self {
            workspaces,
            client,
            allocator: JobIdAllocator::new(),
            spec_validator: ImportSpecValidator,
            schedule_validator: ScheduleValidator::new(minimum_frequency_seconds),
            normalizer: ImportSpecNormalizer::new(registry.clone()),
            commands: CommandBuilder::new(&context.sqoop_metastore),
            registry,
        }
    }

    pub fn from_config(
        config: &Config,
        workspaces: Arc<dyn WorkspaceProvider>,
        client: Arc<dyn SchedulerClient>,
    ) -> Self {
        Self::new(
            workspaces,
            client,
            &JobContext::from(&config.oozie),
            DriverRegistry::new(config.databases.clone()),
            config.schedule.minimum_frequency_seconds,
        )
    }

    /// Replaces the id allocator, e.g. to pin its clock
    pub fn with_allocator(mut self, allocator: JobIdAllocator) -> Self {
        self.allocator = allocator;
        self
    }

    /// Fail-fast minimum period check used ahead of the recurring pipeline
    pub fn check_frequency(&self, schedule: &Schedule) -> std::result::Result<(), FieldError> {
        self.schedule_validator.check_frequency(schedule)
    }

    pub async fn submit_one_shot(&self, mut job: ImportJob, org_id: &str) -> Result<JobHandle> {
        let mut errors = validate_job_location(&job.name, &job.app_path);
        errors.extend(self.spec_validator.validate_direct(&job.sqoop_import));
        ValidationErrors::into_result(errors)?;

        self.normalizer.normalize_one_shot(&mut job);

        let workspace = self.workspaces.workspace(org_id).await?;
        let job_id = self.allocator.allocate(&job.name, workspace.as_ref()).await?;
        tracing::info!("🚀 Submitting import job {} for org {}", job_id, org_id);

        let workflow_dir = workspace.resolve_workflow_dir(job_id.as_str(), &job.app_path);
        let target_dir = workspace.resolve_target_dir(job_id.as_str(), &job.sqoop_import.target_dir);
        job.sqoop_import.target_dir = target_dir.clone();

        let import = self.commands.import(&job.sqoop_import)?;
        tracing::debug!("🔧 Sqoop command: {}", import.masked());

        let workflow = one_shot_workflow(&job.name, &import)?;
        let workflow_path = workspace
            .write_workflow_definition(&workflow_dir, &workflow.to_xml())
            .await?;
        write_driver_properties(workspace.as_ref(), &workflow_dir, org_id).await?;

        let engine_job_id = self
            .client
            .submit_workflow_job(parent_dir(&workflow_path), &target_dir)
            .await?;

        tracing::info!("✅ Import job {} submitted as {}", job_id, engine_job_id);
        Ok(JobHandle {
            job_id,
            engine_job_id,
        })
    }

    pub async fn submit_recurring(&self, mut job: ScheduledImportJob, org_id: &str) -> Result<JobHandle> {
        let mut errors = validate_job_location(&job.name, &job.app_path);
        errors.extend(self.spec_validator.validate(&job.sqoop_import));
        errors.extend(self.schedule_validator.validate(&job.schedule));
        ValidationErrors::into_result(errors)?;

        self.normalizer.normalize_recurring(&mut job);

        let workspace = self.workspaces.workspace(org_id).await?;
        let job_id = self.allocator.allocate(&job.name, workspace.as_ref()).await?;
        tracing::info!("🚀 Submitting scheduled import job {} for org {}", job_id, org_id);

        let workflow_dir = workspace.resolve_workflow_dir(job_id.as_str(), &job.app_path);
        let target_dir = workspace.resolve_target_dir(job_id.as_str(), &job.sqoop_import.target_dir);
        job.sqoop_import.target_dir = TARGET_DIR_PLACEHOLDER.to_string();

        let create = self.commands.create_job(job_id.as_str(), &job.sqoop_import)?;
        let exec = self.commands.exec_job(job_id.as_str(), &job.sqoop_import)?;
        tracing::debug!("🔧 Sqoop create command: {}", create.masked());
        tracing::debug!("🔧 Sqoop exec command: {}", exec.masked());

        let flag_path = format!("{}/{}", workflow_dir, FLAG_FILE);
        let workflow = recurring_workflow(
            &job.name,
            &flag_path,
            job.sqoop_import.overwrite,
            &create,
            &exec,
        )?;
        let workflow_path = workspace
            .write_workflow_definition(&workflow_dir, &workflow.to_xml())
            .await?;

        let coordinator = CoordinatorBuilder::new()
            .name(&job.name)
            .app_path(parent_dir(&workflow_path))
            .schedule(job.schedule.clone())
            .build()?;
        let coordinator_path = workspace
            .write_coordinator_definition(&workflow_dir, &coordinator.to_xml())
            .await?;
        write_driver_properties(workspace.as_ref(), &workflow_dir, org_id).await?;

        let engine_job_id = self
            .client
            .submit_coordinated_job(parent_dir(&coordinator_path), &target_dir)
            .await?;

        tracing::info!("✅ Scheduled import job {} submitted as {}", job_id, engine_job_id);
        Ok(JobHandle {
            job_id,
            engine_job_id,
        })
    }

    /// Options offered to clients of an organization
    pub async fn configuration(&self, org_id: &str) -> Result<ConfigurationView> {
        let workspace = self.workspaces.workspace(org_id).await?;

        Ok(ConfigurationView {
            databases: self.registry.engines().to_vec(),
            timezones: supported_timezones(),
            organization_directory: format!("{}/", workspace.org_dir().trim_end_matches('/')),
            minimum_frequency_in_seconds: self.schedule_validator.minimum_frequency_seconds(),
        })
    }
}

/// Connection parameters tagging database sessions with the organization
pub fn driver_properties(org_id: &str) -> String {
    let osuser: String = org_id.chars().take(MAX_OSUSER_LEN).collect();
    format!("v$session.osuser={}\n", osuser)
}

async fn write_driver_properties(workspace: &dyn Workspace, dir: &str, org_id: &str) -> anyhow::Result<()> {
    let path = format!("{}/{}", dir, DRIVER_PROPERTIES_FILE);
    workspace
        .create_file(&path, driver_properties(org_id).as_bytes())
        .await
}
