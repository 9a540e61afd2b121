/// Validation of import specifications and recurrence schedules
///
/// Two strategies exist for schedules and both are kept on purpose:
/// - [`ScheduleValidator::validate`] accumulates every field error
/// - [`ScheduleValidator::check_frequency`] fails on the first minimum-period
///   violation without looking at any other field
///
/// The accumulating pass is what the submission pipelines use. The fail-fast
/// check guards the HTTP entry point for recurring jobs.

use crate::error::FieldError;
use crate::import::types::{FrequencyUnit, ImportMode, ImportSpec, Schedule};

/// Checks that a schedule is well-formed
#[derive(Debug, Clone)]
pub struct ScheduleValidator {
    /// Lower bound for minute-based periods, in seconds
    minimum_frequency_seconds: u64,
}

impl ScheduleValidator {
    pub fn new(minimum_frequency_seconds: u64) -> Self {
        Self {
            minimum_frequency_seconds,
        }
    }

    pub fn minimum_frequency_seconds(&self) -> u64 {
        self.minimum_frequency_seconds
    }

    /// Accumulating validation: every rule is evaluated independently
    pub fn validate(&self, schedule: &Schedule) -> Vec<FieldError> {
        let mut errors = Vec::new();

        let starts_too_late = match (schedule.start_utc(), schedule.end_utc()) {
            (Some(start), Some(end)) => start >= end,
            _ => schedule.start_time >= schedule.end_time,
        };
        if starts_too_late {
            errors.push(FieldError::new(
                "startTime",
                format!(
                    "Start time ({}) must be before end time ({})",
                    schedule.start_time, schedule.end_time
                ),
            ));
        }

        if schedule.tz().is_none() {
            errors.push(FieldError::new(
                "timezone",
                format!("Unknown timezone: {}", schedule.timezone),
            ));
        }

        if schedule.frequency.parsed_unit().is_none() {
            errors.push(FieldError::new(
                "frequency.unit",
                format!("Unknown job frequency unit: {}", schedule.frequency.unit),
            ));
        }

        if schedule.frequency.amount <= 0 {
            errors.push(FieldError::new(
                "frequency.amount",
                "Job frequency amount must be positive",
            ));
        }

        if let Err(e) = self.check_frequency(schedule) {
            errors.push(e);
        }

        errors
    }

    /// Fail-fast minimum period check
    ///
    /// Only minute-based schedules are constrained.
    pub fn check_frequency(&self, schedule: &Schedule) -> Result<(), FieldError> {
        let frequency = &schedule.frequency;
        if frequency.parsed_unit() != Some(FrequencyUnit::Minutes) {
            return Ok(());
        }

        let seconds = frequency.amount.saturating_mul(60);
        if seconds < 0 || (seconds as u64) < self.minimum_frequency_seconds {
            return Err(FieldError::new(
                "frequency",
                format!(
                    "Job schedule period can not be smaller than ({}) seconds",
                    self.minimum_frequency_seconds
                ),
            ));
        }

        Ok(())
    }
}

/// Checks a client-supplied relative path before it is joined under the
/// organization directory
///
/// Blank is accepted and means "use the default location". Absolute paths and
/// `.`/`..` or empty components are rejected.
pub fn check_relative_path(field: &str, value: &str) -> Option<FieldError> {
    if value.is_empty() {
        return None;
    }
    if value.starts_with('/') || value.starts_with('\\') {
        return Some(FieldError::new(field, format!("Path must be relative: {}", value)));
    }

    let escapes = value
        .trim_end_matches('/')
        .split(['/', '\\'])
        .any(|part| part.is_empty() || part == "." || part == "..");
    if escapes {
        return Some(FieldError::new(
            field,
            format!("Path must stay inside the organization directory: {}", value),
        ));
    }
    None
}

/// Checks the job name and application path, both of which become
/// workspace directories
pub fn validate_job_location(name: &str, app_path: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if name.contains(['/', '\\']) || name == "." || name == ".." {
        errors.push(FieldError::new(
            "name",
            format!("Job name must not contain path separators: {}", name),
        ));
    }
    errors.extend(check_relative_path("appPath", app_path));

    errors
}

/// Checks that an import specification is well-formed
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportSpecValidator;

impl ImportSpecValidator {
    /// Extra rules for a direct import, which has no default user
    pub fn validate_direct(&self, spec: &ImportSpec) -> Vec<FieldError> {
        let mut errors = self.validate(spec);
        if spec.username.trim().is_empty() {
            errors.push(FieldError::new(
                "username",
                "Username must be set for a direct import",
            ));
        }
        errors
    }

    pub fn validate(&self, spec: &ImportSpec) -> Vec<FieldError> {
        let mut errors = Vec::new();

        errors.extend(check_relative_path("targetDir", &spec.target_dir));

        if spec.import_mode.trim().is_empty() {
            errors.push(FieldError::new("importMode", "Import mode must not be null"));
        } else if spec.mode().is_none() {
            errors.push(FieldError::new(
                "importMode",
                format!("Unknown import mode: {}", spec.import_mode),
            ));
        }

        if spec.mode() == Some(ImportMode::Incremental) && spec.check_column.is_empty() {
            errors.push(FieldError::new(
                "checkColumn",
                "CheckColumn must be set when using incremental mode",
            ));
        }

        errors
    }
}
