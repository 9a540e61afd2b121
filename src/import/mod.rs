/// Import request layer
///
/// Everything that turns an inbound import request into tool arguments:
/// - Request types (ImportSpec, Schedule, jobs)
/// - Validators for specs and schedules
/// - Normalizer with driver inference and Oracle quirks
/// - Sqoop command line builder

pub mod command;
pub mod driver;
pub mod normalizer;
pub mod types;
pub mod validator;

pub use command::{CommandBuilder, SqoopCommand, DRIVER_PROPERTIES_FILE};
pub use driver::{DatabaseEngine, DriverInfo, DriverRegistry};
pub use normalizer::ImportSpecNormalizer;
pub use types::{Frequency, FrequencyUnit, ImportJob, ImportMode, ImportSpec, Schedule, ScheduledImportJob};
pub use validator::{check_relative_path, validate_job_location, ImportSpecValidator, ScheduleValidator};
