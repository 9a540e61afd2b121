/// Import request type definitions
///
/// Inbound import jobs are deserialized from JSON, mutated once by the
/// normalizer and then treated as read-only inputs to command and graph
/// construction.

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// How rows are brought into the target directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// Every run appends a full copy of the table
    Append,
    /// Every run imports rows past the check-column watermark
    Incremental,
    /// Every run replaces the previous import
    Overwrite,
}

impl ImportMode {
    /// Case-insensitive parse of the wire value
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "append" => Some(Self::Append),
            "incremental" => Some(Self::Incremental),
            "overwrite" => Some(Self::Overwrite),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Append => "append",
            Self::Incremental => "incremental",
            Self::Overwrite => "overwrite",
        }
    }
}

/// Parameters of a single relational import
///
/// Optional string fields use the empty string for "not set", which is how
/// clients send them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSpec {
    /// JDBC connection URI (e.g. "jdbc:postgresql://db:5432/sales")
    pub jdbc_uri: String,
    pub table: String,
    #[serde(default)]
    pub schema: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Raw mode as received; see [`ImportSpec::mode`]
    #[serde(default)]
    pub import_mode: String,
    /// JDBC driver class; inferred from the registry when blank
    #[serde(default)]
    pub driver: String,
    /// Watermark column for incremental imports
    #[serde(default)]
    pub check_column: String,
    /// Watermark value the first incremental run starts after
    #[serde(default)]
    pub last_value: String,
    #[serde(default)]
    pub target_dir: String,
    #[serde(default)]
    pub incremental: bool,
    #[serde(default)]
    pub overwrite: bool,
    #[serde(default = "default_append")]
    pub append: bool,
}

fn default_append() -> bool {
    true
}

impl ImportSpec {
    /// Minimal spec in append mode, used as a starting point by callers and tests
    pub fn new(jdbc_uri: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            jdbc_uri: jdbc_uri.into(),
            table: table.into(),
            schema: String::new(),
            username: String::new(),
            password: String::new(),
            import_mode: ImportMode::Append.as_str().to_string(),
            driver: String::new(),
            check_column: String::new(),
            last_value: String::new(),
            target_dir: String::new(),
            incremental: false,
            overwrite: false,
            append: true,
        }
    }

    pub fn mode(&self) -> Option<ImportMode> {
        ImportMode::parse(&self.import_mode)
    }
}

/// Recurrence period unit understood by the coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyUnit {
    Minutes,
    Hours,
    Days,
    Months,
}

impl FrequencyUnit {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "minutes" => Some(Self::Minutes),
            "hours" => Some(Self::Hours),
            "days" => Some(Self::Days),
            "months" => Some(Self::Months),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minutes => "minutes",
            Self::Hours => "hours",
            Self::Days => "days",
            Self::Months => "months",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frequency {
    /// One of minutes, hours, days, months (any case)
    pub unit: String,
    pub amount: i64,
}

impl Frequency {
    pub fn new(unit: impl Into<String>, amount: i64) -> Self {
        Self {
            unit: unit.into(),
            amount,
        }
    }

    pub fn parsed_unit(&self) -> Option<FrequencyUnit> {
        FrequencyUnit::parse(&self.unit)
    }
}

/// When and how often a recurring import runs
///
/// Start and end are wall-clock times in `timezone`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    /// IANA timezone id (e.g. "UTC", "America/Los_Angeles")
    pub timezone: String,
    pub frequency: Frequency,
}

impl Schedule {
    pub fn tz(&self) -> Option<Tz> {
        self.timezone.parse().ok()
    }

    pub fn start_utc(&self) -> Option<DateTime<Utc>> {
        to_utc(self.start_time, self.tz()?)
    }

    pub fn end_utc(&self) -> Option<DateTime<Utc>> {
        to_utc(self.end_time, self.tz()?)
    }
}

/// Resolves a wall-clock time to an instant
///
/// Ambiguous times take the earlier offset. Times skipped by a forward
/// transition are shifted later by the length of the gap.
fn to_utc(local: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&local)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(local + Duration::hours(1))).earliest())
        .map(|t| t.with_timezone(&Utc))
}

/// A one-shot import request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportJob {
    pub name: String,
    /// Subdirectory of the job directory holding the workflow
    #[serde(default)]
    pub app_path: String,
    pub sqoop_import: ImportSpec,
}

/// A recurring import request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledImportJob {
    pub name: String,
    #[serde(default)]
    pub app_path: String,
    pub sqoop_import: ImportSpec,
    pub schedule: Schedule,
}
