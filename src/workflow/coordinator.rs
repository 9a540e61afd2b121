/// Coordinator (recurring trigger) definitions
///
/// A coordinator wraps the path of an already written workflow and a
/// schedule. Start and end are rendered in UTC, the timezone attribute keeps
/// the client's zone so the engine can handle DST-aware periods.

use crate::error::GraphError;
use crate::import::types::{FrequencyUnit, Schedule};
use crate::workflow::xml::XmlWriter;
use chrono::{DateTime, Utc};

const COORDINATOR_NS: &str = "uri:oozie:coordinator:0.4";

/// Engine share library location used when none is configured
pub const DEFAULT_LIB_PATH: &str = "/user/oozie/share/lib/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinator {
    name: String,
    app_path: String,
    lib_path: String,
    use_system_libpath: bool,
    frequency: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    timezone: String,
}

impl Coordinator {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn app_path(&self) -> &str {
        &self.app_path
    }

    /// Engine expression for the period, e.g. `${coord:minutes(10)}`
    pub fn frequency(&self) -> &str {
        &self.frequency
    }

    /// `coordinator-app` document
    pub fn to_xml(&self) -> String {
        let start = format_instant(&self.start);
        let end = format_instant(&self.end);
        let use_system_libpath = self.use_system_libpath.to_string();

        let mut xml = XmlWriter::new();
        xml.open(
            "coordinator-app",
            &[
                ("name", self.name.as_str()),
                ("frequency", self.frequency.as_str()),
                ("start", start.as_str()),
                ("end", end.as_str()),
                ("timezone", self.timezone.as_str()),
                ("xmlns", COORDINATOR_NS),
            ],
        )
        .open("action", &[])
        .open("workflow", &[])
        .text("app-path", &[], &self.app_path)
        .open("configuration", &[]);

        property(&mut xml, "oozie.libpath", &self.lib_path);
        property(&mut xml, "oozie.use.system.libpath", &use_system_libpath);

        let doc = xml.finish();
        tracing::debug!("📄 Coordinator '{}' XML:\n{}", self.name, doc);
        doc
    }
}

fn property(xml: &mut XmlWriter, name: &str, value: &str) {
    xml.open("property", &[])
        .text("name", &[], name)
        .text("value", &[], value)
        .close();
}

fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%MZ").to_string()
}

fn frequency_expression(unit: FrequencyUnit, amount: i64) -> String {
    format!("${{coord:{}({})}}", unit.as_str(), amount)
}

#[derive(Debug)]
pub struct CoordinatorBuilder {
    name: Option<String>,
    app_path: Option<String>,
    lib_path: String,
    use_system_libpath: bool,
    schedule: Option<Schedule>,
}

impl Default for CoordinatorBuilder {
    fn default() -> Self {
        Self {
            name: None,
            app_path: None,
            lib_path: DEFAULT_LIB_PATH.to_string(),
            use_system_libpath: true,
            schedule: None,
        }
    }
}

impl CoordinatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Directory of the workflow the coordinator triggers
    pub fn app_path(mut self, path: impl Into<String>) -> Self {
        self.app_path = Some(path.into());
        self
    }

    pub fn lib_path(mut self, path: impl Into<String>) -> Self {
        self.lib_path = path.into();
        self
    }

    pub fn schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = Some(schedule);
        self
    }

    pub fn build(self) -> Result<Coordinator, GraphError> {
        let name = self.name.ok_or(GraphError::MissingField("name"))?;
        let app_path = self.app_path.ok_or(GraphError::MissingField("app_path"))?;
        let schedule = self.schedule.ok_or(GraphError::MissingField("schedule"))?;

        let unit = schedule.frequency.parsed_unit().ok_or_else(|| {
            GraphError::InvalidSchedule(format!("unknown unit '{}'", schedule.frequency.unit))
        })?;
        let start = schedule.start_utc().ok_or_else(|| invalid_instant(&schedule))?;
        let end = schedule.end_utc().ok_or_else(|| invalid_instant(&schedule))?;

        Ok(Coordinator {
            name,
            app_path,
            lib_path: self.lib_path,
            use_system_libpath: self.use_system_libpath,
            frequency: frequency_expression(unit, schedule.frequency.amount),
            start,
            end,
            timezone: schedule.timezone,
        })
    }
}

fn invalid_instant(schedule: &Schedule) -> GraphError {
    GraphError::InvalidSchedule(format!(
        "cannot place schedule in timezone '{}'",
        schedule.timezone
    ))
}
