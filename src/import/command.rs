/// Sqoop command line assembly
///
/// Argument order is part of the contract: Sqoop splits wrapper arguments
/// (saved job handling) from delegate arguments (the import tool) on `--`
/// separators, so every form below emits its tokens in a fixed sequence.

use crate::error::CommandError;
use crate::import::types::ImportSpec;
use std::fmt;

/// Connection parameter file shipped next to every workflow
pub const DRIVER_PROPERTIES_FILE: &str = "driver.properties";

/// A Sqoop invocation: tool name followed by ordered arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqoopCommand {
    tool: &'static str,
    args: Vec<String>,
}

impl SqoopCommand {
    pub fn tool(&self) -> &str {
        self.tool
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Command line with the password value hidden, for logs
    pub fn masked(&self) -> String {
        let mut tokens = vec![self.tool.to_string()];
        let mut hide_next = false;
        for arg in &self.args {
            if hide_next {
                tokens.push("****".to_string());
                hide_next = false;
            } else {
                hide_next = arg == "--password";
                tokens.push(arg.clone());
            }
        }
        tokens.join(" ")
    }
}

impl fmt::Display for SqoopCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tool)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Ordered argument accumulator
#[derive(Default)]
struct Args(Vec<String>);

impl Args {
    fn token(&mut self, token: &str) -> &mut Self {
        self.0.push(token.to_string());
        self
    }

    fn required(&mut self, flag: &'static str, value: &str) -> Result<&mut Self, CommandError> {
        if value.trim().is_empty() {
            return Err(CommandError::MissingArgument(flag));
        }
        self.0.push(flag.to_string());
        self.0.push(value.to_string());
        Ok(self)
    }

    /// Emits `flag value` only when the value is set and the condition holds
    fn optional(&mut self, flag: &str, value: &str, condition: bool) -> &mut Self {
        if condition && !value.is_empty() {
            self.0.push(flag.to_string());
            self.0.push(value.to_string());
        }
        self
    }

    fn switch(&mut self, flag: &str, condition: bool) -> &mut Self {
        if condition {
            self.0.push(flag.to_string());
        }
        self
    }
}

/// Builds the three Sqoop invocation forms used by import workflows
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    metastore: String,
}

impl CommandBuilder {
    /// `metastore` is the shared Sqoop metastore holding saved jobs
    pub fn new(metastore: impl Into<String>) -> Self {
        Self {
            metastore: metastore.into(),
        }
    }

    /// Direct one-off import
    pub fn import(&self, spec: &ImportSpec) -> Result<SqoopCommand, CommandError> {
        let mut args = Args::default();
        args.required("--connect", &spec.jdbc_uri)?
            .required("--table", &spec.table)?
            .required("--username", &spec.username)?;
        args.optional("--password", &spec.password, true)
            .optional("--num-mappers", "1", true)
            .optional("--target-dir", &spec.target_dir, true)
            .switch("--append", spec.append)
            .token("--connection-param-file")
            .token(DRIVER_PROPERTIES_FILE)
            .optional("--driver", &spec.driver, true)
            .optional("--schema", &spec.schema, true);

        Ok(SqoopCommand {
            tool: "import",
            args: args.0,
        })
    }

    /// Saves a reusable job in the metastore
    pub fn create_job(&self, job_id: &str, spec: &ImportSpec) -> Result<SqoopCommand, CommandError> {
        let mut args = Args::default();
        args.required("--create", job_id)?
            .required("--meta-connect", &self.metastore)?
            .token("--")
            .token("import")
            .required("--connect", &spec.jdbc_uri)?
            .required("--table", &spec.table)?;
        args.optional("--num-mappers", "1", true)
            .optional("--target-dir", &spec.target_dir, true)
            .optional("--check-column", &spec.check_column, spec.incremental)
            .optional("--last-value", &spec.last_value, spec.incremental)
            .switch("--incremental append", spec.incremental)
            .switch("--append", spec.append)
            .token("--connection-param-file")
            .token(DRIVER_PROPERTIES_FILE)
            .optional("--driver", &spec.driver, true);

        Ok(SqoopCommand {
            tool: "job",
            args: args.0,
        })
    }

    /// Runs a previously saved job
    ///
    /// Credentials are not stored in the metastore, so they are passed to
    /// the delegate on every run. The schema is followed by a re-separator
    /// so trailing arguments reach the import tool instead of the wrapper.
    pub fn exec_job(&self, job_id: &str, spec: &ImportSpec) -> Result<SqoopCommand, CommandError> {
        let mut args = Args::default();
        args.required("--exec", job_id)?
            .required("--meta-connect", &self.metastore)?;

        if !spec.username.trim().is_empty() {
            args.token("--")
                .token("--username")
                .token(&spec.username)
                .optional("--password", &spec.password, true)
                .token("--");
        }

        if !spec.schema.is_empty() {
            args.token("--schema")
                .token(&spec.schema)
                .token("--")
                .token("--");
        }

        Ok(SqoopCommand {
            tool: "job",
            args: args.0,
        })
    }
}
