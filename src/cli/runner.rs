//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::JobConfig;
use crate::error::{Result, ResultExt};
use crate::output::TableOutputFormat;
use crate::store::JsonlStore;
use crate::typedbytes::TypedBytesReader;
use serde_json::{json, Value};
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Validate => self.validate(),
            Commands::Write {
                input,
                output_dir,
                task,
            } => self.write(input, output_dir, task),
            Commands::Inspect { input, limit } => self.inspect(input, *limit),
        }
    }

    /// Load the job configuration, applying `-D` overrides
    fn load_config(&self) -> Result<JobConfig> {
        let mut config = match &self.cli.config {
            Some(path) => JobConfig::from_file(path)?,
            None => JobConfig::new(),
        };
        for (key, value) in &self.cli.properties {
            config.set(key.clone(), value.clone());
        }
        Ok(config)
    }

    /// Run the pre-flight check
    fn validate(&self) -> Result<()> {
        let config = self.load_config()?;
        let format = TableOutputFormat::new(JsonlStore::new("."));
        format.check_output_specs(&config)?;

        self.output_message(&json!({
            "type": "LOG",
            "log": {
                "level": "INFO",
                "message": format!("Job writes to table '{}'", config.table_name()?)
            }
        }));
        Ok(())
    }

    /// Write every pair of the input through a table writer
    fn write(&self, input: &Path, output_dir: &Path, task: &str) -> Result<()> {
        let config = self.load_config()?;
        let format = TableOutputFormat::new(JsonlStore::new(output_dir));
        format.check_output_specs(&config)?;

        let reader = open_input(input)?;
        let mut writer = format.get_record_writer(&config, task)?;
        for (index, pair) in reader.enumerate() {
            let (key, value) = pair?;
            writer
                .write(key, value)
                .with_context(|| format!("record {index}"))?;
        }
        let stats = writer.close()?;

        info!(input = %input.display(), "Finished writing");
        self.output_message(&json!({
            "type": "STATS",
            "table": config.table_name()?,
            "stats": stats
        }));
        Ok(())
    }

    /// Print decoded pairs
    fn inspect(&self, input: &Path, limit: Option<usize>) -> Result<()> {
        let reader = open_input(input)?;
        for pair in reader.take(limit.unwrap_or(usize::MAX)) {
            let (key, value) = pair?;
            self.output_message(&json!({
                "key": key.to_json(),
                "value": value.to_json()
            }));
        }
        Ok(())
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

fn open_input(path: &Path) -> Result<TypedBytesReader> {
    if path.as_os_str() == "-" {
        return TypedBytesReader::from_reader(io::stdin().lock());
    }
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    TypedBytesReader::from_reader(file)
}
