pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::config::toml_config::{
    default_output_path, InputConfig, JobConfig, JobSection, NormalizeConfig, OutputConfig,
};
#[cfg(feature = "cli")]
use crate::domain::model::RecordFormat;
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "ist-time")]
#[command(about = "Render timestamps in India Standard Time (+05:30)")]
pub struct CliConfig {
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the current time in IST
    Now,

    /// Convert timestamps given as arguments, or one per stdin line
    Convert {
        values: Vec<String>,

        /// Fail on the first value that is not a timestamp
        #[arg(long)]
        strict: bool,
    },

    /// Rewrite timestamp fields of a JSON or CSV file to IST
    Normalize(NormalizeArgs),

    /// Run a normalization job described by a TOML file
    Job {
        /// Path to TOML configuration file
        #[arg(short, long, default_value = "ist-job.toml")]
        config: String,

        /// Show what would be processed without executing
        #[arg(long)]
        dry_run: bool,
    },
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct NormalizeArgs {
    #[arg(short, long)]
    pub input: String,

    #[arg(short, long, value_delimiter = ',', required = true)]
    pub fields: Vec<String>,

    /// Defaults to `<input stem>_ist.<format>` next to the input
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(long)]
    pub input_format: Option<String>,

    #[arg(long)]
    pub output_format: Option<String>,

    #[arg(long)]
    pub strict: bool,
}

#[cfg(feature = "cli")]
impl NormalizeArgs {
    pub fn into_job_config(self) -> JobConfig {
        let output_path = match self.output {
            Some(path) => path,
            None => {
                let format = self
                    .output_format
                    .as_deref()
                    .or(self.input_format.as_deref())
                    .and_then(RecordFormat::from_name)
                    .or_else(|| RecordFormat::from_path(&self.input))
                    .unwrap_or(RecordFormat::Json);
                default_output_path(&self.input, format)
            }
        };

        JobConfig {
            job: Some(JobSection {
                name: "cli".to_string(),
                description: None,
            }),
            input: InputConfig {
                path: self.input,
                format: self.input_format,
            },
            normalize: NormalizeConfig {
                fields: self.fields,
                strict: Some(self.strict),
            },
            output: OutputConfig {
                path: output_path,
                format: self.output_format,
            },
        }
    }
}
