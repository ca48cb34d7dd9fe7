//! CLI argument parsing with clap derive

use std::path::PathBuf;

use clap::{ArgGroup, Parser, ValueEnum};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// askq - Ask questions from a spec file and output answers as JSON
#[derive(Parser)]
#[command(name = "askq")]
#[command(version = VERSION)]
#[command(about = "Ask questions from a spec file and output answers as JSON")]
#[command(long_about = "Ask questions from a spec file and output answers as JSON.\n\nThe spec is a JSON or YAML document with a top-level `questions` list. Each question is shown as a menu, a checkbox list, or a text prompt, and the answers are printed to stdout as one JSON object keyed by each question's `key` (or `question_N` when omitted).\n\nExit status:\n  0    all questions answered\n  1    invalid spec or runtime error\n  130  cancelled by the user (partial answers are still printed)")]
#[command(after_help = "Examples:\n  askq --spec questions.yaml\n  cat questions.json | askq --spec -\n  askq --spec questions.yaml --dry-run\n  askq --schema --pretty\n  askq --example yaml")]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["spec", "schema", "example"])
))]
pub struct Cli {
    /// Path to question spec file (JSON or YAML), or '-' to read from stdin
    #[arg(long, value_name = "PATH")]
    pub spec: Option<String>,

    /// Print a JSON Schema for the spec format and exit
    #[arg(long)]
    pub schema: bool,

    /// Print an example spec and exit
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub example: Option<ExampleFormat>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Validate spec without asking questions
    #[arg(long, requires = "spec")]
    pub dry_run: bool,

    /// Read settings from this config file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Format of the example spec
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExampleFormat {
    Yaml,
    Json,
}

/// What the invocation asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Ask (or validate) the questions in a spec
    Ask { spec: String, dry_run: bool },
    /// Print the JSON Schema
    Schema,
    /// Print an example spec
    Example(ExampleFormat),
}

impl Cli {
    /// Resolve the selected mode
    pub fn mode(&self) -> Option<Mode> {
        if self.schema {
            Some(Mode::Schema)
        } else if let Some(format) = self.example {
            Some(Mode::Example(format))
        } else {
            self.spec.as_ref().map(|spec| Mode::Ask {
                spec: spec.clone(),
                dry_run: self.dry_run,
            })
        }
    }
}

/// Get the command args for use in the application
pub fn parse() -> Cli {
    Cli::parse()
}
