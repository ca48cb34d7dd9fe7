//! askq-core: Core library for question specs
//!
//! This crate decodes and validates question specs, resolves answer keys,
//! and drives a questionnaire through a pluggable [`Prompter`].

/// Core error types
pub mod error;

/// Configuration handling
pub mod config;

/// Core data types (Question, Answers, MenuEntry, etc.)
pub mod types;

/// Spec loading and JSON/YAML decoding
pub mod parser;

/// Validation and key resolution
pub mod validator;

/// JSON Schema for the spec format
pub mod schema;

/// Example specs
pub mod example;

/// Prompt renderer contract
pub mod interaction;

/// Questionnaire orchestration
pub mod ask;

/// Exit status for a completed run
pub const EXIT_SUCCESS: i32 = 0;
/// Exit status for validation or runtime errors
pub const EXIT_ERROR: i32 = 1;
/// Exit status when the user cancels
pub const EXIT_CANCELLED: i32 = 130;

// Re-exports for convenience
pub use ask::ask_questions;
pub use config::Config;
pub use error::{PromptError, PromptResult, SpecError};
pub use example::{example_spec, example_yaml};
pub use interaction::Prompter;
pub use parser::{Formats, load_spec_from_file, load_spec_from_reader, parse_spec_content};
pub use schema::spec_json_schema;
pub use types::{
    AnswerValue, Answers, AskOutcome, Choice, MenuEntry, Question, QuestionOption,
};
pub use validator::{is_valid_key, load_questions, validate_spec};
