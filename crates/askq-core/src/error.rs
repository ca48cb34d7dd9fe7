//! Error types for askq operations

use thiserror::Error;

/// Core error type for loading and validating question specs
#[derive(Error, Debug)]
pub enum SpecError {
    // === Input errors (E001-E003) ===
    /// E001: Spec file does not exist
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// E002: Spec file or stream could not be read
    #[error("Failed to read {source_name}: {source}")]
    Read {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    /// E003: Nothing but whitespace on stdin
    #[error("No input provided on stdin")]
    EmptyInput,

    // === Format errors (E004-E006) ===
    /// E004: Neither JSON nor YAML could decode the content
    #[error("{}", unparseable_message(.source_name, .json_error, .yaml_error, .yaml_location))]
    Unparseable {
        source_name: String,
        json_error: String,
        yaml_error: String,
        /// 1-based (line, column) of the YAML failure
        yaml_location: Option<(usize, usize)>,
    },

    /// E005: JSON decoding failed and YAML support is not compiled in
    #[error("Could not parse {source_name} as JSON: {json_error}")]
    InvalidJson {
        source_name: String,
        json_error: String,
    },

    /// E006: A .yaml/.yml file was given but YAML support is not compiled in
    #[error("YAML support not enabled. Rebuild askq with the `yaml` feature to read {path}")]
    YamlUnsupported { path: String },

    // === Document structure errors (E010-E013) ===
    /// E010: Top level is not an object
    #[error("Spec must be an object (dictionary)")]
    NotAnObject,

    /// E011: Top level has no `questions` field
    #[error("Spec must contain 'questions' array")]
    MissingQuestions,

    /// E012: `questions` is not an array
    #[error("'questions' must be a list")]
    QuestionsNotList,

    /// E013: More than the allowed number of questions
    #[error("Too many questions (max {max})")]
    TooManyQuestions { max: usize },

    // === Question errors (E020-E029) ===
    /// E020: Question entry is not an object
    #[error("Question {index} must be an object (dictionary)")]
    QuestionNotObject { index: usize },

    /// E021: Question entry lacks the `question` field
    #[error("Missing 'question' field in question {index}")]
    MissingQuestionText { index: usize },

    /// E022: `question` is not a string
    #[error("'question' must be a string in question {index}")]
    QuestionTextNotString { index: usize },

    /// E023: `question` is blank after trimming
    #[error("'question' must be a non-empty string in question {index}")]
    EmptyQuestionText { index: usize },

    /// E024: `question` exceeds the length limit
    #[error("Question text too long (max {max} chars) in question {index}")]
    QuestionTextTooLong { index: usize, max: usize },

    /// E025: A typed field carries the wrong JSON type
    #[error("'{field}' must be a {expected} in question {index}")]
    FieldType {
        index: usize,
        field: &'static str,
        expected: &'static str,
    },

    /// E026: No options and freeform input disabled
    #[error(
        "Question {index} has no options and allow_freeform is false. Fix: add at least one option or set allow_freeform=true."
    )]
    NoOptionsNoFreeform { index: usize },

    /// E027: `freeform_label` is missing text or not a string
    #[error("'freeform_label' must be a non-empty string in question {index}")]
    InvalidFreeformLabel { index: usize },

    /// E028: Too few options for a multi-select question
    #[error("'multi_select' requires at least {min} options in question {index}")]
    TooFewMultiSelectOptions { index: usize, min: usize },

    /// E029: Too many options for a multi-select question
    #[error("'multi_select' allows at most {max} options in question {index}")]
    TooManyMultiSelectOptions { index: usize, max: usize },

    // === Option errors (E030-E034) ===
    /// E030: Option entry is not an object
    #[error("Option {option} must be a dict in question {index}")]
    OptionNotObject { index: usize, option: usize },

    /// E031: Option entry lacks `value`
    #[error("Option {option} missing 'value' in question {index}")]
    OptionMissingValue { index: usize, option: usize },

    /// E032: Option `value` is not a string
    #[error("Option {option} 'value' must be a string in question {index}")]
    OptionValueNotString { index: usize, option: usize },

    /// E033: Option `value` is blank after trimming
    #[error("Option {option} 'value' must be a non-empty string in question {index}")]
    EmptyOptionValue { index: usize, option: usize },

    /// E034: Option `value` exceeds the length limit
    #[error("Option {option} value too long (max {max} chars) in question {index}")]
    OptionValueTooLong {
        index: usize,
        option: usize,
        max: usize,
    },

    /// E035: Option `description` is not a string
    #[error("Option {option} 'description' must be a string in question {index}")]
    OptionDescriptionNotString { index: usize, option: usize },

    // === Key errors (E040-E042) ===
    /// E040: Key is not a valid identifier
    #[error(
        "Invalid key '{key}' in question {index}. Must be a valid identifier (letters/numbers/underscore, starting with a letter or underscore)."
    )]
    InvalidKey { index: usize, key: String },

    /// E041: Explicit key already claimed by an earlier question
    #[error("Duplicate key '{key}' found in question {index}. Fix: keys must be unique across questions.")]
    DuplicateKey { index: usize, key: String },

    /// E042: Positional default key already claimed by an explicit key
    #[error(
        "Generated key '{key}' conflicts with explicit key in question {index}. Fix: rename your explicit key(s) to avoid 'question_N' or provide keys for all questions."
    )]
    GeneratedKeyConflict { index: usize, key: String },

    /// E050: Valid document with an empty question list
    #[error("No questions found in spec")]
    NoQuestions,

    /// E060: Configuration file problem
    #[error("configuration error: {0}")]
    Config(String),
}

fn unparseable_message(
    source_name: &str,
    json_error: &str,
    yaml_error: &str,
    yaml_location: &Option<(usize, usize)>,
) -> String {
    let mut msg = format!(
        "Could not parse {} as JSON or YAML.\nJSON error: {}\nYAML error: {}",
        source_name, json_error, yaml_error
    );
    if let Some((line, column)) = yaml_location {
        msg.push_str(&format!("\nYAML error at line {}, column {}", line, column));
    }
    msg
}

impl SpecError {
    /// Get the error code (e.g., "E001", "E041")
    pub fn code(&self) -> &'static str {
        match self {
            SpecError::FileNotFound { .. } => "E001",
            SpecError::Read { .. } => "E002",
            SpecError::EmptyInput => "E003",
            SpecError::Unparseable { .. } => "E004",
            SpecError::InvalidJson { .. } => "E005",
            SpecError::YamlUnsupported { .. } => "E006",
            SpecError::NotAnObject => "E010",
            SpecError::MissingQuestions => "E011",
            SpecError::QuestionsNotList => "E012",
            SpecError::TooManyQuestions { .. } => "E013",
            SpecError::QuestionNotObject { .. } => "E020",
            SpecError::MissingQuestionText { .. } => "E021",
            SpecError::QuestionTextNotString { .. } => "E022",
            SpecError::EmptyQuestionText { .. } => "E023",
            SpecError::QuestionTextTooLong { .. } => "E024",
            SpecError::FieldType { .. } => "E025",
            SpecError::NoOptionsNoFreeform { .. } => "E026",
            SpecError::InvalidFreeformLabel { .. } => "E027",
            SpecError::TooFewMultiSelectOptions { .. } => "E028",
            SpecError::TooManyMultiSelectOptions { .. } => "E029",
            SpecError::OptionNotObject { .. } => "E030",
            SpecError::OptionMissingValue { .. } => "E031",
            SpecError::OptionValueNotString { .. } => "E032",
            SpecError::EmptyOptionValue { .. } => "E033",
            SpecError::OptionValueTooLong { .. } => "E034",
            SpecError::OptionDescriptionNotString { .. } => "E035",
            SpecError::InvalidKey { .. } => "E040",
            SpecError::DuplicateKey { .. } => "E041",
            SpecError::GeneratedKeyConflict { .. } => "E042",
            SpecError::NoQuestions => "E050",
            SpecError::Config(_) => "E060",
        }
    }

    /// Get the index of the offending question, if any
    pub fn question_index(&self) -> Option<usize> {
        match self {
            SpecError::QuestionNotObject { index }
            | SpecError::MissingQuestionText { index }
            | SpecError::QuestionTextNotString { index }
            | SpecError::EmptyQuestionText { index }
            | SpecError::QuestionTextTooLong { index, .. }
            | SpecError::FieldType { index, .. }
            | SpecError::NoOptionsNoFreeform { index }
            | SpecError::InvalidFreeformLabel { index }
            | SpecError::TooFewMultiSelectOptions { index, .. }
            | SpecError::TooManyMultiSelectOptions { index, .. }
            | SpecError::OptionNotObject { index, .. }
            | SpecError::OptionMissingValue { index, .. }
            | SpecError::OptionValueNotString { index, .. }
            | SpecError::EmptyOptionValue { index, .. }
            | SpecError::OptionValueTooLong { index, .. }
            | SpecError::OptionDescriptionNotString { index, .. }
            | SpecError::InvalidKey { index, .. }
            | SpecError::DuplicateKey { index, .. }
            | SpecError::GeneratedKeyConflict { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// True for filesystem/stream failures, as opposed to format or validation problems
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            SpecError::FileNotFound { .. } | SpecError::Read { .. } | SpecError::EmptyInput
        )
    }

    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        crate::EXIT_ERROR
    }
}

/// Errors raised by a [`Prompter`](crate::interaction::Prompter) that are not cancellation
#[derive(Error, Debug)]
pub enum PromptError {
    /// No interactive terminal is available
    #[error("interactive prompts require a terminal (TTY)")]
    NonTty,

    /// The terminal failed while prompting
    #[error("terminal I/O error: {0}")]
    Io(String),

    /// The prompt was given input it cannot render
    #[error("invalid prompt input: {0}")]
    InvalidInput(String),
}

/// Convenience alias for prompt results
pub type PromptResult<T> = Result<T, PromptError>;
