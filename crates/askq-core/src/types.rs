//! Core data types for askq

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Label shown for the freeform menu entry when a spec does not set one
pub const DEFAULT_FREEFORM_LABEL: &str = "Type something.";

/// Maximum length of question text, in characters, after trimming
pub const MAX_QUESTION_LENGTH: usize = 500;
/// Maximum length of an option value, in characters, after trimming
pub const MAX_OPTION_LENGTH: usize = 200;
/// Maximum number of questions in one spec
pub const MAX_QUESTIONS: usize = 100;
/// Fewest options a multi-select question may offer
pub const MIN_MULTISELECT_OPTIONS: usize = 2;
/// Most options a multi-select question may offer
pub const MAX_MULTISELECT_OPTIONS: usize = 15;

/// Pattern every explicit key must match
pub const KEY_PATTERN: &str = r"^[a-zA-Z_][a-zA-Z0-9_]*$";

/// An answer option for a question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOption {
    /// Value returned when the option is picked (trimmed, non-empty)
    pub value: String,
    /// Secondary line shown under the value
    pub description: String,
}

/// A validated question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Prompt text (trimmed, non-empty)
    pub text: String,
    /// Options in spec order
    pub options: Vec<QuestionOption>,
    /// Whether a typed answer is accepted
    pub allow_freeform: bool,
    /// Menu label of the freeform entry (trimmed)
    pub freeform_label: String,
    /// Checkbox-style selection of several options
    pub multi_select: bool,
    /// Author-supplied output key; `None` means `question_<index>` at ask-time
    pub key: Option<String>,
}

impl Question {
    /// Positional key used when a question has no explicit key
    pub fn default_key(index: usize) -> String {
        format!("question_{}", index)
    }

    /// Output key for this question when asked at `index`
    pub fn resolved_key(&self, index: usize) -> String {
        match &self.key {
            Some(key) => key.clone(),
            None => Self::default_key(index),
        }
    }

    /// True when the question is answered by typing only, without a menu
    pub fn is_freeform_only(&self) -> bool {
        self.options.is_empty() && self.allow_freeform
    }

    /// Menu entries in display order: options first, then the freeform entry if allowed
    pub fn choices(&self) -> Vec<Choice> {
        let mut choices: Vec<Choice> = self
            .options
            .iter()
            .map(|option| {
                let description = option.description.trim();
                let label = if description.is_empty() {
                    option.value.clone()
                } else {
                    format!("{}\n    {}", option.value, description)
                };
                Choice {
                    label,
                    entry: MenuEntry::Option(option.value.clone()),
                }
            })
            .collect();

        if self.allow_freeform {
            choices.push(Choice {
                label: self.freeform_label.clone(),
                entry: MenuEntry::Freeform,
            });
        }

        choices
    }
}

/// What a menu entry stands for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    /// A real option; carries the option value
    Option(String),
    /// The "type your own" entry
    Freeform,
}

/// A selectable menu entry with its display label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Text shown in the menu (may span two lines)
    pub label: String,
    /// Value handed back when selected
    pub entry: MenuEntry,
}

/// The answer to one question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerValue {
    /// Single-select or freeform answer
    Single(String),
    /// Multi-select answer in selection order
    Multi(Vec<String>),
}

impl Serialize for AnswerValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AnswerValue::Single(value) => serializer.serialize_str(value),
            AnswerValue::Multi(values) => values.serialize(serializer),
        }
    }
}

/// Answers keyed by resolved key, in the order the questions were asked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    entries: Vec<(String, AnswerValue)>,
}

impl Answers {
    /// Create an empty answer set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer; an existing key is overwritten in place
    pub fn insert(&mut self, key: String, value: AnswerValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up the answer for a key
    pub fn get(&self, key: &str) -> Option<&AnswerValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    /// Number of answered questions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been answered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate answers in question order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Serialize for Answers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Result of running a questionnaire
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AskOutcome {
    /// Answers collected, possibly partial
    pub answers: Answers,
    /// The user cancelled before every question was answered
    pub cancelled: bool,
}
