//! Spec validation and key resolution
//!
//! Validation walks the decoded document once, in a fixed order, and stops at
//! the first problem. Keys are resolved in the same pass: every question
//! claims either its explicit key or its positional default `question_<index>`
//! in one shared set, so a collision is reported at the position of the
//! question that arrives second.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::SpecError;
use crate::types::{
    DEFAULT_FREEFORM_LABEL, KEY_PATTERN, MAX_MULTISELECT_OPTIONS, MAX_OPTION_LENGTH,
    MAX_QUESTION_LENGTH, MAX_QUESTIONS, MIN_MULTISELECT_OPTIONS, Question, QuestionOption,
};

static KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(KEY_PATTERN).expect("key pattern is a valid regex"));

/// Check whether a string can be used as an output key
pub fn is_valid_key(key: &str) -> bool {
    KEY_REGEX.is_match(key)
}

/// Validate a decoded spec document into questions
///
/// Returns one question per entry of the `questions` array, in order. An
/// empty array yields an empty list; see [`load_questions`] for the stricter
/// entry point used before prompting.
pub fn validate_spec(doc: &Value) -> Result<Vec<Question>, SpecError> {
    let spec = doc.as_object().ok_or(SpecError::NotAnObject)?;
    let questions_data = spec.get("questions").ok_or(SpecError::MissingQuestions)?;
    let questions_data = questions_data
        .as_array()
        .ok_or(SpecError::QuestionsNotList)?;

    if questions_data.len() > MAX_QUESTIONS {
        return Err(SpecError::TooManyQuestions { max: MAX_QUESTIONS });
    }

    let mut keys = KeyResolver::new();
    let mut questions = Vec::with_capacity(questions_data.len());

    for (index, entry) in questions_data.iter().enumerate() {
        let question = validate_question(index, entry, &mut keys)?;
        questions.push(question);
    }

    debug!(count = questions.len(), "spec validated");
    Ok(questions)
}

/// Validate a spec and require at least one question
pub fn load_questions(doc: &Value) -> Result<Vec<Question>, SpecError> {
    let questions = validate_spec(doc)?;
    if questions.is_empty() {
        return Err(SpecError::NoQuestions);
    }
    Ok(questions)
}

/// Tracks every key claimed so far, explicit or generated
struct KeyResolver {
    seen: HashSet<String>,
}

impl KeyResolver {
    fn new() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }

    fn claim_explicit(&mut self, index: usize, key: &str) -> Result<(), SpecError> {
        if !self.seen.insert(key.to_string()) {
            return Err(SpecError::DuplicateKey {
                index,
                key: key.to_string(),
            });
        }
        Ok(())
    }

    fn reserve_default(&mut self, index: usize) -> Result<(), SpecError> {
        let key = Question::default_key(index);
        if self.seen.contains(&key) {
            return Err(SpecError::GeneratedKeyConflict { index, key });
        }
        self.seen.insert(key);
        Ok(())
    }
}

fn validate_question(
    index: usize,
    entry: &Value,
    keys: &mut KeyResolver,
) -> Result<Question, SpecError> {
    let fields = entry
        .as_object()
        .ok_or(SpecError::QuestionNotObject { index })?;

    let text = validate_text(index, fields)?;
    let options = validate_options(index, fields)?;

    let allow_freeform = match fields.get("allow_freeform") {
        Some(value) => value.as_bool().ok_or(SpecError::FieldType {
            index,
            field: "allow_freeform",
            expected: "boolean",
        })?,
        None => options.is_empty(),
    };
    if !allow_freeform && options.is_empty() {
        return Err(SpecError::NoOptionsNoFreeform { index });
    }

    let freeform_label = match fields.get("freeform_label") {
        Some(value) => {
            let label = value
                .as_str()
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .ok_or(SpecError::InvalidFreeformLabel { index })?;
            label.to_string()
        }
        None => DEFAULT_FREEFORM_LABEL.to_string(),
    };

    let multi_select = match fields.get("multi_select") {
        Some(value) => value.as_bool().ok_or(SpecError::FieldType {
            index,
            field: "multi_select",
            expected: "boolean",
        })?,
        None => false,
    };
    if multi_select {
        if options.len() < MIN_MULTISELECT_OPTIONS {
            return Err(SpecError::TooFewMultiSelectOptions {
                index,
                min: MIN_MULTISELECT_OPTIONS,
            });
        }
        if options.len() > MAX_MULTISELECT_OPTIONS {
            return Err(SpecError::TooManyMultiSelectOptions {
                index,
                max: MAX_MULTISELECT_OPTIONS,
            });
        }
    }

    // A `null` key is treated like an absent one.
    let key = match fields.get("key") {
        Some(Value::Null) | None => None,
        Some(value) => {
            let key = value.as_str().ok_or(SpecError::FieldType {
                index,
                field: "key",
                expected: "string",
            })?;
            if !is_valid_key(key) {
                return Err(SpecError::InvalidKey {
                    index,
                    key: key.to_string(),
                });
            }
            Some(key.to_string())
        }
    };
    match &key {
        Some(key) => keys.claim_explicit(index, key)?,
        None => keys.reserve_default(index)?,
    }

    Ok(Question {
        text,
        options,
        allow_freeform,
        freeform_label,
        multi_select,
        key,
    })
}

fn validate_text(index: usize, fields: &Map<String, Value>) -> Result<String, SpecError> {
    let text = fields
        .get("question")
        .ok_or(SpecError::MissingQuestionText { index })?
        .as_str()
        .ok_or(SpecError::QuestionTextNotString { index })?
        .trim();

    if text.is_empty() {
        return Err(SpecError::EmptyQuestionText { index });
    }
    if text.chars().count() > MAX_QUESTION_LENGTH {
        return Err(SpecError::QuestionTextTooLong {
            index,
            max: MAX_QUESTION_LENGTH,
        });
    }
    Ok(text.to_string())
}

fn validate_options(
    index: usize,
    fields: &Map<String, Value>,
) -> Result<Vec<QuestionOption>, SpecError> {
    let options_data = match fields.get("options") {
        Some(value) => value.as_array().ok_or(SpecError::FieldType {
            index,
            field: "options",
            expected: "list",
        })?,
        None => return Ok(Vec::new()),
    };

    options_data
        .iter()
        .enumerate()
        .map(|(option, entry)| validate_option(index, option, entry))
        .collect()
}

fn validate_option(index: usize, option: usize, entry: &Value) -> Result<QuestionOption, SpecError> {
    let fields = entry
        .as_object()
        .ok_or(SpecError::OptionNotObject { index, option })?;

    let value = fields
        .get("value")
        .ok_or(SpecError::OptionMissingValue { index, option })?
        .as_str()
        .ok_or(SpecError::OptionValueNotString { index, option })?
        .trim();

    if value.is_empty() {
        return Err(SpecError::EmptyOptionValue { index, option });
    }
    if value.chars().count() > MAX_OPTION_LENGTH {
        return Err(SpecError::OptionValueTooLong {
            index,
            option,
            max: MAX_OPTION_LENGTH,
        });
    }

    let description = match fields.get("description") {
        Some(value) => value
            .as_str()
            .ok_or(SpecError::OptionDescriptionNotString { index, option })?
            .to_string(),
        None => String::new(),
    };

    Ok(QuestionOption {
        value: value.to_string(),
        description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(count: usize) -> Value {
        Value::Array(
            (0..count)
                .map(|i| json!({ "value": format!("Option {}", i) }))
                .collect(),
        )
    }

    #[test]
    fn test_minimal_select() {
        let doc = json!({"questions":[{"question":"Pick?","options":[{"value":"A"},{"value":"B"}]}]});
        let questions = validate_spec(&doc).unwrap();
        assert_eq!(questions.len(), 1);
        let q = &questions[0];
        assert_eq!(q.text, "Pick?");
        assert!(!q.allow_freeform);
        assert!(!q.multi_select);
        assert_eq!(q.key, None);
        assert_eq!(q.resolved_key(0), "question_0");
        assert_eq!(q.freeform_label, DEFAULT_FREEFORM_LABEL);
    }

    #[test]
    fn test_top_level_errors() {
        assert!(matches!(validate_spec(&json!([])), Err(SpecError::NotAnObject)));
        assert!(matches!(validate_spec(&json!({})), Err(SpecError::MissingQuestions)));
        assert!(matches!(
            validate_spec(&json!({"questions": "nope"})),
            Err(SpecError::QuestionsNotList)
        ));
    }

    #[test]
    fn test_too_many_questions() {
        let many: Vec<Value> = (0..=MAX_QUESTIONS).map(|_| json!({"question": "Q"})).collect();
        let err = validate_spec(&json!({ "questions": many })).unwrap_err();
        assert_eq!(err.to_string(), "Too many questions (max 100)");

        let max: Vec<Value> = (0..MAX_QUESTIONS).map(|_| json!({"question": "Q"})).collect();
        assert_eq!(validate_spec(&json!({ "questions": max })).unwrap().len(), MAX_QUESTIONS);
    }

    #[test]
    fn test_question_text_rules() {
        let err = validate_spec(&json!({"questions":[{"options":[]}]})).unwrap_err();
        assert!(matches!(err, SpecError::MissingQuestionText { index: 0 }));

        let err = validate_spec(&json!({"questions":[{"question": 5}]})).unwrap_err();
        assert!(matches!(err, SpecError::QuestionTextNotString { index: 0 }));

        let err = validate_spec(&json!({"questions":[{"question":"ok"},{"question":"   "}]})).unwrap_err();
        assert!(matches!(err, SpecError::EmptyQuestionText { index: 1 }));

        let long = "x".repeat(MAX_QUESTION_LENGTH + 1);
        let err = validate_spec(&json!({"questions":[{"question": long}]})).unwrap_err();
        assert!(matches!(err, SpecError::QuestionTextTooLong { index: 0, .. }));

        let padded = format!("  {}  ", "x".repeat(MAX_QUESTION_LENGTH));
        let questions = validate_spec(&json!({"questions":[{"question": padded}]})).unwrap();
        assert_eq!(questions[0].text.len(), MAX_QUESTION_LENGTH);
    }

    #[test]
    fn test_length_counts_characters() {
        let text = "é".repeat(MAX_QUESTION_LENGTH);
        assert!(validate_spec(&json!({"questions":[{"question": text}]})).is_ok());
    }

    #[test]
    fn test_question_not_object() {
        let err = validate_spec(&json!({"questions":["Pick?"]})).unwrap_err();
        assert!(matches!(err, SpecError::QuestionNotObject { index: 0 }));
    }

    #[test]
    fn test_option_rules() {
        let err = validate_spec(&json!({"questions":[{"question":"Q","options":"A"}]})).unwrap_err();
        assert_eq!(err.to_string(), "'options' must be a list in question 0");

        let err = validate_spec(&json!({"questions":[{"question":"Q","options":["A"]}]})).unwrap_err();
        assert!(matches!(err, SpecError::OptionNotObject { index: 0, option: 0 }));

        let err = validate_spec(&json!({"questions":[{"question":"Q","options":[{"value":"A"},{"description":"x"}]}]}))
            .unwrap_err();
        assert!(matches!(err, SpecError::OptionMissingValue { index: 0, option: 1 }));

        let err = validate_spec(&json!({"questions":[{"question":"Q","options":[{"value":1}]}]})).unwrap_err();
        assert!(matches!(err, SpecError::OptionValueNotString { .. }));

        let err = validate_spec(&json!({"questions":[{"question":"Q","options":[{"value":"  "}]}]})).unwrap_err();
        assert!(matches!(err, SpecError::EmptyOptionValue { .. }));

        let long = "v".repeat(MAX_OPTION_LENGTH + 1);
        let err = validate_spec(&json!({"questions":[{"question":"Q","options":[{"value": long}]}]})).unwrap_err();
        assert!(matches!(err, SpecError::OptionValueTooLong { .. }));

        let err = validate_spec(&json!({"questions":[{"question":"Q","options":[{"value":"A","description":3}]}]}))
            .unwrap_err();
        assert!(matches!(err, SpecError::OptionDescriptionNotString { .. }));
    }

    #[test]
    fn test_option_value_trimmed_description_kept() {
        let doc = json!({"questions":[{"question":"Q","options":[{"value":"  A  ","description":" d "}]}]});
        let q = &validate_spec(&doc).unwrap()[0];
        assert_eq!(q.options[0].value, "A");
        assert_eq!(q.options[0].description, " d ");
    }

    #[test]
    fn test_allow_freeform_defaults() {
        let doc = json!({"questions":[
            {"question":"Notes?"},
            {"question":"Notes?","options":[]},
            {"question":"Pick","options":[{"value":"A"}]},
            {"question":"Pick","options":[{"value":"A"}],"allow_freeform":true}
        ]});
        let questions = validate_spec(&doc).unwrap();
        assert!(questions[0].allow_freeform);
        assert!(questions[0].is_freeform_only());
        assert!(questions[1].allow_freeform);
        assert!(!questions[2].allow_freeform);
        assert!(questions[3].allow_freeform);
        assert!(!questions[3].is_freeform_only());
    }

    #[test]
    fn test_allow_freeform_must_be_boolean() {
        let err = validate_spec(&json!({"questions":[{"question":"Q","allow_freeform":"yes"}]})).unwrap_err();
        assert_eq!(err.to_string(), "'allow_freeform' must be a boolean in question 0");
    }

    #[test]
    fn test_no_options_and_freeform_disabled() {
        let err = validate_spec(&json!({"questions":[{"question":"Q","options":[],"allow_freeform":false}]}))
            .unwrap_err();
        assert!(matches!(err, SpecError::NoOptionsNoFreeform { index: 0 }));
        assert!(err.to_string().contains("no options and allow_freeform is false"));
    }

    #[test]
    fn test_freeform_label() {
        let doc = json!({"questions":[{"question":"Q","options":[{"value":"A"}],"allow_freeform":true,"freeform_label":"  Other  "}]});
        assert_eq!(validate_spec(&doc).unwrap()[0].freeform_label, "Other");

        for bad in [json!(""), json!("   "), json!(3), json!(null)] {
            let doc = json!({"questions":[{"question":"Q","freeform_label": bad}]});
            let err = validate_spec(&doc).unwrap_err();
            assert!(matches!(err, SpecError::InvalidFreeformLabel { index: 0 }));
        }
    }

    #[test]
    fn test_multi_select_bounds() {
        let ok_min = json!({"questions":[{"question":"Q","options": options(2),"multi_select":true}]});
        assert!(validate_spec(&ok_min).unwrap()[0].multi_select);

        let ok_max = json!({"questions":[{"question":"Q","options": options(15),"multi_select":true}]});
        assert_eq!(validate_spec(&ok_max).unwrap()[0].options.len(), 15);

        let too_few = json!({"questions":[{"question":"Q","options": options(1),"multi_select":true}]});
        let err = validate_spec(&too_few).unwrap_err();
        assert_eq!(err.to_string(), "'multi_select' requires at least 2 options in question 0");

        let too_many = json!({"questions":[{"question":"Q","options": options(16),"multi_select":true}]});
        let err = validate_spec(&too_many).unwrap_err();
        assert_eq!(err.to_string(), "'multi_select' allows at most 15 options in question 0");

        let freeform_only = json!({"questions":[{"question":"Q","multi_select":true}]});
        assert!(matches!(
            validate_spec(&freeform_only),
            Err(SpecError::TooFewMultiSelectOptions { .. })
        ));
    }

    #[test]
    fn test_multi_select_must_be_boolean() {
        let doc = json!({"questions":[{"question":"Q","options": options(3),"multi_select":"true"}]});
        assert!(matches!(
            validate_spec(&doc),
            Err(SpecError::FieldType { field: "multi_select", .. })
        ));
    }

    #[test]
    fn test_key_format() {
        for key in ["a", "_a", "A1", "snake_case_key", "_"] {
            assert!(is_valid_key(key), "{} should be valid", key);
        }
        for key in ["1abc", "has space", "dash-key", "dot.key", "", "ünicode"] {
            assert!(!is_valid_key(key), "{} should be invalid", key);
        }

        let err = validate_spec(&json!({"questions":[{"question":"Q","key":"1abc"}]})).unwrap_err();
        assert!(matches!(err, SpecError::InvalidKey { index: 0, .. }));

        let err = validate_spec(&json!({"questions":[{"question":"Q","key":7}]})).unwrap_err();
        assert_eq!(err.to_string(), "'key' must be a string in question 0");
    }

    #[test]
    fn test_duplicate_explicit_keys() {
        let doc = json!({"questions":[
            {"question":"One","key":"same"},
            {"question":"Two","key":"same"}
        ]});
        let err = validate_spec(&doc).unwrap_err();
        assert!(matches!(err, SpecError::DuplicateKey { index: 1, .. }));
    }

    #[test]
    fn test_explicit_key_matching_earlier_default() {
        let doc = json!({"questions":[
            {"question":"One"},
            {"question":"Two","key":"question_0"}
        ]});
        let err = validate_spec(&doc).unwrap_err();
        assert!(matches!(err, SpecError::DuplicateKey { index: 1, .. }));
    }

    #[test]
    fn test_explicit_key_matching_later_default() {
        let doc = json!({"questions":[
            {"question":"One","key":"question_1"},
            {"question":"Two"}
        ]});
        let err = validate_spec(&doc).unwrap_err();
        match err {
            SpecError::GeneratedKeyConflict { index, key } => {
                assert_eq!(index, 1);
                assert_eq!(key, "question_1");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_explicit_key_matching_own_default_is_allowed() {
        let doc = json!({"questions":[
            {"question":"One","key":"question_0"},
            {"question":"Two"}
        ]});
        let questions = validate_spec(&doc).unwrap();
        assert_eq!(questions[0].resolved_key(0), "question_0");
        assert_eq!(questions[1].resolved_key(1), "question_1");
    }

    #[test]
    fn test_first_error_wins() {
        // Question 0 fails on its text before question 1's key is examined.
        let doc = json!({"questions":[
            {"question":""},
            {"question":"Two","key":"bad key"}
        ]});
        assert!(matches!(
            validate_spec(&doc),
            Err(SpecError::EmptyQuestionText { index: 0 })
        ));

        // Options are checked before allow_freeform within one question.
        let doc = json!({"questions":[{"question":"Q","options":[{}],"allow_freeform":"x"}]});
        assert!(matches!(
            validate_spec(&doc),
            Err(SpecError::OptionMissingValue { .. })
        ));
    }

    #[test]
    fn test_empty_question_list() {
        let doc = json!({"questions": []});
        assert!(validate_spec(&doc).unwrap().is_empty());
        assert!(matches!(load_questions(&doc), Err(SpecError::NoQuestions)));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let doc = json!({"questions":[
            {"question":"Pick","options":[{"value":"A","description":"first"},{"value":"B"}],"allow_freeform":true,"key":"pick"},
            {"question":"Many","options": options(4),"multi_select":true}
        ]});
        assert_eq!(validate_spec(&doc).unwrap(), validate_spec(&doc).unwrap());
    }
}
