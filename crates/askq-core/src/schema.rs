//! JSON Schema describing the spec format
//!
//! The schema covers structure and per-field bounds. It cannot express key
//! uniqueness or collisions with generated `question_N` keys; those are only
//! enforced by [`validate_spec`](crate::validator::validate_spec).

use serde_json::{Value, json};

use crate::types::{
    DEFAULT_FREEFORM_LABEL, KEY_PATTERN, MAX_MULTISELECT_OPTIONS, MAX_OPTION_LENGTH,
    MAX_QUESTION_LENGTH, MAX_QUESTIONS, MIN_MULTISELECT_OPTIONS,
};

/// Build the JSON Schema (draft 2020-12) for question specs
pub fn spec_json_schema() -> Value {
    let option_schema = json!({
        "type": "object",
        "required": ["value"],
        "additionalProperties": false,
        "properties": {
            "value": {
                "type": "string",
                "minLength": 1,
                "maxLength": MAX_OPTION_LENGTH
            },
            "description": { "type": "string", "default": "" }
        }
    });

    let question_schema = json!({
        "type": "object",
        "required": ["question"],
        "additionalProperties": false,
        "properties": {
            "question": {
                "type": "string",
                "minLength": 1,
                "maxLength": MAX_QUESTION_LENGTH,
                "description": "Prompt shown to the user."
            },
            "options": {
                "type": "array",
                "default": [],
                "items": option_schema
            },
            "allow_freeform": {
                "type": "boolean",
                "description": "Allow custom text input. Defaults to true when options is empty, false otherwise."
            },
            "freeform_label": {
                "type": "string",
                "default": DEFAULT_FREEFORM_LABEL,
                "minLength": 1
            },
            "multi_select": {
                "type": "boolean",
                "default": false,
                "description": format!(
                    "Enable checkbox-style multi-selection (requires {}-{} options).",
                    MIN_MULTISELECT_OPTIONS, MAX_MULTISELECT_OPTIONS
                )
            },
            "key": {
                "type": "string",
                "pattern": KEY_PATTERN,
                "description": "Output key for this question (must be a valid identifier)."
            }
        },
        "allOf": [
            {
                "if": { "properties": { "allow_freeform": { "const": false } } },
                "then": {
                    "required": ["options"],
                    "properties": { "options": { "type": "array", "minItems": 1 } }
                }
            },
            {
                "if": { "properties": { "multi_select": { "const": true } } },
                "then": {
                    "required": ["options"],
                    "properties": {
                        "options": {
                            "type": "array",
                            "minItems": MIN_MULTISELECT_OPTIONS,
                            "maxItems": MAX_MULTISELECT_OPTIONS
                        }
                    }
                }
            }
        ]
    });

    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "askq spec",
        "type": "object",
        "required": ["questions"],
        "additionalProperties": false,
        "properties": {
            "questions": {
                "type": "array",
                "minItems": 1,
                "maxItems": MAX_QUESTIONS,
                "items": question_schema
            }
        }
    })
}
