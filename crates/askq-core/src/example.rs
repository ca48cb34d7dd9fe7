//! Sample specs printed by `askq --example`

use serde_json::{Value, json};

/// Example spec as a JSON value
pub fn example_spec() -> Value {
    json!({
        "questions": [
            {
                "question": "Pick an option",
                "options": [
                    { "value": "Option 1", "description": "A predefined choice" },
                    { "value": "Option 2", "description": "Another predefined choice" }
                ],
                "key": "choice"
            },
            {
                "question": "Pick or type your own",
                "options": [
                    { "value": "A", "description": "Short" },
                    { "value": "B", "description": "Also short" }
                ],
                "allow_freeform": true,
                "freeform_label": "Other (type your own)",
                "key": "choice_or_freeform"
            },
            {
                "question": "Which features do you want?",
                "options": [
                    { "value": "Feature A", "description": "First feature" },
                    { "value": "Feature B", "description": "Second feature" },
                    { "value": "Feature C", "description": "Third feature" }
                ],
                "multi_select": true,
                "allow_freeform": true,
                "freeform_label": "Other (type your own)",
                "key": "features"
            },
            {
                "question": "Any comments?",
                "options": [],
                "key": "comments"
            }
        ]
    })
}

/// Example spec as hand-written YAML, with comments
pub fn example_yaml() -> &'static str {
    r#"questions:
  - question: "Pick an option"
    options:
      - value: "Option 1"
        description: "A predefined choice"
      - value: "Option 2"
        description: "Another predefined choice"
    key: choice
  - question: "Pick or type your own"
    options:
      - value: "A"
        description: "Short"
      - value: "B"
        description: "Also short"
    allow_freeform: true
    freeform_label: "Other (type your own)"
    key: choice_or_freeform
  - question: "Which features do you want?"
    options:
      - value: "Feature A"
        description: "First feature"
      - value: "Feature B"
        description: "Second feature"
      - value: "Feature C"
        description: "Third feature"
    multi_select: true
    allow_freeform: true
    freeform_label: "Other (type your own)"
    key: features
  - question: "Any comments?"
    options: []
    # allow_freeform omitted -> defaults to true when options is empty
    key: comments
"#
}
