//! Sequential questionnaire orchestration
//!
//! Questions are asked one at a time through a [`Prompter`]. Each question
//! takes one of three paths:
//! - freeform only: a text prompt, no menu
//! - single select: a menu, followed by a text prompt if the freeform entry is picked
//! - multi select: a checkbox menu, followed by one text prompt per freeform entry picked
//!
//! A cancellation at any prompt ends the run. Answers gathered up to that
//! point are returned with `cancelled` set.

use tracing::debug;

use crate::error::PromptResult;
use crate::interaction::Prompter;
use crate::types::{AnswerValue, Answers, AskOutcome, MenuEntry, Question};

/// Follow-up prompt after picking the freeform entry of a single-select menu
pub const FREEFORM_ANSWER_PROMPT: &str = "Enter your answer:";

/// Follow-up prompt for each freeform entry picked in a multi-select menu
pub const FREEFORM_CUSTOM_VALUE_PROMPT: &str = "Enter your custom value:";

/// Ask every question in order and collect the answers
pub fn ask_questions(questions: &[Question], prompter: &dyn Prompter) -> PromptResult<AskOutcome> {
    let mut answers = Answers::new();

    for (index, question) in questions.iter().enumerate() {
        let key = question.resolved_key(index);
        debug!(index, key = %key, "asking question");

        let answer = if question.is_freeform_only() {
            prompter.ask_text(&question.text)?.map(AnswerValue::Single)
        } else if question.multi_select {
            ask_multi_select(question, prompter)?.map(AnswerValue::Multi)
        } else {
            ask_single_select(question, prompter)?.map(AnswerValue::Single)
        };

        match answer {
            Some(value) => answers.insert(key, value),
            None => {
                debug!(index, answered = answers.len(), "questionnaire cancelled");
                return Ok(AskOutcome {
                    answers,
                    cancelled: true,
                });
            }
        }
    }

    debug!(answered = answers.len(), "questionnaire complete");
    Ok(AskOutcome {
        answers,
        cancelled: false,
    })
}

fn ask_single_select(question: &Question, prompter: &dyn Prompter) -> PromptResult<Option<String>> {
    let choices = question.choices();
    match prompter.ask_select(&question.text, &choices)? {
        Some(MenuEntry::Option(value)) => Ok(Some(value)),
        Some(MenuEntry::Freeform) => prompter.ask_text(FREEFORM_ANSWER_PROMPT),
        None => Ok(None),
    }
}

fn ask_multi_select(
    question: &Question,
    prompter: &dyn Prompter,
) -> PromptResult<Option<Vec<String>>> {
    let choices = question.choices();
    let Some(selected) = prompter.ask_multi_select(&question.text, &choices)? else {
        return Ok(None);
    };

    let mut values = Vec::with_capacity(selected.len());
    for entry in selected {
        match entry {
            MenuEntry::Option(value) => values.push(value),
            MenuEntry::Freeform => match prompter.ask_text(FREEFORM_CUSTOM_VALUE_PROMPT)? {
                Some(text) if !text.is_empty() => values.push(text),
                Some(_) => {}
                None => return Ok(None),
            },
        }
    }
    Ok(Some(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PromptError;
    use crate::types::{Choice, DEFAULT_FREEFORM_LABEL, QuestionOption};
    use std::cell::RefCell;
    use std::collections::VecDeque;

    enum Reply {
        Text(Option<&'static str>),
        Select(Option<MenuEntry>),
        Multi(Option<Vec<MenuEntry>>),
        Fail,
    }

    struct Scripted {
        replies: RefCell<VecDeque<Reply>>,
        calls: RefCell<Vec<String>>,
    }

    impl Scripted {
        fn new(replies: Vec<Reply>) -> Self {
            Self {
                replies: RefCell::new(replies.into()),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn next(&self, call: String) -> Reply {
            self.calls.borrow_mut().push(call);
            self.replies
                .borrow_mut()
                .pop_front()
                .expect("prompter called more times than scripted")
        }
    }

    impl Prompter for Scripted {
        fn ask_text(&self, message: &str) -> PromptResult<Option<String>> {
            match self.next(format!("text:{}", message)) {
                Reply::Text(text) => Ok(text.map(str::to_string)),
                Reply::Fail => Err(PromptError::Io("boom".to_string())),
                _ => panic!("expected a text reply"),
            }
        }

        fn ask_select(&self, message: &str, _choices: &[Choice]) -> PromptResult<Option<MenuEntry>> {
            match self.next(format!("select:{}", message)) {
                Reply::Select(entry) => Ok(entry),
                _ => panic!("expected a select reply"),
            }
        }

        fn ask_multi_select(
            &self,
            message: &str,
            _choices: &[Choice],
        ) -> PromptResult<Option<Vec<MenuEntry>>> {
            match self.next(format!("multi:{}", message)) {
                Reply::Multi(entries) => Ok(entries),
                _ => panic!("expected a multi-select reply"),
            }
        }
    }

    fn question(text: &str, values: &[&str], allow_freeform: bool, multi_select: bool) -> Question {
        Question {
            text: text.to_string(),
            options: values
                .iter()
                .map(|v| QuestionOption {
                    value: v.to_string(),
                    description: String::new(),
                })
                .collect(),
            allow_freeform,
            freeform_label: DEFAULT_FREEFORM_LABEL.to_string(),
            multi_select,
            key: None,
        }
    }

    fn opt(value: &str) -> MenuEntry {
        MenuEntry::Option(value.to_string())
    }

    #[test]
    fn test_freeform_only_never_shows_menu() {
        let questions = vec![question("Notes?", &[], true, false)];
        let prompter = Scripted::new(vec![Reply::Text(Some("none"))]);
        let outcome = ask_questions(&questions, &prompter).unwrap();
        assert!(!outcome.cancelled);
        assert_eq!(
            outcome.answers.get("question_0"),
            Some(&AnswerValue::Single("none".to_string()))
        );
        assert_eq!(*prompter.calls.borrow(), vec!["text:Notes?".to_string()]);
    }

    #[test]
    fn test_single_select_option() {
        let mut q = question("Pick?", &["A", "B"], false, false);
        q.key = Some("pick".to_string());
        let prompter = Scripted::new(vec![Reply::Select(Some(opt("B")))]);
        let outcome = ask_questions(&[q], &prompter).unwrap();
        assert_eq!(outcome.answers.get("pick"), Some(&AnswerValue::Single("B".to_string())));
    }

    #[test]
    fn test_single_select_freeform_accepts_empty_text() {
        let questions = vec![question("Pick?", &["A"], true, false)];
        let prompter = Scripted::new(vec![
            Reply::Select(Some(MenuEntry::Freeform)),
            Reply::Text(Some("")),
        ]);
        let outcome = ask_questions(&questions, &prompter).unwrap();
        assert!(!outcome.cancelled);
        assert_eq!(
            outcome.answers.get("question_0"),
            Some(&AnswerValue::Single(String::new()))
        );
        assert_eq!(prompter.calls.borrow()[1], format!("text:{}", FREEFORM_ANSWER_PROMPT));
    }

    #[test]
    fn test_multi_select_with_freeform() {
        let questions = vec![question("Which?", &["optA", "optB", "optC"], true, true)];
        let prompter = Scripted::new(vec![
            Reply::Multi(Some(vec![opt("optA"), opt("optB"), MenuEntry::Freeform])),
            Reply::Text(Some("hello")),
        ]);
        let outcome = ask_questions(&questions, &prompter).unwrap();
        assert_eq!(
            outcome.answers.get("question_0"),
            Some(&AnswerValue::Multi(vec![
                "optA".to_string(),
                "optB".to_string(),
                "hello".to_string()
            ]))
        );
    }

    #[test]
    fn test_multi_select_drops_empty_freeform() {
        let questions = vec![question("Which?", &["a", "b"], true, true)];
        let prompter = Scripted::new(vec![
            Reply::Multi(Some(vec![MenuEntry::Freeform, opt("b")])),
            Reply::Text(Some("")),
        ]);
        let outcome = ask_questions(&questions, &prompter).unwrap();
        assert_eq!(
            outcome.answers.get("question_0"),
            Some(&AnswerValue::Multi(vec!["b".to_string()]))
        );
    }

    #[test]
    fn test_multi_select_empty_selection() {
        let questions = vec![question("Which?", &["a", "b"], false, true)];
        let prompter = Scripted::new(vec![Reply::Multi(Some(vec![]))]);
        let outcome = ask_questions(&questions, &prompter).unwrap();
        assert_eq!(outcome.answers.get("question_0"), Some(&AnswerValue::Multi(vec![])));
    }

    #[test]
    fn test_cancellation_keeps_partial_answers() {
        let questions = vec![
            question("First?", &["a", "b"], false, false),
            question("Second?", &[], true, false),
            question("Third?", &["x", "y"], false, false),
        ];
        let prompter = Scripted::new(vec![Reply::Select(Some(opt("a"))), Reply::Text(None)]);
        let outcome = ask_questions(&questions, &prompter).unwrap();
        assert!(outcome.cancelled);
        assert_eq!(outcome.answers.len(), 1);
        assert_eq!(outcome.answers.get("question_0"), Some(&AnswerValue::Single("a".to_string())));
        assert_eq!(prompter.calls.borrow().len(), 2);
    }

    #[test]
    fn test_cancellation_in_freeform_follow_up() {
        let questions = vec![question("Which?", &["a", "b"], true, true)];
        let prompter = Scripted::new(vec![
            Reply::Multi(Some(vec![opt("a"), MenuEntry::Freeform])),
            Reply::Text(None),
        ]);
        let outcome = ask_questions(&questions, &prompter).unwrap();
        assert!(outcome.cancelled);
        assert!(outcome.answers.is_empty());
    }

    #[test]
    fn test_prompt_failure_is_an_error() {
        let questions = vec![question("Notes?", &[], true, false)];
        let prompter = Scripted::new(vec![Reply::Fail]);
        assert!(matches!(
            ask_questions(&questions, &prompter),
            Err(PromptError::Io(_))
        ));
    }
}
