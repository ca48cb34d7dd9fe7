//! Interaction contract between the orchestrator and a prompt renderer
//!
//! Every method returns `Ok(None)` when the user cancels (interrupt, escape,
//! or end of input). `Err` is reserved for terminal failures.

use crate::error::PromptResult;
use crate::types::{Choice, MenuEntry};

/// Renders prompts and returns the user's response
pub trait Prompter {
    /// Ask for a line of free text
    fn ask_text(&self, message: &str) -> PromptResult<Option<String>>;

    /// Ask the user to pick exactly one entry
    fn ask_select(&self, message: &str, choices: &[Choice]) -> PromptResult<Option<MenuEntry>>;

    /// Ask the user to check any number of entries
    ///
    /// Selected entries come back in menu order.
    fn ask_multi_select(
        &self,
        message: &str,
        choices: &[Choice],
    ) -> PromptResult<Option<Vec<MenuEntry>>>;
}
