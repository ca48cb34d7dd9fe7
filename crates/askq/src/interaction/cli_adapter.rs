//! Terminal prompter built on dialoguer
//!
//! `DialoguerPrompter` implements [`Prompter`] for interactive terminals. It
//! draws on stderr by default, or on an explicit terminal device when stdin
//! or stderr is not interactive (for example when the spec itself is piped in).
//!
//! Keys are always read by console itself: from stdin when it is a terminal,
//! otherwise from the controlling terminal. A device only redirects drawing.
//!
//! dialoguer treats both Esc and `q` as quit in menus, so either key cancels
//! the run.

use std::fmt::Write as FmtWrite;
#[cfg(unix)]
use std::fs::OpenOptions;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use console::{Style, Term};
use dialoguer::theme::Theme;
use dialoguer::{Input, MultiSelect, Select};
use tracing::{debug, warn};

use askq_core::{Choice, MenuEntry, PromptError, PromptResult, Prompter};

/// Hint shown next to menu prompts
const SELECT_HINT: &str = "(Esc or q to cancel)";

/// Hint shown next to checkbox prompts
const MULTI_SELECT_HINT: &str = "(Space to select, Enter to confirm, Esc or q to cancel)";

/// Global flag to track if Ctrl+C was pressed
static CANCELLED: AtomicBool = AtomicBool::new(false);

/// Check if cancellation was requested
fn is_cancelled() -> bool {
    CANCELLED.load(Ordering::SeqCst)
}

/// Set up the global Ctrl+C handler
pub fn setup_ctrl_c_handler() {
    static HANDLER_SET: AtomicBool = AtomicBool::new(false);

    if HANDLER_SET.swap(true, Ordering::SeqCst) {
        return;
    }

    if let Err(e) = ctrlc::set_handler(move || {
        CANCELLED.store(true, Ordering::SeqCst);
    }) {
        warn!("could not set Ctrl+C handler: {}", e);
    }
}

/// Controlling-terminal device
#[cfg(unix)]
pub const DEFAULT_TTY_DEVICE: &str = "/dev/tty";

/// Theme with a `›` pointer and dimmed option descriptions
struct AskTheme {
    prompt_style: Style,
    active_style: Style,
    inactive_style: Style,
    description_style: Style,
    hint_style: Style,
}

impl AskTheme {
    fn new() -> Self {
        Self {
            prompt_style: Style::new().bold(),
            active_style: Style::new().magenta().bold(),
            inactive_style: Style::new(),
            description_style: Style::new().color256(245),
            hint_style: Style::new().dim(),
        }
    }

    fn qmark(&self) -> console::StyledObject<&'static str> {
        self.active_style.apply_to("?")
    }

    /// Write a menu label: the value line styled, the description lines dimmed
    fn write_label(
        &self,
        f: &mut dyn FmtWrite,
        text: &str,
        value_style: &Style,
    ) -> std::fmt::Result {
        let mut lines = text.lines();
        write!(f, "{}", value_style.apply_to(lines.next().unwrap_or_default()))?;
        for line in lines {
            write!(f, "\n{}", self.description_style.apply_to(line))?;
        }
        Ok(())
    }
}

/// First line of a menu label, i.e. the option value
fn label_value(label: &str) -> &str {
    label.lines().next().unwrap_or_default()
}

impl Theme for AskTheme {
    fn format_prompt(&self, f: &mut dyn FmtWrite, prompt: &str) -> std::fmt::Result {
        write!(f, "{} {}", self.qmark(), self.prompt_style.apply_to(prompt))
    }

    fn format_input_prompt(
        &self,
        f: &mut dyn FmtWrite,
        prompt: &str,
        default: Option<&str>,
    ) -> std::fmt::Result {
        write!(f, "{} {}", self.qmark(), self.prompt_style.apply_to(prompt))?;
        if let Some(d) = default {
            write!(f, " {}", self.hint_style.apply_to(format!("({})", d)))?;
        }
        write!(f, " ")
    }

    fn format_input_prompt_selection(
        &self,
        f: &mut dyn FmtWrite,
        prompt: &str,
        sel: &str,
    ) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.qmark(),
            self.prompt_style.apply_to(prompt),
            self.active_style.apply_to(sel)
        )
    }

    fn format_select_prompt(&self, f: &mut dyn FmtWrite, prompt: &str) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.qmark(),
            self.prompt_style.apply_to(prompt),
            self.hint_style.apply_to(SELECT_HINT)
        )
    }

    fn format_select_prompt_selection(
        &self,
        f: &mut dyn FmtWrite,
        prompt: &str,
        sel: &str,
    ) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.qmark(),
            self.prompt_style.apply_to(prompt),
            self.active_style.apply_to(label_value(sel))
        )
    }

    fn format_select_prompt_item(
        &self,
        f: &mut dyn FmtWrite,
        text: &str,
        active: bool,
    ) -> std::fmt::Result {
        if active {
            write!(f, "{} ", self.active_style.apply_to("›"))?;
            self.write_label(f, text, &self.active_style)
        } else {
            write!(f, "  ")?;
            self.write_label(f, text, &self.inactive_style)
        }
    }

    fn format_multi_select_prompt(&self, f: &mut dyn FmtWrite, prompt: &str) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.qmark(),
            self.prompt_style.apply_to(prompt),
            self.hint_style.apply_to(MULTI_SELECT_HINT)
        )
    }

    fn format_multi_select_prompt_selection(
        &self,
        f: &mut dyn FmtWrite,
        prompt: &str,
        selections: &[&str],
    ) -> std::fmt::Result {
        let values: Vec<&str> = selections.iter().map(|s| label_value(s)).collect();
        write!(
            f,
            "{} {} {}",
            self.qmark(),
            self.prompt_style.apply_to(prompt),
            self.active_style.apply_to(values.join(", "))
        )
    }

    fn format_multi_select_prompt_item(
        &self,
        f: &mut dyn FmtWrite,
        text: &str,
        checked: bool,
        active: bool,
    ) -> std::fmt::Result {
        let checkbox = if checked { "●" } else { "○" };
        let pointer = if active { "›" } else { " " };
        let style = if active {
            &self.active_style
        } else {
            &self.inactive_style
        };
        write!(
            f,
            "{} {} ",
            self.active_style.apply_to(pointer),
            style.apply_to(checkbox)
        )?;
        self.write_label(f, text, style)
    }
}

/// dialoguer-backed prompter
pub struct DialoguerPrompter {
    term: Term,
    theme: AskTheme,
}

impl DialoguerPrompter {
    /// Prompt on stderr
    pub fn new() -> Self {
        setup_ctrl_c_handler();
        Self {
            term: Term::stderr(),
            theme: AskTheme::new(),
        }
    }

    /// Draw prompts on a terminal device such as `/dev/tty`
    ///
    /// The device is opened for writing only. Key input does not go through
    /// the `Term` reader, so stdin is handed over as a placeholder.
    #[cfg(unix)]
    pub fn on_device(path: &str) -> io::Result<Self> {
        let output = OpenOptions::new().write(true).open(path)?;
        setup_ctrl_c_handler();
        debug!(device = path, "drawing prompts on terminal device");
        Ok(Self {
            term: Term::read_write_pair(io::stdin(), output),
            theme: AskTheme::new(),
        })
    }

    fn require_tty(&self) -> PromptResult<()> {
        if self.term.is_term() {
            Ok(())
        } else {
            Err(PromptError::NonTty)
        }
    }

    fn require_choices(choices: &[Choice]) -> PromptResult<()> {
        if choices.is_empty() {
            Err(PromptError::InvalidInput(
                "choices cannot be empty".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    /// Map a dialoguer result; interrupts and end of input mean cancellation
    fn finish<T>(&self, result: dialoguer::Result<Option<T>>) -> PromptResult<Option<T>> {
        match result {
            Ok(Some(value)) if !is_cancelled() => Ok(Some(value)),
            Ok(_) => {
                self.restore_cursor();
                Ok(None)
            }
            Err(dialoguer::Error::IO(e))
                if matches!(
                    e.kind(),
                    io::ErrorKind::Interrupted | io::ErrorKind::UnexpectedEof
                ) =>
            {
                debug!(error = %e, "prompt interrupted");
                self.restore_cursor();
                Ok(None)
            }
            Err(e) => {
                self.restore_cursor();
                Err(PromptError::Io(e.to_string()))
            }
        }
    }

    fn restore_cursor(&self) {
        let _ = self.term.show_cursor();
    }

    fn labels(choices: &[Choice]) -> Vec<&str> {
        choices.iter().map(|c| c.label.as_str()).collect()
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn ask_text(&self, message: &str) -> PromptResult<Option<String>> {
        self.require_tty()?;
        if is_cancelled() {
            return Ok(None);
        }

        let result = Input::<String>::with_theme(&self.theme)
            .with_prompt(message)
            .allow_empty(true)
            .interact_text_on(&self.term)
            .map(Some);
        self.finish(result)
    }

    fn ask_select(&self, message: &str, choices: &[Choice]) -> PromptResult<Option<MenuEntry>> {
        self.require_tty()?;
        Self::require_choices(choices)?;
        if is_cancelled() {
            return Ok(None);
        }

        let result = Select::with_theme(&self.theme)
            .with_prompt(message)
            .items(&Self::labels(choices))
            .default(0)
            .interact_on_opt(&self.term);
        Ok(self
            .finish(result)?
            .map(|index| choices[index].entry.clone()))
    }

    fn ask_multi_select(
        &self,
        message: &str,
        choices: &[Choice],
    ) -> PromptResult<Option<Vec<MenuEntry>>> {
        self.require_tty()?;
        Self::require_choices(choices)?;
        if is_cancelled() {
            return Ok(None);
        }

        let result = MultiSelect::with_theme(&self.theme)
            .with_prompt(message)
            .items(&Self::labels(choices))
            .interact_on_opt(&self.term);
        Ok(self.finish(result)?.map(|indices| {
            indices
                .into_iter()
                .map(|index| choices[index].entry.clone())
                .collect()
        }))
    }
}
