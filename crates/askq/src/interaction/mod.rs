//! Terminal interaction module
//!
//! This module provides `DialoguerPrompter`, the dialoguer implementation of
//! the `Prompter` trait from askq-core.

mod cli_adapter;

pub use cli_adapter::DialoguerPrompter;
#[cfg(unix)]
pub use cli_adapter::DEFAULT_TTY_DEVICE;
