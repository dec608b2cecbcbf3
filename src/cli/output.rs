//! Output formatting utilities for the CLI.

use serde::Serialize;

/// A command result that can be printed for people or for scripts.
pub trait CommandOutput: Serialize {
    /// Plain-text rendering for the terminal.
    fn to_human(&self) -> String;
    /// JSON rendering used with `--json`.
    fn to_json(&self) -> serde_json::Value;
}

/// Print `result` on stdout, as pretty JSON when `json_mode` is set.
pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result.to_json()).unwrap_or_default());
    } else {
        println!("{}", result.to_human());
    }
}
