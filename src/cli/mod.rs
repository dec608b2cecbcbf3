//! Command-line interface: argument parsing, command dispatch, and output.

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

use crate::infrastructure::logging::SecretScrubber;

/// Report a fatal error on stderr and exit with status 1.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    let message = SecretScrubber::new().scrub_message(&format!("{err:#}"));
    if json_mode {
        let body = serde_json::json!({ "success": false, "error": message });
        eprintln!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {message}");
    }
    std::process::exit(1);
}
