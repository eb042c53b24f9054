//! Exit codes for yojanactl
//!
//! Clarification prompts (no income, unknown scheme) are normal answers and
//! exit with success.

use yojana_shared::YojanaError;

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code when a host turn payload is not valid JSON
pub const EXIT_INVALID_INPUT: i32 = 65;

/// Exit code when the config or a catalog file cannot be loaded
pub const EXIT_CONFIG_ERROR: i32 = 78;

/// Map an error chain to an exit code
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if cause.downcast_ref::<YojanaError>().is_some() {
            return EXIT_CONFIG_ERROR;
        }
        if cause.downcast_ref::<serde_json::Error>().is_some() {
            return EXIT_INVALID_INPUT;
        }
    }
    EXIT_GENERAL_ERROR
}
