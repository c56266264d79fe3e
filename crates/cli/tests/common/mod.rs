//! Shared test utilities for flatconf CLI integration tests.
//!
//! Invariants / Assumptions:
//! - Every command built here ignores the host's `.env` file.
//! - Variables used by the tests are cleared before each run.

use assert_cmd::Command;

/// Returns a hermetic `flatconf` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - Test variables are cleared to ensure no leakage from the host.
pub fn flatconf_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("flatconf");

    cmd.env("DOTENV_DISABLED", "1");
    cmd.env_remove("RUST_LOG")
        .env_remove("PORT")
        .env_remove("APP_PORT")
        .env_remove("ROLES");

    cmd
}
