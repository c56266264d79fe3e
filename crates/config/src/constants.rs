//! Centralized constants for the flatconf workspace.
//!
//! This module contains the defaults a freshly created store starts from,
//! so the CLI and the library agree on them.

// =============================================================================
// Store Defaults
// =============================================================================

/// Delimiter joining the segments of a dotted key.
pub const DEFAULT_KEY_DELIMITER: &str = ".";

/// Config name derived from [`DEFAULT_CONFIG_FILE`].
pub const DEFAULT_CONFIG_NAME: &str = "config";

/// Config file looked up (relative to the working directory) when no path is set.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Permission bits applied to config files created by the store.
pub const DEFAULT_FILE_PERMISSIONS: u32 = 0o644;

/// Mask keeping only the permission bits of a file mode.
pub const PERMISSION_BITS_MASK: u32 = 0o777;

// =============================================================================
// Environment
// =============================================================================

/// Setting this variable to `true` or `1` disables `.env` loading.
pub const DOTENV_DISABLED_VAR: &str = "DOTENV_DISABLED";
