//! Process exit codes. Part of the CLI contract.

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ASSET_NOT_FOUND: i32 = 1; // Asset Store package missing from the local cache
pub const EXIT_CONFIG_ERROR: i32 = 2; // Bad config, not a Unity project, I/O failure
