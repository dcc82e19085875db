//! Process exit codes.
//! These codes are part of the public contract; CI pipelines branch on them.

pub const SUCCESS: i32 = 0;
pub const CHECK_FAILED: i32 = 1; // A record failed the threshold gate
pub const INTERNAL_ERROR: i32 = 2; // Unreadable config, unwritable artifact, or an escaped error
