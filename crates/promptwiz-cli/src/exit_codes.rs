//! Exit codes for the `promptwiz` binary.
//! These codes are part of the public contract; scripts may branch on them.

pub const SUCCESS: i32 = 0;
pub const SERVICE_ERROR: i32 = 1; // Service reported errors or a non-2xx status
pub const CONFIG_ERROR: i32 = 2; // Bad arguments, query file or API version
pub const TRANSPORT_ERROR: i32 = 3; // Connection failure or timeout
