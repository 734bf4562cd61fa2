//! Stable exit codes for the maze walker binary.

/// The maze was solved and the path printed.
pub const SOLVED: i32 = 0;
/// Bad input, bad flags, or an I/O failure.
pub const ERROR: i32 = 1;
/// The walker proved the goal unreachable.
pub const UNREACHABLE: i32 = 2;
