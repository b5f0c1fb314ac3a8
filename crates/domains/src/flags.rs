//! # Account flags
//!
//! Capability/role flags packed into a single integer column.
//! Pure functions, no wrapper type: set via OR, clear via AND-NOT,
//! test via AND-equality.

pub const ADMIN: i64 = 1 << 0;
pub const MODERATOR: i64 = 1 << 1;
pub const VERIFIED: i64 = 1 << 2;
/// The account every new signup auto-follows.
pub const OFFICIAL: i64 = 1 << 3;

/// Returns `flags` with `flag` set.
pub fn set(flags: i64, flag: i64) -> i64 {
    flags | flag
}

/// Returns `flags` with `flag` cleared.
pub fn clear(flags: i64, flag: i64) -> i64 {
    flags & !flag
}

/// True when every bit of `flag` is present in `flags`.
pub fn has(flags: i64, flag: i64) -> bool {
    flags & flag == flag
}
