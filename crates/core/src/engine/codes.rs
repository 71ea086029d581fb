//! Engine status codes.
//!
//! These values are part of the engine contract and match libplist's
//! `plist_err_t`. Changing one silently degrades classification to
//! [`crate::PlistError::Unknown`].

/// Raw status code returned by an engine call.
pub type RawCode = i32;

pub const SUCCESS: RawCode = 0;
pub const INVALID_ARG: RawCode = -1;
pub const FORMAT: RawCode = -2;
pub const PARSE: RawCode = -3;
pub const NO_MEM: RawCode = -4;
pub const IO: RawCode = -5;
pub const UNKNOWN: RawCode = -255;
