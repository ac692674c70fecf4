//! Utility functions for string handling.

use std::borrow::Borrow;
use std::ffi::{CStr, CString};

use crate::error::{Error, Result};
use crate::sys::c_char;

/// Convert a zero-terminated string (`const char *`) into an owned `String`.
///
/// Native getters hand out pointers into object-owned storage, so the bytes
/// are copied before any further native call.
///
/// # Safety
///
/// `string` must be null or point to a zero-terminated buffer that stays
/// valid for the duration of this call.
pub unsafe fn string_from_cstr(string: *const c_char) -> Result<String> {
    if string.is_null() {
        return Err(Error::NullString);
    }
    let s = unsafe { CStr::from_ptr(string) }.to_str()?;
    Ok(s.to_owned())
}

/// Convert a `String` or a `&str` into a zero-terminated string (`const char *`).
pub fn to_cstring<S: Borrow<str>>(string: S) -> Result<CString> {
    let string = string.borrow();
    CString::new(string).map_err(|_| Error::InvalidString(format!("null byte in string: {string:?}")))
}
