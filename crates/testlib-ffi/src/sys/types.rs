//! Basic type definitions used by the testlib C interface.

#![allow(non_camel_case_types)]

pub use std::os::raw::{c_char, c_double, c_int, c_void};

pub type size_t = usize;

/// Handle (opaque pointer) for a native `std::vector<double>`
pub type hVectorD = *mut c_void;

/// Handle for a native `SampleClass` instance
pub type hSampleClass = *mut c_void;

/// Pointer to a native `InterfaceClass` implementation
pub type hInterfaceClass = *mut c_void;
