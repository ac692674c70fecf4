#![allow(clippy::missing_safety_doc)]
#![allow(non_snake_case)]

//! Bindings for the `testlib` native shared library with runtime loading.
//!
//! The library is opened with `libloading` on first use and its C exports
//! are wrapped by proxy types that own the native handles:
//!
//! - [`VectorD`]: a native `std::vector<double>` with `Linalg` helpers
//! - [`InterfaceObject`]: an `InterfaceClass` implementation chosen by class id
//! - [`SampleObject`]: the non-polymorphic `SampleClass` counter
//!
//! Each proxy releases its handle exactly once, when it is dropped.
//!
//! # Initialization
//!
//! ```ignore
//! use testlib_ffi::{testlib_init, VectorD};
//!
//! // Explicit path; otherwise TESTLIB_LIBRARY or the platform file name is used
//! testlib_init("/usr/local/lib/libtestlib.so")?;
//!
//! let v = VectorD::from_slice(&[3.0, 4.0])?;
//! assert_eq!(v.norm(), 5.0);
//! ```

// Low-level FFI layer
pub mod sys;

// Error handling
mod error;
pub use error::{Error, Result};

// Utility functions
mod util;
pub use util::{string_from_cstr, to_cstring};

mod handle;
pub use handle::{OwnedHandle, ReleaseFn};

// Proxy types
mod interface;
mod sample;
mod vector;

pub use interface::{InterfaceObject, IMPLEMENTATION_A, IMPLEMENTATION_B};
pub use sample::SampleObject;
pub use vector::{VectorD, DEFAULT_VECTOR_NAME};

// Initialization API
mod init;
pub use init::{
    ensure_testlib_init, testlib_init, testlib_init_with, testlib_is_initialized,
    testlib_library_path, LIBRARY_ENV, LIBRARY_NAME,
};
