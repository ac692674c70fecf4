//! testlib library initialization.
//!
//! The library is loaded once per process. Either call [`testlib_init`]
//! explicitly, or let the first proxy constructor load it through
//! [`ensure_testlib_init`], which reads `TESTLIB_LIBRARY` and falls back to
//! the platform file name (`libtestlib.so`, `libtestlib.dylib`, `testlib.dll`).

use std::ffi::OsString;

use crate::error::Result;
use crate::sys::Functions;

/// Environment variable holding the path of the native library.
pub const LIBRARY_ENV: &str = "TESTLIB_LIBRARY";

/// Base name of the native library, without platform prefix or extension.
pub const LIBRARY_NAME: &str = "testlib";

/// Initialize testlib by loading the library from the given path.
///
/// # Returns
///
/// * `Ok(())` if initialization succeeds or already initialized with the same path
/// * `Err(Error::AlreadyInitialized)` if already initialized with a different path
/// * `Err(Error::LibraryLoad)` if the library cannot be loaded
/// * `Err(Error::MissingSymbol)` if an export is missing
///
/// # Example
///
/// ```ignore
/// use testlib_ffi::testlib_init;
///
/// testlib_init("/usr/local/lib/libtestlib.so")?;
/// ```
pub fn testlib_init(library_path: &str) -> Result<()> {
    if crate::sys::is_initialized() {
        return crate::sys::load_library(library_path);
    }
    tracing::info!(path = library_path, "initializing testlib");
    crate::sys::load_library(library_path)?;
    tracing::info!(path = library_path, "testlib initialized");
    Ok(())
}

/// Initialize testlib from an already resolved function table.
///
/// `source` labels the table the way a path labels a loaded library: a
/// second call with the same label is a no-op, a different label fails with
/// `Error::AlreadyInitialized`.
pub fn testlib_init_with(source: &str, functions: Functions) -> Result<()> {
    if !crate::sys::is_initialized() {
        tracing::info!(source, "installing testlib function table");
    }
    crate::sys::install_functions(source, functions)
}

/// Ensure testlib is initialized, loading it from the environment if needed.
pub fn ensure_testlib_init() -> Result<()> {
    if crate::sys::is_initialized() {
        return Ok(());
    }
    let path = default_library_path(std::env::var_os(LIBRARY_ENV));
    testlib_init(&path)
}

/// Resolve the library path from an optional override.
fn default_library_path(from_env: Option<OsString>) -> String {
    match from_env {
        Some(path) if !path.is_empty() => path.to_string_lossy().into_owned(),
        _ => libloading::library_filename(LIBRARY_NAME)
            .to_string_lossy()
            .into_owned(),
    }
}

/// Check if testlib has been initialized.
pub fn testlib_is_initialized() -> bool {
    crate::sys::is_initialized()
}

/// Get the path (or table label) used for initialization, if any.
pub fn testlib_library_path() -> Option<String> {
    crate::sys::library_path()
}
