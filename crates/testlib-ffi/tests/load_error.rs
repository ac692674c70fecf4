//! Loading failures. Kept in its own test binary so no table is installed.

use testlib_ffi::{testlib_init, testlib_is_initialized, testlib_library_path, Error};

#[test]
fn test_init_invalid_path() {
    let result = testlib_init("/nonexistent/path/libtestlib.so");
    match result {
        Err(Error::LibraryLoad { path, .. }) => assert!(path.contains("nonexistent")),
        other => panic!("expected LibraryLoad, got {other:?}"),
    }
    assert!(!testlib_is_initialized());
    assert!(testlib_library_path().is_none());
}

#[test]
#[should_panic(expected = "testlib not initialized")]
fn test_wrapper_without_table_panics() {
    unsafe {
        testlib_ffi::sys::testlib_vectorD_Linalg_norm(std::ptr::null_mut());
    }
}
