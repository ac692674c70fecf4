//! Low-level testlib FFI bindings.
//!
//! Raw handle/scalar types plus one `unsafe fn` per native export. The
//! wrappers forward to the function table installed by [`crate::testlib_init`].

pub mod funcs;
pub mod types;

pub use types::*;

pub use funcs::{install_functions, is_initialized, library_path, load_library, Functions};

pub use funcs::{
    teslib_InterfaceClass_factory, testlib_InterfaceClass_delete, testlib_InterfaceClass_getID,
    testlib_InterfaceClass_getName, testlib_InterfaceClass_setName, testlib_SampleClass_delete,
    testlib_SampleClass_get, testlib_SampleClass_getName, testlib_SampleClass_make0,
    testlib_SampleClass_make1, testlib_SampleClass_set, testlib_vectorD_Linalg_norm,
    testlib_vectorD_Linalg_printVector, testlib_vectorD_delete, testlib_vectorD_make0,
    testlib_vectorD_make1, testlib_vectorD_set,
};
