//! testlib function loading.
//!
//! The native library is opened at runtime with `libloading` and every export
//! is resolved once into a [`Functions`] table. A table can also be installed
//! directly, for hosts that link a copy of testlib statically.

#![allow(non_snake_case)]

use std::sync::{Mutex, OnceLock};

use libloading::{Library, Symbol};

use super::types::*;
use crate::error::{Error, Result};

/// Library state holder
struct LibState {
    _lib: Option<Library>,
    source: String,
    funcs: Functions,
}

// SAFETY: Functions contain only function pointers which are Send + Sync
unsafe impl Send for LibState {}
unsafe impl Sync for LibState {}

static LIB: OnceLock<LibState> = OnceLock::new();
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Load testlib from the given path.
pub fn load_library(path: &str) -> Result<()> {
    install(path, || {
        let lib = unsafe { Library::new(path) }.map_err(|source| Error::LibraryLoad {
            path: path.to_string(),
            source,
        })?;
        let funcs = unsafe { Functions::load(&lib)? };
        Ok((Some(lib), funcs))
    })
}

/// Install an already resolved function table under the given source label.
pub fn install_functions(source: &str, funcs: Functions) -> Result<()> {
    install(source, || Ok((None, funcs)))
}

fn install<F>(source: &str, make: F) -> Result<()>
where
    F: FnOnce() -> Result<(Option<Library>, Functions)>,
{
    // Fast path: already initialized
    if let Some(state) = LIB.get() {
        return check_source(state, source);
    }

    // A poisoned lock only means another initializer panicked; LIB is still consistent.
    let _guard = INIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());

    // Double-check after acquiring lock
    if let Some(state) = LIB.get() {
        return check_source(state, source);
    }

    let (lib, funcs) = make()?;
    let state = LibState {
        _lib: lib,
        source: source.to_string(),
        funcs,
    };

    // This should succeed since we hold the lock and checked above
    let _ = LIB.set(state);

    Ok(())
}

fn check_source(state: &LibState, source: &str) -> Result<()> {
    if state.source == source {
        Ok(())
    } else {
        Err(Error::AlreadyInitialized(state.source.clone()))
    }
}

/// Check if the library is initialized.
pub fn is_initialized() -> bool {
    LIB.get().is_some()
}

/// Get the path (or source label) the function table came from.
pub fn library_path() -> Option<String> {
    LIB.get().map(|s| s.source.clone())
}

/// Get the function table (panics if not initialized).
fn funcs() -> &'static Functions {
    &LIB.get()
        .expect("testlib not initialized - call testlib_init() first")
        .funcs
}

/// testlib function pointers
#[derive(Clone, Copy)]
pub struct Functions {
    // std::vector<double> and the Linalg namespace
    pub testlib_vectorD_make0: unsafe extern "C" fn(size_t, c_double) -> hVectorD,
    pub testlib_vectorD_make1: unsafe extern "C" fn(size_t, *const c_double) -> hVectorD,
    pub testlib_vectorD_set: unsafe extern "C" fn(hVectorD, size_t, c_double),
    pub testlib_vectorD_Linalg_norm: unsafe extern "C" fn(hVectorD) -> c_double,
    pub testlib_vectorD_Linalg_printVector: unsafe extern "C" fn(*const c_char, hVectorD),
    pub testlib_vectorD_delete: unsafe extern "C" fn(hVectorD),

    // SampleClass
    pub testlib_SampleClass_make0: unsafe extern "C" fn() -> hSampleClass,
    pub testlib_SampleClass_make1: unsafe extern "C" fn(*const c_char) -> hSampleClass,
    pub testlib_SampleClass_get: unsafe extern "C" fn(hSampleClass) -> c_int,
    pub testlib_SampleClass_set: unsafe extern "C" fn(hSampleClass, c_int),
    pub testlib_SampleClass_getName: unsafe extern "C" fn(hSampleClass) -> *const c_char,
    pub testlib_SampleClass_delete: unsafe extern "C" fn(hSampleClass),

    // InterfaceClass (the factory export is spelled `teslib_` in the library)
    pub teslib_InterfaceClass_factory: unsafe extern "C" fn(*const c_char) -> hInterfaceClass,
    pub testlib_InterfaceClass_getID: unsafe extern "C" fn(hInterfaceClass) -> *const c_char,
    pub testlib_InterfaceClass_getName: unsafe extern "C" fn(hInterfaceClass) -> *const c_char,
    pub testlib_InterfaceClass_setName: unsafe extern "C" fn(hInterfaceClass, *const c_char),
    pub testlib_InterfaceClass_delete: unsafe extern "C" fn(hInterfaceClass),
}

impl Functions {
    /// Resolve every testlib export from an opened library.
    ///
    /// # Safety
    ///
    /// `lib` must be a build of testlib whose exports match the signatures
    /// declared on [`Functions`].
    pub unsafe fn load(lib: &Library) -> Result<Self> {
        macro_rules! load_func {
            ($lib:expr, $name:ident) => {
                load_symbol($lib, stringify!($name))?
            };
        }

        Ok(Self {
            testlib_vectorD_make0: load_func!(lib, testlib_vectorD_make0),
            testlib_vectorD_make1: load_func!(lib, testlib_vectorD_make1),
            testlib_vectorD_set: load_func!(lib, testlib_vectorD_set),
            testlib_vectorD_Linalg_norm: load_func!(lib, testlib_vectorD_Linalg_norm),
            testlib_vectorD_Linalg_printVector: load_func!(lib, testlib_vectorD_Linalg_printVector),
            testlib_vectorD_delete: load_func!(lib, testlib_vectorD_delete),

            testlib_SampleClass_make0: load_func!(lib, testlib_SampleClass_make0),
            testlib_SampleClass_make1: load_func!(lib, testlib_SampleClass_make1),
            testlib_SampleClass_get: load_func!(lib, testlib_SampleClass_get),
            testlib_SampleClass_set: load_func!(lib, testlib_SampleClass_set),
            testlib_SampleClass_getName: load_func!(lib, testlib_SampleClass_getName),
            testlib_SampleClass_delete: load_func!(lib, testlib_SampleClass_delete),

            teslib_InterfaceClass_factory: load_func!(lib, teslib_InterfaceClass_factory),
            testlib_InterfaceClass_getID: load_func!(lib, testlib_InterfaceClass_getID),
            testlib_InterfaceClass_getName: load_func!(lib, testlib_InterfaceClass_getName),
            testlib_InterfaceClass_setName: load_func!(lib, testlib_InterfaceClass_setName),
            testlib_InterfaceClass_delete: load_func!(lib, testlib_InterfaceClass_delete),
        })
    }
}

unsafe fn load_symbol<T: Copy>(lib: &Library, symbol: &'static str) -> Result<T> {
    let sym: Symbol<T> = lib
        .get(symbol.as_bytes())
        .map_err(|source| Error::MissingSymbol { symbol, source })?;
    Ok(*sym)
}

// Wrapper functions that forward to the installed table.
//
// Each one panics if no table has been installed (see `testlib_init`).

/// # Panics
///
/// If no function table has been installed.
pub unsafe fn testlib_vectorD_make0(n: size_t, x: c_double) -> hVectorD {
    (funcs().testlib_vectorD_make0)(n, x)
}

/// # Panics
///
/// If no function table has been installed.
pub unsafe fn testlib_vectorD_make1(n: size_t, array: *const c_double) -> hVectorD {
    (funcs().testlib_vectorD_make1)(n, array)
}

/// # Panics
///
/// If no function table has been installed.
pub unsafe fn testlib_vectorD_set(hv: hVectorD, n: size_t, x: c_double) {
    (funcs().testlib_vectorD_set)(hv, n, x)
}

/// # Panics
///
/// If no function table has been installed.
pub unsafe fn testlib_vectorD_Linalg_norm(hv: hVectorD) -> c_double {
    (funcs().testlib_vectorD_Linalg_norm)(hv)
}

/// # Panics
///
/// If no function table has been installed.
pub unsafe fn testlib_vectorD_Linalg_printVector(name: *const c_char, hv: hVectorD) {
    (funcs().testlib_vectorD_Linalg_printVector)(name, hv)
}

/// # Panics
///
/// If no function table has been installed.
pub unsafe fn testlib_vectorD_delete(hv: hVectorD) {
    (funcs().testlib_vectorD_delete)(hv)
}

/// # Panics
///
/// If no function table has been installed.
pub unsafe fn testlib_SampleClass_make0() -> hSampleClass {
    (funcs().testlib_SampleClass_make0)()
}

/// # Panics
///
/// If no function table has been installed.
pub unsafe fn testlib_SampleClass_make1(name: *const c_char) -> hSampleClass {
    (funcs().testlib_SampleClass_make1)(name)
}

/// # Panics
///
/// If no function table has been installed.
pub unsafe fn testlib_SampleClass_get(hnd: hSampleClass) -> c_int {
    (funcs().testlib_SampleClass_get)(hnd)
}

/// # Panics
///
/// If no function table has been installed.
pub unsafe fn testlib_SampleClass_set(hnd: hSampleClass, n: c_int) {
    (funcs().testlib_SampleClass_set)(hnd, n)
}

/// # Panics
///
/// If no function table has been installed.
pub unsafe fn testlib_SampleClass_getName(hnd: hSampleClass) -> *const c_char {
    (funcs().testlib_SampleClass_getName)(hnd)
}

/// # Panics
///
/// If no function table has been installed.
pub unsafe fn testlib_SampleClass_delete(hnd: hSampleClass) {
    (funcs().testlib_SampleClass_delete)(hnd)
}

/// # Panics
///
/// If no function table has been installed.
pub unsafe fn teslib_InterfaceClass_factory(class_id: *const c_char) -> hInterfaceClass {
    (funcs().teslib_InterfaceClass_factory)(class_id)
}

/// # Panics
///
/// If no function table has been installed.
pub unsafe fn testlib_InterfaceClass_getID(hinst: hInterfaceClass) -> *const c_char {
    (funcs().testlib_InterfaceClass_getID)(hinst)
}

/// # Panics
///
/// If no function table has been installed.
pub unsafe fn testlib_InterfaceClass_getName(hinst: hInterfaceClass) -> *const c_char {
    (funcs().testlib_InterfaceClass_getName)(hinst)
}

/// # Panics
///
/// If no function table has been installed.
pub unsafe fn testlib_InterfaceClass_setName(hinst: hInterfaceClass, name: *const c_char) {
    (funcs().testlib_InterfaceClass_setName)(hinst, name)
}

/// # Panics
///
/// If no function table has been installed.
pub unsafe fn testlib_InterfaceClass_delete(hinst: hInterfaceClass) {
    (funcs().testlib_InterfaceClass_delete)(hinst)
}
