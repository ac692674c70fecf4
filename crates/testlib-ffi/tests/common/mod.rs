//! In-process stand-in for the testlib native library.
//!
//! Implements the exported C functions with `extern "C"` Rust functions and
//! installs them through `testlib_init_with`. Objects are leaked instead of
//! freed so that release counts stay readable after a proxy is dropped.

#![allow(dead_code)]
#![allow(non_snake_case)]

use std::ffi::{c_char, c_double, c_int, c_void, CStr, CString};
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::sync::Mutex;

use testlib_ffi::sys::Functions;
use testlib_ffi::testlib_init_with;

pub const FAKE_SOURCE: &str = "in-process fake testlib";

/// Install the stand-in table (idempotent across tests in one binary).
pub fn install() {
    testlib_init_with(FAKE_SOURCE, functions()).expect("install fake testlib");
}

pub fn functions() -> Functions {
    Functions {
        testlib_vectorD_make0: fake_vectorD_make0,
        testlib_vectorD_make1: fake_vectorD_make1,
        testlib_vectorD_set: fake_vectorD_set,
        testlib_vectorD_Linalg_norm: fake_vectorD_norm,
        testlib_vectorD_Linalg_printVector: fake_vectorD_printVector,
        testlib_vectorD_delete: fake_vectorD_delete,

        testlib_SampleClass_make0: fake_SampleClass_make0,
        testlib_SampleClass_make1: fake_SampleClass_make1,
        testlib_SampleClass_get: fake_SampleClass_get,
        testlib_SampleClass_set: fake_SampleClass_set,
        testlib_SampleClass_getName: fake_SampleClass_getName,
        testlib_SampleClass_delete: fake_SampleClass_delete,

        teslib_InterfaceClass_factory: fake_InterfaceClass_factory,
        testlib_InterfaceClass_getID: fake_InterfaceClass_getID,
        testlib_InterfaceClass_getName: fake_InterfaceClass_getName,
        testlib_InterfaceClass_setName: fake_InterfaceClass_setName,
        testlib_InterfaceClass_delete: fake_InterfaceClass_delete,
    }
}

fn leak<T>(value: T) -> *mut c_void {
    Box::into_raw(Box::new(value)) as *mut c_void
}

// ============================================================================
// std::vector<double>
// ============================================================================

pub struct FakeVector {
    pub data: Mutex<Vec<f64>>,
    pub printed: Mutex<Vec<String>>,
    pub set_calls: AtomicUsize,
    pub releases: AtomicUsize,
}

impl FakeVector {
    fn new(data: Vec<f64>) -> Self {
        Self {
            data: Mutex::new(data),
            printed: Mutex::new(Vec::new()),
            set_calls: AtomicUsize::new(0),
            releases: AtomicUsize::new(0),
        }
    }
}

/// Access the stand-in object behind a vector handle.
///
/// The stand-in never frees, so this stays valid after the proxy is dropped.
pub fn vector(hv: *mut c_void) -> &'static FakeVector {
    unsafe { &*(hv as *const FakeVector) }
}

unsafe extern "C" fn fake_vectorD_make0(n: usize, x: c_double) -> *mut c_void {
    leak(FakeVector::new(vec![x; n]))
}

unsafe extern "C" fn fake_vectorD_make1(n: usize, array: *const c_double) -> *mut c_void {
    let data = if n == 0 {
        Vec::new()
    } else {
        std::slice::from_raw_parts(array, n).to_vec()
    };
    leak(FakeVector::new(data))
}

unsafe extern "C" fn fake_vectorD_set(hv: *mut c_void, n: usize, x: c_double) {
    let v = vector(hv);
    v.set_calls.fetch_add(1, Ordering::SeqCst);
    v.data.lock().unwrap()[n] = x;
}

unsafe extern "C" fn fake_vectorD_norm(hv: *mut c_void) -> c_double {
    vector(hv)
        .data
        .lock()
        .unwrap()
        .iter()
        .map(|x| x * x)
        .sum::<f64>()
        .sqrt()
}

unsafe extern "C" fn fake_vectorD_printVector(name: *const c_char, hv: *mut c_void) {
    let v = vector(hv);
    let name = CStr::from_ptr(name).to_string_lossy();
    let data = v.data.lock().unwrap();
    let body: String = data.iter().map(|x| format!("{x}, ")).collect();
    let line = format!("{name} = [{}]( {body} )", data.len());
    println!("{line}");
    v.printed.lock().unwrap().push(line);
}

unsafe extern "C" fn fake_vectorD_delete(hv: *mut c_void) {
    vector(hv).releases.fetch_add(1, Ordering::SeqCst);
}

// ============================================================================
// SampleClass
// ============================================================================

pub struct FakeSample {
    pub name: CString,
    pub counter: AtomicI32,
    pub name_reads: AtomicUsize,
    pub releases: AtomicUsize,
}

pub fn sample(hnd: *mut c_void) -> &'static FakeSample {
    unsafe { &*(hnd as *const FakeSample) }
}

fn new_sample(name: CString) -> *mut c_void {
    leak(FakeSample {
        name,
        counter: AtomicI32::new(0),
        name_reads: AtomicUsize::new(0),
        releases: AtomicUsize::new(0),
    })
}

unsafe extern "C" fn fake_SampleClass_make0() -> *mut c_void {
    new_sample(CString::new("unnamed").unwrap())
}

unsafe extern "C" fn fake_SampleClass_make1(name: *const c_char) -> *mut c_void {
    new_sample(CStr::from_ptr(name).to_owned())
}

unsafe extern "C" fn fake_SampleClass_get(hnd: *mut c_void) -> c_int {
    sample(hnd).counter.load(Ordering::SeqCst)
}

unsafe extern "C" fn fake_SampleClass_set(hnd: *mut c_void, n: c_int) {
    sample(hnd).counter.store(n, Ordering::SeqCst);
}

unsafe extern "C" fn fake_SampleClass_getName(hnd: *mut c_void) -> *const c_char {
    let s = sample(hnd);
    s.name_reads.fetch_add(1, Ordering::SeqCst);
    s.name.as_ptr()
}

unsafe extern "C" fn fake_SampleClass_delete(hnd: *mut c_void) {
    sample(hnd).releases.fetch_add(1, Ordering::SeqCst);
}

// ============================================================================
// InterfaceClass
// ============================================================================

pub struct FakeInterface {
    pub class_id: &'static [u8],
    pub name: Mutex<CString>,
    pub releases: AtomicUsize,
}

pub fn interface(hinst: *mut c_void) -> &'static FakeInterface {
    unsafe { &*(hinst as *const FakeInterface) }
}

unsafe extern "C" fn fake_InterfaceClass_factory(class_id: *const c_char) -> *mut c_void {
    let (class_id, name): (&'static [u8], &str) = match CStr::from_ptr(class_id).to_bytes() {
        b"ImplementationA" => (&b"ImplementationA\0"[..], "Unammed-A"),
        b"ImplementationB" => (&b"ImplementationB\0"[..], "Unammed-B"),
        // Reports an ID that is not valid UTF-8
        b"ImplementationRaw" => (&b"\xff\xfe\0"[..], "Unammed-Raw"),
        _ => return std::ptr::null_mut(),
    };
    leak(FakeInterface {
        class_id,
        name: Mutex::new(CString::new(name).unwrap()),
        releases: AtomicUsize::new(0),
    })
}

unsafe extern "C" fn fake_InterfaceClass_getID(hinst: *mut c_void) -> *const c_char {
    interface(hinst).class_id.as_ptr().cast()
}

unsafe extern "C" fn fake_InterfaceClass_getName(hinst: *mut c_void) -> *const c_char {
    // The CString's heap buffer outlives the guard; it is only replaced by setName.
    interface(hinst).name.lock().unwrap().as_ptr()
}

unsafe extern "C" fn fake_InterfaceClass_setName(hinst: *mut c_void, name: *const c_char) {
    *interface(hinst).name.lock().unwrap() = CStr::from_ptr(name).to_owned();
}

unsafe extern "C" fn fake_InterfaceClass_delete(hinst: *mut c_void) {
    interface(hinst).releases.fetch_add(1, Ordering::SeqCst);
}
