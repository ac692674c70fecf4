//! Proxy for the native non-polymorphic `SampleClass`.

use std::fmt;

use crate::error::Result;
use crate::handle::OwnedHandle;
use crate::init::ensure_testlib_init;
use crate::sys;
use crate::util::{string_from_cstr, to_cstring};

/// A named counter object owned through an opaque handle.
pub struct SampleObject {
    handle: OwnedHandle,
}

impl SampleObject {
    /// Create an instance with the native default name (`"unnamed"`).
    pub fn new() -> Result<Self> {
        ensure_testlib_init()?;
        let ptr = unsafe { sys::testlib_SampleClass_make0() };
        unsafe { Self::from_raw(ptr) }
    }

    pub fn with_name(name: &str) -> Result<Self> {
        ensure_testlib_init()?;
        let name = to_cstring(name)?;
        let ptr = unsafe { sys::testlib_SampleClass_make1(name.as_ptr()) };
        unsafe { Self::from_raw(ptr) }
    }

    /// # Safety
    ///
    /// `ptr` must be null or a live `hSampleClass` that nothing else will delete.
    ///
    /// # Panics
    ///
    /// Dropping the result panics if no function table is installed.
    pub unsafe fn from_raw(ptr: sys::hSampleClass) -> Result<Self> {
        let handle = OwnedHandle::new(ptr, sys::testlib_SampleClass_delete, "SampleClass")?;
        Ok(Self { handle })
    }

    /// Current counter value.
    pub fn get(&self) -> i32 {
        unsafe { sys::testlib_SampleClass_get(self.handle.as_ptr()) }
    }

    pub fn set(&mut self, n: i32) {
        unsafe { sys::testlib_SampleClass_set(self.handle.as_ptr(), n) }
    }

    /// The instance name, as reported by `testlib_SampleClass_getName`.
    ///
    /// # Safety
    ///
    /// The native export returns `c_str()` of a `std::string` it returns by
    /// value, so the pointer it hands back already refers to freed storage in
    /// the shipped testlib build. Only call this against a build of the
    /// library whose `getName` returns storage owned by the instance.
    pub unsafe fn name(&self) -> Result<String> {
        unsafe { string_from_cstr(sys::testlib_SampleClass_getName(self.handle.as_ptr())) }
    }

    pub fn as_raw(&self) -> sys::hSampleClass {
        self.handle.as_ptr()
    }
}

impl fmt::Debug for SampleObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SampleObject")
            .field("counter", &self.get())
            .field("handle", &self.handle)
            .finish()
    }
}
