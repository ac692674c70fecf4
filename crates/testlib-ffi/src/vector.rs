//! Proxy for the native `std::vector<double>` and its `Linalg` helpers.

use std::fmt;

use crate::error::{Error, Result};
use crate::handle::OwnedHandle;
use crate::init::ensure_testlib_init;
use crate::sys;
use crate::util::to_cstring;

/// Label used by [`VectorD::disp`] until [`VectorD::set_name`] is called.
pub const DEFAULT_VECTOR_NAME: &str = "std::vector<double> vx";

/// A native vector of `f64` owned through an opaque handle.
///
/// The element count is fixed at construction; the native side never
/// resizes it through this interface.
pub struct VectorD {
    handle: OwnedHandle,
    name: String,
    len: usize,
}

impl VectorD {
    /// Create a vector of `size` elements, all equal to `x`.
    pub fn from_value(size: usize, x: f64) -> Result<Self> {
        ensure_testlib_init()?;
        let ptr = unsafe { sys::testlib_vectorD_make0(size, x) };
        unsafe { Self::from_raw(ptr, size) }
    }

    /// Create a vector holding a copy of `values`.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        ensure_testlib_init()?;
        let ptr = unsafe { sys::testlib_vectorD_make1(values.len(), values.as_ptr()) };
        unsafe { Self::from_raw(ptr, values.len()) }
    }

    /// Take ownership of a handle returned by a testlib vector constructor.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a live `hVectorD` of exactly `len` elements that
    /// nothing else will delete.
    ///
    /// # Panics
    ///
    /// Dropping the result panics if no function table is installed.
    pub unsafe fn from_raw(ptr: sys::hVectorD, len: usize) -> Result<Self> {
        let handle = OwnedHandle::new(ptr, sys::testlib_vectorD_delete, "VectorD")?;
        Ok(Self {
            handle,
            name: DEFAULT_VECTOR_NAME.to_string(),
            len,
        })
    }

    /// Set element `idx` to `x`.
    pub fn set(&mut self, idx: usize, x: f64) -> Result<()> {
        if idx >= self.len {
            return Err(Error::IndexOutOfBounds {
                index: idx,
                len: self.len,
            });
        }
        unsafe { sys::testlib_vectorD_set(self.handle.as_ptr(), idx, x) };
        Ok(())
    }

    /// Euclidean norm, computed by the native library.
    pub fn norm(&self) -> f64 {
        unsafe { sys::testlib_vectorD_Linalg_norm(self.handle.as_ptr()) }
    }

    /// Print the vector to the native library's stdout as `<name> = [n]( x, ... )`.
    pub fn disp(&self) -> Result<()> {
        let name = to_cstring(self.name.as_str())?;
        unsafe { sys::testlib_vectorD_Linalg_printVector(name.as_ptr(), self.handle.as_ptr()) };
        Ok(())
    }

    /// Change the display label. Host-side only; nothing crosses the boundary.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The underlying handle. Ownership stays with `self`.
    pub fn as_raw(&self) -> sys::hVectorD {
        self.handle.as_ptr()
    }
}

impl fmt::Debug for VectorD {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorD")
            .field("name", &self.name)
            .field("len", &self.len)
            .field("handle", &self.handle)
            .finish()
    }
}
