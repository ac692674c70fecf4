//! Owned handle to a native testlib object.

use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::error::{Error, Result};
use crate::sys::c_void;

/// Native destructor for a handle kind.
pub type ReleaseFn = unsafe fn(*mut c_void);

/// An opaque pointer owned by this process, released exactly once on drop.
///
/// The handle is neither `Clone` nor `Send`/`Sync`: the native objects have
/// no copy or thread-safety contract.
pub struct OwnedHandle {
    ptr: NonNull<c_void>,
    release: ReleaseFn,
    kind: &'static str,
    _not_send: PhantomData<*mut c_void>,
}

impl OwnedHandle {
    /// Take ownership of a pointer returned by a native constructor.
    ///
    /// A null pointer is rejected and `release` is never called for it.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a live object that `release` destroys, and no
    /// other owner may release it.
    pub unsafe fn new(ptr: *mut c_void, release: ReleaseFn, kind: &'static str) -> Result<Self> {
        let ptr = NonNull::new(ptr).ok_or(Error::NullHandle(kind))?;
        tracing::debug!(kind, handle = ?ptr, "native handle acquired");
        Ok(Self {
            ptr,
            release,
            kind,
            _not_send: PhantomData,
        })
    }

    /// The raw pointer, for forwarding calls. Ownership stays with `self`.
    pub fn as_ptr(&self) -> *mut c_void {
        self.ptr.as_ptr()
    }

    /// The kind label given at construction (e.g. `"VectorD"`).
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl fmt::Debug for OwnedHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} {:p}>", self.kind, self.ptr)
    }
}

impl Drop for OwnedHandle {
    fn drop(&mut self) {
        tracing::trace!(kind = self.kind, handle = ?self.ptr, "native handle disposed");
        unsafe { (self.release)(self.ptr.as_ptr()) };
    }
}
