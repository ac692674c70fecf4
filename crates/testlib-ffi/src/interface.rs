//! Proxy for the native polymorphic `InterfaceClass`.
//!
//! Concrete implementations live in the native library and are selected by a
//! class identifier passed to its factory export.

use std::fmt;

use crate::error::{Error, Result};
use crate::handle::OwnedHandle;
use crate::init::ensure_testlib_init;
use crate::sys;
use crate::util::{string_from_cstr, to_cstring};

/// Class identifier of the first native implementation.
pub const IMPLEMENTATION_A: &str = "ImplementationA";

/// Class identifier of the second native implementation.
pub const IMPLEMENTATION_B: &str = "ImplementationB";

/// An `InterfaceClass` instance owned through an opaque handle.
pub struct InterfaceObject {
    handle: OwnedHandle,
}

impl InterfaceObject {
    /// Instantiate the native implementation registered under `class_id`.
    ///
    /// The factory returns null for identifiers it does not know, which is
    /// reported as `Error::UnknownClass`.
    pub fn factory(class_id: &str) -> Result<Self> {
        ensure_testlib_init()?;
        let id = to_cstring(class_id)?;
        let ptr = unsafe { sys::teslib_InterfaceClass_factory(id.as_ptr()) };
        match unsafe { Self::from_raw(ptr) } {
            Err(Error::NullHandle(_)) => Err(Error::UnknownClass(class_id.to_string())),
            other => other,
        }
    }

    /// Instantiate `ImplementationA`.
    pub fn make_a() -> Result<Self> {
        Self::factory(IMPLEMENTATION_A)
    }

    /// Instantiate `ImplementationB`.
    pub fn make_b() -> Result<Self> {
        Self::factory(IMPLEMENTATION_B)
    }

    /// Take ownership of a pointer returned by the interface factory.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a live `InterfaceClass*` that nothing else will delete.
    ///
    /// # Panics
    ///
    /// Dropping the result panics if no function table is installed.
    pub unsafe fn from_raw(ptr: sys::hInterfaceClass) -> Result<Self> {
        let handle = OwnedHandle::new(ptr, sys::testlib_InterfaceClass_delete, "InterfaceClass")?;
        Ok(Self { handle })
    }

    /// The implementation's class identifier, e.g. `"ImplementationA"`.
    pub fn class_id(&self) -> Result<String> {
        unsafe { string_from_cstr(sys::testlib_InterfaceClass_getID(self.handle.as_ptr())) }
    }

    pub fn name(&self) -> Result<String> {
        unsafe { string_from_cstr(sys::testlib_InterfaceClass_getName(self.handle.as_ptr())) }
    }

    /// Replace the instance name. The native object keeps its own copy.
    pub fn set_name(&mut self, name: &str) -> Result<()> {
        let name = to_cstring(name)?;
        unsafe { sys::testlib_InterfaceClass_setName(self.handle.as_ptr(), name.as_ptr()) };
        Ok(())
    }

    pub fn as_raw(&self) -> sys::hInterfaceClass {
        self.handle.as_ptr()
    }
}

/// Shown by `Display` in place of a string the library returned as null or non-UTF-8.
const INVALID_TEXT: &str = "<invalid>";

impl fmt::Display for InterfaceObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let class_id = self.class_id().unwrap_or_else(|_| INVALID_TEXT.to_string());
        let name = self.name().unwrap_or_else(|_| INVALID_TEXT.to_string());
        write!(f, "CInterfaceClass ; type = {class_id} - name =  {name}")
    }
}

impl fmt::Debug for InterfaceObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterfaceObject")
            .field("class_id", &self.class_id().ok())
            .field("name", &self.name().ok())
            .field("handle", &self.handle)
            .finish()
    }
}
