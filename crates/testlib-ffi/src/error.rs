//! Error types for the testlib bindings

use thiserror::Error;

/// Result type for testlib operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or calling into testlib
#[derive(Error, Debug)]
pub enum Error {
    /// The shared library could not be opened
    #[error("Failed to load library {path}: {source}")]
    LibraryLoad {
        path: String,
        #[source]
        source: libloading::Error,
    },

    /// An expected export is absent from the shared library
    #[error("Failed to load symbol {symbol}: {source}")]
    MissingSymbol {
        symbol: &'static str,
        #[source]
        source: libloading::Error,
    },

    /// A different library was already installed in this process
    #[error("testlib already initialized from {0}")]
    AlreadyInitialized(String),

    /// A native constructor returned a null handle
    #[error("Native constructor returned a null {0} handle")]
    NullHandle(&'static str),

    /// The interface factory does not know the requested class identifier
    #[error("Unknown interface class id: {0:?}")]
    UnknownClass(String),

    /// Element index past the end of a vector
    #[error("Index out of bounds: index {index}, length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A host string cannot be passed as a C string
    #[error("Invalid string: {0}")]
    InvalidString(String),

    /// A native function returned a null string pointer
    #[error("Native function returned a null string")]
    NullString,

    /// A native string is not valid UTF-8
    #[error("Native string is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}
