//! AML data objects and evaluation error types.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// A data object produced or consumed by AML method evaluation.
///
/// Firmware is free to return any of these for any method, so nothing about
/// the shape of a result is trusted. Use the `as_*` accessors, which return
/// `None` on a type mismatch, to walk a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmlObject {
    /// An integer (Zero, One, Ones, ByteConst ... QWordConst). AML has no
    /// boolean type; firmware booleans arrive as integers.
    Integer(u64),
    /// A string object.
    String(String),
    /// A raw byte buffer.
    Buffer(Vec<u8>),
    /// An ordered package of nested objects.
    Package(Vec<AmlObject>),
}

impl AmlObject {
    /// Returns an empty package, the `Arg3` placeholder of a `_DSM` call.
    #[must_use]
    pub const fn empty_package() -> Self {
        Self::Package(Vec::new())
    }

    /// Returns the value if this is an [`AmlObject::Integer`].
    #[must_use]
    pub fn as_integer(&self) -> Option<u64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the integer interpreted as a boolean (nonzero is true).
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        self.as_integer().map(|v| v != 0)
    }

    /// Returns the string contents if this is an [`AmlObject::String`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the bytes if this is an [`AmlObject::Buffer`].
    #[must_use]
    pub fn as_buffer(&self) -> Option<&[u8]> {
        match self {
            Self::Buffer(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the elements if this is an [`AmlObject::Package`].
    #[must_use]
    pub fn as_package(&self) -> Option<&[AmlObject]> {
        match self {
            Self::Package(p) => Some(p),
            _ => None,
        }
    }

    /// Returns the ASL name of this object's type, for diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "Integer",
            Self::String(_) => "String",
            Self::Buffer(_) => "Buffer",
            Self::Package(_) => "Package",
        }
    }
}

impl From<u64> for AmlObject {
    fn from(v: u64) -> Self {
        Self::Integer(v)
    }
}

impl From<u32> for AmlObject {
    fn from(v: u32) -> Self {
        Self::Integer(u64::from(v))
    }
}

impl From<&str> for AmlObject {
    fn from(s: &str) -> Self {
        Self::String(String::from(s))
    }
}

impl From<Vec<AmlObject>> for AmlObject {
    fn from(elements: Vec<AmlObject>) -> Self {
        Self::Package(elements)
    }
}

/// Errors reported by the platform when evaluating an AML method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmlError {
    /// The method does not exist on the device.
    MethodNotFound,
    /// The platform rejected the argument list.
    InvalidArguments,
    /// The method ran but failed; carries the raw platform status.
    Firmware(u32),
    /// A GUID string was not in `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` form.
    InvalidGuid,
}

impl fmt::Display for AmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MethodNotFound => f.write_str("method not found"),
            Self::InvalidArguments => f.write_str("invalid method arguments"),
            Self::Firmware(status) => write!(f, "firmware status {status:#x}"),
            Self::InvalidGuid => f.write_str("malformed GUID"),
        }
    }
}
