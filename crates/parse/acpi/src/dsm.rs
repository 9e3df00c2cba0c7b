//! `_DSM` (Device Specific Method) argument encoding.
//!
//! Every `_DSM` takes the same four arguments: a 16-byte GUID buffer, a
//! revision, a function index and a package of function-specific arguments.
//! The GUID is passed in the mixed-endian layout used by ACPI's `ToUUID`:
//! the first three fields little-endian, the trailing eight bytes verbatim.

use core::fmt;
use core::str::FromStr;

use crate::aml::{AmlError, AmlObject};

/// A `_DSM` interface GUID.
///
/// Written in the canonical `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` form and
/// encoded with [`DsmGuid::to_bytes`] when passed to firmware.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DsmGuid {
    /// The first 32 bits of the GUID.
    pub data1: u32,
    /// The next 16 bits of the GUID.
    pub data2: u16,
    /// The next 16 bits of the GUID.
    pub data3: u16,
    /// The remaining 64 bits of the GUID.
    pub data4: [u8; 8],
}

impl DsmGuid {
    /// Creates a new GUID from its component parts.
    #[must_use]
    pub const fn new(data1: u32, data2: u16, data3: u16, data4: [u8; 8]) -> Self {
        Self {
            data1,
            data2,
            data3,
            data4,
        }
    }

    /// Returns the 16-byte mixed-endian encoding firmware expects in `Arg0`.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; 16] {
        let d1 = self.data1.to_le_bytes();
        let d2 = self.data2.to_le_bytes();
        let d3 = self.data3.to_le_bytes();
        let d4 = self.data4;
        [
            d1[0], d1[1], d1[2], d1[3], d2[0], d2[1], d3[0], d3[1], d4[0], d4[1], d4[2], d4[3],
            d4[4], d4[5], d4[6], d4[7],
        ]
    }

    /// Returns the big-endian (RFC 4122) byte order, as produced by parsing
    /// the text form byte by byte.
    #[must_use]
    pub const fn to_rfc4122_bytes(&self) -> [u8; 16] {
        swap_mixed_endian(self.to_bytes())
    }
}

/// Converts between RFC 4122 byte order and the mixed-endian GUID layout.
///
/// Bytes 0-3 are reversed as a 32-bit word, bytes 4-5 and 6-7 as 16-bit
/// words, and bytes 8-15 are left alone. Applying it twice is the identity.
#[must_use]
pub const fn swap_mixed_endian(bytes: [u8; 16]) -> [u8; 16] {
    let b = bytes;
    [
        b[3], b[2], b[1], b[0], b[5], b[4], b[7], b[6], b[8], b[9], b[10], b[11], b[12], b[13],
        b[14], b[15],
    ]
}

/// Parses `len` hex digits from `s` into a `u64`.
fn parse_hex(s: &str, len: usize) -> Result<u64, AmlError> {
    if s.len() != len || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(AmlError::InvalidGuid);
    }
    u64::from_str_radix(s, 16).map_err(|_| AmlError::InvalidGuid)
}

impl FromStr for DsmGuid {
    type Err = AmlError;

    #[expect(
        clippy::cast_possible_truncation,
        reason = "each group is parsed from at most its own width in hex digits"
    )]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut groups = s.split('-');
        let mut next = |len| parse_hex(groups.next().ok_or(AmlError::InvalidGuid)?, len);

        let data1 = next(8)? as u32;
        let data2 = next(4)? as u16;
        let data3 = next(4)? as u16;
        let clock_seq = next(4)? as u16;
        let node = next(12)?;
        if groups.next().is_some() {
            return Err(AmlError::InvalidGuid);
        }

        let mut data4 = [0u8; 8];
        data4[..2].copy_from_slice(&clock_seq.to_be_bytes());
        data4[2..].copy_from_slice(&node.to_be_bytes()[2..]);
        Ok(Self::new(data1, data2, data3, data4))
    }
}

impl fmt::Debug for DsmGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DsmGuid({self})")
    }
}

impl fmt::Display for DsmGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            self.data1,
            self.data2,
            self.data3,
            self.data4[0],
            self.data4[1],
            self.data4[2],
            self.data4[3],
            self.data4[4],
            self.data4[5],
            self.data4[6],
            self.data4[7],
        )
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for DsmGuid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for DsmGuid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GuidVisitor;

        impl serde::de::Visitor<'_> for GuidVisitor {
            type Value = DsmGuid;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a GUID string")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<DsmGuid, E> {
                v.parse()
                    .map_err(|_| E::invalid_value(serde::de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_str(GuidVisitor)
    }
}

/// The four arguments of one `_DSM` call.
///
/// The layout `[GUID, revision, function, package]` is fixed by ACPI for
/// every interface. `extra` is borrowed: the caller keeps ownership of its
/// argument list, and an absent list is sent as an empty package.
#[derive(Debug, Clone, Copy)]
pub struct DsmArgs<'a> {
    /// Interface GUID (`Arg0`).
    pub guid: DsmGuid,
    /// Interface revision (`Arg1`).
    pub revision: u32,
    /// Function index (`Arg2`).
    pub function: u32,
    /// Function-specific arguments (`Arg3`).
    pub extra: Option<&'a [AmlObject]>,
}

impl<'a> DsmArgs<'a> {
    /// Creates arguments for `function` with no function-specific arguments.
    #[must_use]
    pub const fn new(guid: DsmGuid, revision: u32, function: u32) -> Self {
        Self {
            guid,
            revision,
            function,
            extra: None,
        }
    }

    /// Attaches a function-specific argument list.
    #[must_use]
    pub const fn with_extra(mut self, extra: &'a [AmlObject]) -> Self {
        self.extra = Some(extra);
        self
    }

    /// Builds the argument objects in call order.
    ///
    /// The returned objects are owned by the caller of this method and are
    /// dropped after the evaluation, whichever way it ends.
    #[must_use]
    pub fn to_objects(&self) -> [AmlObject; 4] {
        let package = match self.extra {
            Some(extra) => AmlObject::Package(extra.to_vec()),
            None => AmlObject::empty_package(),
        };
        [
            AmlObject::Buffer(self.guid.to_bytes().to_vec()),
            AmlObject::from(self.revision),
            AmlObject::from(self.function),
            package,
        ]
    }
}
