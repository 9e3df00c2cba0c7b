//! Device properties published for inspection.
//!
//! Drivers expose diagnostic state as a [`PropertyTable`] of typed
//! [`PropertyValue`]s, which userspace tools read back through the device
//! registry. Property writes from outside arrive as a [`PropertyValue`] too,
//! normally a dictionary.

use alloc::collections::BTreeMap;
use alloc::collections::btree_map;
use alloc::string::String;
use alloc::vec::Vec;

use hadron_acpi::aml::AmlObject;

/// A typed property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// An unsigned number and its declared width in bits.
    Number {
        /// The value.
        value: u64,
        /// Declared width (8, 16, 32 or 64).
        bits: u8,
    },
    /// A boolean.
    Bool(bool),
    /// A string.
    String(String),
    /// Opaque bytes.
    Data(Vec<u8>),
    /// An ordered list.
    Array(Vec<PropertyValue>),
    /// A string-keyed dictionary.
    Dictionary(BTreeMap<String, PropertyValue>),
}

impl PropertyValue {
    /// Creates a number property of the given width.
    #[must_use]
    pub const fn number(value: u64, bits: u8) -> Self {
        Self::Number { value, bits }
    }

    /// Returns the value if this is a number.
    #[must_use]
    pub fn as_number(&self) -> Option<u64> {
        match self {
            Self::Number { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Returns the entries if this is a dictionary.
    #[must_use]
    pub fn as_dictionary(&self) -> Option<&BTreeMap<String, PropertyValue>> {
        match self {
            Self::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    /// Returns the elements if this is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[PropertyValue]> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }
}

impl From<&AmlObject> for PropertyValue {
    fn from(obj: &AmlObject) -> Self {
        match obj {
            AmlObject::Integer(v) => Self::number(*v, 64),
            AmlObject::String(s) => Self::String(s.clone()),
            AmlObject::Buffer(b) => Self::Data(b.clone()),
            AmlObject::Package(p) => Self::Array(p.iter().map(Self::from).collect()),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<BTreeMap<String, PropertyValue>> for PropertyValue {
    fn from(d: BTreeMap<String, PropertyValue>) -> Self {
        Self::Dictionary(d)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PropertyValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::{SerializeMap, SerializeSeq};

        match self {
            Self::Number { value, .. } => serializer.serialize_u64(*value),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::String(s) => serializer.serialize_str(s),
            Self::Data(bytes) => serializer.serialize_bytes(bytes),
            Self::Array(elements) => {
                let mut seq = serializer.serialize_seq(Some(elements.len()))?;
                for e in elements {
                    seq.serialize_element(e)?;
                }
                seq.end()
            }
            Self::Dictionary(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

/// The properties a device publishes, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct PropertyTable {
    entries: BTreeMap<String, PropertyValue>,
}

impl PropertyTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: &str, value: impl Into<PropertyValue>) {
        self.entries.insert(String::from(key), value.into());
    }

    /// Returns the value of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries.get(key)
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        self.entries.remove(key)
    }

    /// Returns the number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no properties are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the properties in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, PropertyValue> {
        self.entries.iter()
    }
}
