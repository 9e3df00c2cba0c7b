//! Device constraint table (function 1).
//!
//! Firmware returns a package of entries, one per device that must reach a
//! given state before the platform can enter deep idle:
//!
//! ```text
//! Package {
//!     Package { "\_SB.PCI0.XHC", 1, Package { revision, ..., Package { state... } } },
//!     ...
//! }
//! ```
//!
//! Malformed entries are skipped one by one; the rest of the table still
//! parses. Entries sharing a name collapse to the last one.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use hadron_acpi::AmlObject;
use hadron_driver_api::{AcpiPlatformDevice, PropertyValue, kdebug};

use super::dsm::DsmInvoker;
use super::{Lps0Error, Lps0Function};

/// One device's constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintRecord {
    /// Whether firmware enforces the constraint.
    pub enabled: bool,
    /// Detail revision, absent when firmware reports zero.
    pub revision: Option<u64>,
    /// Required state, kept as firmware encoded it.
    pub state: Vec<AmlObject>,
}

/// Constraint records keyed by device name.
pub type ConstraintTable = BTreeMap<String, ConstraintRecord>;

impl ConstraintRecord {
    /// Converts the record into its published property form.
    #[must_use]
    pub fn to_property(&self) -> PropertyValue {
        let mut dict = BTreeMap::new();
        dict.insert(String::from("Device Enabled"), PropertyValue::Bool(self.enabled));
        if let Some(revision) = self.revision {
            dict.insert(String::from("Revision"), PropertyValue::number(revision, 64));
        }
        dict.insert(
            String::from("State"),
            PropertyValue::Array(self.state.iter().map(PropertyValue::from).collect()),
        );
        PropertyValue::Dictionary(dict)
    }
}

/// Converts a whole table into its published property form.
#[must_use]
pub fn table_to_property(table: &ConstraintTable) -> PropertyValue {
    PropertyValue::Dictionary(
        table
            .iter()
            .map(|(name, record)| (name.clone(), record.to_property()))
            .collect(),
    )
}

/// Parses one table entry.
///
/// Returns `Ok(None)` for a disabled entry when `retain_disabled` is off;
/// such entries are dropped before their detail is looked at.
fn parse_entry(
    entry: &AmlObject,
    retain_disabled: bool,
) -> Result<Option<(String, ConstraintRecord)>, Lps0Error> {
    let fields = entry
        .as_package()
        .ok_or(Lps0Error::ShapeMismatch("entry is not a package"))?;
    let [name, enabled, detail] = fields else {
        return Err(Lps0Error::ShapeMismatch("entry does not have 3 elements"));
    };

    let name = name
        .as_str()
        .filter(|s| !s.is_empty())
        .ok_or(Lps0Error::ShapeMismatch("device name is not a non-empty string"))?;
    let enabled = enabled
        .as_bool()
        .ok_or(Lps0Error::ShapeMismatch("enabled flag is not an integer"))?;
    if !enabled && !retain_disabled {
        return Ok(None);
    }

    let detail = detail
        .as_package()
        .ok_or(Lps0Error::ShapeMismatch("detail is not a package"))?;
    if detail.len() < 3 {
        return Err(Lps0Error::ShapeMismatch("detail has fewer than 3 elements"));
    }
    let revision = detail[0]
        .as_integer()
        .ok_or(Lps0Error::ShapeMismatch("revision is not an integer"))?;
    let state = detail[2]
        .as_package()
        .ok_or(Lps0Error::ShapeMismatch("state is not a package"))?;

    Ok(Some((
        String::from(name),
        ConstraintRecord {
            enabled,
            revision: (revision != 0).then_some(revision),
            state: state.to_vec(),
        },
    )))
}

/// Parses the entries of a constraint table.
///
/// `device` prefixes the log lines for skipped entries.
pub fn parse_constraints(
    device: &str,
    entries: &[AmlObject],
    retain_disabled: bool,
) -> ConstraintTable {
    let mut table = ConstraintTable::new();
    for (i, entry) in entries.iter().enumerate() {
        match parse_entry(entry, retain_disabled) {
            Ok(Some((name, record))) => {
                table.insert(name, record);
            }
            Ok(None) => kdebug!("lps0::{} constraint {} disabled, skipped", device, i),
            Err(e) => kdebug!("lps0::{} constraint {} skipped: {}", device, i, e),
        }
    }
    table
}

/// Fetches and parses the constraint table.
///
/// Returns `None` if the evaluation fails or the result is not a package;
/// nothing is published in that case.
pub fn read_constraints<D: AcpiPlatformDevice + ?Sized>(
    invoker: &DsmInvoker<'_, D>,
    retain_disabled: bool,
) -> Option<ConstraintTable> {
    let name = invoker.device().name();
    let result = invoker
        .evaluate(Lps0Function::Constraints.index(), None)
        .map_err(Lps0Error::from)
        .and_then(|obj| match obj {
            Some(AmlObject::Package(entries)) => Ok(entries),
            _ => Err(Lps0Error::ShapeMismatch("constraints are not a package")),
        });

    match result {
        Ok(entries) => {
            let table = parse_constraints(name, &entries, retain_disabled);
            kdebug!(
                "lps0::{} {} of {} constraints parsed",
                name,
                table.len(),
                entries.len()
            );
            Some(table)
        }
        Err(e) => {
            kdebug!("lps0::{} constraints unavailable: {}", name, e);
            None
        }
    }
}
