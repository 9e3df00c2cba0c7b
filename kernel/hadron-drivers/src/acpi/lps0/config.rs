//! Driver configuration.

use hadron_acpi::DsmGuid;

use super::{LPS0_DSM_GUID, LPS0_DSM_REVISION};

/// Tunables for an [`Lps0Device`](super::Lps0Device).
///
/// The defaults target the standard LPS0 interface. `retain_disabled` keeps
/// constraint entries firmware marks disabled, which is useful when
/// inspecting a platform and defaults to on in debug builds only.
///
/// With the `serde` feature the configuration can be loaded from a config
/// file; omitted fields take their default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct Lps0Config {
    /// `_DSM` interface GUID.
    pub guid: DsmGuid,
    /// `_DSM` interface revision.
    pub revision: u32,
    /// Keep constraint entries whose `enabled` field is zero.
    pub retain_disabled: bool,
}

impl Lps0Config {
    /// Returns the configuration with `guid` as the interface GUID.
    #[must_use]
    pub const fn with_guid(mut self, guid: DsmGuid) -> Self {
        self.guid = guid;
        self
    }

    /// Returns the configuration with `revision` as the interface revision.
    #[must_use]
    pub const fn with_revision(mut self, revision: u32) -> Self {
        self.revision = revision;
        self
    }

    /// Returns the configuration with the disabled-constraint policy set.
    #[must_use]
    pub const fn with_retain_disabled(mut self, retain: bool) -> Self {
        self.retain_disabled = retain;
        self
    }
}

impl Default for Lps0Config {
    fn default() -> Self {
        Self {
            guid: LPS0_DSM_GUID,
            revision: LPS0_DSM_REVISION,
            retain_disabled: cfg!(debug_assertions),
        }
    }
}
