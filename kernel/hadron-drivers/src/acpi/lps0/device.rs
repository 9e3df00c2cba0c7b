//! The LPS0 device driver instance.

use hadron_acpi::AmlPath;
use hadron_core::sync::CommandGate;
use hadron_driver_api::{
    AcpiPlatformDevice, DriverError, PowerAck, PowerManagement, PowerStateHandler, PropertyTable,
    PropertyValue, kdebug, kerr, kinfo,
};

use super::dsm::DsmInvoker;
use super::power::POWER_STATES;
use super::{
    CAPABILITY_KEY, CONSTRAINTS_KEY, ConstraintTable, DRIVER_NAME, Lps0Config, Lps0Error,
    Lps0Functions, capability, constraint, power, properties,
};

/// LPS0 driver bound to a power-engine plugin device.
///
/// Power-state changes and property writes may arrive on any thread; both
/// run their firmware calls inside one [`CommandGate`], so at most one
/// `_DSM` evaluation is in flight per device. Until [`start`](Self::start)
/// succeeds, both are acknowledged without touching firmware.
pub struct Lps0Device<D> {
    device: D,
    config: Lps0Config,
    functions: Lps0Functions,
    constraints: ConstraintTable,
    ready: bool,
    gate: CommandGate<PropertyTable>,
}

impl<D: AcpiPlatformDevice> Lps0Device<D> {
    /// Binds the driver to `device`. Nothing is sent to firmware yet.
    pub fn new(device: D, config: Lps0Config) -> Self {
        Self {
            device,
            config,
            functions: Lps0Functions::empty(),
            constraints: ConstraintTable::new(),
            ready: false,
            gate: CommandGate::new(PropertyTable::new()),
        }
    }

    /// Reads capabilities and constraints, publishes them, and registers
    /// with power management.
    ///
    /// Missing or malformed firmware data does not fail the start; it only
    /// leaves the mask or table empty.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::InvalidState`] if already started, or the
    /// framework's error if joining the power tree or registering fails. The
    /// device stays not ready in either case.
    pub fn start(&mut self, pm: &mut impl PowerManagement) -> Result<(), DriverError> {
        if self.ready {
            return Err(DriverError::InvalidState);
        }
        let name = self.device.name();
        kdebug!("lps0::{} starting at {}", name, self.device.path());

        let invoker = DsmInvoker::new(&self.device, &self.config);
        let props = self.gate.get_mut();

        self.functions = capability::read_capability(&invoker);
        props.set(
            CAPABILITY_KEY,
            PropertyValue::number(u64::from(self.functions.bits()), 8),
        );

        if let Some(table) = constraint::read_constraints(&invoker, self.config.retain_disabled) {
            props.set(CONSTRAINTS_KEY, constraint::table_to_property(&table));
            self.constraints = table;
        }

        pm.join_power_tree(DRIVER_NAME)
            .and_then(|()| pm.register_power_driver(DRIVER_NAME, &POWER_STATES))
            .inspect_err(|e| kerr!("lps0::{} power management setup failed: {}", name, e))?;

        self.ready = true;
        kinfo!(
            "lps0::{} ready, functions {}, {} constraints",
            name,
            self.functions,
            self.constraints.len()
        );
        Ok(())
    }

    /// Unregisters from power management and discards the firmware data.
    pub fn stop(&mut self, pm: &mut impl PowerManagement) {
        self.ready = false;
        pm.stop(DRIVER_NAME);
        self.functions = Lps0Functions::empty();
        self.constraints.clear();
        *self.gate.get_mut() = PropertyTable::new();
        kdebug!("lps0::{} stopped", self.device.name());
    }

    /// Handles a property write: `{ "DSM": n }` evaluates function `n`
    /// and publishes its result under `"raw"`.
    pub fn set_properties(&self, request: &PropertyValue) {
        if let Err(e) = self.check_ready() {
            kdebug!("lps0::{} property write ignored: {}", self.device.name(), e);
            return;
        }
        let invoker = DsmInvoker::new(&self.device, &self.config);
        self.gate
            .run_action(|props| properties::apply(&invoker, request, props));
    }

    /// Returns a copy of the published property `key`.
    pub fn property(&self, key: &str) -> Option<PropertyValue> {
        self.gate.run_action(|props| props.get(key).cloned())
    }

    /// Returns a copy of every published property.
    pub fn properties(&self) -> PropertyTable {
        self.gate.run_action(|props| props.clone())
    }

    /// Whether start completed and the driver is accepting requests.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Functions firmware reported as supported.
    pub fn functions(&self) -> Lps0Functions {
        self.functions
    }

    /// The parsed constraint table.
    pub fn constraints(&self) -> &ConstraintTable {
        &self.constraints
    }

    /// The bound firmware device.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// The active configuration.
    pub fn config(&self) -> &Lps0Config {
        &self.config
    }

    fn check_ready(&self) -> Result<(), Lps0Error> {
        if self.ready {
            Ok(())
        } else {
            Err(Lps0Error::SetupIncomplete)
        }
    }
}

impl<D: AcpiPlatformDevice> PowerStateHandler for Lps0Device<D> {
    fn set_power_state(&self, ordinal: u32, target: &AmlPath) -> PowerAck {
        let name = self.device.name();
        kdebug!(
            "lps0::{} power state {} ({})",
            name,
            ordinal,
            if ordinal != 0 { "active" } else { "idle" }
        );

        if target != self.device.path() {
            kdebug!("lps0::{} request for {} ignored", name, target);
            return PowerAck::Invalid;
        }
        if let Err(e) = self.check_ready() {
            kdebug!("lps0::{} power state change ignored: {}", name, e);
            return PowerAck::Implied;
        }

        let invoker = DsmInvoker::new(&self.device, &self.config);
        self.gate
            .run_action(|_| power::transition(&invoker, self.functions, ordinal));
        PowerAck::Implied
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{MockDevice, MockPm, pkg};
    use super::super::{LPS0_DSM_GUID, RAW_RESULT_KEY};
    use super::*;
    use alloc::collections::BTreeMap;
    use hadron_acpi::{AmlError, AmlObject};
    use hadron_driver_api::PowerStateFlags;
    use std::sync::Arc;

    fn pepd() -> AmlPath {
        AmlPath::parse("\\_SB.PEPD").unwrap()
    }

    fn firmware(mask: u8) -> MockDevice {
        MockDevice::new()
            .returning(0, AmlObject::Buffer(vec![mask]))
            .returning(
                1,
                pkg![
                    pkg!["\\_SB.PCI0.XHC", 1u64, pkg![1u64, 0u64, pkg![3u64]]],
                    pkg!["\\_SB.PCI0.GFX0", 0u64, pkg![1u64, 0u64, pkg![3u64]]],
                ],
            )
    }

    fn started(mask: u8) -> Lps0Device<MockDevice> {
        let config = Lps0Config::default().with_retain_disabled(false);
        let mut dev = Lps0Device::new(firmware(mask), config);
        dev.start(&mut MockPm::default()).unwrap();
        dev.device().clear_calls();
        dev
    }

    fn dsm_request(function: u64) -> PropertyValue {
        let mut dict = BTreeMap::new();
        dict.insert("DSM".into(), PropertyValue::number(function, 32));
        PropertyValue::Dictionary(dict)
    }

    #[test]
    fn start_publishes_and_registers() {
        let config = Lps0Config::default().with_retain_disabled(false);
        let mut dev = Lps0Device::new(firmware(0x61), config);
        let mut pm = MockPm::default();
        dev.start(&mut pm).unwrap();

        assert!(dev.is_ready());
        assert_eq!(dev.device().functions_called(), vec![0, 1]);
        assert_eq!(dev.functions().bits(), 0x61);
        assert_eq!(
            dev.property(CAPABILITY_KEY),
            Some(PropertyValue::number(0x61, 8))
        );

        assert_eq!(dev.constraints().len(), 1);
        let published = dev.property(CONSTRAINTS_KEY).unwrap();
        let published = published.as_dictionary().unwrap();
        assert_eq!(published.len(), 1);
        assert!(published.contains_key("\\_SB.PCI0.XHC"));

        assert_eq!(pm.joined, vec![DRIVER_NAME]);
        assert_eq!(pm.registered.len(), 1);
        let (driver, states) = &pm.registered[0];
        assert_eq!(driver, DRIVER_NAME);
        assert_eq!(states.len(), 2);
        assert_eq!(states[0].ordinal, 0);
        assert!(states[0].flags.is_empty());
        assert_eq!(
            states[1].flags,
            PowerStateFlags::POWER_ON | PowerStateFlags::DEVICE_USABLE
        );
    }

    #[test]
    fn start_tolerates_missing_firmware_data() {
        let device = MockDevice::new()
            .respond(0, Err(AmlError::MethodNotFound))
            .respond(1, Err(AmlError::MethodNotFound));
        let mut dev = Lps0Device::new(device, Lps0Config::default());
        dev.start(&mut MockPm::default()).unwrap();

        assert!(dev.is_ready());
        assert!(dev.functions().is_empty());
        assert_eq!(dev.property(CAPABILITY_KEY), Some(PropertyValue::number(0, 8)));
        assert_eq!(dev.property(CONSTRAINTS_KEY), None);
        assert!(dev.constraints().is_empty());
    }

    #[test]
    fn retained_disabled_constraints_are_published() {
        let config = Lps0Config::default().with_retain_disabled(true);
        let mut dev = Lps0Device::new(firmware(0x61), config);
        dev.start(&mut MockPm::default()).unwrap();

        assert_eq!(dev.constraints().len(), 2);
        assert!(!dev.constraints()["\\_SB.PCI0.GFX0"].enabled);
    }

    #[test]
    fn duplicate_constraints_collapse() {
        let device = MockDevice::new().returning(
            1,
            pkg![
                pkg!["DeviceA", 1u64, pkg![1u64, pkg![], pkg![10u64, 20u64]]],
                pkg!["DeviceA", 1u64, pkg![0u64, pkg![], pkg![30u64]]],
            ],
        );
        let mut dev = Lps0Device::new(device, Lps0Config::default());
        dev.start(&mut MockPm::default()).unwrap();

        let record = &dev.constraints()["DeviceA"];
        assert_eq!(dev.constraints().len(), 1);
        assert_eq!(record.revision, None);
        assert_eq!(record.state, vec![AmlObject::Integer(30)]);

        let published = dev.property(CONSTRAINTS_KEY).unwrap();
        let entry = published.as_dictionary().unwrap()["DeviceA"]
            .as_dictionary()
            .unwrap()
            .clone();
        assert!(!entry.contains_key("Revision"));
        assert_eq!(entry["Device Enabled"], PropertyValue::Bool(true));
    }

    #[test]
    fn power_management_failure_leaves_device_unready() {
        let mut dev = Lps0Device::new(firmware(0x61), Lps0Config::default());
        let mut pm = MockPm {
            fail_register: true,
            ..MockPm::default()
        };
        assert_eq!(dev.start(&mut pm), Err(DriverError::Unsupported));
        assert!(!dev.is_ready());

        dev.device().clear_calls();
        assert_eq!(dev.set_power_state(0, &pepd()), PowerAck::Implied);
        assert!(dev.device().calls().is_empty());

        let mut pm = MockPm {
            fail_join: true,
            ..MockPm::default()
        };
        assert_eq!(dev.start(&mut pm), Err(DriverError::InitFailed));
        assert!(pm.registered.is_empty());
        assert!(!dev.is_ready());
    }

    #[test]
    fn double_start_is_rejected() {
        let mut dev = started(0x61);
        assert_eq!(
            dev.start(&mut MockPm::default()),
            Err(DriverError::InvalidState)
        );
        assert!(dev.device().calls().is_empty());
    }

    #[test]
    fn not_ready_issues_no_calls() {
        let dev = Lps0Device::new(firmware(0x61), Lps0Config::default());
        assert_eq!(dev.set_power_state(1, &pepd()), PowerAck::Implied);
        assert_eq!(dev.set_power_state(0, &pepd()), PowerAck::Implied);
        dev.set_properties(&dsm_request(1));
        assert!(dev.device().calls().is_empty());
        assert_eq!(dev.property(RAW_RESULT_KEY), None);
    }

    #[test]
    fn power_transitions() {
        let dev = started(0x61);
        assert_eq!(dev.set_power_state(1, &pepd()), PowerAck::Implied);
        assert_eq!(dev.device().functions_called(), vec![6, 4]);

        dev.device().clear_calls();
        assert_eq!(dev.set_power_state(0, &pepd()), PowerAck::Implied);
        assert_eq!(dev.device().functions_called(), vec![3, 5]);

        let dev = started(0x00);
        assert_eq!(dev.set_power_state(1, &pepd()), PowerAck::Implied);
        assert_eq!(dev.device().functions_called(), vec![4]);
        dev.device().clear_calls();
        assert_eq!(dev.set_power_state(0, &pepd()), PowerAck::Implied);
        assert!(dev.device().calls().is_empty());
    }

    #[test]
    fn notification_failures_still_acknowledge() {
        let device = firmware(0x61)
            .respond(6, Err(AmlError::Firmware(1)))
            .respond(4, Err(AmlError::Firmware(1)));
        let mut dev = Lps0Device::new(device, Lps0Config::default());
        dev.start(&mut MockPm::default()).unwrap();
        dev.device().clear_calls();

        assert_eq!(dev.set_power_state(1, &pepd()), PowerAck::Implied);
        assert_eq!(dev.device().functions_called(), vec![6, 4]);
    }

    #[test]
    fn other_target_is_invalid() {
        let dev = started(0x61);
        let other = AmlPath::parse("\\_SB.PCI0").unwrap();
        assert_eq!(dev.set_power_state(1, &other), PowerAck::Invalid);
        assert!(dev.device().calls().is_empty());
    }

    #[test]
    fn calls_carry_configured_interface() {
        let dev = started(0x61);
        dev.set_power_state(0, &pepd());
        for args in dev.device().calls() {
            assert_eq!(args[0].as_buffer(), Some(&LPS0_DSM_GUID.to_bytes()[..]));
            assert_eq!(args[1], AmlObject::Integer(0));
            assert_eq!(args[3], AmlObject::empty_package());
        }
    }

    #[test]
    fn property_write_evaluates_and_publishes() {
        let dev = started(0x61);
        dev.set_properties(&dsm_request(0));
        assert_eq!(dev.device().functions_called(), vec![0]);
        assert_eq!(
            dev.property(RAW_RESULT_KEY),
            Some(PropertyValue::Data(vec![0x61]))
        );

        dev.set_properties(&PropertyValue::Bool(true));
        assert_eq!(dev.device().functions_called(), vec![0]);
    }

    #[test]
    fn stop_unregisters_and_clears() {
        let mut dev = started(0x61);
        let mut pm = MockPm::default();
        dev.stop(&mut pm);

        assert!(!dev.is_ready());
        assert_eq!(pm.stopped, vec![DRIVER_NAME]);
        assert!(dev.functions().is_empty());
        assert!(dev.constraints().is_empty());
        assert!(dev.properties().is_empty());

        assert_eq!(dev.set_power_state(1, &pepd()), PowerAck::Implied);
        assert!(dev.device().calls().is_empty());

        dev.start(&mut pm).unwrap();
        assert!(dev.is_ready());
    }

    #[test]
    fn concurrent_requests_are_serialized() {
        let dev = Arc::new(started(0x61));
        let threads: Vec<_> = (0..8u32)
            .map(|i| {
                let dev = Arc::clone(&dev);
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        dev.set_power_state(i % 2, &pepd());
                    }
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }

        let calls = dev.device().functions_called();
        assert_eq!(calls.len(), 8 * 50 * 2);
        for pair in calls.chunks(2) {
            assert!(pair == [6, 4] || pair == [3, 5], "interleaved: {pair:?}");
        }
    }

    #[test]
    fn property_writes_share_the_power_gate() {
        let dev = Arc::new(started(0x61));
        let threads: Vec<_> = (0..8u32)
            .map(|i| {
                let dev = Arc::clone(&dev);
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        if i < 4 {
                            dev.set_power_state(i % 2, &pepd());
                        } else {
                            dev.set_properties(&dsm_request(2));
                        }
                    }
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }

        let calls = dev.device().functions_called();
        assert_eq!(calls.len(), 4 * 50 * 2 + 4 * 50);
        let mut rest = calls.as_slice();
        let (mut transitions, mut writes) = (0, 0);
        while let Some((&first, tail)) = rest.split_first() {
            match first {
                2 => {
                    writes += 1;
                    rest = tail;
                }
                6 | 3 => {
                    let expected = if first == 6 { 4 } else { 5 };
                    assert_eq!(tail.first(), Some(&expected), "interleaved: {calls:?}");
                    transitions += 1;
                    rest = &tail[1..];
                }
                other => panic!("unexpected function {other} in {calls:?}"),
            }
        }
        assert_eq!(transitions, 200);
        assert_eq!(writes, 200);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn published_properties_serialize() {
        let dev = started(0x61);
        let json = serde_json::to_value(dev.properties()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "Capability": 0x61,
                "Constraints": {
                    "\\_SB.PCI0.XHC": {
                        "Device Enabled": true,
                        "Revision": 1,
                        "State": [3]
                    }
                }
            })
        );
    }
}
