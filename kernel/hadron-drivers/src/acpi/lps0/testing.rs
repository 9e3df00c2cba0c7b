//! Test doubles for the firmware device and the power-management framework.

use std::collections::BTreeMap;
use std::sync::Mutex;

use hadron_acpi::{AmlError, AmlObject, AmlPath, NameSeg};
use hadron_driver_api::{AcpiPlatformDevice, DriverError, PowerManagement, PowerStateDesc};

/// A scripted `_DSM` device that records every evaluation.
///
/// Responses are keyed by function index; unscripted functions return no
/// object, like a notification method.
pub(crate) struct MockDevice {
    path: AmlPath,
    responses: BTreeMap<u32, Result<Option<AmlObject>, AmlError>>,
    calls: Mutex<Vec<Vec<AmlObject>>>,
}

impl MockDevice {
    pub(crate) fn new() -> Self {
        Self {
            path: AmlPath::parse("\\_SB.PEPD").unwrap(),
            responses: BTreeMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Scripts the result of `function`.
    pub(crate) fn respond(
        mut self,
        function: u32,
        result: Result<Option<AmlObject>, AmlError>,
    ) -> Self {
        self.responses.insert(function, result);
        self
    }

    /// Scripts a successful result object for `function`.
    pub(crate) fn returning(self, function: u32, obj: AmlObject) -> Self {
        self.respond(function, Ok(Some(obj)))
    }

    /// Every argument list passed so far, in call order.
    pub(crate) fn calls(&self) -> Vec<Vec<AmlObject>> {
        self.calls.lock().unwrap().clone()
    }

    /// The function index (`Arg2`) of every call so far, in call order.
    pub(crate) fn functions_called(&self) -> Vec<u64> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|args| args[2].as_integer().unwrap())
            .collect()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl AcpiPlatformDevice for MockDevice {
    fn path(&self) -> &AmlPath {
        &self.path
    }

    fn name(&self) -> &str {
        "PEPD"
    }

    fn evaluate_object(
        &self,
        method: NameSeg,
        args: &[AmlObject],
    ) -> Result<Option<AmlObject>, AmlError> {
        if method != NameSeg::DSM {
            return Err(AmlError::MethodNotFound);
        }
        self.calls.lock().unwrap().push(args.to_vec());
        let function = args
            .get(2)
            .and_then(AmlObject::as_integer)
            .ok_or(AmlError::InvalidArguments)?;
        u32::try_from(function)
            .ok()
            .and_then(|f| self.responses.get(&f).cloned())
            .unwrap_or(Ok(None))
    }
}

/// A power-management framework that records what the driver asks of it.
#[derive(Default)]
pub(crate) struct MockPm {
    pub(crate) joined: Vec<String>,
    pub(crate) registered: Vec<(String, Vec<PowerStateDesc>)>,
    pub(crate) stopped: Vec<String>,
    pub(crate) fail_join: bool,
    pub(crate) fail_register: bool,
}

impl PowerManagement for MockPm {
    fn join_power_tree(&mut self, driver: &str) -> Result<(), DriverError> {
        if self.fail_join {
            return Err(DriverError::InitFailed);
        }
        self.joined.push(driver.into());
        Ok(())
    }

    fn register_power_driver(
        &mut self,
        driver: &str,
        states: &[PowerStateDesc],
    ) -> Result<(), DriverError> {
        if self.fail_register {
            return Err(DriverError::Unsupported);
        }
        self.registered.push((driver.into(), states.to_vec()));
        Ok(())
    }

    fn stop(&mut self, driver: &str) {
        self.stopped.push(driver.into());
    }
}

/// Builds an AML package from anything convertible to objects.
macro_rules! pkg {
    ($($e:expr),* $(,)?) => {
        ::hadron_acpi::AmlObject::Package(::std::vec![$(::hadron_acpi::AmlObject::from($e)),*])
    };
}

pub(crate) use pkg;
