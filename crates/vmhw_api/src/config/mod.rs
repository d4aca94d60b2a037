use serde::{Deserialize, Serialize};

use crate::error::InvalidVirtualMachineError;

mod device;
mod hardware;
mod sector_format;
mod slots;
mod volume;

pub use device::{
    AllowedPciDevice, CdromBacking, DeviceChange, DeviceChangeOperation, DiskBacking,
    OpaqueDevice, PciPassthroughBacking, VirtualCdrom, VirtualDevice, VirtualDeviceType,
    VirtualDisk, VirtualPciPassthrough, VirtualSriovEthernetCard, VirtualVmxnet3,
};
pub use hardware::{HardwareSpec, ScsiController, ScsiControllerType, SharingMode};
pub use sector_format::DatastoreSectorFormat;
pub use slots::validate_controller_slots;
pub use volume::{ApplicationType, PersistentVolumeClaimSource, Volume};

/// A virtual machine document: the desired hardware and volumes, plus the
/// devices currently observed on the virtual machine.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VirtualMachine {
    pub name: String,

    #[serde(default)]
    pub spec: VirtualMachineSpec,

    /// Hardware inventory, in discovery order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub devices: Vec<VirtualDevice>,
}

/// Desired state of a virtual machine's storage topology.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VirtualMachineSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware: Option<HardwareSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<Volume>,
}

impl VirtualMachineSpec {
    /// Validate that every volume placement in the spec is physically
    /// realizable. All problems are reported at once.
    pub fn validate(&self) -> Result<(), InvalidVirtualMachineError> {
        let errors = validate_controller_slots(self.scsi_controllers(), &self.volumes);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(InvalidVirtualMachineError(errors))
        }
    }

    /// Returns the declared SCSI controllers, if any.
    pub fn scsi_controllers(&self) -> &[ScsiController] {
        self.hardware
            .as_ref()
            .map(|h| h.scsi_controllers.as_slice())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    use crate::error::ControllerSlotError;

    #[test]
    fn test_validate_virtual_machine_document() {
        let vm: VirtualMachine = serde_yaml::from_str(indoc! {r#"
            name: db-0
            spec:
              hardware:
                scsiControllers:
                  - busNumber: 0
                    type: ParaVirtualSCSI
              volumes:
                - name: data
                  persistentVolumeClaim:
                    claimName: data-pvc
                    controllerBusNumber: 0
                    unitNumber: 7
                - name: logs
                  persistentVolumeClaim:
                    claimName: logs-pvc
                    controllerBusNumber: 9
            devices:
              - type: vmxnet3
        "#})
        .unwrap();

        let err = vm.spec.validate().unwrap_err();
        let reasons: Vec<_> = err.errors().iter().map(|e| e.reason.clone()).collect();
        assert_eq!(
            reasons,
            vec![
                ControllerSlotError::UnitNumberReserved,
                ControllerSlotError::BusNumberOutOfRange { max_bus_number: 3 },
            ]
        );
        assert!(err.to_string().starts_with('['));
    }

    #[test]
    fn test_validate_empty_spec() {
        VirtualMachineSpec::default().validate().unwrap();
        assert!(VirtualMachineSpec::default().scsi_controllers().is_empty());
    }

    #[test]
    fn test_reject_unknown_fields() {
        serde_yaml::from_str::<VirtualMachine>(indoc! {r#"
            name: vm
            spec:
              networks: []
        "#})
        .unwrap_err();
    }
}
