//! Reports over the observed hardware inventory of a virtual machine.

use log::{debug, info};
use serde::Serialize;

use vmhw_api::config::{
    AllowedPciDevice, DatastoreSectorFormat, PciPassthroughBacking, VirtualMachine,
};

use crate::{
    devices::{preferred_disk_format, select_dynamic_direct_path_io, select_nvidia_vgpu},
    identity::{resolve_device_identities, DeviceIdentity},
};

/// Names the disks and CD-ROMs of a virtual machine.
pub fn identify_devices(vm: &VirtualMachine) -> Vec<DeviceIdentity> {
    let identities = resolve_device_identities(&vm.devices);
    info!(
        "Resolved {} device identities for virtual machine '{}'",
        identities.len(),
        vm.name
    );
    identities
}

/// PCI passthrough devices of a virtual machine, and the disk format to use
/// on its datastore.
#[derive(Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PassthroughReport {
    /// vGPU profiles, in inventory order.
    pub vgpu_profiles: Vec<String>,

    /// Allowed devices of each dynamic DirectPath I/O device, in inventory order.
    pub dynamic_direct_path_io: Vec<Vec<AllowedPciDevice>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_disk_format: Option<DatastoreSectorFormat>,
}

impl PassthroughReport {
    /// Whether the virtual machine has any passthrough device.
    pub fn has_passthrough(&self) -> bool {
        !self.vgpu_profiles.is_empty() || !self.dynamic_direct_path_io.is_empty()
    }
}

/// Builds the passthrough report of a virtual machine. `sector_formats` are
/// the formats supported by its datastore, in discovery order.
pub fn passthrough_report<S>(vm: &VirtualMachine, sector_formats: &[S]) -> PassthroughReport
where
    S: AsRef<str>,
{
    let vgpu_profiles = select_nvidia_vgpu(&vm.devices)
        .into_iter()
        .filter_map(|device| match &device.backing {
            PciPassthroughBacking::Vgpu { profile } => Some(profile.clone()),
            PciPassthroughBacking::Dynamic { .. } => None,
        })
        .collect();

    let dynamic_direct_path_io = select_dynamic_direct_path_io(&vm.devices)
        .into_iter()
        .filter_map(|device| match &device.backing {
            PciPassthroughBacking::Dynamic { allowed_devices } => Some(allowed_devices.clone()),
            PciPassthroughBacking::Vgpu { .. } => None,
        })
        .collect();

    let preferred_disk_format = preferred_disk_format(sector_formats.iter().map(AsRef::as_ref));
    if let Some(format) = &preferred_disk_format {
        debug!("Preferred disk format: {format}");
    }

    PassthroughReport {
        vgpu_profiles,
        dynamic_direct_path_io,
        preferred_disk_format,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    fn virtual_machine() -> VirtualMachine {
        serde_yaml::from_str(indoc! {r#"
            name: gpu-0
            devices:
              - type: pciPassthrough
                backing:
                  kind: vgpu
                  profile: grid_t4-4q
              - type: disk
                backing:
                  kind: flatVer2
                  fileName: "[ds1] gpu-0/gpu-0.vmdk"
                  uuid: 6000C29a-0001
              - type: pciPassthrough
                backing:
                  kind: dynamic
                  allowedDevices:
                    - vendorId: 4318
                      deviceId: 7864
              - type: pciPassthrough
                backing:
                  kind: vgpu
                  profile: grid_t4-8q
              - type: cdrom
        "#})
        .unwrap()
    }

    #[test]
    fn test_identify_devices() {
        let names: Vec<_> = identify_devices(&virtual_machine())
            .into_iter()
            .map(|identity| identity.name)
            .collect();
        assert_eq!(names, vec!["gpu-0", "cdrom-0"]);
    }

    #[test]
    fn test_passthrough_report() {
        let report = passthrough_report(&virtual_machine(), &["emulated_512", "native_512"]);
        assert_eq!(
            report,
            PassthroughReport {
                vgpu_profiles: vec!["grid_t4-4q".into(), "grid_t4-8q".into()],
                dynamic_direct_path_io: vec![vec![AllowedPciDevice {
                    vendor_id: 0x10de,
                    device_id: 0x1eb8,
                }]],
                preferred_disk_format: Some(DatastoreSectorFormat::Native512),
            }
        );
        assert!(report.has_passthrough());

        assert_eq!(
            serde_json::to_value(&report).unwrap()["preferredDiskFormat"],
            "native_512"
        );
    }

    #[test]
    fn test_passthrough_report_without_passthrough() {
        let vm = VirtualMachine {
            name: "plain".into(),
            ..Default::default()
        };
        let report = passthrough_report::<String>(&vm, &[]);
        assert_eq!(report, PassthroughReport::default());
        assert!(!report.has_passthrough());
        assert!(serde_json::to_value(&report)
            .unwrap()
            .get("preferredDiskFormat")
            .is_none());
    }
}
