//! Derived identities of disks and CD-ROM drives.
//!
//! Devices carry no name of their own. A name, and for some disk backings a
//! UUID, is derived from the device's backing instead, with an ordinal based
//! fallback when the backing says nothing useful.

use std::collections::HashSet;

use log::{debug, trace};
use serde::Serialize;

use vmhw_api::{
    config::{CdromBacking, DiskBacking, VirtualCdrom, VirtualDevice, VirtualDisk},
    constants::{CDROM_FALLBACK_NAME_PREFIX, DISK_FALLBACK_NAME_PREFIX, NAME_COLLISION_SUFFIX},
};

/// Returns the last segment of `path` without its extension.
///
/// Everything from the last `.` of the segment onward is dropped. A segment
/// without a `.` is returned unchanged.
pub fn path_stem(path: &str) -> &str {
    let base = path.rsplit('/').next().unwrap_or(path);
    match base.rfind('.') {
        Some(dot) => &base[..dot],
        None => base,
    }
}

/// Returns `candidate`, suffixed as many times as needed to not be one of
/// `existing_names`.
pub fn unique_name(candidate: String, existing_names: &HashSet<String>) -> String {
    let mut name = candidate;
    while existing_names.contains(&name) {
        debug!("Device name '{name}' is already taken");
        name.push_str(NAME_COLLISION_SUFFIX);
    }
    name
}

fn non_empty(label: &Option<String>) -> Option<&str> {
    label.as_deref().filter(|l| !l.is_empty())
}

/// Derives the name and UUID of a disk, the `ordinal`-th disk of its virtual
/// machine.
///
/// The UUID is empty when the backing does not carry one. Disks without a
/// usable backing are named `disk-<ordinal>`.
pub fn extract_device_name_and_uuid(disk: Option<&VirtualDisk>, ordinal: usize) -> (String, String) {
    let fallback = || {
        trace!("Using fallback name for disk {ordinal}");
        (format!("{DISK_FALLBACK_NAME_PREFIX}-{ordinal}"), String::new())
    };

    let Some(backing) = disk.and_then(|d| d.backing.as_ref()) else {
        return fallback();
    };

    match backing {
        DiskBacking::SeSparse { file_name, uuid }
        | DiskBacking::SparseVer2 { file_name, uuid }
        | DiskBacking::FlatVer2 { file_name, uuid } => {
            (path_stem(file_name).to_string(), uuid.clone())
        }
        DiskBacking::RawDiskVer2 {
            descriptor_file_name,
            uuid,
        } => (path_stem(descriptor_file_name).to_string(), uuid.clone()),
        DiskBacking::SparseVer1 { file_name } => (path_stem(file_name).to_string(), String::new()),
        DiskBacking::Unknown {
            device_info_label, ..
        } => match non_empty(device_info_label) {
            Some(label) => (label.to_string(), String::new()),
            None => fallback(),
        },
    }
}

/// Derives the name of a CD-ROM drive, the `ordinal`-th CD-ROM of its virtual
/// machine, that is not one of `existing_names`.
///
/// `existing_names` is not updated. Callers naming several drives insert each
/// returned name before naming the next one.
pub fn extract_cdrom_name(
    cdrom: Option<&VirtualCdrom>,
    ordinal: usize,
    existing_names: &HashSet<String>,
) -> String {
    let candidate = match cdrom.and_then(|c| c.backing.as_ref()) {
        Some(CdromBacking::Iso { file_name }) => Some(path_stem(file_name).to_string()),
        Some(
            CdromBacking::RemotePassthrough { device_name }
            | CdromBacking::Atapi { device_name }
            | CdromBacking::RemoteAtapi { device_name }
            | CdromBacking::Passthrough { device_name },
        ) => Some(device_name.clone()),
        Some(CdromBacking::Unknown { device_info_label }) => {
            non_empty(device_info_label).map(str::to_string)
        }
        None => None,
    };

    let candidate = candidate.unwrap_or_else(|| {
        trace!("Using fallback name for CD-ROM {ordinal}");
        format!("{CDROM_FALLBACK_NAME_PREFIX}-{ordinal}")
    });

    unique_name(candidate, existing_names)
}

/// Identity of one disk or CD-ROM in a hardware inventory.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceIdentity {
    /// Position of the device in the inventory.
    pub index: usize,

    /// Device type, `disk` or `cdrom`.
    pub kind: &'static str,

    pub name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub uuid: String,
}

/// Names every disk and CD-ROM of an inventory, in order.
///
/// Disks and CD-ROMs are numbered separately for their fallback names. Every
/// name is unique within the returned list: a name already given to an
/// earlier device is suffixed.
pub fn resolve_device_identities(devices: &[VirtualDevice]) -> Vec<DeviceIdentity> {
    let mut names = HashSet::new();
    let mut identities = Vec::new();
    let (mut disks, mut cdroms) = (0, 0);

    for (index, device) in devices.iter().enumerate() {
        let (name, uuid) = match device {
            VirtualDevice::Disk(disk) => {
                let (name, uuid) = extract_device_name_and_uuid(Some(disk), disks);
                disks += 1;
                (unique_name(name, &names), uuid)
            }
            VirtualDevice::Cdrom(cdrom) => {
                let name = extract_cdrom_name(Some(cdrom), cdroms, &names);
                cdroms += 1;
                (name, String::new())
            }
            _ => continue,
        };

        debug!("Device {index} is '{name}'");
        names.insert(name.clone());
        identities.push(DeviceIdentity {
            index,
            kind: device.device_type().into(),
            name,
            uuid,
        });
    }

    identities
}
