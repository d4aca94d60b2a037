use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumDiscriminants, EnumIter, IntoStaticStr};

use crate::is_default;

/// A virtual device attached to a virtual machine, as observed in its hardware
/// inventory.
///
/// Devices carry no identity of their own. Names and UUIDs are derived from the
/// backing data, see the identity resolver in the `vmhw` crate.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, EnumDiscriminants)]
#[serde(tag = "type", rename_all = "camelCase", deny_unknown_fields)]
#[strum_discriminants(
    name(VirtualDeviceType),
    derive(Hash, Display, EnumIter, IntoStaticStr),
    strum(serialize_all = "camelCase")
)]
pub enum VirtualDevice {
    /// # PCI passthrough device
    ///
    /// Either a dynamic DirectPath I/O device or an NVIDIA vGPU.
    PciPassthrough(VirtualPciPassthrough),

    /// # SR-IOV ethernet card
    SriovEthernetCard(VirtualSriovEthernetCard),

    /// # VMXNET3 ethernet card
    Vmxnet3(VirtualVmxnet3),

    /// # Virtual disk
    Disk(VirtualDisk),

    /// # Virtual CD-ROM
    Cdrom(VirtualCdrom),

    /// # Any other device
    ///
    /// Treated opaquely, only its kind is retained.
    Other(OpaqueDevice),
}

impl VirtualDevice {
    /// Returns the discriminant of this device.
    pub fn device_type(&self) -> VirtualDeviceType {
        self.into()
    }
}

/// A PCI device mapped directly into the guest.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VirtualPciPassthrough {
    /// How the passthrough is realized on the host.
    #[serde(default)]
    pub backing: PciPassthroughBacking,
}

/// Backing of a PCI passthrough device.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(
    tag = "kind",
    rename_all = "camelCase",
    rename_all_fields = "camelCase",
    deny_unknown_fields
)]
pub enum PciPassthroughBacking {
    /// # Dynamic DirectPath I/O
    ///
    /// The device is selected at power on from the listed vendor/device pairs.
    Dynamic {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        allowed_devices: Vec<AllowedPciDevice>,
    },

    /// # NVIDIA vGPU
    ///
    /// A partition of a physical GPU described by a vGPU profile.
    Vgpu { profile: String },
}

impl Default for PciPassthroughBacking {
    fn default() -> Self {
        Self::Dynamic {
            allowed_devices: Vec::new(),
        }
    }
}

/// A PCI vendor/device id pair a dynamic DirectPath I/O device may be bound to.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AllowedPciDevice {
    pub vendor_id: u16,
    pub device_id: u16,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VirtualSriovEthernetCard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VirtualVmxnet3 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,

    /// Whether Uniform Passthrough (UPTv2) is enabled. Unset means disabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptv2_enabled: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OpaqueDevice {
    /// Free-form device kind, e.g. `virtualKeyboard`.
    pub kind: String,
}

/// A virtual disk.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VirtualDisk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backing: Option<DiskBacking>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller_key: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_number: Option<i32>,

    #[serde(default, skip_serializing_if = "is_default")]
    pub capacity_in_bytes: u64,
}

/// Storage backing of a virtual disk.
///
/// The file path lives in `file_name` for every variant except `RawDiskVer2`,
/// which only has a descriptor file. A UUID is present only for the variants
/// that model one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(
    tag = "kind",
    rename_all = "camelCase",
    rename_all_fields = "camelCase",
    deny_unknown_fields
)]
pub enum DiskBacking {
    SeSparse {
        file_name: String,
        #[serde(default)]
        uuid: String,
    },
    SparseVer1 {
        file_name: String,
    },
    SparseVer2 {
        file_name: String,
        #[serde(default)]
        uuid: String,
    },
    FlatVer2 {
        file_name: String,
        #[serde(default)]
        uuid: String,
    },
    RawDiskVer2 {
        descriptor_file_name: String,
        #[serde(default)]
        uuid: String,
    },
    /// Any backing not modeled above.
    Unknown {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        device_info_label: Option<String>,
    },
}

/// A virtual CD-ROM drive.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VirtualCdrom {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backing: Option<CdromBacking>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller_key: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_number: Option<i32>,
}

/// Backing of a virtual CD-ROM drive.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(
    tag = "kind",
    rename_all = "camelCase",
    rename_all_fields = "camelCase",
    deny_unknown_fields
)]
pub enum CdromBacking {
    Iso {
        file_name: String,
    },
    RemotePassthrough {
        device_name: String,
    },
    Atapi {
        device_name: String,
    },
    RemoteAtapi {
        device_name: String,
    },
    Passthrough {
        device_name: String,
    },
    /// Any backing not modeled above.
    Unknown {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        device_info_label: Option<String>,
    },
}

/// The operation a device change applies.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum DeviceChangeOperation {
    #[default]
    Add,
    Edit,
    Remove,
}

/// A single entry of a reconfiguration request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeviceChange {
    #[serde(default)]
    pub operation: DeviceChangeOperation,

    /// The device the change refers to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<VirtualDevice>,
}

impl From<VirtualDevice> for DeviceChange {
    fn from(device: VirtualDevice) -> Self {
        Self {
            operation: DeviceChangeOperation::Add,
            device: Some(device),
        }
    }
}
