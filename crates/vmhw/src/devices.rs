//! Selection and classification of virtual devices.
//!
//! Everything here is a pure function over a borrowed device list. Selected
//! devices are returned as references in their original order.

use vmhw_api::config::{
    DatastoreSectorFormat, DeviceChange, OpaqueDevice, PciPassthroughBacking, VirtualCdrom,
    VirtualDevice, VirtualDeviceType, VirtualDisk, VirtualPciPassthrough,
    VirtualSriovEthernetCard, VirtualVmxnet3,
};

/// A predicate over a single device.
pub type DevicePredicate<'a> = &'a dyn Fn(&VirtualDevice) -> bool;

/// Returns the devices for which every predicate holds, in input order.
///
/// An empty predicate list selects nothing. Pass [`select_all`] to select
/// every device.
pub fn select_devices<'d>(
    devices: &'d [VirtualDevice],
    predicates: &[DevicePredicate<'_>],
) -> Vec<&'d VirtualDevice> {
    if predicates.is_empty() {
        return Vec::new();
    }

    devices
        .iter()
        .filter(|&device| predicates.iter().all(|predicate| predicate(device)))
        .collect()
}

/// Predicate that holds for every device.
pub fn select_all(_: &VirtualDevice) -> bool {
    true
}

/// A concrete device type that a [`VirtualDevice`] can be narrowed to.
pub trait DeviceVariant {
    /// Returns the inner device if `device` is of this type.
    fn narrow(device: &VirtualDevice) -> Option<&Self>;
}

macro_rules! impl_device_variant {
    ($($variant:ident => $ty:ty),+ $(,)?) => {
        $(
            impl DeviceVariant for $ty {
                fn narrow(device: &VirtualDevice) -> Option<&Self> {
                    match device {
                        VirtualDevice::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )+
    };
}

impl_device_variant! {
    PciPassthrough => VirtualPciPassthrough,
    SriovEthernetCard => VirtualSriovEthernetCard,
    Vmxnet3 => VirtualVmxnet3,
    Disk => VirtualDisk,
    Cdrom => VirtualCdrom,
    Other => OpaqueDevice,
}

/// Returns the devices of type `T`, narrowed, in input order.
pub fn select_devices_by_type<T: DeviceVariant>(devices: &[VirtualDevice]) -> Vec<&T> {
    devices.iter().filter_map(T::narrow).collect()
}

/// Returns the devices whose type is any of `device_types`, in input order.
pub fn select_devices_by_types<'d>(
    devices: &'d [VirtualDevice],
    device_types: &[VirtualDeviceType],
) -> Vec<&'d VirtualDevice> {
    devices
        .iter()
        .filter(|device| device_types.contains(&device.device_type()))
        .collect()
}

/// Returns true if the device is an NVIDIA vGPU, i.e. a PCI passthrough device
/// backed by a non-empty vGPU profile.
pub fn is_nvidia_vgpu(device: &VirtualDevice) -> bool {
    matches!(
        VirtualPciPassthrough::narrow(device).map(|d| &d.backing),
        Some(PciPassthroughBacking::Vgpu { profile }) if !profile.is_empty()
    )
}

/// Returns true if the device is a dynamic DirectPath I/O device.
pub fn is_dynamic_direct_path_io(device: &VirtualDevice) -> bool {
    matches!(
        VirtualPciPassthrough::narrow(device).map(|d| &d.backing),
        Some(PciPassthroughBacking::Dynamic { .. })
    )
}

/// Returns the NVIDIA vGPU devices, in input order.
pub fn select_nvidia_vgpu(devices: &[VirtualDevice]) -> Vec<&VirtualPciPassthrough> {
    select_devices(devices, &[&is_nvidia_vgpu])
        .into_iter()
        .filter_map(VirtualPciPassthrough::narrow)
        .collect()
}

/// Returns the dynamic DirectPath I/O devices, in input order.
pub fn select_dynamic_direct_path_io(devices: &[VirtualDevice]) -> Vec<&VirtualPciPassthrough> {
    select_devices(devices, &[&is_dynamic_direct_path_io])
        .into_iter()
        .filter_map(VirtualPciPassthrough::narrow)
        .collect()
}

/// Returns true if any of the changes refers to a vGPU or dynamic DirectPath
/// I/O device, whatever the operation.
pub fn has_pci_passthrough_change(changes: &[DeviceChange]) -> bool {
    changes
        .iter()
        .filter_map(|change| change.device.as_ref())
        .any(|device| is_nvidia_vgpu(device) || is_dynamic_direct_path_io(device))
}

/// Picks the best sector format out of those a datastore supports.
///
/// Native 4K is preferred, then native 512, then emulated 512. When none of
/// those is available the first candidate is returned, and `None` when there
/// are no candidates.
pub fn preferred_disk_format<I>(candidates: I) -> Option<DatastoreSectorFormat>
where
    I: IntoIterator,
    I::Item: Into<DatastoreSectorFormat>,
{
    let candidates: Vec<DatastoreSectorFormat> = candidates.into_iter().map(Into::into).collect();

    [
        DatastoreSectorFormat::Native4k,
        DatastoreSectorFormat::Native512,
        DatastoreSectorFormat::Emulated512,
    ]
    .into_iter()
    .find(|preferred| candidates.contains(preferred))
    .or_else(|| candidates.into_iter().next())
}
