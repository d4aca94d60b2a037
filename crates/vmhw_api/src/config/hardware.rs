use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::{
    constants::{
        MAX_BUS_LOGIC_SLOTS, MAX_LSI_LOGIC_SAS_SLOTS, MAX_LSI_LOGIC_SLOTS,
        MAX_PARA_VIRTUAL_SCSI_SLOTS,
    },
    is_default,
};

/// Declared virtual hardware of a virtual machine.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HardwareSpec {
    /// SCSI controllers. At most one controller may use a given bus number.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scsi_controllers: Vec<ScsiController>,
}

/// A SCSI controller declared on a virtual machine.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScsiController {
    /// Bus number of the controller, `0..=3`.
    pub bus_number: i32,

    /// Controller model.
    #[serde(default, rename = "type")]
    pub controller_type: ScsiControllerType,

    /// Bus sharing mode.
    #[serde(default, skip_serializing_if = "is_default")]
    pub sharing_mode: SharingMode,
}

/// SCSI controller model.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ScsiControllerType {
    /// # VMware Paravirtual SCSI
    #[default]
    ParaVirtualSCSI,

    /// # BusLogic Parallel
    BusLogic,

    /// # LSI Logic Parallel
    LsiLogic,

    /// # LSI Logic SAS
    LsiLogicSAS,

    /// # Unrecognized controller model
    ///
    /// Accepted so that documents written against a newer hardware model still
    /// parse. Treated like a ParaVirtual SCSI controller.
    #[serde(other)]
    Unknown,
}

impl ScsiControllerType {
    /// Exclusive upper bound for the unit numbers of devices attached to a
    /// controller of this type.
    pub fn max_slots(&self) -> i32 {
        match self {
            Self::ParaVirtualSCSI => MAX_PARA_VIRTUAL_SCSI_SLOTS,
            Self::BusLogic => MAX_BUS_LOGIC_SLOTS,
            Self::LsiLogic => MAX_LSI_LOGIC_SLOTS,
            Self::LsiLogicSAS => MAX_LSI_LOGIC_SAS_SLOTS,
            Self::Unknown => MAX_PARA_VIRTUAL_SCSI_SLOTS,
        }
    }
}

/// Whether, and how, the disks on a controller's bus may be shared between
/// virtual machines.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum SharingMode {
    /// # No bus sharing
    #[default]
    None,

    /// # Physical bus sharing
    ///
    /// Disks may be shared with virtual machines on any host.
    Physical,

    /// # Virtual bus sharing
    ///
    /// Disks may be shared with virtual machines on the same host.
    Virtual,
}
