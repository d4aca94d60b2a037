// Controller placement constants

/// Maximum number of SCSI controllers a virtual machine can have. Valid bus
/// numbers are `0..MAX_SCSI_CONTROLLERS`.
pub const MAX_SCSI_CONTROLLERS: i32 = 4;

/// Unit number occupied by a SCSI controller on its own bus. Never available
/// to an attached device, regardless of controller type.
pub const SCSI_CONTROLLER_UNIT_NUMBER: i32 = 7;

/// Exclusive upper bound for unit numbers on a ParaVirtual SCSI controller.
pub const MAX_PARA_VIRTUAL_SCSI_SLOTS: i32 = 63;

/// Exclusive upper bound for unit numbers on a BusLogic controller.
pub const MAX_BUS_LOGIC_SLOTS: i32 = 15;

/// Exclusive upper bound for unit numbers on an LSI Logic controller.
pub const MAX_LSI_LOGIC_SLOTS: i32 = 15;

/// Exclusive upper bound for unit numbers on an LSI Logic SAS controller.
pub const MAX_LSI_LOGIC_SAS_SLOTS: i32 = 15;

// Device naming constants

/// Prefix of the synthetic name given to a disk without a usable backing.
pub const DISK_FALLBACK_NAME_PREFIX: &str = "disk";

/// Prefix of the synthetic name given to a CD-ROM without a usable backing.
pub const CDROM_FALLBACK_NAME_PREFIX: &str = "cdrom";

/// Suffix appended to a device name until it no longer collides with an
/// already assigned name.
pub const NAME_COLLISION_SUFFIX: &str = "-0";

// Sector format wire names

/// 4K native sector format.
pub const SECTOR_FORMAT_NATIVE_4K: &str = "native_4k";

/// 512 byte native sector format.
pub const SECTOR_FORMAT_NATIVE_512: &str = "native_512";

/// 512 byte emulated sector format.
pub const SECTOR_FORMAT_EMULATED_512: &str = "emulated_512";
