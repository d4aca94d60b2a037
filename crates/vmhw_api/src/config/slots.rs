use std::collections::HashMap;

use log::{debug, trace};

use crate::{
    config::{ScsiController, ScsiControllerType, Volume},
    constants::{MAX_SCSI_CONTROLLERS, SCSI_CONTROLLER_UNIT_NUMBER},
    error::{ControllerSlotError, FieldPath, InvalidFieldError},
};

/// What the validator needs to know about a declared controller.
#[derive(Debug, Clone, Copy)]
struct ControllerInfo {
    controller_type: ScsiControllerType,
    max_slots: i32,
}

impl From<&ScsiController> for ControllerInfo {
    fn from(controller: &ScsiController) -> Self {
        Self {
            controller_type: controller.controller_type,
            max_slots: controller.controller_type.max_slots(),
        }
    }
}

/// Validate that every persistent-volume-claim volume's requested controller
/// slot is physically realizable on the declared controllers.
///
/// Volumes without a controller bus number, and unit numbers that are unset,
/// are left for a later mutation pass and are not errors. The application type
/// of a volume is not checked against the controller's sharing mode either.
///
/// Returns every violation, in volume order. At most one violation is reported
/// per volume.
pub fn validate_controller_slots(
    controllers: &[ScsiController],
    volumes: &[Volume],
) -> Vec<InvalidFieldError> {
    let mut errors = Vec::new();

    if volumes.is_empty() {
        return errors;
    }

    let volumes_path = FieldPath::new(["spec", "volumes"]);

    let declared: HashMap<i32, ControllerInfo> = controllers
        .iter()
        .map(|c| (c.bus_number, ControllerInfo::from(c)))
        .collect();

    // bus number -> unit number -> name of the volume holding it
    let mut used_unit_numbers: HashMap<i32, HashMap<i32, &str>> = HashMap::new();

    for (i, volume) in volumes.iter().enumerate() {
        let Some(pvc) = &volume.persistent_volume_claim else {
            continue;
        };

        let Some(bus_number) = pvc.controller_bus_number else {
            trace!(
                "Volume '{}' has no controller bus number yet, skipping",
                volume.name
            );
            continue;
        };

        let pvc_path = volumes_path.index(i).child("persistentVolumeClaim");
        let mut reject = |field: &str, value: i32, reason: ControllerSlotError| {
            let error = InvalidFieldError {
                field: pvc_path.child(field),
                value,
                reason,
            };
            debug!("Volume '{}' rejected: {error}", volume.name);
            errors.push(error);
        };

        if !(0..MAX_SCSI_CONTROLLERS).contains(&bus_number) {
            reject(
                "controllerBusNumber",
                bus_number,
                ControllerSlotError::BusNumberOutOfRange {
                    max_bus_number: MAX_SCSI_CONTROLLERS - 1,
                },
            );
            continue;
        }

        let Some(controller) = declared.get(&bus_number) else {
            reject(
                "controllerBusNumber",
                bus_number,
                ControllerSlotError::ControllerNotFound { bus_number },
            );
            continue;
        };

        let Some(unit_number) = pvc.unit_number else {
            continue;
        };

        if unit_number == SCSI_CONTROLLER_UNIT_NUMBER {
            reject(
                "unitNumber",
                unit_number,
                ControllerSlotError::UnitNumberReserved,
            );
            continue;
        }

        if unit_number >= controller.max_slots {
            reject(
                "unitNumber",
                unit_number,
                ControllerSlotError::UnitNumberOutOfRange {
                    max_slots: controller.max_slots,
                    controller_type: controller.controller_type.to_string(),
                },
            );
            continue;
        }

        let used = used_unit_numbers.entry(bus_number).or_default();
        if let Some(existing) = used.get(&unit_number) {
            reject(
                "unitNumber",
                unit_number,
                ControllerSlotError::UnitNumberInUse {
                    unit_number,
                    bus_number,
                    volume: existing.to_string(),
                },
            );
            continue;
        }
        used.insert(unit_number, &volume.name);
    }

    errors
}
