//! Validation errors for the virtual machine hardware description.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// Path to a field of a virtual machine document, e.g.
/// `spec.volumes[0].persistentVolumeClaim.unitNumber`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(into = "String", from = "String")]
pub struct FieldPath(String);

impl FieldPath {
    /// Creates a path from its leading segments.
    pub fn new<'a>(segments: impl IntoIterator<Item = &'a str>) -> Self {
        segments
            .into_iter()
            .fold(Self(String::new()), |path, segment| path.child(segment))
    }

    /// Returns the path to the named child field.
    pub fn child(&self, name: &str) -> Self {
        if self.0.is_empty() {
            Self(name.to_string())
        } else {
            Self(format!("{}.{name}", self.0))
        }
    }

    /// Returns the path to the element at `index` of this (list) field.
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.0
    }
}

impl From<String> for FieldPath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

/// Identifies why a volume's requested controller slot cannot be realized.
#[derive(thiserror::Error, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ControllerSlotError {
    #[error("must be between 0 and {max_bus_number}")]
    BusNumberOutOfRange { max_bus_number: i32 },

    #[error("SCSI controller with bus number {bus_number} does not exist")]
    ControllerNotFound { bus_number: i32 },

    #[error("unit number 7 is reserved for the SCSI controller itself")]
    UnitNumberReserved,

    #[error("unit number must be less than {max_slots} for {controller_type} controller")]
    UnitNumberOutOfRange {
        max_slots: i32,
        controller_type: String,
    },

    #[error("unit number {unit_number} on controller {bus_number} is already used by volume {volume}")]
    UnitNumberInUse {
        unit_number: i32,
        bus_number: i32,
        volume: String,
    },
}

/// A rejected field value together with the reason it was rejected.
#[derive(thiserror::Error, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[error("{field}: Invalid value: {value}: {reason}")]
pub struct InvalidFieldError {
    pub field: FieldPath,
    pub value: i32,
    pub reason: ControllerSlotError,
}

/// Every problem found by one validation pass over a virtual machine.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct InvalidVirtualMachineError(pub Vec<InvalidFieldError>);

impl InvalidVirtualMachineError {
    pub fn errors(&self) -> &[InvalidFieldError] {
        &self.0
    }
}

impl std::error::Error for InvalidVirtualMachineError {}

impl Display for InvalidVirtualMachineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.0.as_slice() {
            [single] => write!(f, "{single}"),
            errors => write!(
                f,
                "[{}]",
                errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}
