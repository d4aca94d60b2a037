use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::constants::{
    SECTOR_FORMAT_EMULATED_512, SECTOR_FORMAT_NATIVE_4K, SECTOR_FORMAT_NATIVE_512,
};

/// Sector format supported by a datastore.
///
/// Formats unknown to this crate are kept verbatim in `Other` so that they can
/// still be reported back to the caller.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum DatastoreSectorFormat {
    Native4k,
    Native512,
    Emulated512,
    Other(String),
}

impl DatastoreSectorFormat {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Native4k => SECTOR_FORMAT_NATIVE_4K,
            Self::Native512 => SECTOR_FORMAT_NATIVE_512,
            Self::Emulated512 => SECTOR_FORMAT_EMULATED_512,
            Self::Other(other) => other,
        }
    }
}

impl From<&str> for DatastoreSectorFormat {
    fn from(value: &str) -> Self {
        match value {
            SECTOR_FORMAT_NATIVE_4K => Self::Native4k,
            SECTOR_FORMAT_NATIVE_512 => Self::Native512,
            SECTOR_FORMAT_EMULATED_512 => Self::Emulated512,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<&String> for DatastoreSectorFormat {
    fn from(value: &String) -> Self {
        value.as_str().into()
    }
}

impl From<String> for DatastoreSectorFormat {
    fn from(value: String) -> Self {
        value.as_str().into()
    }
}

impl From<&DatastoreSectorFormat> for DatastoreSectorFormat {
    fn from(value: &DatastoreSectorFormat) -> Self {
        value.clone()
    }
}

impl From<DatastoreSectorFormat> for String {
    fn from(value: DatastoreSectorFormat) -> Self {
        value.as_str().to_string()
    }
}

impl Display for DatastoreSectorFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
