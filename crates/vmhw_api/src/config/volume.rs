use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::is_default;

/// A volume requested by a virtual machine.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Volume {
    /// Name of the volume, unique within the virtual machine.
    pub name: String,

    /// Set when the volume is backed by a persistent volume claim. Other
    /// volume sources are not placed on SCSI controllers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistent_volume_claim: Option<PersistentVolumeClaimSource>,
}

/// A persistent-volume-claim backed disk, with its optional placement.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PersistentVolumeClaimSource {
    pub claim_name: String,

    #[serde(default, skip_serializing_if = "is_default")]
    pub read_only: bool,

    /// Bus number of the SCSI controller to attach to. Left unset, a later
    /// mutation pass assigns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller_bus_number: Option<i32>,

    /// Unit number on the controller. Left unset, a later mutation pass
    /// assigns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_number: Option<i32>,

    #[serde(default, skip_serializing_if = "is_default")]
    pub application_type: ApplicationType,
}

/// Clustered application a volume is shared with.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ApplicationType {
    #[default]
    None,
    OracleRAC,
    MicrosoftWSFC,
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn test_deserialize_volume() {
        let volume: Volume = serde_yaml::from_str(indoc! {r#"
            name: data
            persistentVolumeClaim:
              claimName: data-pvc
              controllerBusNumber: 1
              unitNumber: 3
              applicationType: OracleRAC
        "#})
        .unwrap();

        assert_eq!(
            volume,
            Volume {
                name: "data".into(),
                persistent_volume_claim: Some(PersistentVolumeClaimSource {
                    claim_name: "data-pvc".into(),
                    read_only: false,
                    controller_bus_number: Some(1),
                    unit_number: Some(3),
                    application_type: ApplicationType::OracleRAC,
                }),
            }
        );

        let yaml = serde_yaml::to_string(&volume).unwrap();
        assert!(!yaml.contains("readOnly"));
    }
}
