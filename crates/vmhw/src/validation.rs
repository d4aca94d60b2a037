use std::path::Path;

use anyhow::{Context, Error};
use log::{debug, info};

use vmhw_api::config::VirtualMachine;

/// Reads and parses a virtual machine document.
pub fn load_virtual_machine(path: impl AsRef<Path>) -> Result<VirtualMachine, Error> {
    let contents = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read file: {}", path.as_ref().display()))?;

    serde_yaml::from_str::<VirtualMachine>(&contents).with_context(|| {
        format!(
            "Failed to parse virtual machine YAML file: {}",
            path.as_ref().display()
        )
    })
}

pub fn validate_virtual_machine_file(path: impl AsRef<Path>) -> Result<(), Error> {
    info!(
        "Validating virtual machine file: {}",
        path.as_ref().display()
    );

    validate_virtual_machine(&load_virtual_machine(path)?)
}

fn validate_virtual_machine(vm: &VirtualMachine) -> Result<(), Error> {
    vm.spec
        .validate()
        .with_context(|| format!("Virtual machine '{}' is invalid", vm.name))?;

    info!("Virtual machine '{}' is valid", vm.name);
    debug!(
        "Parsed contents:\n{}",
        serde_yaml::to_string(vm).context("Failed to serialize virtual machine")?
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use indoc::indoc;
    use tempfile::NamedTempFile;

    use vmhw_api::error::{ControllerSlotError, InvalidVirtualMachineError};

    fn write_document(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_validate_valid_file() {
        let file = write_document(indoc! {r#"
            name: web-0
            spec:
              hardware:
                scsiControllers:
                  - busNumber: 0
                    type: ParaVirtualSCSI
                  - busNumber: 1
                    type: LsiLogicSAS
                    sharingMode: Physical
              volumes:
                - name: data
                  persistentVolumeClaim:
                    claimName: data-pvc
                    controllerBusNumber: 0
                    unitNumber: 0
                - name: shared
                  persistentVolumeClaim:
                    claimName: shared-pvc
                    controllerBusNumber: 1
                    unitNumber: 0
                    applicationType: MicrosoftWSFC
                - name: pending
                  persistentVolumeClaim:
                    claimName: pending-pvc
        "#});

        validate_virtual_machine_file(file.path()).unwrap();
    }

    #[test]
    fn test_validate_invalid_file() {
        let file = write_document(indoc! {r#"
            name: web-0
            spec:
              hardware:
                scsiControllers:
                  - busNumber: 0
                    type: BusLogic
              volumes:
                - name: data
                  persistentVolumeClaim:
                    claimName: data-pvc
                    controllerBusNumber: 0
                    unitNumber: 15
        "#});

        let err = validate_virtual_machine_file(file.path()).unwrap_err();
        assert_eq!(err.to_string(), "Virtual machine 'web-0' is invalid");

        let invalid = err.downcast_ref::<InvalidVirtualMachineError>().unwrap();
        assert_eq!(
            invalid.errors()[0].reason,
            ControllerSlotError::UnitNumberOutOfRange {
                max_slots: 15,
                controller_type: "BusLogic".into(),
            }
        );
        assert!(format!("{err:#}").contains("unit number must be less than 15"));
    }

    #[test]
    fn test_validate_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yaml");

        let err = validate_virtual_machine_file(&path).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Failed to read file: {}", path.display())
        );
    }

    #[test]
    fn test_validate_malformed_file() {
        let file = write_document(indoc! {r#"
            name: web-0
            spec:
              hardware:
                ideControllers: []
        "#});

        let err = load_virtual_machine(file.path()).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Failed to parse virtual machine YAML file"));
    }
}
