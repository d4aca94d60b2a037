use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    path::PathBuf,
};

use clap::{Parser, Subcommand};
use log::LevelFilter;

use crate::VMHW_VERSION;

#[derive(Parser, Debug)]
#[clap(version = VMHW_VERSION)]
pub struct Cli {
    /// Logging verbosity [OFF, ERROR, WARN, INFO, DEBUG, TRACE]
    #[arg(global = true, short, long, default_value_t = LevelFilter::Info)]
    pub verbosity: LevelFilter,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the volume placements of a virtual machine
    Validate {
        /// Path to a virtual machine document
        #[clap(index = 1)]
        file: PathBuf,
    },

    /// Print the derived names and UUIDs of the disks and CD-ROMs of a
    /// virtual machine
    Identify {
        /// Path to a virtual machine document
        #[clap(index = 1)]
        file: PathBuf,

        /// Output format
        #[clap(short, long, default_value = "yaml")]
        format: OutputFormat,
    },

    /// Report the PCI passthrough devices of a virtual machine
    Passthrough {
        /// Path to a virtual machine document
        #[clap(index = 1)]
        file: PathBuf,

        /// Comma-separated list of the sector formats supported by the
        /// datastore, in discovery order
        #[clap(long, value_delimiter = ',', num_args = 0..)]
        sector_formats: Vec<String>,

        /// Output format
        #[clap(short, long, default_value = "yaml")]
        format: OutputFormat,
    },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Validate { .. } => "validate",
            Commands::Identify { .. } => "identify",
            Commands::Passthrough { .. } => "passthrough",
        }
    }
}

impl Display for Commands {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.name())
    }
}

#[derive(clap::ValueEnum, Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_validate() {
        let cli = Cli::try_parse_from(["vmhw", "validate", "vm.yaml"]).unwrap();
        assert_eq!(cli.verbosity, LevelFilter::Info);
        assert!(matches!(
            cli.command,
            Commands::Validate { ref file } if file == &PathBuf::from("vm.yaml")
        ));
        assert_eq!(cli.command.to_string(), "validate");
    }

    #[test]
    fn test_parse_identify() {
        let cli = Cli::try_parse_from(["vmhw", "identify", "vm.yaml", "--format", "json", "-v", "trace"])
            .unwrap();
        assert_eq!(cli.verbosity, LevelFilter::Trace);
        assert!(matches!(
            cli.command,
            Commands::Identify {
                format: OutputFormat::Json,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_passthrough() {
        let cli = Cli::try_parse_from([
            "vmhw",
            "passthrough",
            "vm.yaml",
            "--sector-formats",
            "emulated_512,native_4k",
        ])
        .unwrap();
        match cli.command {
            Commands::Passthrough {
                sector_formats,
                format,
                ..
            } => {
                assert_eq!(sector_formats, vec!["emulated_512", "native_4k"]);
                assert_eq!(format, OutputFormat::Yaml);
            }
            other => panic!("Unexpected command: {other}"),
        }
    }

    #[test]
    fn test_missing_file() {
        Cli::try_parse_from(["vmhw", "validate"]).unwrap_err();
    }
}
