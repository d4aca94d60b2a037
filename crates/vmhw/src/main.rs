use std::process::ExitCode;

use anyhow::{Context, Error};
use clap::Parser;
use log::{error, info};
use serde::Serialize;

use vmhw::{
    cli::{Cli, Commands, OutputFormat},
    inventory, validation,
};

fn print_output(value: &impl Serialize, format: OutputFormat) -> Result<(), Error> {
    let output = match format {
        OutputFormat::Yaml => serde_yaml::to_string(value).context("Failed to serialize YAML")?,
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).context("Failed to serialize JSON")?
        }
    };
    println!("{}", output.trim_end());
    Ok(())
}

fn run(args: &Cli) -> Result<(), Error> {
    match &args.command {
        Commands::Validate { file } => validation::validate_virtual_machine_file(file),

        Commands::Identify { file, format } => {
            let vm = validation::load_virtual_machine(file)?;
            print_output(&inventory::identify_devices(&vm), *format)
        }

        Commands::Passthrough {
            file,
            sector_formats,
            format,
        } => {
            let vm = validation::load_virtual_machine(file)?;
            let report = inventory::passthrough_report(&vm, sector_formats);
            if !report.has_passthrough() {
                info!("Virtual machine '{}' has no passthrough devices", vm.name);
            }
            print_output(&report, *format)
        }
    }
}

fn main() -> ExitCode {
    // Parse args
    let args = Cli::parse();

    env_logger::builder()
        .format_timestamp(None)
        .filter_level(args.verbosity)
        .init();

    info!("vmhw version: {}", vmhw::VMHW_VERSION);

    if let Err(e) = run(&args) {
        error!("Failed to execute '{}' command: {e:?}", args.command);
        return ExitCode::from(2);
    }
    ExitCode::SUCCESS
}
