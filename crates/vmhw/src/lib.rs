pub mod cli;
pub mod devices;
pub mod identity;
pub mod inventory;
pub mod validation;

pub const VMHW_VERSION: &str = env!("CARGO_PKG_VERSION");
