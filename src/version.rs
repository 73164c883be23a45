/// Version of the software, taken from the Cargo package metadata.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
