use thiserror::Error;

/// Error types for subnet detection and neighbor discovery
///
/// Per-host probe failures are never surfaced here; they become
/// timeout rows in the scan results.
#[derive(Error, Debug)]
pub enum NetworkDiscoveryError {
    #[error("listing interfaces: {0}")]
    InterfaceEnumeration(String),

    #[error("interface \"{0}\" not found or has no IPv4 address")]
    InterfaceNotFound(String),

    #[error("no suitable network interface found")]
    NoSuitableInterface,

    #[error("reading neighbor table: {0}")]
    DiscoveryCommand(String),

    #[error("{program} exited with {status}")]
    CommandFailed { program: String, status: String },

    #[error("I/O Error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    InvalidArgument(String),
}
