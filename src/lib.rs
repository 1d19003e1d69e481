//! lanping - local network neighbor scanner
//!
//! This library provides:
//! - Subnet detection from the host's network interfaces
//! - Neighbor discovery from the OS ARP / neighbor table
//! - Concurrent latency probing with a bounded number of pings in flight

pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod model;
pub mod neighbor;
pub mod net;
pub mod table;

// Re-export commonly used types for convenience
pub use config::ScanConfig;
pub use engine::NetworkScanner;
pub use errors::NetworkDiscoveryError;
pub use model::{DetectedSubnet, Device, PingResult, ProbeOutcome, ScanReport};
pub use neighbor::{LegacyArpCache, ModernNeighborTable, NeighborDiscovery, NeighborTableStrategy};
pub use net::command::{CommandRunner, SystemCommandRunner};
pub use net::interface::{detect_subnet, InterfaceEntry, InterfaceSource, SystemInterfaces};
pub use net::ping::{LatencyProbe, PingExecutor, ProbeScheduler, SystemPing};
