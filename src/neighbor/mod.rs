use crate::errors::NetworkDiscoveryError;
use crate::model::Device;
use crate::net::command::{CommandRunner, SystemCommandRunner};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

// Submodule declarations
pub mod legacy;
pub mod modern;

pub use legacy::LegacyArpCache;
pub use modern::ModernNeighborTable;

/// Neighbor table strategy trait
///
/// Each strategy reads the operating system's IP-to-MAC cache through
/// one particular tool and turns its output into devices. Lines that do
/// not look like a complete entry are skipped, so a successful run with
/// nothing usable is simply an empty list.
#[async_trait]
pub trait NeighborTableStrategy: Send + Sync {
    /// Query the table. `Err` means the tool could not be run.
    async fn read_table(&self) -> Result<Vec<Device>, NetworkDiscoveryError>;

    /// Return a human-readable name for this strategy
    fn name(&self) -> &'static str;
}

/// Reads the neighbor table, falling back across strategies
pub struct NeighborDiscovery {
    strategies: Vec<Box<dyn NeighborTableStrategy>>,
}

impl NeighborDiscovery {
    pub fn new(strategies: Vec<Box<dyn NeighborTableStrategy>>) -> Self {
        Self { strategies }
    }

    /// Strategies for the platform this binary runs on
    pub fn for_platform(runner: Arc<dyn CommandRunner>) -> Self {
        Self::for_os(std::env::consts::OS, runner)
    }

    /// Linux has the kernel table via iproute2 with `arp -a` behind it;
    /// everything else only has `arp -a`.
    pub fn for_os(os: &str, runner: Arc<dyn CommandRunner>) -> Self {
        let mut strategies: Vec<Box<dyn NeighborTableStrategy>> = Vec::new();
        if os == "linux" {
            strategies.push(Box::new(ModernNeighborTable::new(runner.clone())));
        }
        strategies.push(Box::new(LegacyArpCache::new(runner)));
        Self::new(strategies)
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Return the first non-empty table, else the last strategy's answer
    ///
    /// Fails only when no strategy could be run at all.
    pub async fn discover(&self) -> Result<Vec<Device>, NetworkDiscoveryError> {
        let mut any_succeeded = false;
        let mut failures = Vec::new();

        for strategy in &self.strategies {
            match strategy.read_table().await {
                Ok(devices) if !devices.is_empty() => {
                    info!("{} listed {} devices", strategy.name(), devices.len());
                    return Ok(devices);
                }
                Ok(_) => {
                    debug!("{} listed no devices", strategy.name());
                    any_succeeded = true;
                }
                Err(e) => {
                    warn!("{} failed: {}", strategy.name(), e);
                    failures.push(format!("{}: {}", strategy.name(), e));
                }
            }
        }

        if any_succeeded || failures.is_empty() {
            Ok(Vec::new())
        } else {
            Err(NetworkDiscoveryError::DiscoveryCommand(failures.join("; ")))
        }
    }
}

impl Default for NeighborDiscovery {
    fn default() -> Self {
        Self::for_platform(Arc::new(SystemCommandRunner))
    }
}
