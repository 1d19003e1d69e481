use crate::config::ScanConfig;
use crate::errors::NetworkDiscoveryError;
use crate::model::{DetectedSubnet, Device, PingResult, ScanReport};
use crate::neighbor::NeighborDiscovery;
use crate::net::command::{CommandRunner, SystemCommandRunner};
use crate::net::interface::{self, InterfaceSource, SystemInterfaces};
use crate::net::ping::{LatencyProbe, ProbeScheduler, SystemPing};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Main scan engine: subnet detection, neighbor discovery, then probing
pub struct NetworkScanner {
    interfaces: Box<dyn InterfaceSource>,
    discovery: NeighborDiscovery,
    scheduler: ProbeScheduler,
    config: ScanConfig,
}

impl NetworkScanner {
    /// Create a scanner that talks to the real operating system
    pub fn new(config: ScanConfig) -> Self {
        let runner: Arc<dyn CommandRunner> = Arc::new(SystemCommandRunner);
        let probe = LatencyProbe::new(Arc::new(SystemPing::new(runner.clone())));

        Self {
            interfaces: Box::new(SystemInterfaces),
            discovery: NeighborDiscovery::for_platform(runner),
            scheduler: ProbeScheduler::with_limit(probe, config.max_concurrent_pings),
            config,
        }
    }

    /// Create a scanner from explicit parts
    pub fn with_components(
        config: ScanConfig,
        interfaces: Box<dyn InterfaceSource>,
        discovery: NeighborDiscovery,
        scheduler: ProbeScheduler,
    ) -> Self {
        Self {
            interfaces,
            discovery,
            scheduler,
            config,
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn detect_subnet(&self) -> Result<DetectedSubnet, NetworkDiscoveryError> {
        interface::detect_subnet(self.interfaces.as_ref(), self.config.interface.as_deref())
    }

    pub async fn discover_devices(&self) -> Result<Vec<Device>, NetworkDiscoveryError> {
        self.discovery.discover().await
    }

    pub async fn probe_devices(&self, devices: &[Device]) -> Vec<PingResult> {
        self.scheduler
            .schedule_all(devices, self.config.ping_timeout_ms)
            .await
    }

    /// Run all three stages; subnet or discovery errors stop before probing.
    pub async fn run(&self) -> Result<ScanReport, NetworkDiscoveryError> {
        let scan_start = Instant::now();

        let subnet = self.detect_subnet()?;
        info!("Scanning {}", subnet);

        let devices = self.discover_devices().await?;
        let results = self.probe_devices(&devices).await;

        info!(
            "Scan of {} finished in {:.2}s",
            subnet.cidr,
            scan_start.elapsed().as_secs_f64()
        );

        Ok(ScanReport { subnet, results })
    }
}
