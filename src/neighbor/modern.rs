use super::NeighborTableStrategy;
use crate::constants::{IP_NEIGH_ARGS, IP_NEIGH_PROGRAM};
use crate::errors::NetworkDiscoveryError;
use crate::model::Device;
use crate::net::command::CommandRunner;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::debug;

/// `ip neigh` row, e.g.
///   192.168.0.1 dev eth0 lladdr 78:6a:1f:4d:ec:ab REACHABLE
static IP_NEIGH_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+\.\d+\.\d+\.\d+)\s+dev\s+\S+\s+lladdr\s+([0-9a-fA-F:]+)")
        .expect("ip neigh pattern is valid")
});

/// Kernel neighbor table read through iproute2
pub struct ModernNeighborTable {
    runner: Arc<dyn CommandRunner>,
}

impl ModernNeighborTable {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

/// Parse `ip neigh` output. The kernel table carries no host names.
pub fn parse_ip_neigh(output: &str) -> Vec<Device> {
    output
        .lines()
        .filter_map(|line| IP_NEIGH_ROW.captures(line))
        .map(|caps| Device::new(&caps[1], &caps[2], String::new()))
        .collect()
}

#[async_trait]
impl NeighborTableStrategy for ModernNeighborTable {
    fn name(&self) -> &'static str {
        "ip neigh"
    }

    async fn read_table(&self) -> Result<Vec<Device>, NetworkDiscoveryError> {
        let output = self.runner.run(IP_NEIGH_PROGRAM, IP_NEIGH_ARGS).await?;
        let devices = parse_ip_neigh(&output);
        debug!(
            "Parsed {} of {} ip neigh lines",
            devices.len(),
            output.lines().count()
        );
        Ok(devices)
    }
}
