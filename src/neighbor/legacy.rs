use super::NeighborTableStrategy;
use crate::constants::{ARP_ARGS, ARP_PROGRAM};
use crate::errors::NetworkDiscoveryError;
use crate::model::Device;
use crate::net::command::CommandRunner;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::debug;

/// `arp -a` row, same shape on macOS and Linux net-tools:
///   router.local (192.168.0.1) at 78:6a:1f:4d:ec:ab on en0 ifscope [ethernet]
///   ? (192.168.0.42) at aa:bb:cc:dd:ee:ff [ether] on eth0
/// Incomplete entries ("at (incomplete)", "at <incomplete>") do not match.
static ARP_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\S+)\s+\((\d+\.\d+\.\d+\.\d+)\)\s+at\s+([0-9a-fA-F:]+)")
        .expect("arp pattern is valid")
});

/// ARP cache read through the `arp` command
pub struct LegacyArpCache {
    runner: Arc<dyn CommandRunner>,
}

impl LegacyArpCache {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

/// Parse `arp -a` output; a `?` host name means the table has none.
pub fn parse_arp_output(output: &str) -> Vec<Device> {
    output
        .lines()
        .filter_map(|line| ARP_ROW.captures(line))
        .map(|caps| {
            let hostname = match &caps[1] {
                "?" => String::new(),
                name => name.to_string(),
            };
            Device::new(&caps[2], &caps[3], hostname)
        })
        .collect()
}

#[async_trait]
impl NeighborTableStrategy for LegacyArpCache {
    fn name(&self) -> &'static str {
        "arp -a"
    }

    async fn read_table(&self) -> Result<Vec<Device>, NetworkDiscoveryError> {
        let output = self.runner.run(ARP_PROGRAM, ARP_ARGS).await?;
        let devices = parse_arp_output(&output);
        debug!(
            "Parsed {} of {} arp lines",
            devices.len(),
            output.lines().count()
        );
        Ok(devices)
    }
}
