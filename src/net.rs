use crate::constants::{MAX_CONCURRENT_PINGS, PING_PROGRAM};
use crate::errors::NetworkDiscoveryError;
use crate::model::{DetectedSubnet, Device, PingResult, ProbeOutcome};
use async_trait::async_trait;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// External process execution
pub mod command {
    use super::*;
    use tokio::process::Command;

    /// Runs an external program and hands back its stdout
    ///
    /// Discovery and probing only talk to the operating system through
    /// this trait, so their parsing can be exercised with canned output.
    #[async_trait]
    pub trait CommandRunner: Send + Sync {
        async fn run(&self, program: &str, args: &[&str]) -> Result<String, NetworkDiscoveryError>;
    }

    /// Spawns real processes with tokio
    #[derive(Debug, Default, Clone, Copy)]
    pub struct SystemCommandRunner;

    #[async_trait]
    impl CommandRunner for SystemCommandRunner {
        async fn run(&self, program: &str, args: &[&str]) -> Result<String, NetworkDiscoveryError> {
            let output = Command::new(program).args(args).output().await?;

            if !output.status.success() {
                return Err(NetworkDiscoveryError::CommandFailed {
                    program: program.to_string(),
                    status: output.status.to_string(),
                });
            }

            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        }
    }
}

/// Network interface detection and subnet selection
pub mod interface {
    use super::*;
    use pnet::datalink;
    use pnet::ipnetwork::{IpNetwork, Ipv4Network};

    /// The parts of an OS interface that subnet selection looks at
    #[derive(Debug, Clone)]
    pub struct InterfaceEntry {
        pub name: String,
        pub is_up: bool,
        pub is_loopback: bool,
        pub ips: Vec<IpNetwork>,
    }

    impl From<&datalink::NetworkInterface> for InterfaceEntry {
        fn from(iface: &datalink::NetworkInterface) -> Self {
            Self {
                name: iface.name.clone(),
                is_up: iface.is_up(),
                is_loopback: iface.is_loopback(),
                ips: iface.ips.clone(),
            }
        }
    }

    /// Source of the interface list, in OS enumeration order
    pub trait InterfaceSource: Send + Sync {
        fn interfaces(&self) -> Result<Vec<InterfaceEntry>, NetworkDiscoveryError>;
    }

    /// Reads interfaces from the host via pnet
    #[derive(Debug, Default, Clone, Copy)]
    pub struct SystemInterfaces;

    impl InterfaceSource for SystemInterfaces {
        fn interfaces(&self) -> Result<Vec<InterfaceEntry>, NetworkDiscoveryError> {
            Ok(datalink::interfaces().iter().map(InterfaceEntry::from).collect())
        }
    }

    /// Pick the subnet to scan from the interfaces `source` reports
    ///
    /// When `preferred` is set, only the interface with that name is
    /// considered.
    pub fn detect_subnet(
        source: &dyn InterfaceSource,
        preferred: Option<&str>,
    ) -> Result<DetectedSubnet, NetworkDiscoveryError> {
        let interfaces = source.interfaces()?;
        debug!("Enumerated {} network interfaces", interfaces.len());
        select_subnet(&interfaces, preferred)
    }

    /// First up, non-loopback interface with a routable IPv4 address wins.
    pub fn select_subnet(
        interfaces: &[InterfaceEntry],
        preferred: Option<&str>,
    ) -> Result<DetectedSubnet, NetworkDiscoveryError> {
        let preferred = preferred.filter(|name| !name.is_empty());

        for iface in interfaces {
            if iface.is_loopback || !iface.is_up {
                debug!(interface = %iface.name, "Skipping loopback or down interface");
                continue;
            }

            if let Some(name) = preferred {
                if iface.name != name {
                    continue;
                }
            }

            for ip_network in &iface.ips {
                let IpNetwork::V4(v4) = ip_network else {
                    continue;
                };

                // 169.254.0.0/16
                if v4.ip().is_link_local() {
                    continue;
                }

                let cidr = network_cidr(v4.ip(), v4.prefix())?;
                info!(interface = %iface.name, address = %v4.ip(), %cidr, "Selected interface");
                return Ok(DetectedSubnet {
                    cidr,
                    interface: iface.name.clone(),
                    address: v4.ip(),
                });
            }
        }

        match preferred {
            Some(name) => Err(NetworkDiscoveryError::InterfaceNotFound(name.to_string())),
            None => Err(NetworkDiscoveryError::NoSuitableInterface),
        }
    }

    /// Apply the prefix mask to `ip` and render `network/prefix`
    pub fn network_cidr(ip: Ipv4Addr, prefix: u8) -> Result<String, NetworkDiscoveryError> {
        let network = Ipv4Network::new(ip, prefix).map_err(|e| {
            NetworkDiscoveryError::InvalidArgument(format!("invalid prefix /{} for {}: {}", prefix, ip, e))
        })?;
        Ok(format!("{}/{}", network.network(), network.prefix()))
    }
}

/// Latency probing and the bounded fan-out over many hosts
pub mod ping {
    use super::command::{CommandRunner, SystemCommandRunner};
    use super::*;
    use futures::future::join_all;
    use once_cell::sync::Lazy;
    use regex::Regex;
    use tokio::sync::Semaphore;

    /// Average of the min/avg/max/stddev (or mdev) summary line.
    /// macOS: "round-trip min/avg/max/stddev = 1.234/1.234/1.234/0.000 ms"
    /// Linux: "rtt min/avg/max/mdev = 1.234/1.234/1.234/0.000 ms"
    static LATENCY_PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"[\d.]+/([\d.]+)/[\d.]+/[\d.]+ ms").expect("latency pattern is valid")
    });

    /// Sends one echo request and returns the tool's raw output
    #[async_trait]
    pub trait PingExecutor: Send + Sync {
        async fn ping(&self, ip: &str, timeout_secs: u64) -> Result<String, NetworkDiscoveryError>;
    }

    /// Shells out to the system `ping`
    pub struct SystemPing {
        runner: Arc<dyn CommandRunner>,
    }

    impl SystemPing {
        pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
            Self { runner }
        }
    }

    impl Default for SystemPing {
        fn default() -> Self {
            Self::new(Arc::new(SystemCommandRunner))
        }
    }

    #[async_trait]
    impl PingExecutor for SystemPing {
        async fn ping(&self, ip: &str, timeout_secs: u64) -> Result<String, NetworkDiscoveryError> {
            let args = ping_args(ip, timeout_secs);
            let args: Vec<&str> = args.iter().map(String::as_str).collect();
            self.runner.run(PING_PROGRAM, &args).await
        }
    }

    /// Single packet, per-platform timeout flag (seconds on both)
    pub fn ping_args(ip: &str, timeout_secs: u64) -> Vec<String> {
        let timeout_flag = if cfg!(target_os = "macos") { "-t" } else { "-W" };
        vec![
            "-c".to_string(),
            "1".to_string(),
            timeout_flag.to_string(),
            timeout_secs.to_string(),
            ip.to_string(),
        ]
    }

    /// Milliseconds to whole seconds, rounding up
    pub fn timeout_secs(timeout_ms: u64) -> u64 {
        timeout_ms.saturating_add(999) / 1000
    }

    /// Extract the average round-trip time in milliseconds from ping output
    pub fn parse_latency(output: &str) -> Option<f64> {
        LATENCY_PATTERN
            .captures(output)?
            .get(1)?
            .as_str()
            .parse::<f64>()
            .ok()
    }

    /// Measures latency to one host
    pub struct LatencyProbe {
        executor: Arc<dyn PingExecutor>,
    }

    impl LatencyProbe {
        pub fn new(executor: Arc<dyn PingExecutor>) -> Self {
            Self { executor }
        }

        /// A failed process and unparsable output both read as a timeout.
        pub async fn probe(&self, ip: &str, timeout_ms: u64) -> ProbeOutcome {
            let output = match self.executor.ping(ip, timeout_secs(timeout_ms)).await {
                Ok(output) => output,
                Err(e) => {
                    debug!(%ip, error = %e, "Ping did not complete");
                    return ProbeOutcome::timed_out();
                }
            };

            match parse_latency(&output) {
                Some(latency_ms) => ProbeOutcome::reachable(latency_ms),
                None => {
                    debug!(%ip, "No round-trip line in ping output");
                    ProbeOutcome::timed_out()
                }
            }
        }
    }

    /// Pings many devices at once behind a fixed-size permit pool
    pub struct ProbeScheduler {
        probe: Arc<LatencyProbe>,
        max_in_flight: usize,
    }

    impl ProbeScheduler {
        pub fn new(probe: LatencyProbe) -> Self {
            Self::with_limit(probe, MAX_CONCURRENT_PINGS)
        }

        pub fn with_limit(probe: LatencyProbe, max_in_flight: usize) -> Self {
            Self {
                probe: Arc::new(probe),
                max_in_flight: max_in_flight.max(1),
            }
        }

        pub fn max_in_flight(&self) -> usize {
            self.max_in_flight
        }

        /// Probe every device and return one result per device, in input order
        ///
        /// Returns only after the whole batch has finished.
        pub async fn schedule_all(&self, devices: &[Device], timeout_ms: u64) -> Vec<PingResult> {
            if devices.is_empty() {
                return Vec::new();
            }

            info!(
                "Pinging {} devices ({} at a time, {}ms timeout)",
                devices.len(),
                self.max_in_flight,
                timeout_ms
            );

            let gate = Arc::new(Semaphore::new(self.max_in_flight));
            let mut handles = Vec::with_capacity(devices.len());

            for device in devices.iter().cloned() {
                let gate = Arc::clone(&gate);
                let probe = Arc::clone(&self.probe);

                handles.push(tokio::spawn(async move {
                    let _permit = match gate.acquire_owned().await {
                        Ok(permit) => permit,
                        Err(e) => {
                            warn!("Ping gate closed for {}: {}", device.ip, e);
                            return PingResult::from_device(device, ProbeOutcome::timed_out());
                        }
                    };

                    let outcome = probe.probe(&device.ip, timeout_ms).await;
                    PingResult::from_device(device, outcome)
                }));
            }

            // Handles are joined in spawn order, so slot i always belongs to devices[i].
            let results: Vec<PingResult> = join_all(handles)
                .await
                .into_iter()
                .zip(devices)
                .map(|(joined, device)| match joined {
                    Ok(result) => result,
                    Err(e) => {
                        warn!("Ping task for {} failed: {}", device.ip, e);
                        PingResult::from_device(device.clone(), ProbeOutcome::timed_out())
                    }
                })
                .collect();

            let reachable = results.iter().filter(|r| !r.timeout).count();
            info!("{}/{} devices answered", reachable, results.len());
            results
        }
    }

}
