use std::fmt;
use std::net::Ipv4Addr;

/// A host listed in the operating system's neighbor table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub ip: String,
    /// Lowercase, trimmed hardware address
    pub mac: String,
    /// Empty when the table carries no name for the host
    pub hostname: String,
}

impl Device {
    pub fn new(ip: impl Into<String>, mac: &str, hostname: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            mac: normalize_mac(mac),
            hostname: hostname.into(),
        }
    }
}

/// Reachability measurement for one device
#[derive(Debug, Clone, PartialEq)]
pub struct PingResult {
    pub ip: String,
    pub mac: String,
    pub hostname: String,
    /// Round-trip average in milliseconds, only meaningful when `timeout` is false
    pub latency_ms: f64,
    pub timeout: bool,
}

impl PingResult {
    pub fn from_device(device: Device, outcome: ProbeOutcome) -> Self {
        Self {
            ip: device.ip,
            mac: device.mac,
            hostname: device.hostname,
            latency_ms: outcome.latency_ms,
            timeout: outcome.timed_out,
        }
    }
}

/// What a single latency probe reports
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeOutcome {
    pub latency_ms: f64,
    pub timed_out: bool,
}

impl ProbeOutcome {
    pub fn reachable(latency_ms: f64) -> Self {
        Self {
            latency_ms,
            timed_out: false,
        }
    }

    /// Process failure, parse failure and a real timeout all look like this.
    pub fn timed_out() -> Self {
        Self {
            latency_ms: 0.0,
            timed_out: true,
        }
    }
}

/// The subnet chosen for a scan and the interface it was found on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedSubnet {
    /// Network address and prefix, e.g. `192.168.1.0/24`
    pub cidr: String,
    pub interface: String,
    /// The interface's own address inside the subnet
    pub address: Ipv4Addr,
}

impl fmt::Display for DetectedSubnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} via {}", self.cidr, self.interface)
    }
}

/// Full output of one scan run
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub subnet: DetectedSubnet,
    pub results: Vec<PingResult>,
}

/// Lowercase and trim a MAC address string
pub fn normalize_mac(mac: &str) -> String {
    mac.trim().to_lowercase()
}
