use crate::constants::{DEFAULT_PING_TIMEOUT_MS, MAX_CONCURRENT_PINGS};

/// Configuration settings for a scan run
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Only consider this interface when detecting the subnet
    pub interface: Option<String>,

    /// Timeout in milliseconds for each ping
    pub ping_timeout_ms: u64,

    /// Maximum number of pings in flight at once
    pub max_concurrent_pings: usize,

    /// Emit ANSI colours in the results table
    pub color: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            interface: None,
            ping_timeout_ms: DEFAULT_PING_TIMEOUT_MS,
            max_concurrent_pings: MAX_CONCURRENT_PINGS,
            color: true,
        }
    }
}
