/// Upper bound on ping processes running at the same time
pub const MAX_CONCURRENT_PINGS: usize = 50;

/// Default per-host ping timeout in milliseconds
pub const DEFAULT_PING_TIMEOUT_MS: u64 = 1000;

/// Kernel neighbor table query (iproute2)
pub const IP_NEIGH_PROGRAM: &str = "ip";
pub const IP_NEIGH_ARGS: &[&str] = &["neigh"];

/// Legacy ARP cache query (net-tools / BSD)
pub const ARP_PROGRAM: &str = "arp";
pub const ARP_ARGS: &[&str] = &["-a"];

pub const PING_PROGRAM: &str = "ping";
