use async_trait::async_trait;
use lanping::errors::NetworkDiscoveryError;
use lanping::model::ProbeOutcome;
use lanping::net::ping::{parse_latency, LatencyProbe, PingExecutor, SystemPing};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use test_utils::{linux_ping_output, ScriptedRunner};


const MACOS_OUTPUT: &str = "\
PING 192.168.0.1 (192.168.0.1): 56 data bytes
64 bytes from 192.168.0.1: icmp_seq=0 ttl=64 time=3.118 ms

--- 192.168.0.1 ping statistics ---
1 packets transmitted, 1 packets received, 0.0% packet loss
round-trip min/avg/max/stddev = 3.118/3.118/3.118/0.000 ms
";

const LOST_OUTPUT: &str = "\
PING 192.168.0.77 (192.168.0.77) 56(84) bytes of data.

--- 192.168.0.77 ping statistics ---
1 packets transmitted, 0 received, 100% packet loss, time 0ms
";

/// Returns the same output for every host and remembers the timeout it saw
struct FixedOutput {
    output: Result<String, ()>,
    last_timeout: AtomicU64,
}

impl FixedOutput {
    fn new(output: Result<&str, ()>) -> Self {
        Self {
            output: output.map(str::to_string),
            last_timeout: AtomicU64::new(u64::MAX),
        }
    }
}

#[async_trait]
impl PingExecutor for FixedOutput {
    async fn ping(&self, _ip: &str, timeout_secs: u64) -> Result<String, NetworkDiscoveryError> {
        self.last_timeout.store(timeout_secs, Ordering::SeqCst);
        self.output.clone().map_err(|_| NetworkDiscoveryError::CommandFailed {
            program: "ping".to_string(),
            status: "exit status: 2".to_string(),
        })
    }
}

#[test]
fn test_average_field_is_extracted() {
    let output = "rtt min/avg/max/mdev = 1.234/5.678/9.012/0.001 ms";
    assert_eq!(parse_latency(output), Some(5.678));
}

#[test]
fn test_average_ignores_surrounding_text() {
    let output = "noise before ...= 1.234/5.678/9.012/0.001 ms and after";
    assert_eq!(parse_latency(output), Some(5.678));
}

#[test]
fn test_both_platform_formats() {
    assert_eq!(parse_latency(MACOS_OUTPUT), Some(3.118));
    assert_eq!(parse_latency(&linux_ping_output("10.0.0.1", 0.412)), Some(0.412));
}

#[test]
fn test_no_summary_line() {
    assert_eq!(parse_latency(LOST_OUTPUT), None);
    assert_eq!(parse_latency(""), None);
}

#[tokio::test]
async fn test_probe_reports_latency() {
    let probe = LatencyProbe::new(Arc::new(FixedOutput::new(Ok(MACOS_OUTPUT))));
    assert_eq!(probe.probe("192.168.0.1", 1000).await, ProbeOutcome::reachable(3.118));
}

#[tokio::test]
async fn test_unparsable_output_is_timeout() {
    let probe = LatencyProbe::new(Arc::new(FixedOutput::new(Ok(LOST_OUTPUT))));
    let outcome = probe.probe("192.168.0.77", 1000).await;
    assert!(outcome.timed_out);
    assert_eq!(outcome.latency_ms, 0.0);
}

#[tokio::test]
async fn test_empty_output_is_timeout() {
    let probe = LatencyProbe::new(Arc::new(FixedOutput::new(Ok(""))));
    assert_eq!(probe.probe("192.168.0.77", 1000).await, ProbeOutcome::timed_out());
}

#[tokio::test]
async fn test_failed_process_is_timeout() {
    let probe = LatencyProbe::new(Arc::new(FixedOutput::new(Err(()))));
    assert_eq!(probe.probe("192.168.0.77", 1000).await, ProbeOutcome::timed_out());
}

#[tokio::test]
async fn test_timeout_passed_in_whole_seconds() {
    let executor = Arc::new(FixedOutput::new(Ok(MACOS_OUTPUT)));
    let probe = LatencyProbe::new(executor.clone());

    probe.probe("192.168.0.1", 1500).await;
    assert_eq!(executor.last_timeout.load(Ordering::SeqCst), 2);

    probe.probe("192.168.0.1", 1000).await;
    assert_eq!(executor.last_timeout.load(Ordering::SeqCst), 1);

    probe.probe("192.168.0.1", 1).await;
    assert_eq!(executor.last_timeout.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_system_ping_runs_ping_command() {
    let runner = Arc::new(ScriptedRunner::new().succeed("ping", MACOS_OUTPUT));
    let probe = LatencyProbe::new(Arc::new(SystemPing::new(runner.clone())));

    let outcome = probe.probe("192.168.0.1", 1000).await;
    assert!(!outcome.timed_out);
    assert_eq!(runner.calls(), vec!["ping"]);
}

#[tokio::test]
async fn test_system_ping_missing_binary_is_timeout() {
    let runner = Arc::new(ScriptedRunner::new().fail("ping"));
    let probe = LatencyProbe::new(Arc::new(SystemPing::new(runner)));

    assert!(probe.probe("192.168.0.1", 1000).await.timed_out);
}
