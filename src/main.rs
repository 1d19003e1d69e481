// ==========================================================
//  lanping  — ping everything in the local neighbor table
// ==========================================================

use lanping::{logging, table, NetworkDiscoveryError, NetworkScanner, ScanConfig};
use std::process::ExitCode;

const VERSION: &str = env!("CARGO_PKG_VERSION");

enum Invocation {
    Scan(ScanConfig),
    Help,
    Version,
}

fn usage() -> String {
    [
        "Usage: lanping [OPTIONS]",
        "Options:",
        "  -i, --interface <NAME>  network interface to use (e.g. en0)",
        "  -t, --timeout <MS>      ping timeout in milliseconds (default: 1000)",
        "      --no-color          disable colored output",
        "      --version           print version and exit",
        "  -h, --help              show this help message",
    ]
    .join("\n")
}

fn parse_args<I>(args: I) -> Result<Invocation, NetworkDiscoveryError>
where
    I: IntoIterator<Item = String>,
{
    let mut config = ScanConfig::default();
    let mut args = args.into_iter().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--interface" | "-i" => {
                let name = args.next().ok_or_else(|| {
                    NetworkDiscoveryError::InvalidArgument(format!("{} needs an interface name", arg))
                })?;
                config.interface = Some(name);
            }
            "--timeout" | "-t" => {
                let raw = args.next().unwrap_or_default();
                config.ping_timeout_ms = raw.parse::<u64>().ok().filter(|ms| *ms > 0).ok_or_else(|| {
                    NetworkDiscoveryError::InvalidArgument(format!(
                        "invalid value for {}: '{}', expected a positive number of milliseconds",
                        arg, raw
                    ))
                })?;
            }
            "--no-color" => config.color = false,
            "--version" | "-version" => return Ok(Invocation::Version),
            "--help" | "-h" => return Ok(Invocation::Help),
            other => {
                return Err(NetworkDiscoveryError::InvalidArgument(format!(
                    "unknown argument '{}'",
                    other
                )))
            }
        }
    }

    Ok(Invocation::Scan(config))
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = logging::init_logging() {
        eprintln!("  Warning: logging unavailable: {}", e);
    }

    let config = match parse_args(std::env::args()) {
        Ok(Invocation::Scan(config)) => config,
        Ok(Invocation::Help) => {
            println!("{}", usage());
            return ExitCode::SUCCESS;
        }
        Ok(Invocation::Version) => {
            println!("lanping {}", VERSION);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("  Error: {}\n\n{}", e, usage());
            return ExitCode::FAILURE;
        }
    };

    println!();
    println!("{}", table::banner(VERSION));
    println!();

    let color = config.color;
    let scanner = NetworkScanner::new(config);

    let subnet = match scanner.detect_subnet() {
        Ok(subnet) => subnet,
        Err(e) => {
            eprintln!("  Error: {}\n", e);
            return ExitCode::FAILURE;
        }
    };
    println!("{}\n", table::scan_start_line(&subnet));

    let devices = match scanner.discover_devices().await {
        Ok(devices) => devices,
        Err(e) => {
            eprintln!("  Error discovering devices: {}\n", e);
            return ExitCode::FAILURE;
        }
    };

    if devices.is_empty() {
        println!("  No devices found in ARP table.");
        println!("  Try pinging a known host first to populate the table.");
        println!();
        return ExitCode::SUCCESS;
    }

    let results = scanner.probe_devices(&devices).await;

    println!("{}", table::render_results(&results, color));
    println!();
    println!("{}", table::summary_line(&results));
    println!();

    ExitCode::SUCCESS
}
