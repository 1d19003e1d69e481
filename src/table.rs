use crate::model::{DetectedSubnet, PingResult};
use comfy_table::{presets::UTF8_HORIZONTAL_ONLY, Attribute, Cell, Color, ContentArrangement, Table};

/// Shown in the hostname column when the neighbor table had no name
pub const NO_HOSTNAME: &str = "—";

/// Colour bucket for one latency reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyClass {
    Fast,
    Moderate,
    Slow,
    Timeout,
}

impl LatencyClass {
    pub fn classify(latency_ms: f64, timeout: bool) -> Self {
        if timeout {
            LatencyClass::Timeout
        } else if latency_ms < 50.0 {
            LatencyClass::Fast
        } else if latency_ms < 200.0 {
            LatencyClass::Moderate
        } else {
            LatencyClass::Slow
        }
    }

    pub fn color(self) -> Color {
        match self {
            LatencyClass::Fast => Color::Green,
            LatencyClass::Moderate => Color::Yellow,
            LatencyClass::Slow | LatencyClass::Timeout => Color::Red,
        }
    }
}

pub fn latency_label(result: &PingResult) -> String {
    if result.timeout {
        "TIMEOUT".to_string()
    } else {
        format!("{:.1}ms", result.latency_ms)
    }
}

pub fn banner(version: &str) -> String {
    format!("  lanping {} — Local Network Scanner", version)
}

pub fn scan_start_line(subnet: &DetectedSubnet) -> String {
    format!("  Scanning {}...", subnet)
}

/// Results table, one row per device in scan order
pub fn render_results(results: &[PingResult], color: bool) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_HORIZONTAL_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic);

    if color {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }

    let header = ["IP ADDRESS", "MAC ADDRESS", "HOSTNAME", "LATENCY"]
        .into_iter()
        .map(|title| {
            let cell = Cell::new(title);
            if color {
                cell.add_attribute(Attribute::Bold)
            } else {
                cell
            }
        })
        .collect::<Vec<Cell>>();
    table.set_header(header);

    for result in results {
        let hostname = if result.hostname.is_empty() {
            NO_HOSTNAME
        } else {
            result.hostname.as_str()
        };

        let mut latency = Cell::new(latency_label(result));
        if color {
            latency = latency.fg(LatencyClass::classify(result.latency_ms, result.timeout).color());
        }

        table.add_row(vec![
            Cell::new(&result.ip),
            Cell::new(&result.mac),
            Cell::new(hostname),
            latency,
        ]);
    }

    table.to_string()
}

/// Reachable count and, when any host answered, their mean latency
pub fn summary_line(results: &[PingResult]) -> String {
    let reachable: Vec<f64> = results
        .iter()
        .filter(|r| !r.timeout)
        .map(|r| r.latency_ms)
        .collect();

    let mut summary = format!("  Summary: {}/{} reachable", reachable.len(), results.len());
    if !reachable.is_empty() {
        let avg = reachable.iter().sum::<f64>() / reachable.len() as f64;
        summary.push_str(&format!("  |  avg {:.1}ms", avg));
    }
    summary
}
