///! Console report emitter
///!
///! Turns cycle outcomes into the human-readable block printed on every tick.

use std::io::Write;

use super::scheduled::CycleOutcome;

const SEPARATOR: &str = "------------------------------------";

/// Consumer of every cycle outcome, called once per cycle in order
pub trait ReportEmitter: Send + Sync {
    fn emit(&self, outcome: &CycleOutcome);
}

/// Writes rendered outcomes to stdout
#[derive(Debug, Default)]
pub struct ConsoleEmitter;

impl ReportEmitter for ConsoleEmitter {
    fn emit(&self, outcome: &CycleOutcome) {
        let mut out = std::io::stdout().lock();
        if let Err(e) = writeln!(out, "{}", render_outcome(outcome)) {
            tracing::warn!("Failed to write report to stdout: {}", e);
        }
    }
}

/// Render one outcome as display text.
pub fn render_outcome(outcome: &CycleOutcome) -> String {
    match outcome {
        CycleOutcome::Report(report) => {
            let lines = [
                format!("Real-time Asteroid Resources: {} (id {})", report.name, report.id),
                format!("Average diameter: {} km", report.average_diameter),
                format!("Estimated mass of asteroid: {:.2} kg", report.estimated_mass),
                format!("Distance from Earth: {} km", report.miss_distance),
                format!("Velocity towards Earth: {} km/s", report.relative_velocity),
                format!(
                    "Required thrust to move asteroid to LEO: {:.2} N",
                    report.required_thrust
                ),
                format!(
                    "Estimated value of asteroid materials: {}",
                    format_currency(report.estimated_value)
                ),
                format!("Cost: {}", format_currency(report.cost)),
                format!("Profit: {}", format_currency(report.profit)),
                SEPARATOR.to_string(),
            ];
            lines.join("\n")
        }
        CycleOutcome::NoData { asset_id } => {
            format!("No close approach data available for {}.", asset_id)
        }
        CycleOutcome::FetchFailed { asset_id, reason } => {
            format!("Failed to fetch asteroid data for {}: {}", asset_id, reason)
        }
    }
}

/// `$1,234.50`, `-$12.00`
pub fn format_currency(value: f64) -> String {
    let formatted = format_with_commas(value.abs());
    if value < 0.0 {
        format!("-${}", formatted)
    } else {
        format!("${}", formatted)
    }
}

/// Two-decimal rendering with thousands separators in the integer part.
pub fn format_with_commas(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.2}", value);
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}.{}", sign, grouped, frac_part)
}
