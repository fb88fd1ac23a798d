//! The fixed probe sequence and per-step detail rendering.
//!
//! A run is seven steps, always in the same order, each independent: a step
//! that fails (or answers with an unexpected shape) is reported and skipped,
//! never aborting the rest of the sequence.

use std::io::{self, Write};

use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use talorik_api::TalorikClient;
use talorik_types::{
    AgentStatus, Alert, AttackTypeDistribution, ScanResponse, SecurityMetrics, SystemStatus,
    ThreatDataPoint,
};
use tracing::warn;

use crate::executor::{self, ProbeSpec};
use crate::report::{self, or_na};

/// Which detail renderer applies to a step's response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    SecurityMetrics,
    ThreatData,
    AttackTypes,
    RecentAlerts,
    SystemStatus,
    AgentStatus,
    SecurityScan,
}

/// One numbered entry of the smoke-test sequence.
#[derive(Debug, Clone)]
pub struct ProbeStep {
    pub title: &'static str,
    pub kind: StepKind,
    pub spec: ProbeSpec,
}

/// The standard seven-step sequence, in execution order.
pub fn standard_sequence() -> Vec<ProbeStep> {
    vec![
        ProbeStep {
            title: "Security Metrics",
            kind: StepKind::SecurityMetrics,
            spec: ProbeSpec::get("/security/metrics"),
        },
        ProbeStep {
            title: "Threat Data (24h)",
            kind: StepKind::ThreatData,
            spec: ProbeSpec::get("/threats/data?range=24h"),
        },
        ProbeStep {
            title: "Attack Types Distribution",
            kind: StepKind::AttackTypes,
            spec: ProbeSpec::get("/threats/attack-types"),
        },
        ProbeStep {
            title: "Recent Alerts",
            kind: StepKind::RecentAlerts,
            spec: ProbeSpec::get("/alerts/recent?limit=5"),
        },
        ProbeStep {
            title: "System Status",
            kind: StepKind::SystemStatus,
            spec: ProbeSpec::get("/system/status"),
        },
        ProbeStep {
            title: "Agent Status",
            kind: StepKind::AgentStatus,
            spec: ProbeSpec::get("/agent/status"),
        },
        ProbeStep {
            title: "Security Scan",
            kind: StepKind::SecurityScan,
            spec: ProbeSpec::post("/security/scan", json!({"type": "quick"})),
        },
    ]
}

/// Execute `steps` sequentially against `client`, writing the report to
/// `out`.
///
/// Each step issues exactly one request. Probe failures become report
/// content; the only errors this function returns are writer failures.
pub async fn run<W: Write>(
    client: &TalorikClient,
    steps: &[ProbeStep],
    out: &mut W,
) -> io::Result<()> {
    report::header(out)?;

    for (index, step) in steps.iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "{}. Testing {}", index + 1, step.title)?;

        match executor::execute(client, &step.spec).await {
            Ok(outcome) => {
                report::success_line(out, &step.spec, outcome.status.as_u16())?;
                render_details(step.kind, &outcome.body, out)?;
            }
            Err(error) => report::failure_line(out, &step.spec, &error)?,
        }
    }

    report::footer(out, &client.base_url)
}

/// Decode a step's 200 body into its expected shape.
///
/// A body that does not match is treated like a failed probe at the detail
/// level: the step's lines are skipped and the run continues.
fn decode<T: DeserializeOwned>(body: &Value) -> Option<T> {
    match serde_json::from_value(body.clone()) {
        Ok(decoded) => Some(decoded),
        Err(error) => {
            warn!(%error, "response shape did not match, skipping details");
            None
        }
    }
}

fn render_details<W: Write>(kind: StepKind, body: &Value, out: &mut W) -> io::Result<()> {
    match kind {
        StepKind::SecurityMetrics => {
            let Some(metrics) = decode::<SecurityMetrics>(body) else {
                return Ok(());
            };
            writeln!(out, "   Total Threats: {}", or_na(metrics.total_threats))?;
            writeln!(out, "   Blocked Attacks: {}", or_na(metrics.blocked_attacks))?;
            writeln!(out, "   Active Alerts: {}", or_na(metrics.active_alerts))?;
            writeln!(out, "   Security Score: {}", or_na(metrics.security_score))
        }
        StepKind::ThreatData => {
            let Some(points) = decode::<Vec<ThreatDataPoint>>(body) else {
                return Ok(());
            };
            writeln!(out, "   Data points: {}", points.len())?;
            if let Some(latest) = points.last() {
                writeln!(out, "   Latest timestamp: {}", or_na(latest.timestamp.as_deref()))?;
                writeln!(out, "   Latest threats: {}", or_na(latest.total_threats))?;
            }
            Ok(())
        }
        StepKind::AttackTypes => {
            let Some(distribution) = decode::<Vec<AttackTypeDistribution>>(body) else {
                return Ok(());
            };
            writeln!(out, "   Attack types: {}", distribution.len())?;
            for slice in distribution.iter().take(3) {
                writeln!(
                    out,
                    "   - {}: {} ({}%)",
                    or_na(slice.attack_type.as_deref()),
                    or_na(slice.count),
                    or_na(slice.percentage)
                )?;
            }
            Ok(())
        }
        StepKind::RecentAlerts => {
            let Some(alerts) = decode::<Vec<Alert>>(body) else {
                return Ok(());
            };
            writeln!(out, "   Alerts: {}", alerts.len())?;
            for alert in alerts.iter().take(2) {
                writeln!(
                    out,
                    "   - {}: {}",
                    or_na(alert.severity.as_deref()),
                    or_na(alert.description.as_deref())
                )?;
            }
            Ok(())
        }
        StepKind::SystemStatus => {
            let Some(systems) = decode::<Vec<SystemStatus>>(body) else {
                return Ok(());
            };
            writeln!(out, "   Systems: {}", systems.len())?;
            for system in &systems {
                writeln!(
                    out,
                    "   - {}: {} ({})",
                    or_na(system.name.as_deref()),
                    or_na(system.status.as_deref()),
                    or_na(system.uptime.as_deref())
                )?;
            }
            Ok(())
        }
        StepKind::AgentStatus => {
            let Some(status) = decode::<AgentStatus>(body) else {
                return Ok(());
            };
            writeln!(out, "   Connected: {}", or_na(status.connected))?;
            writeln!(out, "   Version: {}", or_na(status.version.as_deref()))?;
            writeln!(out, "   Uptime: {}", or_na(status.uptime.as_deref()))
        }
        StepKind::SecurityScan => {
            let Some(receipt) = decode::<ScanResponse>(body) else {
                return Ok(());
            };
            writeln!(out, "   Scan ID: {}", or_na(receipt.scan_id.as_deref()))?;
            writeln!(out, "   Status: {}", or_na(receipt.status.as_deref()))?;
            writeln!(out, "   Duration: {}", or_na(receipt.estimated_duration.as_deref()))
        }
    }
}
