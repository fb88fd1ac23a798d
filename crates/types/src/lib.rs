//! Shared data models for the TalorikAgent Security API.
//!
//! These mirror the JSON payloads the dashboard API serves. Every field the
//! smoke tester displays is optional: a missing key deserializes to `None`
//! and the "N/A" fallback is applied at the presentation boundary, not here.
//! Field casing follows the wire format exactly, which mixes camelCase
//! (metrics, agent, scan) and snake_case (threats, alerts, system).

use serde::{Deserialize, Serialize};

/// Aggregate security counters from `GET /security/metrics`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityMetrics {
    /// Total threats observed since agent start
    pub total_threats: Option<i64>,
    /// Attacks the agent blocked
    pub blocked_attacks: Option<i64>,
    /// Alerts currently requiring attention
    pub active_alerts: Option<i64>,
    /// Composite score in the 0–100 range
    pub security_score: Option<f64>,
    /// Agent uptime in seconds
    pub uptime: Option<f64>,
    /// Timestamp of the most recent scan
    pub last_scan: Option<String>,
}

/// One sample of the threat time series from `GET /threats/data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThreatDataPoint {
    pub timestamp: Option<String>,
    pub total_threats: Option<i64>,
    pub blocked_threats: Option<i64>,
    /// Attack categories seen in this sample
    #[serde(default)]
    pub attack_types: Vec<String>,
}

/// One slice of the attack-type breakdown from `GET /threats/attack-types`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttackTypeDistribution {
    pub attack_type: Option<String>,
    pub count: Option<i64>,
    pub percentage: Option<f64>,
}

/// An alert entry from `GET /alerts/recent`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: Option<i64>,
    /// One of "critical", "high", "medium", "low"
    pub severity: Option<String>,
    pub description: Option<String>,
    pub timestamp: Option<String>,
    pub source_ip: Option<String>,
    pub source: Option<String>,
}

/// A monitored subsystem entry from `GET /system/status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub name: Option<String>,
    /// One of "online", "offline", "warning"
    pub status: Option<String>,
    pub uptime: Option<String>,
    pub icon: Option<String>,
}

/// The agent's own connectivity report from `GET /agent/status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentStatus {
    pub connected: Option<bool>,
    pub last_heartbeat: Option<String>,
    pub version: Option<String>,
    pub uptime: Option<String>,
}

/// Receipt returned by `POST /security/scan`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    pub scan_id: Option<String>,
    pub status: Option<String>,
    pub estimated_duration: Option<String>,
}
