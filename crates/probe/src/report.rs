//! Human-readable report rendering.
//!
//! The report is the product of a run: plain text for a person watching the
//! terminal, not a log stream. Everything goes through a caller-supplied
//! writer so tests can capture a whole run verbatim.

use std::fmt::Display;
use std::io::{self, Write};

use crate::executor::{ProbeError, ProbeSpec};

const SEPARATOR: &str = "==================================================";

/// Opening banner printed before the first step.
pub fn header<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "🔍 Testing TalorikAgent Security API Endpoints")?;
    writeln!(out, "{SEPARATOR}")
}

/// Closing section: curl usage hints, then the completion banner as the
/// final line of output. Printed regardless of how many steps failed.
pub fn footer<W: Write>(out: &mut W, base_url: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{SEPARATOR}")?;
    writeln!(out, "To test with curl:")?;
    writeln!(out, "  curl {base_url}/security/metrics")?;
    writeln!(out, "  curl \"{base_url}/threats/data?range=24h\"")?;
    writeln!(out, "  curl \"{base_url}/alerts/recent?limit=5\"")?;
    writeln!(
        out,
        "  curl -X POST {base_url}/security/scan -H 'Content-Type: application/json' -d '{{\"type\":\"full\"}}'"
    )?;
    writeln!(out)?;
    writeln!(out, "🎉 API Testing Complete!")
}

/// Pass line for a probe that returned HTTP 200.
pub fn success_line<W: Write>(out: &mut W, spec: &ProbeSpec, status: u16) -> io::Result<()> {
    writeln!(out, "✅ {} {} - Status: {}", spec.method, spec.path, status)
}

/// Fail line for a probe, one shape per error variant.
pub fn failure_line<W: Write>(out: &mut W, spec: &ProbeSpec, error: &ProbeError) -> io::Result<()> {
    match error {
        ProbeError::UnsupportedMethod(method) => {
            writeln!(out, "❌ Unsupported method: {method}")
        }
        ProbeError::ConnectionRefused => {
            writeln!(
                out,
                "❌ {} {} - Connection refused (server not running?)",
                spec.method, spec.path
            )
        }
        ProbeError::Status { status, body } => {
            writeln!(out, "❌ {} {} - Status: {}", spec.method, spec.path, status.as_u16())?;
            writeln!(out, "   Response: {body}")
        }
        ProbeError::Transport(description) => {
            writeln!(out, "❌ {} {} - Error: {description}", spec.method, spec.path)
        }
    }
}

/// Display an optional field, falling back to the literal `N/A`.
///
/// Absent JSON keys stay `None` all the way to this point; the fallback is
/// purely presentational.
pub fn or_na<T: Display>(value: Option<T>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn rendered(render: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buffer = Vec::new();
        render(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn or_na_falls_back_for_missing_values() {
        assert_eq!(or_na(Some(5)), "5");
        assert_eq!(or_na(Some("critical")), "critical");
        assert_eq!(or_na::<i64>(None), "N/A");
    }

    #[test]
    fn failure_line_includes_response_body_for_status_errors() {
        let spec = ProbeSpec::get("/alerts/recent?limit=5");
        let error = ProbeError::Status {
            status: StatusCode::NOT_FOUND,
            body: "not found".into(),
        };

        let text = rendered(|out| failure_line(out, &spec, &error));
        assert!(text.contains("❌ GET /alerts/recent?limit=5 - Status: 404"));
        assert!(text.contains("   Response: not found"));
    }

    #[test]
    fn footer_ends_with_the_completion_banner() {
        let text = rendered(|out| footer(out, "http://localhost:8080/api"));
        assert!(text.contains("To test with curl:"));
        assert!(text.contains("curl http://localhost:8080/api/security/metrics"));
        assert_eq!(text.lines().last(), Some("🎉 API Testing Complete!"));
    }
}
