use crate::domain::access::models::AccessLogEntry;
use crate::domain::access::ports::AccessLog;

/// Writes access entries as structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAccessLog;

impl AccessLog for TracingAccessLog {
    fn record(&self, entry: &AccessLogEntry) {
        tracing::info!(
            target: "access",
            requested_at = %entry.requested_at.to_rfc3339(),
            user_id = ?entry.user_id.map(|id| id.0),
            path = %entry.path,
            duration_ms = entry.duration.as_millis() as u64,
            "Privileged access"
        );
    }
}
