use crate::domain::access::models::AccessLogEntry;

/// Sink for access audit entries.
///
/// Called once per observed invocation, after it completes. Implementations
/// must not fail the request.
pub trait AccessLog: Send + Sync + 'static {
    fn record(&self, entry: &AccessLogEntry);
}
