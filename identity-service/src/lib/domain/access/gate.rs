use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use auth::Role;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::access::errors::AccessError;
use crate::domain::access::models::AccessLogEntry;
use crate::domain::access::models::RequestContext;
use crate::domain::access::models::RequestIdentity;
use crate::domain::access::ports::AccessLog;
use crate::user::models::UserId;

/// Access-control gate for privileged operations.
///
/// Role enforcement and audit logging are separate steps:
/// [`AccessGate::authorize`] denies by default, while [`AccessGate::observe`]
/// never blocks a call because audit infrastructure is missing.
#[derive(Clone)]
pub struct AccessGate {
    access_log: Arc<dyn AccessLog>,
}

impl AccessGate {
    pub fn new(access_log: Arc<dyn AccessLog>) -> Self {
        Self { access_log }
    }

    /// Decide whether `identity` may invoke an operation requiring `required`.
    ///
    /// # Errors
    /// * `Unauthenticated` - No identity is attached
    /// * `Forbidden` - The identity's role is insufficient
    pub fn authorize(
        identity: Option<&RequestIdentity>,
        required: Role,
    ) -> Result<(), AccessError> {
        match identity {
            None => Err(AccessError::Unauthenticated { required }),
            Some(identity) if identity.role.satisfies(required) => Ok(()),
            Some(_) => Err(AccessError::Forbidden { required }),
        }
    }

    /// Run `operation` with an audit trail around it.
    ///
    /// Without a request context the operation runs unobserved. Otherwise one
    /// [`AccessLogEntry`] is recorded when the operation completes, including
    /// when it fails, panics or is dropped before completion.
    pub async fn observe<F, T>(&self, context: Option<RequestContext>, operation: F) -> T
    where
        F: Future<Output = T>,
    {
        let Some(context) = context else {
            tracing::warn!("Request context unavailable, privileged call proceeds without audit");
            return operation.await;
        };

        let user_id = context.identity.as_ref().map(|identity| identity.user_id);
        if user_id.is_none() {
            tracing::warn!(path = %context.path, "No identity attached to privileged request");
        }

        let invocation = Invocation::start(Arc::clone(&self.access_log), user_id, context.path);
        let output = operation.await;
        drop(invocation);

        output
    }
}

/// Records completion of an observed call when dropped.
struct Invocation {
    access_log: Arc<dyn AccessLog>,
    user_id: Option<UserId>,
    path: String,
    requested_at: DateTime<Utc>,
    started: Instant,
}

impl Invocation {
    fn start(access_log: Arc<dyn AccessLog>, user_id: Option<UserId>, path: String) -> Self {
        let requested_at = Utc::now();

        tracing::info!(
            requested_at = %requested_at.to_rfc3339(),
            user_id = ?user_id.map(|id| id.0),
            path = %path,
            "Privileged request started"
        );

        Self {
            access_log,
            user_id,
            path,
            requested_at,
            started: Instant::now(),
        }
    }
}

impl Drop for Invocation {
    fn drop(&mut self) {
        let duration = self.started.elapsed();

        tracing::info!(
            finished_at = %Utc::now().to_rfc3339(),
            duration_ms = duration.as_millis() as u64,
            path = %self.path,
            "Privileged request finished"
        );

        self.access_log.record(&AccessLogEntry {
            requested_at: self.requested_at,
            user_id: self.user_id,
            path: std::mem::take(&mut self.path),
            duration,
        });
    }
}
