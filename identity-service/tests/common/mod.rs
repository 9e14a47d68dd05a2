#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::Role;
use auth::TokenService;
use axum::body::Body;
use axum::http::header::AUTHORIZATION;
use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use chrono::Duration;
use identity_service::access::gate::AccessGate;
use identity_service::access::models::AccessLogEntry;
use identity_service::access::ports::AccessLog;
use identity_service::domain::user::service::UserService;
use identity_service::inbound::http::router::create_router;
use identity_service::user::errors::UserError;
use identity_service::user::models::EmailAddress;
use identity_service::user::models::NewUser;
use identity_service::user::models::User;
use identity_service::user::models::UserId;
use identity_service::user::ports::UserRepository;
use tower::ServiceExt;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// In-process application wired to in-memory collaborators
pub struct TestApp {
    pub router: Router,
    pub repository: Arc<InMemoryUserRepository>,
    pub access_log: Arc<RecordingAccessLog>,
    pub token_service: Arc<TokenService>,
}

/// Response status plus parsed JSON body
pub struct TestResponse {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

impl TestApp {
    pub fn spawn() -> Self {
        let repository = Arc::new(InMemoryUserRepository::default());
        let access_log = Arc::new(RecordingAccessLog::default());
        let token_service = Arc::new(TokenService::new(TEST_SECRET, Duration::minutes(60)));

        let user_service = Arc::new(UserService::new(
            Arc::clone(&repository),
            Arc::clone(&token_service),
        ));
        let access_gate = Arc::new(AccessGate::new(access_log.clone()));

        let router = create_router(user_service, Arc::clone(&token_service), access_gate);

        Self {
            router,
            repository,
            access_log,
            token_service,
        }
    }

    /// Store a user directly, bypassing the signup flow
    pub fn seed_user(&self, email: &str, password: &str, role: Role) -> User {
        self.repository.insert(NewUser {
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: PasswordHasher::new().hash(password).unwrap(),
            role,
        })
    }

    /// Token for a user, signed with the application's secret
    pub fn token_for(&self, user: &User) -> String {
        self.token_service
            .issue(user.id.0, user.email.as_str(), user.role)
            .expect("Failed to issue test token")
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };

        TestResponse { status, body }
    }

    pub async fn post(&self, path: &str, body: serde_json::Value) -> TestResponse {
        self.request(Method::POST, path, None, Some(body)).await
    }
}

/// Thread-safe in-memory user store that counts mutating calls
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<BTreeMap<i64, User>>,
    next_id: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
}

impl InMemoryUserRepository {
    fn insert(&self, user: NewUser) -> User {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        let user = User {
            id: UserId(id),
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
        };
        self.users.lock().unwrap().insert(id, user.clone());
        user
    }

    pub fn get(&self, id: i64) -> Option<User> {
        self.users.lock().unwrap().get(&id).cloned()
    }

    pub fn update_count(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn create_count(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.exists_by_email(&user.email).await? {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        Ok(self.insert(user))
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .any(|u| u.email == *email))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.get(id.0))
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == *email)
            .cloned())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let mut users = self.users.lock().unwrap();
        match users.get_mut(&user.id.0) {
            Some(stored) => {
                *stored = user.clone();
                Ok(user)
            }
            None => Err(UserError::NotFound(user.id.to_string())),
        }
    }
}

/// Access log that keeps every entry for assertions
#[derive(Default)]
pub struct RecordingAccessLog {
    entries: Mutex<Vec<AccessLogEntry>>,
}

impl RecordingAccessLog {
    pub fn entries(&self) -> Vec<AccessLogEntry> {
        self.entries.lock().unwrap().clone()
    }
}

impl AccessLog for RecordingAccessLog {
    fn record(&self, entry: &AccessLogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}
