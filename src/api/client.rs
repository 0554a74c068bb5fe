use crate::api::models::{
    BranchInput, LoginRequest, LoginResponse, RegisterRequest, RegisterUser, UserInput,
    WorkoutInput,
};
use crate::error::ApiError;
use crate::storage::credentials::SessionStore;
use crate::utils::logging::log_warning;
use reqwest::{Client, Method, Response};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("gym-cli/", env!("CARGO_PKG_VERSION"));

/// Immutable description of one HTTP call, relative to the client's base URL.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl RequestSpec {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::PUT,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            path: path.into(),
            body: None,
        }
    }
}

/// Client-side destinations the API layer can ask the application to move to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
}

/// Navigation boundary. The client only requests moves; the application
/// decides what a route means.
pub trait Navigator: Send + Sync {
    fn goto(&self, route: Route);
}

/// User-facing notification channel (the CLI's toast surface).
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn info(&self, message: &str);
}

#[derive(Clone)]
pub struct GymClient {
    client: Client,
    pub base_url: String,
    session: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl GymClient {
    // Create base client with default settings
    pub fn new(
        base_url: String,
        session: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Http {
                status: 0,
                endpoint: "client_init".to_string(),
                message: format!("Failed to create HTTP client: {}", e),
                header_message: None,
            })?;

        Ok(GymClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            notifier,
            navigator,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.token().is_some()
    }

    /// Performs one exchange described by `spec`. A stored session token is
    /// attached as a bearer credential. Every failure is reported to the
    /// notifier exactly once and then propagated; a 401 on an authenticated
    /// call additionally ends the session and requests the login route.
    pub async fn send<T>(&self, spec: &RequestSpec) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let token = self.session.token();
        let had_credential = token.is_some();

        let result = self.dispatch(spec, token).await;
        if let Err(error) = &result {
            self.report_failure(error, had_credential);
        }
        result
    }

    async fn dispatch<T>(&self, spec: &RequestSpec, token: Option<String>) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, spec.path);
        let mut request = self.client.request(spec.method.clone(), url);

        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = &spec.body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout {
                    timeout_secs: DEFAULT_TIMEOUT_SECS,
                    endpoint: spec.path.clone(),
                }
            } else {
                ApiError::Network {
                    endpoint: spec.path.clone(),
                    message: e.to_string(),
                }
            }
        })?;

        self.handle_response(response, &spec.path).await
    }

    fn report_failure(&self, error: &ApiError, had_credential: bool) {
        match error {
            // An authenticated call bounced with 401: the stored token is no
            // longer valid. An unauthenticated 401 (e.g. a bad login) is an
            // ordinary failure and must not end a session that does not exist.
            ApiError::Unauthorized { .. } if had_credential => {
                if let Err(storage) = self.session.clear() {
                    log_warning(&format!("Failed to clear stored session: {}", storage));
                }
                self.notifier.error("Session expired. Please login again.");
                self.navigator.goto(Route::Login);
            }
            other => self.notifier.error(&other.user_message()),
        }
    }

    async fn handle_response<T>(&self, response: Response, endpoint: &str) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Mutation endpoints may answer with an empty body; decode that
            // as JSON null so unit-like targets still parse.
            let payload = if body.is_empty() { "null" } else { body.as_str() };
            return serde_json::from_str::<T>(payload).map_err(|e| ApiError::Http {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                message: format!("Failed to parse response: {}", e),
                header_message: None,
            });
        }

        let header_message = response
            .headers()
            .get("x-error-message")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text().await.unwrap_or_default();
        let message = extract_server_message(&body);

        match status.as_u16() {
            401 => Err(ApiError::Unauthorized {
                status: 401,
                endpoint: endpoint.to_string(),
                server_message: message,
            }),
            408 | 504 => Err(ApiError::Timeout {
                timeout_secs: DEFAULT_TIMEOUT_SECS,
                endpoint: endpoint.to_string(),
            }),
            _ => Err(ApiError::Http {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                message,
                header_message,
            }),
        }
    }

    /// Exchanges credentials for a session token and stores it.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let spec = RequestSpec::post(
            "/auth/login",
            serde_json::to_value(&request).unwrap_or(Value::Null),
        );

        let response: LoginResponse = self.send(&spec).await?;

        self.session
            .store(&response.token)
            .map_err(|e| ApiError::Http {
                status: 0,
                endpoint: "session_store".to_string(),
                message: format!("Failed to store session token: {}", e),
                header_message: None,
            })?;

        Ok(())
    }

    pub async fn register(&self, branch: BranchInput, user: RegisterUser) -> Result<(), ApiError> {
        let request = RegisterRequest { branch, user };
        let spec = RequestSpec::post(
            "/auth/register",
            serde_json::to_value(&request).unwrap_or(Value::Null),
        );
        self.send::<Value>(&spec).await?;
        Ok(())
    }

    /// Ends the session locally. No network round-trip is involved.
    pub fn logout(&self) {
        if let Err(storage) = self.session.clear() {
            log_warning(&format!("Failed to clear stored session: {}", storage));
        }
        self.navigator.goto(Route::Login);
    }

    // Resource wrappers: one request spec each, delegating to send.

    pub async fn get_dashboard_stats(&self) -> Result<crate::api::models::DashboardStats, ApiError> {
        self.send(&RequestSpec::get("/dashboard")).await
    }

    pub async fn get_branches(&self) -> Result<Vec<crate::api::models::Branch>, ApiError> {
        self.send(&RequestSpec::get("/branches")).await
    }

    pub async fn get_branch(&self, id: u32) -> Result<crate::api::models::Branch, ApiError> {
        self.send(&RequestSpec::get(format!("/branches/{}", id)))
            .await
    }

    pub async fn update_branch(&self, id: u32, input: &BranchInput) -> Result<Value, ApiError> {
        let body = serde_json::to_value(input).unwrap_or(Value::Null);
        self.send(&RequestSpec::put(format!("/branches/{}", id), body))
            .await
    }

    pub async fn delete_branch(&self, id: u32) -> Result<Value, ApiError> {
        self.send(&RequestSpec::delete(format!("/branches/{}", id)))
            .await
    }

    pub async fn get_users(&self) -> Result<Vec<crate::api::models::User>, ApiError> {
        self.send(&RequestSpec::get("/users")).await
    }

    pub async fn get_user(&self, id: u32) -> Result<crate::api::models::User, ApiError> {
        self.send(&RequestSpec::get(format!("/users/{}", id))).await
    }

    pub async fn get_profile(&self) -> Result<String, ApiError> {
        self.send(&RequestSpec::get("/user/profile")).await
    }

    pub async fn update_user(&self, id: u32, input: &UserInput) -> Result<Value, ApiError> {
        let body = serde_json::to_value(input).unwrap_or(Value::Null);
        self.send(&RequestSpec::put(format!("/users/{}", id), body))
            .await
    }

    pub async fn delete_user(&self, id: u32) -> Result<Value, ApiError> {
        self.send(&RequestSpec::delete(format!("/users/{}", id)))
            .await
    }

    pub async fn get_workouts(&self) -> Result<Vec<crate::api::models::Workout>, ApiError> {
        self.send(&RequestSpec::get("/workouts")).await
    }

    pub async fn get_workout(&self, id: u32) -> Result<crate::api::models::Workout, ApiError> {
        self.send(&RequestSpec::get(format!("/workouts/{}", id)))
            .await
    }

    pub async fn add_workout(&self, input: &WorkoutInput) -> Result<Value, ApiError> {
        let body = serde_json::to_value(input).unwrap_or(Value::Null);
        self.send(&RequestSpec::post("/workouts", body)).await
    }

    pub async fn update_workout(&self, id: u32, input: &WorkoutInput) -> Result<Value, ApiError> {
        let body = serde_json::to_value(input).unwrap_or(Value::Null);
        self.send(&RequestSpec::put(format!("/workouts/{}", id), body))
            .await
    }

    pub async fn delete_workout(&self, id: u32) -> Result<Value, ApiError> {
        self.send(&RequestSpec::delete(format!("/workouts/{}", id)))
            .await
    }
}

/// The API reports failures as `{"message": "..."}` bodies. Anything else
/// is passed through as raw text.
fn extract_server_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::credentials::MemorySessionStore;
    use std::sync::Mutex;

    struct RecordingNotifier {
        errors: Mutex<Vec<String>>,
        pub successes: Mutex<Vec<String>>,
    }

    impl RecordingNotifier {
        pub fn new() -> Self {
            Self {
                errors: Mutex::new(Vec::new()),
                successes: Mutex::new(Vec::new()),
            }
        }
    }

    impl Notifier for RecordingNotifier {
        fn success(&self, message: &str) {
            self.successes.lock().unwrap().push(message.to_string());
        }
        fn error(&self, message: &str) {
            self.errors.lock().unwrap().push(message.to_string());
        }
        fn info(&self, _message: &str) {}
    }

    struct RecordingNavigator {
        pub routes: Mutex<Vec<Route>>,
    }

    impl RecordingNavigator {
        pub fn new() -> Self {
            Self {
                routes: Mutex::new(Vec::new()),
            }
        }
    }

    impl Navigator for RecordingNavigator {
        fn goto(&self, route: Route) {
            self.routes.lock().unwrap().push(route);
        }
    }

    fn test_client() -> (
        GymClient,
        Arc<MemorySessionStore>,
        Arc<RecordingNotifier>,
        Arc<RecordingNavigator>,
    ) {
        let session = Arc::new(MemorySessionStore::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let client = GymClient::new(
            "http://example.test/a/api/".to_string(),
            session.clone(),
            notifier.clone(),
            navigator.clone(),
        )
        .expect("client creation failed");
        (client, session, notifier, navigator)
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let (client, _, _, _) = test_client();
        assert_eq!(client.base_url, "http://example.test/a/api");
    }

    #[test]
    fn test_is_authenticated_follows_store() {
        let (client, session, _, _) = test_client();
        assert!(!client.is_authenticated());
        session.store("token").unwrap();
        assert!(client.is_authenticated());
        session.clear().unwrap();
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_request_spec_builders() {
        let spec = RequestSpec::get("/branches");
        assert_eq!(spec.method, Method::GET);
        assert_eq!(spec.path, "/branches");
        assert!(spec.body.is_none());

        let spec = RequestSpec::put("/branches/3", serde_json::json!({"name": "East"}));
        assert_eq!(spec.method, Method::PUT);
        assert!(spec.body.is_some());

        let spec = RequestSpec::delete("/workouts/9");
        assert_eq!(spec.method, Method::DELETE);
    }

    #[test]
    fn test_extract_server_message() {
        assert_eq!(
            extract_server_message(r#"{"message": "Branch not found"}"#),
            "Branch not found"
        );
        assert_eq!(extract_server_message("plain failure"), "plain failure");
        assert_eq!(extract_server_message(""), "");
        // JSON without a message field keeps the raw body
        assert_eq!(
            extract_server_message(r#"{"code": 9}"#),
            r#"{"code": 9}"#
        );
    }

    #[test]
    fn test_logout_clears_session_and_requests_login() {
        let (client, session, _, navigator) = test_client();
        session.store("token").unwrap();

        client.logout();

        assert!(session.token().is_none());
        assert_eq!(*navigator.routes.lock().unwrap(), vec![Route::Login]);
    }

    #[test]
    fn test_logout_is_idempotent_without_session() {
        let (client, session, _, navigator) = test_client();

        client.logout();
        client.logout();

        assert!(session.token().is_none());
        assert_eq!(
            *navigator.routes.lock().unwrap(),
            vec![Route::Login, Route::Login]
        );
    }
}
