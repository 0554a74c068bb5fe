use crate::AppError;
use crate::api::client::{GymClient, Navigator, Notifier, Route};
use crate::api::models::{BranchInput, RegisterUser};
use crate::core::auth::LoginInput;
use crate::core::services::types::AuthStatus;
use crate::error::{ApiError, AuthError};
use std::sync::Arc;

/// Authentication flows: login, register, logout, status.
pub struct AuthService {
    client: Arc<GymClient>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    profile_name: String,
}

impl AuthService {
    pub fn new(
        client: Arc<GymClient>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        profile_name: String,
    ) -> Self {
        Self {
            client,
            notifier,
            navigator,
            profile_name,
        }
    }

    /// Authenticate and open a session. On success the dashboard route is
    /// requested; on bad credentials the stored session stays untouched and
    /// no navigation happens.
    pub async fn login(&self, input: LoginInput) -> Result<(), AppError> {
        input.validate()?;

        match self.client.login(&input.email, &input.password).await {
            Ok(()) => {
                self.notifier.success("Login successful!");
                self.navigator.goto(Route::Dashboard);
                Ok(())
            }
            Err(ApiError::Unauthorized { .. }) => Err(AuthError::InvalidCredentials.into()),
            Err(other) => Err(other.into()),
        }
    }

    /// Register a new branch together with its first user, then point the
    /// user back at the login flow.
    pub async fn register(&self, branch: BranchInput, user: RegisterUser) -> Result<(), AppError> {
        self.client.register(branch, user).await?;
        self.notifier
            .success("Registration successful! Please login.");
        self.navigator.goto(Route::Login);
        Ok(())
    }

    /// End the session locally. Always succeeds, even without a session.
    pub fn logout(&self) {
        self.client.logout();
        self.notifier.info("You have been logged out");
    }

    pub fn status(&self) -> AuthStatus {
        AuthStatus {
            is_authenticated: self.client.is_authenticated(),
            profile_name: self.profile_name.clone(),
            server_url: self.client.base_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::credentials::{MemorySessionStore, SessionStore};
    use std::sync::Mutex;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct RecordingNotifier {
        messages: Mutex<Vec<(String, String)>>,
    }

    impl RecordingNotifier {
        fn new() -> Self {
            Self {
                messages: Mutex::new(Vec::new()),
            }
        }

        fn recorded(&self) -> Vec<(String, String)> {
            self.messages.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn success(&self, message: &str) {
            self.messages
                .lock()
                .unwrap()
                .push(("success".to_string(), message.to_string()));
        }
        fn error(&self, message: &str) {
            self.messages
                .lock()
                .unwrap()
                .push(("error".to_string(), message.to_string()));
        }
        fn info(&self, message: &str) {
            self.messages
                .lock()
                .unwrap()
                .push(("info".to_string(), message.to_string()));
        }
    }

    struct RecordingNavigator {
        routes: Mutex<Vec<Route>>,
    }

    impl RecordingNavigator {
        fn new() -> Self {
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

    fn service_for(
        server: &MockServer,
    ) -> (
        AuthService,
        Arc<MemorySessionStore>,
        Arc<RecordingNotifier>,
        Arc<RecordingNavigator>,
    ) {
        let session = Arc::new(MemorySessionStore::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let client = Arc::new(
            GymClient::new(
                server.uri(),
                session.clone(),
                notifier.clone(),
                navigator.clone(),
            )
            .expect("client creation failed"),
        );
        let service = AuthService::new(
            client,
            notifier.clone(),
            navigator.clone(),
            "default".to_string(),
        );
        (service, session, notifier, navigator)
    }

    #[tokio::test]
    async fn test_login_stores_token_and_navigates_to_dashboard() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(serde_json::json!({
                "email": "admin@gym.test",
                "password": "secret"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": "tok-1"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (service, session, notifier, navigator) = service_for(&server);
        let input = LoginInput {
            email: "admin@gym.test".to_string(),
            password: "secret".to_string(),
        };

        service.login(input).await.expect("login should succeed");

        assert_eq!(session.token(), Some("tok-1".to_string()));
        assert_eq!(*navigator.routes.lock().unwrap(), vec![Route::Dashboard]);
        assert!(
            notifier
                .recorded()
                .contains(&("success".to_string(), "Login successful!".to_string()))
        );
    }

    #[tokio::test]
    async fn test_login_failure_leaves_session_absent_and_does_not_navigate() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"message": "Invalid credentials"})),
            )
            .mount(&server)
            .await;

        let (service, session, notifier, navigator) = service_for(&server);
        let input = LoginInput {
            email: "admin@gym.test".to_string(),
            password: "wrong".to_string(),
        };

        let result = service.login(input).await;

        assert!(matches!(
            result,
            Err(AppError::Auth(AuthError::InvalidCredentials))
        ));
        assert!(session.token().is_none());
        assert!(navigator.routes.lock().unwrap().is_empty());
        // The failed call surfaced a notification exactly once.
        let errors: Vec<_> = notifier
            .recorded()
            .into_iter()
            .filter(|(kind, _)| kind == "error")
            .collect();
        assert_eq!(errors.len(), 1);
    }

    #[tokio::test]
    async fn test_login_rejects_invalid_input_before_any_request() {
        let server = MockServer::start().await;
        // No mock mounted: a request would 404 and fail differently.
        let (service, session, _, _) = service_for(&server);
        let input = LoginInput {
            email: "bad-email".to_string(),
            password: "secret".to_string(),
        };

        let result = service.login(input).await;
        assert!(matches!(result, Err(AppError::Cli(_))));
        assert!(session.token().is_none());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_navigates_back_to_login() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let (service, _, notifier, navigator) = service_for(&server);
        let branch = BranchInput {
            name: "Central".to_string(),
            email: "c@x.com".to_string(),
            location: "Downtown".to_string(),
        };
        let user = RegisterUser {
            email: "admin@gym.test".to_string(),
            password: "secret".to_string(),
            role: "ADMIN".to_string(),
        };

        service
            .register(branch, user)
            .await
            .expect("register should succeed");

        assert_eq!(*navigator.routes.lock().unwrap(), vec![Route::Login]);
        assert!(
            notifier.recorded().contains(&(
                "success".to_string(),
                "Registration successful! Please login.".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_logout_and_status() {
        let server = MockServer::start().await;
        let (service, session, notifier, navigator) = service_for(&server);
        session.store("tok").unwrap();
        assert!(service.status().is_authenticated);

        service.logout();

        assert!(!service.status().is_authenticated);
        assert!(session.token().is_none());
        assert_eq!(*navigator.routes.lock().unwrap(), vec![Route::Login]);
        assert!(
            notifier
                .recorded()
                .contains(&("info".to_string(), "You have been logged out".to_string()))
        );
        assert_eq!(service.status().profile_name, "default");
    }
}
