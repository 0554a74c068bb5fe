use crate::api::client::GymClient;
use crate::api::models::{User, UserInput};
use crate::core::services::traits::{DeleteService, GetService, UpdateService};
use crate::core::services::types::{ServiceError, map_not_found};
use crate::error::ApiError;
use crate::utils::validation::is_valid_email;
use async_trait::async_trait;
use std::sync::Arc;

pub struct UserService {
    client: Arc<GymClient>,
}

impl UserService {
    pub fn new(client: Arc<GymClient>) -> Self {
        Self { client }
    }

    /// Fetch the display name of the signed-in user.
    pub async fn profile(&self) -> Result<String, ApiError> {
        self.client.get_profile().await
    }

    fn validate_id(id: u32) -> Result<(), ServiceError> {
        if id == 0 {
            return Err(ServiceError::Validation {
                field: "id".to_string(),
                message: "User ID must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    fn validate_input(input: &UserInput) -> Result<(), ServiceError> {
        if !is_valid_email(&input.email) {
            return Err(ServiceError::Validation {
                field: "email".to_string(),
                message: format!("'{}' is not a valid email address", input.email),
            });
        }
        if input.role.trim().is_empty() {
            return Err(ServiceError::Validation {
                field: "role".to_string(),
                message: "Role cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl GetService<User> for UserService {
    async fn get(&self, id: u32) -> Result<User, ServiceError> {
        Self::validate_id(id)?;
        self.client
            .get_user(id)
            .await
            .map_err(map_not_found("User", id))
    }
}

#[async_trait]
impl UpdateService<UserInput> for UserService {
    async fn update(&self, id: u32, input: UserInput) -> Result<(), ServiceError> {
        Self::validate_id(id)?;
        Self::validate_input(&input)?;
        self.client
            .update_user(id, &input)
            .await
            .map_err(map_not_found("User", id))?;
        Ok(())
    }
}

#[async_trait]
impl DeleteService for UserService {
    async fn delete(&self, id: u32) -> Result<(), ServiceError> {
        Self::validate_id(id)?;
        self.client
            .delete_user(id)
            .await
            .map_err(map_not_found("User", id))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::{Navigator, Notifier, Route};
    use crate::storage::credentials::MemorySessionStore;

    struct SilentNotifier;
    impl Notifier for SilentNotifier {
        fn success(&self, _message: &str) {}
        fn error(&self, _message: &str) {}
        fn info(&self, _message: &str) {}
    }

    struct SilentNavigator;
    impl Navigator for SilentNavigator {
        fn goto(&self, _route: Route) {}
    }

    fn service() -> UserService {
        let client = GymClient::new(
            "http://example.test".to_string(),
            Arc::new(MemorySessionStore::new()),
            Arc::new(SilentNotifier),
            Arc::new(SilentNavigator),
        )
        .expect("client creation failed");
        UserService::new(Arc::new(client))
    }

    #[tokio::test]
    async fn test_update_rejects_malformed_email() {
        let service = service();
        let input = UserInput {
            email: "broken".to_string(),
            role: "MEMBER".to_string(),
            branch_id: None,
        };

        let result = service.update(2, input).await;
        assert!(matches!(
            result,
            Err(ServiceError::Validation { ref field, .. }) if field == "email"
        ));
    }

    #[tokio::test]
    async fn test_update_rejects_empty_role() {
        let service = service();
        let input = UserInput {
            email: "member@gym.test".to_string(),
            role: "  ".to_string(),
            branch_id: Some(1),
        };

        let result = service.update(2, input).await;
        assert!(matches!(
            result,
            Err(ServiceError::Validation { ref field, .. }) if field == "role"
        ));
    }

    #[tokio::test]
    async fn test_zero_id_fails_validation() {
        let service = service();
        assert!(service.get(0).await.is_err());
        assert!(service.delete(0).await.is_err());
    }
}
