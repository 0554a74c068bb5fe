use crate::core::services::types::ServiceError;
use async_trait::async_trait;

/// Trait for services that can retrieve individual resources
#[async_trait]
pub trait GetService<T> {
    /// Get a single resource by ID
    async fn get(&self, id: u32) -> Result<T, ServiceError>;
}

/// Trait for services that can create resources
#[async_trait]
pub trait CreateService<CreateInput> {
    /// Create a new resource
    async fn create(&self, input: CreateInput) -> Result<(), ServiceError>;
}

/// Trait for services that can update resources
#[async_trait]
pub trait UpdateService<UpdateInput> {
    /// Update an existing resource
    async fn update(&self, id: u32, input: UpdateInput) -> Result<(), ServiceError>;
}

/// Trait for services that can delete resources
#[async_trait]
pub trait DeleteService {
    /// Delete a resource by ID
    async fn delete(&self, id: u32) -> Result<(), ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Mock service for testing traits
    struct MockService;

    #[async_trait]
    impl GetService<String> for MockService {
        async fn get(&self, _id: u32) -> Result<String, ServiceError> {
            Ok("test_item".to_string())
        }
    }

    #[async_trait]
    impl DeleteService for MockService {
        async fn delete(&self, id: u32) -> Result<(), ServiceError> {
            if id == 0 {
                return Err(ServiceError::Validation {
                    field: "id".to_string(),
                    message: "ID must be greater than 0".to_string(),
                });
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_get_service() {
        let service = MockService;
        let result = service.get(1).await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "test_item");
    }

    #[tokio::test]
    async fn test_delete_service_validation() {
        let service = MockService;
        assert!(service.delete(0).await.is_err());
        assert!(service.delete(1).await.is_ok());
    }
}
