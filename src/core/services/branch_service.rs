use crate::api::client::GymClient;
use crate::api::models::{Branch, BranchInput};
use crate::core::services::traits::{DeleteService, GetService, UpdateService};
use crate::core::services::types::{ServiceError, map_not_found};
use crate::utils::validation::is_valid_email;
use async_trait::async_trait;
use std::sync::Arc;

pub struct BranchService {
    client: Arc<GymClient>,
}

impl BranchService {
    pub fn new(client: Arc<GymClient>) -> Self {
        Self { client }
    }

    fn validate_id(id: u32) -> Result<(), ServiceError> {
        if id == 0 {
            return Err(ServiceError::Validation {
                field: "id".to_string(),
                message: "Branch ID must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    fn validate_input(input: &BranchInput) -> Result<(), ServiceError> {
        if input.name.trim().is_empty() {
            return Err(ServiceError::Validation {
                field: "name".to_string(),
                message: "Branch name cannot be empty".to_string(),
            });
        }
        if input.location.trim().is_empty() {
            return Err(ServiceError::Validation {
                field: "location".to_string(),
                message: "Branch location cannot be empty".to_string(),
            });
        }
        if !is_valid_email(&input.email) {
            return Err(ServiceError::Validation {
                field: "email".to_string(),
                message: format!("'{}' is not a valid email address", input.email),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl GetService<Branch> for BranchService {
    async fn get(&self, id: u32) -> Result<Branch, ServiceError> {
        Self::validate_id(id)?;
        self.client
            .get_branch(id)
            .await
            .map_err(map_not_found("Branch", id))
    }
}

#[async_trait]
impl UpdateService<BranchInput> for BranchService {
    async fn update(&self, id: u32, input: BranchInput) -> Result<(), ServiceError> {
        Self::validate_id(id)?;
        Self::validate_input(&input)?;
        self.client
            .update_branch(id, &input)
            .await
            .map_err(map_not_found("Branch", id))?;
        Ok(())
    }
}

#[async_trait]
impl DeleteService for BranchService {
    async fn delete(&self, id: u32) -> Result<(), ServiceError> {
        Self::validate_id(id)?;
        self.client
            .delete_branch(id)
            .await
            .map_err(map_not_found("Branch", id))?;
        Ok(())
    }
}
