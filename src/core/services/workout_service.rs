use crate::api::client::GymClient;
use crate::api::models::{Workout, WorkoutInput};
use crate::core::services::traits::{CreateService, DeleteService, GetService, UpdateService};
use crate::core::services::types::{ServiceError, map_not_found};
use async_trait::async_trait;
use std::sync::Arc;

pub struct WorkoutService {
    client: Arc<GymClient>,
}

impl WorkoutService {
    pub fn new(client: Arc<GymClient>) -> Self {
        Self { client }
    }

    fn validate_id(id: u32) -> Result<(), ServiceError> {
        if id == 0 {
            return Err(ServiceError::Validation {
                field: "id".to_string(),
                message: "Workout ID must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    fn validate_input(input: &WorkoutInput) -> Result<(), ServiceError> {
        if input.workout_type.trim().is_empty() {
            return Err(ServiceError::Validation {
                field: "type".to_string(),
                message: "Workout type is required".to_string(),
            });
        }
        if input.duration == 0 {
            return Err(ServiceError::Validation {
                field: "duration".to_string(),
                message: "Duration must be a positive number".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl GetService<Workout> for WorkoutService {
    async fn get(&self, id: u32) -> Result<Workout, ServiceError> {
        Self::validate_id(id)?;
        self.client
            .get_workout(id)
            .await
            .map_err(map_not_found("Workout", id))
    }
}

#[async_trait]
impl CreateService<WorkoutInput> for WorkoutService {
    async fn create(&self, input: WorkoutInput) -> Result<(), ServiceError> {
        Self::validate_input(&input)?;
        self.client.add_workout(&input).await?;
        Ok(())
    }
}

#[async_trait]
impl UpdateService<WorkoutInput> for WorkoutService {
    async fn update(&self, id: u32, input: WorkoutInput) -> Result<(), ServiceError> {
        Self::validate_id(id)?;
        Self::validate_input(&input)?;
        self.client
            .update_workout(id, &input)
            .await
            .map_err(map_not_found("Workout", id))?;
        Ok(())
    }
}

#[async_trait]
impl DeleteService for WorkoutService {
    async fn delete(&self, id: u32) -> Result<(), ServiceError> {
        Self::validate_id(id)?;
        self.client
            .delete_workout(id)
            .await
            .map_err(map_not_found("Workout", id))?;
        Ok(())
    }
}
