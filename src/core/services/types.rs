use crate::error::ApiError;

/// Service layer error types
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Validation error: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Not found: {resource_type} with ID {id}")]
    NotFound { resource_type: String, id: u32 },
}

/// Snapshot of the authentication state for status output.
#[derive(Debug, Clone)]
pub struct AuthStatus {
    pub is_authenticated: bool,
    pub profile_name: String,
    pub server_url: String,
}

pub(crate) fn map_not_found(resource_type: &str, id: u32) -> impl Fn(ApiError) -> ServiceError {
    let resource_type = resource_type.to_string();
    move |error| match error {
        ApiError::Http { status: 404, .. } => ServiceError::NotFound {
            resource_type: resource_type.clone(),
            id,
        },
        other => ServiceError::Api(other),
    }
}
