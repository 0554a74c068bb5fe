use serde::{Deserialize, Serialize};

// Authentication models
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub branch: BranchInput,
    pub user: RegisterUser,
}

#[derive(Debug, Serialize)]
pub struct RegisterUser {
    pub email: String,
    pub password: String,
    pub role: String,
}

// Branch models
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Branch {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub location: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct BranchInput {
    pub name: String,
    pub email: String,
    pub location: String,
}

// User models
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct User {
    pub id: u32,
    pub email: String,
    pub role: String,
    pub branch: Option<BranchRef>,
}

/// Branch as embedded in a user record. The server omits the id in some
/// listings, so it stays optional here.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BranchRef {
    pub id: Option<u32>,
    pub name: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct UserInput {
    pub email: String,
    pub role: String,
    #[serde(rename = "branchId", skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<u32>,
}

// Workout models
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Workout {
    pub id: Option<u32>,
    #[serde(rename = "type")]
    pub workout_type: String,
    pub duration: u32,
}

#[derive(Debug, Serialize, Clone)]
pub struct WorkoutInput {
    #[serde(rename = "type")]
    pub workout_type: String,
    pub duration: u32,
}

// Dashboard models
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DashboardStats {
    pub branches: u64,
    pub users: u64,
    pub workouts: u64,
}
