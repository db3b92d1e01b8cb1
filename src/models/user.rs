use serde::{Deserialize, Serialize};

use crate::entities::{donations, users};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub role: users::UserRole,
    pub donations: Vec<donations::Model>,
}

impl UserResponse {
    pub fn from_model(user: users::Model, donations: Vec<donations::Model>) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            image: user.image,
            role: user.role,
            donations,
        }
    }
}
