use mongodb::bson::Document;
use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

pub const USER_EXISTS_MESSAGE: &str = "User already exists";

/// Body of the status update routes (users and reservations).
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct StatusUpdate {
    pub status: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub fn is_admin(user: &Document) -> bool {
    user.get_str("role").is_ok_and(|role| role == ROLE_ADMIN)
}
