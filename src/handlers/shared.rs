use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// JSON envelope for error responses (successful responses carry the bare
/// DTO, matching the console frontend).
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl ApiResponse<()> {
    pub fn error(message: &str) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.to_string()),
        }
    }
}

/// Splits a comma-joined path segment into ids; any non-numeric token is a
/// bad request.
pub fn parse_id_list(segment: &str) -> Result<Vec<i64>, AppError> {
    segment
        .split(',')
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| AppError::BadRequest(format!("Invalid id '{}' in id list", token)))
        })
        .collect()
}

/// Common query parameters of the member listings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    pub show_all_users: Option<bool>,
    pub fast_filter: Option<String>,
}
