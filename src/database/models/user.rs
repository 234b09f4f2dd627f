use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AdmUser {
    pub id: i64,
    pub name: String,
    pub caption: String,
}

/// A user row as listed under a square role, flagged with whether the user
/// currently holds that role in that square.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SqrSquareUser {
    pub id: i64,
    pub name: String,
    pub caption: String,
    pub active_in_square_role: bool,
}
