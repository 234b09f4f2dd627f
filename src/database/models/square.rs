use serde::{Deserialize, Serialize};

/// The top-level organizational unit: a competition/workspace owning the
/// roles in use, the teams and the timers.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SqrSquare {
    pub id: i64,
    pub name: String,
    pub caption: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqrSquareInput {
    pub name: String,
    pub caption: String,
    pub description: Option<String>,
}
