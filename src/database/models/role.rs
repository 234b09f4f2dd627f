use serde::{Deserialize, Serialize};

/// A named participation category (participant, teamExpert, ...). Roles are
/// global; a role carries the authorization group that a grant implies.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SqrRole {
    pub id: i64,
    pub name: String,
    pub caption: String,
    pub description: Option<String>,
    pub group_id: i64,
}
