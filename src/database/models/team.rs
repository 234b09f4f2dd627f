use serde::{Deserialize, Serialize};

use crate::database::models::user::AdmUser;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SqrTeam {
    pub id: i64,
    pub square_id: i64,
    pub name: String,
    pub caption: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqrTeamInput {
    pub name: String,
    pub caption: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqrTeamRef {
    pub id: i64,
    pub name: String,
    pub caption: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqrRoleRef {
    pub id: i64,
    pub name: String,
    pub caption: String,
}

/// A membership row as listed under a square team: the member's user, role
/// and (possibly absent) team, flagged with whether the row belongs to the
/// requested team.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqrSquareTeamUser {
    pub id: i64,
    pub user: AdmUser,
    pub role: SqrRoleRef,
    pub team: Option<SqrTeamRef>,
    pub active_in_square_role: bool,
}

/// Flat join row behind [`SqrSquareTeamUser`]; the repository folds it into
/// the nested shape.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SquareTeamUserRow {
    pub id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub user_caption: String,
    pub role_id: i64,
    pub role_name: String,
    pub role_caption: String,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
    pub team_caption: Option<String>,
    pub active_in_square_role: bool,
}

impl From<SquareTeamUserRow> for SqrSquareTeamUser {
    fn from(row: SquareTeamUserRow) -> Self {
        let team = match (row.team_id, row.team_name, row.team_caption) {
            (Some(id), Some(name), Some(caption)) => Some(SqrTeamRef { id, name, caption }),
            _ => None,
        };
        SqrSquareTeamUser {
            id: row.id,
            user: AdmUser {
                id: row.user_id,
                name: row.user_name,
                caption: row.user_caption,
            },
            role: SqrRoleRef {
                id: row.role_id,
                name: row.role_name,
                caption: row.role_caption,
            },
            team,
            active_in_square_role: row.active_in_square_role,
        }
    }
}
