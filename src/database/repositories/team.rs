use sqlx::{QueryBuilder, Sqlite, SqlitePool, Transaction};

use crate::database::models::{SqrTeam, SqrTeamInput, SquareTeamUserRow};
use crate::database::repositories::escape_like;

pub async fn get_teams<'e, E>(executor: E, square_id: i64) -> Result<Vec<SqrTeam>, sqlx::Error>
where
    E: sqlx::SqliteExecutor<'e>,
{
    sqlx::query_as::<_, SqrTeam>(
        r#"
        SELECT id, square_id, name, caption, description
        FROM sqr_team
        WHERE square_id = ?
        ORDER BY caption
        "#,
    )
    .bind(square_id)
    .fetch_all(executor)
    .await
}

pub async fn get_team_by_id<'e, E>(
    executor: E,
    square_id: i64,
    team_id: i64,
) -> Result<Option<SqrTeam>, sqlx::Error>
where
    E: sqlx::SqliteExecutor<'e>,
{
    sqlx::query_as::<_, SqrTeam>(
        r#"
        SELECT id, square_id, name, caption, description
        FROM sqr_team
        WHERE id = ? AND square_id = ?
        "#,
    )
    .bind(team_id)
    .bind(square_id)
    .fetch_optional(executor)
    .await
}

pub async fn create_team(
    tx: &mut Transaction<'_, Sqlite>,
    square_id: i64,
    input: SqrTeamInput,
) -> Result<SqrTeam, sqlx::Error> {
    sqlx::query_as::<_, SqrTeam>(
        r#"
        INSERT INTO sqr_team (square_id, name, caption, description)
        VALUES (?, ?, ?, ?)
        RETURNING id, square_id, name, caption, description
        "#,
    )
    .bind(square_id)
    .bind(input.name)
    .bind(input.caption)
    .bind(input.description)
    .fetch_one(&mut **tx)
    .await
}

pub async fn update_team(
    tx: &mut Transaction<'_, Sqlite>,
    square_id: i64,
    team_id: i64,
    input: SqrTeamInput,
) -> Result<Option<SqrTeam>, sqlx::Error> {
    sqlx::query_as::<_, SqrTeam>(
        r#"
        UPDATE sqr_team
        SET name = ?, caption = ?, description = ?
        WHERE id = ? AND square_id = ?
        RETURNING id, square_id, name, caption, description
        "#,
    )
    .bind(input.name)
    .bind(input.caption)
    .bind(input.description)
    .bind(team_id)
    .bind(square_id)
    .fetch_optional(&mut **tx)
    .await
}

pub async fn delete_teams(
    tx: &mut Transaction<'_, Sqlite>,
    square_id: i64,
    ids: &[i64],
) -> Result<u64, sqlx::Error> {
    if ids.is_empty() {
        return Ok(0);
    }

    let mut query = QueryBuilder::<Sqlite>::new("DELETE FROM sqr_team WHERE square_id = ");
    query.push_bind(square_id);
    query.push(" AND id IN (");
    let mut separated = query.separated(", ");
    for &id in ids {
        separated.push_bind(id);
    }
    separated.push_unseparated(")");

    let result = query.build().execute(&mut **tx).await?;
    Ok(result.rows_affected())
}

/// Membership rows eligible for team assignment: only `participant` and
/// `teamExpert` grants count. `show_all_users` widens from the requested
/// team to the whole square; the active flag marks rows already on the
/// requested team.
pub async fn get_square_team_users(
    pool: &SqlitePool,
    square_id: i64,
    team_id: i64,
    fast_filter: Option<&str>,
    show_all_users: bool,
) -> Result<Vec<SquareTeamUserRow>, sqlx::Error> {
    let filter = escape_like(&fast_filter.unwrap_or("").to_lowercase());

    sqlx::query_as::<_, SquareTeamUserRow>(
        r#"
        SELECT
            su.id,
            u.id AS user_id,
            u.name AS user_name,
            u.caption AS user_caption,
            r.id AS role_id,
            r.name AS role_name,
            r.caption AS role_caption,
            t.id AS team_id,
            t.name AS team_name,
            t.caption AS team_caption,
            COALESCE(su.team_id = ?, 0) AS active_in_square_role
        FROM sqr_square_user su
        INNER JOIN adm_user u ON u.id = su.user_id
        INNER JOIN sqr_role r ON r.id = su.role_id
        LEFT JOIN sqr_team t ON t.id = su.team_id
        WHERE su.square_id = ?
          AND r.name IN ('participant', 'teamExpert')
          AND u.name <> 'admin'
          AND (? OR su.team_id = ?)
          AND (? = '' OR LOWER(u.caption) LIKE '%' || ? || '%' ESCAPE '\')
        ORDER BY u.caption
        "#,
    )
    .bind(team_id)
    .bind(square_id)
    .bind(show_all_users)
    .bind(team_id)
    .bind(&filter)
    .bind(&filter)
    .fetch_all(pool)
    .await
}

/// Applies the team ids in request order within the caller's transaction,
/// so with several teams the last id wins deterministically.
pub async fn add_users_to_teams(
    tx: &mut Transaction<'_, Sqlite>,
    square_id: i64,
    team_ids: &[i64],
    user_ids: &[i64],
) -> Result<(), sqlx::Error> {
    if user_ids.is_empty() {
        return Ok(());
    }

    for &team_id in team_ids {
        let mut query = QueryBuilder::<Sqlite>::new("UPDATE sqr_square_user SET team_id = ");
        query.push_bind(team_id);
        query.push(" WHERE square_id = ");
        query.push_bind(square_id);
        query.push(" AND user_id IN (");
        let mut separated = query.separated(", ");
        for &user_id in user_ids {
            separated.push_bind(user_id);
        }
        separated.push_unseparated(")");
        query.build().execute(&mut **tx).await?;
    }

    Ok(())
}

pub async fn remove_users_from_teams(
    tx: &mut Transaction<'_, Sqlite>,
    square_id: i64,
    team_ids: &[i64],
    user_ids: &[i64],
) -> Result<(), sqlx::Error> {
    if team_ids.is_empty() || user_ids.is_empty() {
        return Ok(());
    }

    let mut query =
        QueryBuilder::<Sqlite>::new("UPDATE sqr_square_user SET team_id = NULL WHERE square_id = ");
    query.push_bind(square_id);
    query.push(" AND team_id IN (");
    let mut separated = query.separated(", ");
    for &team_id in team_ids {
        separated.push_bind(team_id);
    }
    separated.push_unseparated(")");
    query.push(" AND user_id IN (");
    let mut separated = query.separated(", ");
    for &user_id in user_ids {
        separated.push_bind(user_id);
    }
    separated.push_unseparated(")");
    query.build().execute(&mut **tx).await?;

    Ok(())
}
