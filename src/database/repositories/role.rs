use sqlx::{QueryBuilder, Sqlite, SqlitePool, Transaction};

use crate::database::models::SqrRole;

/// Roles are global: they exist independently of any square and are merely
/// assigned per square, so this listing takes no scope.
pub async fn get_roles(pool: &SqlitePool) -> Result<Vec<SqrRole>, sqlx::Error> {
    sqlx::query_as::<_, SqrRole>(
        r#"
        SELECT id, name, caption, description, group_id
        FROM sqr_role
        ORDER BY caption
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Inserts one membership row per (role, user) pair and mirrors each grant
/// into the role's authorization group.
pub async fn add_users_to_square_role(
    tx: &mut Transaction<'_, Sqlite>,
    square_id: i64,
    role_ids: &[i64],
    user_ids: &[i64],
) -> Result<(), sqlx::Error> {
    if role_ids.is_empty() || user_ids.is_empty() {
        return Ok(());
    }

    let pairs: Vec<(i64, i64)> = role_ids
        .iter()
        .flat_map(|&role_id| user_ids.iter().map(move |&user_id| (role_id, user_id)))
        .collect();

    let mut query =
        QueryBuilder::<Sqlite>::new("INSERT INTO sqr_square_user (user_id, role_id, square_id) ");
    query.push_values(pairs.iter().copied(), |mut b, (role_id, user_id)| {
        b.push_bind(user_id).push_bind(role_id).push_bind(square_id);
    });
    query.build().execute(&mut **tx).await?;

    for &(role_id, user_id) in &pairs {
        sqlx::query(
            r#"
            INSERT INTO adm_user_group (user_id, group_id)
            SELECT ?, group_id FROM sqr_role WHERE id = ?
            "#,
        )
        .bind(user_id)
        .bind(role_id)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

/// Deletes the matching membership rows, then reconciles the derived group
/// cache: a group implied by one of the revoked roles is removed for a user
/// only when none of the user's remaining role grants still implies it.
pub async fn remove_users_from_square_role(
    tx: &mut Transaction<'_, Sqlite>,
    square_id: i64,
    role_ids: &[i64],
    user_ids: &[i64],
) -> Result<(), sqlx::Error> {
    if role_ids.is_empty() || user_ids.is_empty() {
        return Ok(());
    }

    let mut query = QueryBuilder::<Sqlite>::new(
        "DELETE FROM sqr_square_user WHERE square_id = ",
    );
    query.push_bind(square_id);
    query.push(" AND role_id IN (");
    let mut separated = query.separated(", ");
    for &role_id in role_ids {
        separated.push_bind(role_id);
    }
    separated.push_unseparated(")");
    query.push(" AND user_id IN (");
    let mut separated = query.separated(", ");
    for &user_id in user_ids {
        separated.push_bind(user_id);
    }
    separated.push_unseparated(")");
    query.build().execute(&mut **tx).await?;

    let mut query = QueryBuilder::<Sqlite>::new(
        r#"
        DELETE FROM adm_user_group
        WHERE group_id IN (SELECT group_id FROM sqr_role WHERE id IN (
        "#,
    );
    let mut separated = query.separated(", ");
    for &role_id in role_ids {
        separated.push_bind(role_id);
    }
    separated.push_unseparated("))");
    query.push(" AND user_id IN (");
    let mut separated = query.separated(", ");
    for &user_id in user_ids {
        separated.push_bind(user_id);
    }
    separated.push_unseparated(")");
    query.push(
        r#"
        AND NOT EXISTS (
            SELECT 1
            FROM sqr_square_user su
            INNER JOIN sqr_role r ON r.id = su.role_id
            WHERE su.user_id = adm_user_group.user_id
              AND r.group_id = adm_user_group.group_id
        )
        "#,
    );
    query.build().execute(&mut **tx).await?;

    Ok(())
}
