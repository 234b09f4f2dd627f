use sqlx::{QueryBuilder, Sqlite, SqlitePool, Transaction};

use crate::database::models::{SqrSquare, SqrSquareInput};

pub async fn get_all_squares(pool: &SqlitePool) -> Result<Vec<SqrSquare>, sqlx::Error> {
    sqlx::query_as::<_, SqrSquare>(
        r#"
        SELECT id, name, caption, description
        FROM sqr_square
        ORDER BY caption
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Squares where the named caller holds at least one membership row.
pub async fn get_squares_for_user(
    pool: &SqlitePool,
    username: &str,
) -> Result<Vec<SqrSquare>, sqlx::Error> {
    sqlx::query_as::<_, SqrSquare>(
        r#"
        SELECT DISTINCT s.id, s.name, s.caption, s.description
        FROM sqr_square s
        INNER JOIN sqr_square_user su ON su.square_id = s.id
        INNER JOIN adm_user u ON u.id = su.user_id
        WHERE u.name = ?
        ORDER BY s.caption
        "#,
    )
    .bind(username)
    .fetch_all(pool)
    .await
}

pub async fn get_square_by_id(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<SqrSquare>, sqlx::Error> {
    sqlx::query_as::<_, SqrSquare>(
        r#"
        SELECT id, name, caption, description
        FROM sqr_square
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn create_square(
    tx: &mut Transaction<'_, Sqlite>,
    input: SqrSquareInput,
) -> Result<SqrSquare, sqlx::Error> {
    sqlx::query_as::<_, SqrSquare>(
        r#"
        INSERT INTO sqr_square (name, caption, description)
        VALUES (?, ?, ?)
        RETURNING id, name, caption, description
        "#,
    )
    .bind(input.name)
    .bind(input.caption)
    .bind(input.description)
    .fetch_one(&mut **tx)
    .await
}

pub async fn update_square(
    tx: &mut Transaction<'_, Sqlite>,
    id: i64,
    input: SqrSquareInput,
) -> Result<Option<SqrSquare>, sqlx::Error> {
    sqlx::query_as::<_, SqrSquare>(
        r#"
        UPDATE sqr_square
        SET name = ?, caption = ?, description = ?
        WHERE id = ?
        RETURNING id, name, caption, description
        "#,
    )
    .bind(input.name)
    .bind(input.caption)
    .bind(input.description)
    .bind(id)
    .fetch_optional(&mut **tx)
    .await
}

/// Bulk delete; missing ids are silently skipped.
pub async fn delete_squares(
    tx: &mut Transaction<'_, Sqlite>,
    ids: &[i64],
) -> Result<u64, sqlx::Error> {
    if ids.is_empty() {
        return Ok(0);
    }

    let mut query = QueryBuilder::<Sqlite>::new("DELETE FROM sqr_square WHERE id IN (");
    let mut separated = query.separated(", ");
    for &id in ids {
        separated.push_bind(id);
    }
    separated.push_unseparated(")");

    let result = query.build().execute(&mut **tx).await?;
    Ok(result.rows_affected())
}
