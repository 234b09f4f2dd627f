use sqlx::SqlitePool;

use crate::database::models::SqrSquareUser;
use crate::database::repositories::escape_like;

/// Users listed under a square role. The literal `admin` user never shows
/// up; `show_all_users` widens the listing from current holders to every
/// user, and a non-empty filter narrows by caption, case-insensitively.
pub async fn get_square_role_users(
    pool: &SqlitePool,
    square_id: i64,
    role_id: i64,
    fast_filter: Option<&str>,
    show_all_users: bool,
) -> Result<Vec<SqrSquareUser>, sqlx::Error> {
    let filter = escape_like(&fast_filter.unwrap_or("").to_lowercase());

    sqlx::query_as::<_, SqrSquareUser>(
        r#"
        SELECT
            u.id,
            u.name,
            u.caption,
            EXISTS (
                SELECT 1 FROM sqr_square_user su
                WHERE su.user_id = u.id AND su.square_id = ? AND su.role_id = ?
            ) AS active_in_square_role
        FROM adm_user u
        WHERE u.name <> 'admin'
          AND (? OR EXISTS (
                SELECT 1 FROM sqr_square_user su
                WHERE su.user_id = u.id AND su.square_id = ? AND su.role_id = ?
          ))
          AND (? = '' OR LOWER(u.caption) LIKE '%' || ? || '%' ESCAPE '\')
        ORDER BY u.caption
        "#,
    )
    .bind(square_id)
    .bind(role_id)
    .bind(show_all_users)
    .bind(square_id)
    .bind(role_id)
    .bind(&filter)
    .bind(&filter)
    .fetch_all(pool)
    .await
}
