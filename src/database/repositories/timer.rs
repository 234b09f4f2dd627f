use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::database::models::{SqrTeam, SqrTimerDetail, SqrTimerRow, TimerState};

pub async fn get_timers(
    pool: &SqlitePool,
    square_id: i64,
) -> Result<Vec<SqrTimerRow>, sqlx::Error> {
    sqlx::query_as::<_, SqrTimerRow>(
        r#"
        SELECT
            tm.id,
            tm.square_id,
            tm.team_id,
            t.caption AS team_caption,
            tm.caption,
            tm.state,
            tm.count,
            tm.begin_time,
            tm.pause_time,
            tm.continue_time,
            tm.stop_time
        FROM sqr_timer tm
        INNER JOIN sqr_team t ON t.id = tm.team_id
        WHERE tm.square_id = ?
        ORDER BY t.caption
        "#,
    )
    .bind(square_id)
    .fetch_all(pool)
    .await
}

pub async fn get_timer_details(
    pool: &SqlitePool,
    square_id: i64,
    timer_id: i64,
) -> Result<Vec<SqrTimerDetail>, sqlx::Error> {
    sqlx::query_as::<_, SqrTimerDetail>(
        r#"
        SELECT d.id, d.timer_id, d.state, d.time, d.description
        FROM sqr_timer_detail d
        INNER JOIN sqr_timer tm ON tm.id = d.timer_id
        WHERE d.timer_id = ? AND tm.square_id = ?
        ORDER BY d.time
        "#,
    )
    .bind(timer_id)
    .bind(square_id)
    .fetch_all(pool)
    .await
}

/// Drops every timer of the square together with its history rows.
pub async fn delete_timers_for_square(
    tx: &mut Transaction<'_, Sqlite>,
    square_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        DELETE FROM sqr_timer_detail
        WHERE timer_id IN (SELECT id FROM sqr_timer WHERE square_id = ?)
        "#,
    )
    .bind(square_id)
    .execute(&mut **tx)
    .await?;

    sqlx::query("DELETE FROM sqr_timer WHERE square_id = ?")
        .bind(square_id)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

/// Inserts one fresh READY timer for the team plus its initial detail row.
pub async fn create_timer_for_team(
    tx: &mut Transaction<'_, Sqlite>,
    team: &SqrTeam,
    now: DateTime<Utc>,
) -> Result<i64, sqlx::Error> {
    let timer_id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO sqr_timer (square_id, team_id, caption, state, count)
        VALUES (?, ?, ?, ?, 0)
        RETURNING id
        "#,
    )
    .bind(team.square_id)
    .bind(team.id)
    .bind(&team.caption)
    .bind(TimerState::Ready)
    .fetch_one(&mut **tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO sqr_timer_detail (timer_id, state, time, description)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(timer_id)
    .bind(TimerState::Ready)
    .bind(now)
    .bind("teams timers recreated")
    .execute(&mut **tx)
    .await?;

    Ok(timer_id)
}

/// Bulk count update; with a timer id only that timer is touched, without
/// one every timer of the square is. Non-matching ids are a no-op.
pub async fn set_timer_count(
    tx: &mut Transaction<'_, Sqlite>,
    square_id: i64,
    count: i64,
    timer_id: Option<i64>,
) -> Result<u64, sqlx::Error> {
    let result = match timer_id {
        Some(timer_id) => {
            sqlx::query("UPDATE sqr_timer SET count = ? WHERE square_id = ? AND id = ?")
                .bind(count)
                .bind(square_id)
                .bind(timer_id)
                .execute(&mut **tx)
                .await?
        }
        None => {
            sqlx::query("UPDATE sqr_timer SET count = ? WHERE square_id = ?")
                .bind(count)
                .bind(square_id)
                .execute(&mut **tx)
                .await?
        }
    };

    Ok(result.rows_affected())
}
