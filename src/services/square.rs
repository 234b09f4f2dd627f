use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    database::{
        models::{
            SqrRole, SqrSquare, SqrSquareInput, SqrSquareTeamUser, SqrSquareUser, SqrTeam,
            SqrTeamInput, SqrTimer, SqrTimerDetail,
        },
        repositories::{
            role as role_repo, square as square_repo, team as team_repo, timer as timer_repo,
            user as user_repo,
        },
    },
    error::AppError,
    services::user_context::UserContext,
};

/// The domain service of the console: every cross-table rule (membership,
/// the derived group cache, timer recreation) lives here, along with the
/// transaction boundaries around multi-statement writes.
#[derive(Clone)]
pub struct SquareService {
    pool: SqlitePool,
}

impl SquareService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // Squares

    /// Admin callers see every square; everyone else sees only the squares
    /// where they hold a membership row. Anonymous callers get an empty
    /// list, not an error.
    pub async fn get_squares(&self, ctx: &UserContext) -> Result<Vec<SqrSquare>, AppError> {
        if ctx.is_admin() {
            return Ok(square_repo::get_all_squares(&self.pool).await?);
        }

        match ctx.username.as_deref() {
            Some(username) => {
                Ok(square_repo::get_squares_for_user(&self.pool, username).await?)
            }
            None => Ok(Vec::new()),
        }
    }

    pub async fn get_square(&self, id: i64) -> Result<SqrSquare, AppError> {
        square_repo::get_square_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found("Square", id))
    }

    pub async fn create_square(&self, input: SqrSquareInput) -> Result<SqrSquare, AppError> {
        let mut tx = self.pool.begin().await?;
        let square = square_repo::create_square(&mut tx, input).await?;
        tx.commit().await?;
        Ok(square)
    }

    pub async fn update_square(
        &self,
        id: i64,
        input: SqrSquareInput,
    ) -> Result<SqrSquare, AppError> {
        let mut tx = self.pool.begin().await?;
        let square = square_repo::update_square(&mut tx, id, input)
            .await?
            .ok_or_else(|| AppError::not_found("Square", id))?;
        tx.commit().await?;
        Ok(square)
    }

    pub async fn delete_squares(&self, ids: &[i64]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        let deleted = square_repo::delete_squares(&mut tx, ids).await?;
        tx.commit().await?;
        log::debug!("Deleted {} of {} requested squares", deleted, ids.len());
        Ok(())
    }

    // Role assignment

    /// Roles are global; the square id is accepted only to keep the nested
    /// REST shape.
    pub async fn get_square_roles(&self, _square_id: i64) -> Result<Vec<SqrRole>, AppError> {
        Ok(role_repo::get_roles(&self.pool).await?)
    }

    pub async fn get_square_role_users(
        &self,
        square_id: i64,
        role_id: i64,
        fast_filter: Option<&str>,
        show_all_users: bool,
    ) -> Result<Vec<SqrSquareUser>, AppError> {
        Ok(user_repo::get_square_role_users(
            &self.pool,
            square_id,
            role_id,
            fast_filter,
            show_all_users,
        )
        .await?)
    }

    pub async fn add_users_to_square_role(
        &self,
        square_id: i64,
        role_ids: &[i64],
        user_ids: &[i64],
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        role_repo::add_users_to_square_role(&mut tx, square_id, role_ids, user_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn remove_users_from_square_role(
        &self,
        square_id: i64,
        role_ids: &[i64],
        user_ids: &[i64],
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        role_repo::remove_users_from_square_role(&mut tx, square_id, role_ids, user_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    // Teams

    pub async fn get_square_teams(&self, square_id: i64) -> Result<Vec<SqrTeam>, AppError> {
        Ok(team_repo::get_teams(&self.pool, square_id).await?)
    }

    pub async fn get_square_team(&self, square_id: i64, team_id: i64) -> Result<SqrTeam, AppError> {
        team_repo::get_team_by_id(&self.pool, square_id, team_id)
            .await?
            .ok_or_else(|| AppError::not_found("Team", team_id))
    }

    pub async fn create_team(
        &self,
        square_id: i64,
        input: SqrTeamInput,
    ) -> Result<SqrTeam, AppError> {
        let mut tx = self.pool.begin().await?;
        let team = team_repo::create_team(&mut tx, square_id, input).await?;
        tx.commit().await?;
        Ok(team)
    }

    pub async fn update_team(
        &self,
        square_id: i64,
        team_id: i64,
        input: SqrTeamInput,
    ) -> Result<SqrTeam, AppError> {
        let mut tx = self.pool.begin().await?;
        let team = team_repo::update_team(&mut tx, square_id, team_id, input)
            .await?
            .ok_or_else(|| AppError::not_found("Team", team_id))?;
        tx.commit().await?;
        Ok(team)
    }

    pub async fn delete_teams(&self, square_id: i64, ids: &[i64]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        team_repo::delete_teams(&mut tx, square_id, ids).await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn get_square_team_users(
        &self,
        square_id: i64,
        team_id: i64,
        fast_filter: Option<&str>,
        show_all_users: bool,
    ) -> Result<Vec<SqrSquareTeamUser>, AppError> {
        let rows = team_repo::get_square_team_users(
            &self.pool,
            square_id,
            team_id,
            fast_filter,
            show_all_users,
        )
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Every requested team must belong to the square; a foreign team id
    /// fails the whole call instead of leaking a cross-square reference.
    pub async fn add_users_to_square_team(
        &self,
        square_id: i64,
        team_ids: &[i64],
        user_ids: &[i64],
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        for &team_id in team_ids {
            team_repo::get_team_by_id(&mut *tx, square_id, team_id)
                .await?
                .ok_or_else(|| AppError::not_found("Team", team_id))?;
        }
        team_repo::add_users_to_teams(&mut tx, square_id, team_ids, user_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn remove_users_from_square_team(
        &self,
        square_id: i64,
        team_ids: &[i64],
        user_ids: &[i64],
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        team_repo::remove_users_from_teams(&mut tx, square_id, team_ids, user_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    // Timers

    pub async fn get_square_timers(&self, square_id: i64) -> Result<Vec<SqrTimer>, AppError> {
        let rows = timer_repo::get_timers(&self.pool, square_id).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get_timer_details(
        &self,
        square_id: i64,
        timer_id: i64,
    ) -> Result<Vec<SqrTimerDetail>, AppError> {
        Ok(timer_repo::get_timer_details(&self.pool, square_id, timer_id).await?)
    }

    /// Wholesale timer replacement for a square: every existing timer goes,
    /// one READY timer per current team comes back, each with its initial
    /// history row. Runs in one transaction so readers see either the old
    /// set or the new one, never a partial state.
    pub async fn recreate_timers(&self, square_id: i64) -> Result<(), AppError> {
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;
        timer_repo::delete_timers_for_square(&mut tx, square_id).await?;
        let teams = team_repo::get_teams(&mut *tx, square_id).await?;
        for team in &teams {
            timer_repo::create_timer_for_team(&mut tx, team, now).await?;
        }
        tx.commit().await?;

        log::info!(
            "Recreated {} timer(s) for square {}",
            teams.len(),
            square_id
        );
        Ok(())
    }

    pub async fn set_timer_count(
        &self,
        square_id: i64,
        count: i64,
        timer_id: Option<i64>,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        timer_repo::set_timer_count(&mut tx, square_id, count, timer_id).await?;
        tx.commit().await?;
        Ok(())
    }
}
