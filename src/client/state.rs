//! Per-screen view state for the console. Each screen owns its client and
//! the last fetched collections; there are no process-wide singletons, a
//! screen is constructed when entered and dropped when left. Mutations go
//! through the client and are followed by an explicit re-fetch.

use crate::client::SqrSquareClient;
use crate::database::models::{
    SqrRole, SqrSquare, SqrSquareTeamUser, SqrSquareUser, SqrTeam, SqrTimer,
};

/// Square overview: the square list plus the current selection.
pub struct SquareScreen {
    client: SqrSquareClient,
    pub squares: Vec<SqrSquare>,
    pub selected_square: Option<i64>,
}

impl SquareScreen {
    pub fn new(client: SqrSquareClient) -> Self {
        Self {
            client,
            squares: Vec::new(),
            selected_square: None,
        }
    }

    pub async fn refresh(&mut self) -> Result<(), reqwest::Error> {
        self.squares = self.client.get_squares().await?;
        if let Some(selected) = self.selected_square {
            if !self.squares.iter().any(|s| s.id == selected) {
                self.selected_square = None;
            }
        }
        Ok(())
    }

    pub fn select(&mut self, square_id: Option<i64>) {
        self.selected_square = square_id;
    }

    pub async fn delete_selected(&mut self) -> Result<(), reqwest::Error> {
        if let Some(square_id) = self.selected_square {
            self.client.delete_squares(&[square_id]).await?;
            self.refresh().await?;
        }
        Ok(())
    }
}

/// Role membership screen: roles of the selected square and the member
/// listing of the selected role, with its filter state.
pub struct RoleUsersScreen {
    client: SqrSquareClient,
    pub square_id: Option<i64>,
    pub role_id: Option<i64>,
    pub fast_filter: String,
    pub show_all_users: bool,
    pub roles: Vec<SqrRole>,
    pub users: Vec<SqrSquareUser>,
}

impl RoleUsersScreen {
    pub fn new(client: SqrSquareClient) -> Self {
        Self {
            client,
            square_id: None,
            role_id: None,
            fast_filter: String::new(),
            show_all_users: false,
            roles: Vec::new(),
            users: Vec::new(),
        }
    }

    pub async fn refresh(&mut self) -> Result<(), reqwest::Error> {
        self.roles = self.client.get_square_roles(self.square_id).await?;
        self.refresh_users().await
    }

    pub async fn refresh_users(&mut self) -> Result<(), reqwest::Error> {
        let filter = (!self.fast_filter.is_empty()).then_some(self.fast_filter.as_str());
        self.users = self
            .client
            .get_square_role_users(self.square_id, self.role_id, filter, self.show_all_users)
            .await?;
        Ok(())
    }

    pub async fn grant(&mut self, user_ids: &[i64]) -> Result<(), reqwest::Error> {
        if let (Some(square_id), Some(role_id)) = (self.square_id, self.role_id) {
            self.client
                .add_users_to_square_role(square_id, user_ids, &[role_id])
                .await?;
            self.refresh_users().await?;
        }
        Ok(())
    }

    pub async fn revoke(&mut self, user_ids: &[i64]) -> Result<(), reqwest::Error> {
        if let (Some(square_id), Some(role_id)) = (self.square_id, self.role_id) {
            self.client
                .remove_users_from_square_role(square_id, user_ids, &[role_id])
                .await?;
            self.refresh_users().await?;
        }
        Ok(())
    }
}

/// Team membership screen.
pub struct TeamUsersScreen {
    client: SqrSquareClient,
    pub square_id: Option<i64>,
    pub team_id: Option<i64>,
    pub fast_filter: String,
    pub show_all_users: bool,
    pub teams: Vec<SqrTeam>,
    pub users: Vec<SqrSquareTeamUser>,
}

impl TeamUsersScreen {
    pub fn new(client: SqrSquareClient) -> Self {
        Self {
            client,
            square_id: None,
            team_id: None,
            fast_filter: String::new(),
            show_all_users: false,
            teams: Vec::new(),
            users: Vec::new(),
        }
    }

    pub async fn refresh(&mut self) -> Result<(), reqwest::Error> {
        self.teams = self.client.get_square_teams(self.square_id).await?;
        self.refresh_users().await
    }

    pub async fn refresh_users(&mut self) -> Result<(), reqwest::Error> {
        let filter = (!self.fast_filter.is_empty()).then_some(self.fast_filter.as_str());
        self.users = self
            .client
            .get_square_team_users(self.square_id, self.team_id, filter, self.show_all_users)
            .await?;
        Ok(())
    }

    pub async fn assign(&mut self, user_ids: &[i64]) -> Result<(), reqwest::Error> {
        if let (Some(square_id), Some(team_id)) = (self.square_id, self.team_id) {
            self.client
                .add_users_to_square_team(square_id, user_ids, &[team_id])
                .await?;
            self.refresh_users().await?;
        }
        Ok(())
    }

    pub async fn unassign(&mut self, user_ids: &[i64]) -> Result<(), reqwest::Error> {
        if let (Some(square_id), Some(team_id)) = (self.square_id, self.team_id) {
            self.client
                .remove_users_from_square_team(square_id, user_ids, &[team_id])
                .await?;
            self.refresh_users().await?;
        }
        Ok(())
    }
}

/// Timer screen: the timer grid of the selected square.
pub struct TimerScreen {
    client: SqrSquareClient,
    pub square_id: Option<i64>,
    pub timers: Vec<SqrTimer>,
}

impl TimerScreen {
    pub fn new(client: SqrSquareClient) -> Self {
        Self {
            client,
            square_id: None,
            timers: Vec::new(),
        }
    }

    pub async fn refresh(&mut self) -> Result<(), reqwest::Error> {
        self.timers = self.client.get_square_timers(self.square_id).await?;
        Ok(())
    }

    pub async fn recreate(&mut self) -> Result<(), reqwest::Error> {
        if let Some(square_id) = self.square_id {
            self.client.recreate_timers(square_id).await?;
            self.refresh().await?;
        }
        Ok(())
    }

    pub async fn set_count(
        &mut self,
        timer_id: Option<i64>,
        count: i64,
    ) -> Result<(), reqwest::Error> {
        if let Some(square_id) = self.square_id {
            match timer_id {
                Some(timer_id) => {
                    self.client
                        .set_timer_count(square_id, timer_id, count)
                        .await?
                }
                None => self.client.set_all_timer_count(square_id, count).await?,
            }
            self.refresh().await?;
        }
        Ok(())
    }
}
