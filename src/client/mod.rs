pub mod state;

use crate::database::models::{
    SqrRole, SqrSquare, SqrSquareInput, SqrSquareTeamUser, SqrSquareUser, SqrTeam, SqrTeamInput,
    SqrTimer, SqrTimerDetail,
};

fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Typed client over the console REST surface; one method per backend
/// operation. List fetches whose required scope id is not yet known
/// short-circuit to an empty result instead of issuing a request, matching
/// how the console screens behave before a selection is made.
#[derive(Clone)]
pub struct SqrSquareClient {
    http: reqwest::Client,
    rest_path: String,
    username: Option<String>,
    roles: Vec<String>,
}

impl SqrSquareClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            rest_path: format!("{}/sqr-square", base_url.trim_end_matches('/')),
            username: None,
            roles: Vec::new(),
        }
    }

    /// Caller identity forwarded with every request.
    pub fn with_user(mut self, username: &str, roles: &[&str]) -> Self {
        self.username = Some(username.to_string());
        self.roles = roles.iter().map(|role| role.to_string()).collect();
        self
    }

    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, url);
        if let Some(username) = &self.username {
            builder = builder.header("X-User-Name", username);
        }
        if !self.roles.is_empty() {
            builder = builder.header("X-User-Roles", self.roles.join(","));
        }
        builder
    }

    // Squares

    pub async fn get_squares(&self) -> Result<Vec<SqrSquare>, reqwest::Error> {
        self.request(reqwest::Method::GET, self.rest_path.clone())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    pub async fn get_square(&self, id: i64) -> Result<SqrSquare, reqwest::Error> {
        self.request(reqwest::Method::GET, format!("{}/{}", self.rest_path, id))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    pub async fn create_square(
        &self,
        square: &SqrSquareInput,
    ) -> Result<SqrSquare, reqwest::Error> {
        self.request(reqwest::Method::POST, self.rest_path.clone())
            .json(square)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    pub async fn edit_square(
        &self,
        id: i64,
        square: &SqrSquareInput,
    ) -> Result<SqrSquare, reqwest::Error> {
        self.request(reqwest::Method::PUT, format!("{}/{}", self.rest_path, id))
            .json(square)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    pub async fn delete_squares(&self, ids: &[i64]) -> Result<(), reqwest::Error> {
        self.request(
            reqwest::Method::DELETE,
            format!("{}/{}", self.rest_path, join_ids(ids)),
        )
        .send()
        .await?
        .error_for_status()?;
        Ok(())
    }

    // Roles

    pub async fn get_square_roles(
        &self,
        square_id: Option<i64>,
    ) -> Result<Vec<SqrRole>, reqwest::Error> {
        let Some(square_id) = square_id else {
            return Ok(Vec::new());
        };
        self.request(
            reqwest::Method::GET,
            format!("{}/{}/sqr-role", self.rest_path, square_id),
        )
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
    }

    pub async fn get_square_role_users(
        &self,
        square_id: Option<i64>,
        role_id: Option<i64>,
        fast_filter: Option<&str>,
        show_all_users: bool,
    ) -> Result<Vec<SqrSquareUser>, reqwest::Error> {
        let (Some(square_id), Some(role_id)) = (square_id, role_id) else {
            return Ok(Vec::new());
        };
        let mut builder = self
            .request(
                reqwest::Method::GET,
                format!("{}/{}/sqr-role/{}/user", self.rest_path, square_id, role_id),
            )
            .query(&[("showAllUsers", show_all_users)]);
        if let Some(filter) = fast_filter.filter(|f| !f.is_empty()) {
            builder = builder.query(&[("fastFilter", filter)]);
        }
        builder.send().await?.error_for_status()?.json().await
    }

    pub async fn add_users_to_square_role(
        &self,
        square_id: i64,
        user_ids: &[i64],
        role_ids: &[i64],
    ) -> Result<(), reqwest::Error> {
        self.request(
            reqwest::Method::POST,
            format!(
                "{}/{}/sqr-role/{}/user/{}",
                self.rest_path,
                square_id,
                join_ids(role_ids),
                join_ids(user_ids)
            ),
        )
        .send()
        .await?
        .error_for_status()?;
        Ok(())
    }

    pub async fn remove_users_from_square_role(
        &self,
        square_id: i64,
        user_ids: &[i64],
        role_ids: &[i64],
    ) -> Result<(), reqwest::Error> {
        self.request(
            reqwest::Method::DELETE,
            format!(
                "{}/{}/sqr-role/{}/user/{}",
                self.rest_path,
                square_id,
                join_ids(role_ids),
                join_ids(user_ids)
            ),
        )
        .send()
        .await?
        .error_for_status()?;
        Ok(())
    }

    // Teams

    pub async fn get_square_teams(
        &self,
        square_id: Option<i64>,
    ) -> Result<Vec<SqrTeam>, reqwest::Error> {
        let Some(square_id) = square_id else {
            return Ok(Vec::new());
        };
        self.request(
            reqwest::Method::GET,
            format!("{}/{}/sqr-team", self.rest_path, square_id),
        )
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
    }

    pub async fn get_square_team(
        &self,
        square_id: i64,
        team_id: i64,
    ) -> Result<SqrTeam, reqwest::Error> {
        self.request(
            reqwest::Method::GET,
            format!("{}/{}/sqr-team/{}", self.rest_path, square_id, team_id),
        )
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
    }

    pub async fn create_team(
        &self,
        square_id: i64,
        team: &SqrTeamInput,
    ) -> Result<SqrTeam, reqwest::Error> {
        self.request(
            reqwest::Method::POST,
            format!("{}/{}/sqr-team", self.rest_path, square_id),
        )
        .json(team)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
    }

    pub async fn edit_team(
        &self,
        square_id: i64,
        team_id: i64,
        team: &SqrTeamInput,
    ) -> Result<SqrTeam, reqwest::Error> {
        self.request(
            reqwest::Method::PUT,
            format!("{}/{}/sqr-team/{}", self.rest_path, square_id, team_id),
        )
        .json(team)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
    }

    pub async fn delete_teams(
        &self,
        square_id: i64,
        team_ids: &[i64],
    ) -> Result<(), reqwest::Error> {
        self.request(
            reqwest::Method::DELETE,
            format!(
                "{}/{}/sqr-team/{}",
                self.rest_path,
                square_id,
                join_ids(team_ids)
            ),
        )
        .send()
        .await?
        .error_for_status()?;
        Ok(())
    }

    pub async fn get_square_team_users(
        &self,
        square_id: Option<i64>,
        team_id: Option<i64>,
        fast_filter: Option<&str>,
        show_all_users: bool,
    ) -> Result<Vec<SqrSquareTeamUser>, reqwest::Error> {
        let (Some(square_id), Some(team_id)) = (square_id, team_id) else {
            return Ok(Vec::new());
        };
        let mut builder = self
            .request(
                reqwest::Method::GET,
                format!("{}/{}/sqr-team/{}/user", self.rest_path, square_id, team_id),
            )
            .query(&[("showAllUsers", show_all_users)]);
        if let Some(filter) = fast_filter.filter(|f| !f.is_empty()) {
            builder = builder.query(&[("fastFilter", filter)]);
        }
        builder.send().await?.error_for_status()?.json().await
    }

    pub async fn add_users_to_square_team(
        &self,
        square_id: i64,
        user_ids: &[i64],
        team_ids: &[i64],
    ) -> Result<(), reqwest::Error> {
        self.request(
            reqwest::Method::POST,
            format!(
                "{}/{}/sqr-team/{}/user/{}",
                self.rest_path,
                square_id,
                join_ids(team_ids),
                join_ids(user_ids)
            ),
        )
        .send()
        .await?
        .error_for_status()?;
        Ok(())
    }

    pub async fn remove_users_from_square_team(
        &self,
        square_id: i64,
        user_ids: &[i64],
        team_ids: &[i64],
    ) -> Result<(), reqwest::Error> {
        self.request(
            reqwest::Method::DELETE,
            format!(
                "{}/{}/sqr-team/{}/user/{}",
                self.rest_path,
                square_id,
                join_ids(team_ids),
                join_ids(user_ids)
            ),
        )
        .send()
        .await?
        .error_for_status()?;
        Ok(())
    }

    // Timers

    pub async fn get_square_timers(
        &self,
        square_id: Option<i64>,
    ) -> Result<Vec<SqrTimer>, reqwest::Error> {
        let Some(square_id) = square_id else {
            return Ok(Vec::new());
        };
        self.request(
            reqwest::Method::GET,
            format!("{}/{}/sqr-timer", self.rest_path, square_id),
        )
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
    }

    pub async fn get_timer_details(
        &self,
        square_id: i64,
        timer_id: i64,
    ) -> Result<Vec<SqrTimerDetail>, reqwest::Error> {
        self.request(
            reqwest::Method::GET,
            format!(
                "{}/{}/sqr-timer/{}/detail",
                self.rest_path, square_id, timer_id
            ),
        )
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
    }

    pub async fn recreate_timers(&self, square_id: i64) -> Result<(), reqwest::Error> {
        self.request(
            reqwest::Method::POST,
            format!("{}/{}/sqr-timer/recreate", self.rest_path, square_id),
        )
        .send()
        .await?
        .error_for_status()?;
        Ok(())
    }

    pub async fn set_all_timer_count(
        &self,
        square_id: i64,
        count: i64,
    ) -> Result<(), reqwest::Error> {
        self.request(
            reqwest::Method::PATCH,
            format!(
                "{}/{}/sqr-timer/set-count/{}",
                self.rest_path, square_id, count
            ),
        )
        .send()
        .await?
        .error_for_status()?;
        Ok(())
    }

    pub async fn set_timer_count(
        &self,
        square_id: i64,
        timer_id: i64,
        count: i64,
    ) -> Result<(), reqwest::Error> {
        self.request(
            reqwest::Method::PATCH,
            format!(
                "{}/{}/sqr-timer/{}/set-count/{}",
                self.rest_path, square_id, timer_id, count
            ),
        )
        .send()
        .await?
        .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_ids_with_commas() {
        assert_eq!(join_ids(&[1, 2, 3]), "1,2,3");
        assert_eq!(join_ids(&[42]), "42");
        assert_eq!(join_ids(&[]), "");
    }

    #[tokio::test]
    async fn scoped_list_fetches_guard_missing_ids() {
        // The base URL is unroutable; a guard failure would surface as a
        // connection error instead of Ok(vec![]).
        let client = SqrSquareClient::new("http://127.0.0.1:1");

        assert!(client.get_square_roles(None).await.unwrap().is_empty());
        assert!(client.get_square_teams(None).await.unwrap().is_empty());
        assert!(client.get_square_timers(None).await.unwrap().is_empty());
        assert!(client
            .get_square_role_users(Some(1), None, None, false)
            .await
            .unwrap()
            .is_empty());
        assert!(client
            .get_square_team_users(None, Some(1), None, false)
            .await
            .unwrap()
            .is_empty());
    }
}
