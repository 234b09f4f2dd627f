use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpRequest};

/// Caller identity forwarded by the upstream auth gateway via the
/// `X-User-Name` and `X-User-Roles` headers. Requests without the headers
/// get an anonymous context rather than an error; the square listing is the
/// only place that cares, and it answers anonymous callers with an empty
/// list.
#[derive(Debug, Clone, Default)]
pub struct UserContext {
    pub username: Option<String>,
    pub roles: Vec<String>,
}

impl UserContext {
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|role| role == "admin")
    }

    fn from_http_request(req: &HttpRequest) -> Self {
        let username = req
            .headers()
            .get("X-User-Name")
            .and_then(|value| value.to_str().ok())
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        let roles = req
            .headers()
            .get("X-User-Roles")
            .and_then(|value| value.to_str().ok())
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|role| !role.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        UserContext { username, roles }
    }
}

impl FromRequest for UserContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(UserContext::from_http_request(req)))
    }
}
