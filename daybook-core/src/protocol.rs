//! Request and response bodies of the daybook backend API.
//!
//! All paths are relative to the configured base URL:
//! - `GET /session` → [`SessionStatus`]
//! - `GET /activities/{YYYY-MM}` → [`EventsByDate`](crate::EventsByDate)
//! - `POST /activities` ← [`CreateActivityRequest`]
//! - `DELETE /activities/{id}`
//! - `POST /login` ← [`LoginRequest`] → [`LoginResponse`]
//! - `POST /logout`

use serde::{Deserialize, Serialize};

use crate::activity::NewActivity;

/// Response of `GET /session`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub logged_in: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl SessionStatus {
    /// The logged-in username, if the server reports an active session.
    pub fn identity(self) -> Option<String> {
        if self.logged_in { self.username } else { None }
    }
}

/// Body of `POST /activities`: the date plus the activity's own fields.
#[derive(Debug, Serialize)]
pub struct CreateActivityRequest<'a> {
    pub date: &'a str,
    #[serde(flatten)]
    pub activity: &'a NewActivity,
}

/// Body of `POST /login`.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response of a successful `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,
    pub user: String,
}
