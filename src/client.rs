//! HTTP client for the daybook backend

use async_trait::async_trait;
use reqwest::Response;
use serde::de::DeserializeOwned;

use daybook_core::protocol::{CreateActivityRequest, LoginRequest, LoginResponse, SessionStatus};
use daybook_core::{ClientConfig, DaybookError, DaybookResult, EventsByDate, MonthKey, NewActivity};

/// The backend operations the stores depend on.
///
/// [`Client`] is the HTTP implementation. Tests substitute an in-memory one.
#[async_trait]
pub trait Backend: Send + Sync {
    /// GET /session
    async fn session(&self) -> DaybookResult<SessionStatus>;

    /// GET /activities/{YYYY-MM}
    async fn activities_for_month(&self, month: MonthKey) -> DaybookResult<EventsByDate>;

    /// POST /activities
    async fn create_activity(&self, date: &str, activity: &NewActivity) -> DaybookResult<()>;

    /// DELETE /activities/{id}
    async fn delete_activity(&self, id: i64) -> DaybookResult<()>;

    /// POST /login
    async fn login(&self, username: &str, password: &str) -> DaybookResult<LoginResponse>;

    /// POST /logout
    async fn logout(&self) -> DaybookResult<()>;
}

/// HTTP client for the daybook backend.
///
/// Keeps a cookie store so the session cookie set by `/login` is sent with
/// every later request.
pub struct Client {
    http: reqwest::Client,
    config: ClientConfig,
}

impl Client {
    pub fn new(config: ClientConfig) -> DaybookResult<Self> {
        let mut builder = reqwest::Client::builder().cookie_store(true);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let http = builder.build().map_err(transport_error)?;
        Ok(Client { http, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }
}

#[async_trait]
impl Backend for Client {
    async fn session(&self) -> DaybookResult<SessionStatus> {
        let resp = self
            .http
            .get(self.url("/session"))
            .send()
            .await
            .map_err(transport_error)?;

        decode(check_status(resp).await?).await
    }

    async fn activities_for_month(&self, month: MonthKey) -> DaybookResult<EventsByDate> {
        let resp = self
            .http
            .get(self.url(&format!("/activities/{}", month)))
            .send()
            .await
            .map_err(transport_error)?;

        decode(check_status(resp).await?).await
    }

    async fn create_activity(&self, date: &str, activity: &NewActivity) -> DaybookResult<()> {
        let resp = self
            .http
            .post(self.url("/activities"))
            .json(&CreateActivityRequest { date, activity })
            .send()
            .await
            .map_err(transport_error)?;

        // The backend answers with a plain "Created"; nothing to decode.
        check_status(resp).await?;
        Ok(())
    }

    async fn delete_activity(&self, id: i64) -> DaybookResult<()> {
        let resp = self
            .http
            .delete(self.url(&format!("/activities/{}", id)))
            .send()
            .await
            .map_err(transport_error)?;

        check_status(resp).await?;
        Ok(())
    }

    async fn login(&self, username: &str, password: &str) -> DaybookResult<LoginResponse> {
        let resp = self
            .http
            .post(self.url("/login"))
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await
            .map_err(transport_error)?;

        decode(check_status(resp).await?).await
    }

    async fn logout(&self) -> DaybookResult<()> {
        let resp = self
            .http
            .post(self.url("/logout"))
            .send()
            .await
            .map_err(transport_error)?;

        check_status(resp).await?;
        Ok(())
    }
}

/// Turn a non-2xx response into `DaybookError::Status` carrying the body text.
async fn check_status(resp: Response) -> DaybookResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(DaybookError::Status {
        status: status.as_u16(),
        body: body.trim().to_string(),
    })
}

/// Read the whole body, then parse it, so transport and decode failures stay
/// distinguishable.
async fn decode<T: DeserializeOwned>(resp: Response) -> DaybookResult<T> {
    let bytes = resp.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&bytes).map_err(|e| DaybookError::Decode(e.to_string()))
}

fn transport_error(err: reqwest::Error) -> DaybookError {
    DaybookError::Http(err.to_string())
}
