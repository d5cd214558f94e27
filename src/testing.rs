//! In-memory [`Backend`] for store tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use daybook_core::protocol::{LoginResponse, SessionStatus};
use daybook_core::{
    ActivityKind, ActivityRecord, DaybookError, DaybookResult, EventsByDate, MonthKey, NewActivity,
};

use crate::client::Backend;

#[derive(Default)]
pub struct FakeBackend {
    months: Mutex<HashMap<MonthKey, EventsByDate>>,
    session: Mutex<Option<SessionStatus>>,
    created: Mutex<Vec<(String, NewActivity)>>,
    deleted: Mutex<Vec<i64>>,
    failing: Mutex<bool>,
    fetches: AtomicUsize,
    session_checks: AtomicUsize,
    logouts: AtomicUsize,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// What `GET /activities/{month}` returns from now on.
    pub fn set_month(&self, month: MonthKey, events: EventsByDate) {
        self.months.lock().unwrap().insert(month, events);
    }

    /// What `GET /session` returns. `None` simulates a network failure.
    pub fn set_session(&self, status: Option<SessionStatus>) {
        *self.session.lock().unwrap() = status;
    }

    /// Make every call fail with a transport error.
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn session_checks(&self) -> usize {
        self.session_checks.load(Ordering::SeqCst)
    }

    pub fn logouts(&self) -> usize {
        self.logouts.load(Ordering::SeqCst)
    }

    pub fn created(&self) -> Vec<(String, NewActivity)> {
        self.created.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<i64> {
        self.deleted.lock().unwrap().clone()
    }

    fn check_failing(&self) -> DaybookResult<()> {
        if *self.failing.lock().unwrap() {
            return Err(DaybookError::Http("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn session(&self) -> DaybookResult<SessionStatus> {
        self.session_checks.fetch_add(1, Ordering::SeqCst);
        self.check_failing()?;
        self.session
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| DaybookError::Http("connection reset".into()))
    }

    async fn activities_for_month(&self, month: MonthKey) -> DaybookResult<EventsByDate> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.check_failing()?;
        Ok(self
            .months
            .lock()
            .unwrap()
            .get(&month)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_activity(&self, date: &str, activity: &NewActivity) -> DaybookResult<()> {
        self.check_failing()?;
        self.created
            .lock()
            .unwrap()
            .push((date.to_string(), activity.clone()));
        Ok(())
    }

    async fn delete_activity(&self, id: i64) -> DaybookResult<()> {
        self.check_failing()?;
        self.deleted.lock().unwrap().push(id);
        Ok(())
    }

    async fn login(&self, username: &str, password: &str) -> DaybookResult<LoginResponse> {
        self.check_failing()?;
        if password != "secret" {
            return Err(DaybookError::Status {
                status: 401,
                body: "Invalid credentials".into(),
            });
        }
        Ok(LoginResponse {
            message: "Logged in".into(),
            user: username.to_string(),
        })
    }

    async fn logout(&self) -> DaybookResult<()> {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        self.check_failing()
    }
}

pub fn record(id: i64, title: &str) -> ActivityRecord {
    ActivityRecord {
        id,
        kind: ActivityKind::Event,
        title: title.to_string(),
        description: String::new(),
        extra: Default::default(),
    }
}

pub fn month(year: i32, month: u32) -> MonthKey {
    MonthKey::new(year, month).unwrap()
}

/// Build an `EventsByDate` from `(date, records)` pairs.
pub fn events<const N: usize>(entries: [(&str, Vec<ActivityRecord>); N]) -> EventsByDate {
    entries
        .into_iter()
        .map(|(date, records)| (date.to_string(), records))
        .collect()
}
