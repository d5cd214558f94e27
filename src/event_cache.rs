//! Month-keyed cache of activities.
//!
//! The cache maps `YYYY-MM-DD` to that day's activities. A month counts as
//! loaded as soon as any of its dates is present, so a month must only ever
//! be populated by a whole-month fetch.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use daybook_core::{
    ActivityRecord, DaybookResult, EventsByDate, MonthKey, NewActivity, parse_date_key,
};

use crate::client::Backend;

/// What `fetch_month` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Month already cached; no request was sent
    Cached,
    /// Month fetched and merged; `dates` is the number of dates in the response
    Fetched { dates: usize },
}

pub struct EventCache<B> {
    backend: Arc<B>,
    events: watch::Sender<EventsByDate>,
}

impl<B: Backend> EventCache<B> {
    pub fn new(backend: Arc<B>) -> Self {
        let (events, _) = watch::channel(EventsByDate::new());
        EventCache { backend, events }
    }

    /// Load a month's activities unless already cached.
    ///
    /// With `force`, the month's dates are evicted first and the request is
    /// always sent. A failed request leaves the cache as it was when the
    /// request went out (so a failed forced refresh leaves the month evicted).
    /// Errors are logged and returned; callers may ignore them.
    pub async fn fetch_month(
        &self,
        year: i32,
        month: u32,
        force: bool,
    ) -> DaybookResult<FetchOutcome> {
        let key = MonthKey::new(year, month).inspect_err(|e| {
            warn!(year, month, error = %e, "Error loading events");
        })?;
        self.fetch(key, force).await
    }

    /// [`fetch_month`](Self::fetch_month) for an already validated key.
    pub async fn fetch(&self, month: MonthKey, force: bool) -> DaybookResult<FetchOutcome> {
        if force {
            self.evict(month);
        } else if self.is_month_cached(month) {
            debug!(%month, "Month already cached");
            return Ok(FetchOutcome::Cached);
        }

        let fetched = self
            .backend
            .activities_for_month(month)
            .await
            .inspect_err(|e| warn!(%month, error = %e, "Error loading events"))?;

        let dates = fetched.len();
        // Dates in the response overwrite; everything else is kept.
        self.events.send_modify(|events| events.extend(fetched));
        debug!(%month, dates, "Merged month");

        Ok(FetchOutcome::Fetched { dates })
    }

    /// Create an activity on the backend.
    ///
    /// The cache is not updated. Call `fetch_month(.., true)` to see the new
    /// activity. Dates that are not `YYYY-MM-DD` are rejected before any
    /// request is sent, since they could never show up in a month fetch.
    pub async fn add_event(&self, date: &str, activity: &NewActivity) -> DaybookResult<()> {
        parse_date_key(date).inspect_err(|e| warn!(date, error = %e, "Error adding event"))?;

        self.backend
            .create_activity(date, activity)
            .await
            .inspect_err(|e| warn!(date, error = %e, "Error adding event"))?;

        debug!(date, title = %activity.title, "Added event");
        Ok(())
    }

    /// Delete an activity on the backend. Like `add_event`, the cache is left
    /// untouched.
    pub async fn delete_event(&self, id: i64, date: &str) -> DaybookResult<()> {
        self.backend
            .delete_activity(id)
            .await
            .inspect_err(|e| warn!(id, date, error = %e, "Error deleting event"))?;

        debug!(id, date, "Deleted event");
        Ok(())
    }

    /// Drop everything.
    pub fn clear(&self) {
        self.events.send_modify(|events| events.clear());
    }

    /// Memoization guard: any cached date in the month counts.
    pub fn is_month_cached(&self, month: MonthKey) -> bool {
        self.events.borrow().keys().any(|date| month.contains(date))
    }

    pub fn snapshot(&self) -> EventsByDate {
        self.events.borrow().clone()
    }

    pub fn events_on(&self, date: &str) -> Vec<ActivityRecord> {
        self.events.borrow().get(date).cloned().unwrap_or_default()
    }

    /// The cached dates of one month.
    pub fn month(&self, month: MonthKey) -> EventsByDate {
        self.events
            .borrow()
            .iter()
            .filter(|(date, _)| month.contains(date))
            .map(|(date, records)| (date.clone(), records.clone()))
            .collect()
    }

    /// Receiver notified on every change to the cache.
    pub fn subscribe(&self) -> watch::Receiver<EventsByDate> {
        self.events.subscribe()
    }

    fn evict(&self, month: MonthKey) {
        self.events.send_if_modified(|events| {
            let before = events.len();
            events.retain(|date, _| !month.contains(date));
            events.len() != before
        });
    }
}
