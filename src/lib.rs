//! Client-side state for the daybook activity calendar.
//!
//! - [`SessionStore`] tracks who is logged in.
//! - [`EventCache`] holds activities by date, fetched a month at a time.
//! - [`Daybook`] builds both on top of one HTTP [`Client`].

pub mod app;
pub mod client;
pub mod event_cache;
pub mod session_store;

#[cfg(test)]
mod testing;

pub use app::Daybook;
pub use client::{Backend, Client};
pub use event_cache::{EventCache, FetchOutcome};
pub use session_store::SessionStore;

pub use daybook_core::protocol;
pub use daybook_core::{
    ActivityKind, ActivityRecord, ClientConfig, DaybookError, DaybookResult, EventsByDate,
    MonthKey, NewActivity,
};
