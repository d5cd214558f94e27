//! Core types for daybook.
//!
//! Shared between the HTTP client and the stores:
//! - `ActivityRecord` and friends for what the backend stores per date
//! - `MonthKey` for addressing a calendar month
//! - `protocol` module for request/response bodies of the backend API

pub mod activity;
pub mod config;
pub mod error;
pub mod month;
pub mod protocol;

pub use activity::*;
pub use config::ClientConfig;
pub use error::{DaybookError, DaybookResult};
pub use month::{MonthKey, parse_date_key};
