//! REST API client for the Cloud Foundry v3 control plane
//!
//! This crate turns the v3 HTTP/JSON resources into typed method calls.
//! Every list endpoint goes through one generic engine: an option struct is
//! encoded into a query string ([`query`]), each response page carries a
//! [`Pager`], [`paging::auto_page`] drives pages until exhausted and
//! [`paging::single`] enforces exactly-one lookups. Asynchronous server
//! operations (jobs, package processing, staging, tasks, deployments) are
//! observed with the [`Poller`].

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod pager;
pub mod paging;
pub mod poll;
pub mod query;
pub mod resources;

pub use api::Api;
pub use auth::*;
pub use client::RestClient;
pub use config::ClientConfig;
pub use error::*;
pub use pager::Pager;
pub use poll::{Observation, PollOptions, PollTarget, Poller, MIN_POLL_INTERVAL};
pub use query::{Filter, ListOptions, PageOptions, QueryBuilder, TimestampFilter, TimestampOperator};
pub use resources::*;

pub use tokio_util::sync::CancellationToken;
