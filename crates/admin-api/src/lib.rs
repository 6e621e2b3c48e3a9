//! REST client layer for Formation Admin.
//!
//! Requests flow through a single [`client::ApiClient::execute`] path that
//! attaches the session's bearer token, turns a `401` into a forced sign-out,
//! and normalises every failure into an [`error::ApiError`]. The HTTP stack
//! sits behind the [`transport::Transport`] trait; [`transport::ReqwestTransport`]
//! is the production implementation.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod transport;

pub use admin_core as core;
pub use client::{ApiClient, SessionEvent};
pub use error::{ApiError, ErrorKind};
