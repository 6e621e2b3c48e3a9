//! Runtime layer for Formation Admin.
//!
//! Sits between the API client and the terminal UI: decides which page a
//! session may see, loads page data on background tasks, and moves document
//! files between the server and the local filesystem.

pub mod loader;
pub mod router;
pub mod transfer;

pub use admin_api as api;
pub use admin_core as core;
