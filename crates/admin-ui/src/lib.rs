//! Terminal UI for Formation Admin: themes, header and nav components, the
//! login form, the resource table and the [`app::App`] event loop.

pub use admin_core as core;

pub mod app;
pub mod components;
pub mod login_view;
pub mod table_view;
pub mod themes;
