//! Core types for Formation Admin.
//!
//! Holds the pieces every other crate leans on: the error type, CLI settings,
//! durable key-value storage, the session manager, typed resource payloads,
//! and the tabular view controller that derives filtered/sorted rows.

pub mod error;
pub mod formatting;
pub mod models;
pub mod records;
pub mod session;
pub mod settings;
pub mod storage;
pub mod table;
