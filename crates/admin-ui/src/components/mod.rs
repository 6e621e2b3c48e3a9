//! Reusable screen chrome: header and navigation bar.

pub mod header;
pub mod nav;
