//! # atelier-core
//!
//! Foundation utilities shared by the atelier crates:
//!
//! - **Timestamps**: [`time`] — the stored timestamp format and display-timezone
//!   conversion used by the history renderer
//! - **Text**: [`text`] — UTF-8–safe truncation for prompt previews in log fields
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by all other atelier crates.

#![deny(unsafe_code)]

pub mod text;
pub mod time;
