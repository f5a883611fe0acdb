//! Stateless repositories over the history tables.
//!
//! Every method takes `&Connection`; the caller owns checkout and release.

pub mod image;
pub mod speech;
pub mod vision;
