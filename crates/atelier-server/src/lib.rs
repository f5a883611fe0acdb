//! HTTP surface for the generation studio.
//!
//! Three route groups mirror the three generation flows (images, speech,
//! vision), each with a create endpoint, a history listing, and a per-record
//! content endpoint. Listings localize timestamps and degrade per row when
//! stored media cannot be loaded.

pub mod dto;
pub mod errors;
pub mod routes;
pub mod server;
pub mod state;

pub use errors::ApiError;
pub use server::{Surfaces, build_router};
pub use state::{AppState, GenerationClients};
