//! # Rawat Gateway
//!
//! The HTTP surface and local persistence. Routes expose the read-only
//! assignment queries, the manual dispatch path, and the WhatsApp group
//! configuration; the store keeps the group config and sent-message log
//! in a single SQLite file.

pub mod routes;
pub mod server;
pub mod store;

pub use server::{AppState, build_router, start};
pub use store::SqliteStore;
