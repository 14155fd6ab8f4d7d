//! # Rawat Core
//!
//! Shared foundation for the Rawat preventive-maintenance scheduler:
//! configuration, the error taxonomy, the messaging-gateway traits, and
//! the wire types exchanged with the WhatsApp API service.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::RawatConfig;
pub use error::{RawatError, Result};
pub use traits::{GroupConfigStore, MessageGateway, MessageLog};
pub use types::{SendReceipt, WaGroupConfig};
