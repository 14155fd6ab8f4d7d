//! # Rawat Channels
//!
//! Concrete messaging-channel clients behind the core gateway traits.
//! Currently a single channel: the self-hosted WhatsApp gateway HTTP API.

pub mod whatsapp;

pub use whatsapp::WaGatewayClient;
