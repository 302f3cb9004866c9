//! concierge-gateway — HTTP surface for the agent management API
//!
//! Provides the Axum server that exposes agent CRUD, the question endpoint,
//! health and root banners, and a structured 404 fallback, with CORS and
//! request tracing layered on top.

pub mod agents;
pub mod protocol;
pub mod server;

pub use protocol::AskResponse;
pub use server::{CorsPolicy, GatewayServer, GatewayState};
