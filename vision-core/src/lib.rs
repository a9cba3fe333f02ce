//! VisionNest core
//!
//! Layered like the application it serves:
//! - domain: entities as the client sees them
//! - gateway: the hosted backend behind traits, plus its HTTP client
//! - state: the local view state commands mutate
//! - commands: optimistic toggle, image index, task sync, auth

pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod state;

pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
