pub mod auth;

pub use auth::{Gate, GateTier};
