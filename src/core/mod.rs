/*!
 * Core Module
 * Fundamental bridge types, limits and configuration
 */

pub mod config;
pub mod limits;
pub mod types;

// Re-export for convenience
pub use config::{BridgeConfig, ConfigError};
pub use types::*;
