//! Shared types for the massacre mission tracker.
//!
//! Kept free of I/O so both the core library and front ends can depend on it.

mod config;
pub mod formatting;

pub use config::{DisplaySettings, MassacreConfig, SettingKey, UnknownSettingKey};
