//! Stateless HTTP service that turns a Base32 secret into the current TOTP code.

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod otp;
pub mod telemetry;
