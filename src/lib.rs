//! rustylog is a small leveled message logger.
//!
//! Callers build [`log::Message`] values tagged with a [`log::Priority`]; a
//! logger admits those at or above its threshold and renders them, either at
//! once ([`log::ImmediateLogger`]) or on flush ([`log::BufferedLogger`]), to a
//! stream or an append-only file. A process-wide facade in [`log`] lets call
//! sites log without holding a logger reference.

/// Loads logging settings from an INI-style file.
pub mod config;
/// Error type shared by loggers, sinks and configuration.
pub mod error;
/// Messages, sinks, loggers and the global facade.
pub mod log;

pub use error::LogError;
