//! Diagnostic record formatting for failures reported by sinks.
//!
//! Sinks report failures through completions; the layer driving them decides
//! how to surface those failures. This module renders them as log lines:
//!
//! ```text
//! 2024-05-01 12:30:00.000:WARN:f.pump:worker-1: frame rejected
//! message handler failed: disk full
//! Caused by: 
//! disk full
//! ```
//!
//! [`Appender`] does the rendering, [`DiagnosticsLogger`] plugs it into the
//! `log` facade, and [`format`] implements the strict and legacy placeholder
//! strategies. Output writer and time zone are always supplied by the caller.

mod appender;
mod cause;
mod config;
pub mod escape;
pub mod format;
mod level;
mod logger;

pub use appender::{Appender, Record};
pub use cause::Cause;
pub use config::DiagnosticsConfig;
pub use format::{FormatError, FormatMode};
pub use level::Level;
pub use logger::DiagnosticsLogger;
