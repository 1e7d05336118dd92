//! Business-idea viability screening.
//!
//! The crate turns a free-text idea description plus caller-supplied signals into a
//! GO / REVIEW / NO-GO recommendation. Scoring lives under
//! [`workflows::viability`]; configuration, telemetry, and the application error type
//! are shared with the HTTP service in `services/api`.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
