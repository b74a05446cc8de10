//! partnerapply - Partnership Application Wizard
//!
//! A five-step partnership application with client-side validation, step
//! navigation and submission to a JSON endpoint. The controller in
//! [`application`] is view-agnostic; [`tui`] drives it interactively and
//! [`cli`] drives it from answers files.
//!
//! ## Quick Start
//!
//! ```bash
//! # Interactive mode
//! partnerapply
//!
//! # Check an answers file without sending it
//! partnerapply submit answers.toml --dry-run
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod tui;

// Re-export commonly used types
pub use error::{ErrorCode, PartnerApplyError, TransportError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
