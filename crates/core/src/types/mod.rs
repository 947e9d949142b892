//! Core types for Loantrack.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod language;
pub mod role;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use language::Language;
pub use role::UserRole;
pub use status::*;
