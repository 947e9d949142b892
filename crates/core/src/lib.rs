//! Loantrack Core - Shared types library.
//!
//! This crate provides common types used across all Loantrack components:
//! - `client` - Session, guard, and API access library
//! - `cli` - Terminal client for the loan-disbursement tracking API
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, roles, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
