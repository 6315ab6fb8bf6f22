//! Registration Service Module
//!
//! Token-gated registration redemption for Inkfest events. A single-use,
//! time-limited token is minted when an application is approved; redeeming
//! it confirms the applicant's details, records their agreement acceptance
//! and issues their ticket in one atomic commit.

// Public exports
pub mod contract;
pub use contract::{
    error::RegistrationError, CommitReceipt, RegistrationData, ResolvedRequirements, TokenContext,
};

pub mod config;
pub use config::{Config, StorageConfig};

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
