//! Contract layer - public API of the registration service
//!
//! This layer contains transport-agnostic models and errors.
//! NO serde derives on models - these are pure domain types.

pub mod error;
pub mod model;

pub use error::{CommitStep, RegistrationError};
pub use model::{
    ApplicationSummary, ClientDetails, CommitReceipt, PaymentMethod, PaymentSettingsView,
    RegistrationCommit, RegistrationData, RequirementsView, ResolvedRequirements, TokenContext,
    TokenRecord,
};
