//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs (SeaORM) and
//! infra/storage/memory.rs (in-process development store).

use crate::contract::{
    CommitReceipt, PaymentSettingsView, RegistrationCommit, RegistrationError, RequirementsView,
    TokenContext,
};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Read access to registration tokens
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Load a token together with its application and event name
    /// (a read-time join). Returns `None` when no token row matches.
    async fn find_with_application(&self, token: &str) -> Result<Option<TokenContext>>;
}

/// Read access to per-event registration configuration
#[async_trait]
pub trait RequirementsRepository: Send + Sync {
    /// Requirements for one (event, application type) pair, if configured
    async fn find_requirements(
        &self,
        event_id: Uuid,
        application_type: &str,
    ) -> Result<Option<RequirementsView>>;

    /// Payment settings for one event, if configured
    async fn find_payment_settings(&self, event_id: Uuid) -> Result<Option<PaymentSettingsView>>;
}

/// The redemption write path
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Execute one redemption atomically.
    ///
    /// The implementation must treat the token update as a compare-and-set
    /// (`used_at IS NULL AND expires_at > now`) and must roll back every
    /// other write when any step fails. The token-state errors (`NotFound`,
    /// `AlreadyUsed`, `Expired`) are returned when the compare-and-set
    /// matches no row.
    async fn commit(&self, commit: &RegistrationCommit)
        -> Result<CommitReceipt, RegistrationError>;
}
