//! Domain service - business logic orchestration

use super::events::{EventPublisher, RegistrationEvent};
use super::repository::{RegistrationRepository, RequirementsRepository, TokenRepository};
use super::validation;
use crate::contract::{
    CommitReceipt, PaymentSettingsView, RegistrationCommit, RegistrationData, RegistrationError,
    RequirementsView, ResolvedRequirements, TokenContext,
};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

/// Fallback values used when no requirements row is configured
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDefaults {
    /// Agreement text shown when the event/type pair has none configured
    pub agreement_text: String,
    /// Days until the profile must be completed
    pub profile_deadline_days: i64,
}

impl Default for RegistrationDefaults {
    fn default() -> Self {
        Self {
            agreement_text: "By completing this registration you agree to the event's \
                             terms and conditions."
                .to_string(),
            profile_deadline_days: 30,
        }
    }
}

/// Domain service for the registration redemption workflow
pub struct Service {
    tokens: Arc<dyn TokenRepository>,
    requirements: Arc<dyn RequirementsRepository>,
    registrations: Arc<dyn RegistrationRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    defaults: RegistrationDefaults,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        tokens: Arc<dyn TokenRepository>,
        requirements: Arc<dyn RequirementsRepository>,
        registrations: Arc<dyn RegistrationRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        defaults: RegistrationDefaults,
    ) -> Self {
        Self {
            tokens,
            requirements,
            registrations,
            event_publisher,
            defaults,
        }
    }

    // ===== Token validation (read path) =====

    /// Validate a registration token and load its application context.
    ///
    /// A token that is both used and expired reports `AlreadyUsed`: once
    /// `used_at` is set that is the terminal state of the token, whatever
    /// the clock says.
    pub async fn validate_token(&self, token: &str) -> Result<TokenContext, RegistrationError> {
        validation::validate_token(token)?;

        let ctx = self
            .tokens
            .find_with_application(token)
            .await
            .map_err(RegistrationError::storage)?
            .ok_or(RegistrationError::NotFound)?;

        if ctx.token.used_at.is_some() {
            return Err(RegistrationError::AlreadyUsed);
        }
        if Utc::now() >= ctx.token.expires_at {
            return Err(RegistrationError::Expired);
        }

        Ok(ctx)
    }

    // ===== Requirements resolution =====

    /// Resolve requirements and payment settings for one event/type pair.
    ///
    /// Missing rows and read failures both fall back to defaults:
    /// registration is never blocked by absent optional configuration.
    /// Read failures are logged so the fallback is visible in operation.
    pub async fn resolve_requirements(
        &self,
        event_id: Uuid,
        application_type: &str,
    ) -> ResolvedRequirements {
        let requirements = match self
            .requirements
            .find_requirements(event_id, application_type)
            .await
        {
            Ok(Some(view)) => view,
            Ok(None) => self.default_requirements(),
            Err(err) => {
                tracing::warn!(
                    %event_id,
                    application_type,
                    error = %err,
                    "requirements lookup failed, substituting defaults"
                );
                self.default_requirements()
            }
        };

        let payment = match self.requirements.find_payment_settings(event_id).await {
            Ok(Some(view)) => view,
            Ok(None) => PaymentSettingsView::default(),
            Err(err) => {
                tracing::warn!(
                    %event_id,
                    error = %err,
                    "payment settings lookup failed, substituting defaults"
                );
                PaymentSettingsView::default()
            }
        };

        ResolvedRequirements {
            requirements,
            payment,
        }
    }

    /// Assemble the full registration view for the GET path
    pub async fn registration_view(
        &self,
        token: &str,
    ) -> Result<(TokenContext, ResolvedRequirements), RegistrationError> {
        let ctx = self.validate_token(token).await?;
        let resolved = self
            .resolve_requirements(ctx.application.event_id, &ctx.application.application_type)
            .await;
        Ok((ctx, resolved))
    }

    // ===== Redemption (write path) =====

    /// Redeem a token: upsert the client, record the submission, issue the
    /// ticket, invalidate the token and stamp the application, all in one
    /// transaction gated by a compare-and-set on the token row.
    pub async fn complete_registration(
        &self,
        token: &str,
        data: RegistrationData,
    ) -> Result<CommitReceipt, RegistrationError> {
        validation::validate_token(token)?;
        validation::validate_registration_data(&data)?;

        // Fail fast with the precise token-state error; the repository
        // re-checks atomically at commit time.
        let ctx = self.validate_token(token).await?;
        let resolved = self
            .resolve_requirements(ctx.application.event_id, &ctx.application.application_type)
            .await;

        let now = Utc::now();
        let payment_amount = if resolved.requirements.requires_payment {
            resolved.requirements.payment_amount
        } else {
            Decimal::ZERO
        };

        let commit = RegistrationCommit {
            token: token.to_string(),
            application_id: ctx.application.id,
            event_id: ctx.application.event_id,
            client_id: ctx.application.user_id,
            client: data.client,
            submission_id: Uuid::new_v4(),
            confirmed_details: data.confirmed_details,
            agreement_accepted: data.agreement_accepted,
            agreement_accepted_at: Some(now),
            payment_method: data.payment_method,
            payment_amount,
            profile_deadline: now + Duration::days(resolved.requirements.profile_deadline_days),
            ticket_id: Uuid::new_v4(),
            ticket_type: ctx.application.application_type.clone(),
        };

        let receipt = self.registrations.commit(&commit).await?;

        // Notification delivery belongs to an external collaborator; a
        // publish failure must not fail the redemption.
        let event = RegistrationEvent::completed(
            receipt.registration_id,
            ctx.application.id,
            ctx.application.event_id,
            ctx.application.applicant_email.clone(),
        );
        if let Err(err) = self.event_publisher.publish(event).await {
            tracing::warn!(
                registration_id = %receipt.registration_id,
                error = %err,
                "failed to publish registration completed event"
            );
        }

        Ok(receipt)
    }

    // ===== Helper Methods =====

    fn default_requirements(&self) -> RequirementsView {
        RequirementsView {
            requires_payment: false,
            payment_amount: Decimal::ZERO,
            agreement_text: self.defaults.agreement_text.clone(),
            profile_deadline_days: self.defaults.profile_deadline_days,
        }
    }
}
