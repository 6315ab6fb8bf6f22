//! Integration tests for the token read path and requirements resolution

use chrono::Duration;
use registration_service::contract::{
    PaymentSettingsView, RegistrationError, RequirementsView,
};
use registration_service::domain::repository::RequirementsRepository;
use registration_service::domain::{NoOpEventPublisher, RegistrationDefaults, Service};
use registration_service::infra::storage::Repositories;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

mod common;
use common::TestConvention;

// ===== Token validation =====

#[tokio::test]
async fn test_validate_token_success() {
    let convention = TestConvention::new();
    convention.mint_token("tok_valid", Duration::hours(1));
    let service = convention.service();

    let ctx = service
        .validate_token("tok_valid")
        .await
        .expect("token should validate");

    assert_eq!(ctx.token.token, "tok_valid");
    assert!(ctx.token.used_at.is_none());
    assert_eq!(ctx.application.id, convention.application_id);
    assert_eq!(ctx.application.event_name, "Inkfest London 2026");
    assert_eq!(ctx.application.application_type, "artist");
    assert_eq!(ctx.application.applicant_email, "robin@example.com");
}

#[tokio::test]
async fn test_validate_token_not_found() {
    let convention = TestConvention::new();
    let service = convention.service();

    let result = service.validate_token("tok_missing").await;
    assert_eq!(result.unwrap_err(), RegistrationError::NotFound);
}

#[tokio::test]
async fn test_validate_token_rejects_blank() {
    let convention = TestConvention::new();
    let service = convention.service();

    let result = service.validate_token("   ").await;
    assert!(matches!(
        result.unwrap_err(),
        RegistrationError::Validation { .. }
    ));
}

#[tokio::test]
async fn test_validate_token_expired() {
    let convention = TestConvention::new();
    convention.mint_token("tok_expired", Duration::hours(-1));
    let service = convention.service();

    let result = service.validate_token("tok_expired").await;
    assert_eq!(result.unwrap_err(), RegistrationError::Expired);
}

#[tokio::test]
async fn test_validate_token_already_used() {
    let convention = TestConvention::new();
    convention.mint_used_token("tok_used", Duration::hours(1));
    let service = convention.service();

    let result = service.validate_token("tok_used").await;
    assert_eq!(result.unwrap_err(), RegistrationError::AlreadyUsed);
}

#[tokio::test]
async fn test_used_and_expired_token_reports_already_used() {
    // Once used_at is set that is the terminal state of the token,
    // whatever the clock says.
    let convention = TestConvention::new();
    convention.mint_used_token("tok_used_expired", Duration::hours(-1));
    let service = convention.service();

    let result = service.validate_token("tok_used_expired").await;
    assert_eq!(result.unwrap_err(), RegistrationError::AlreadyUsed);
}

// ===== Requirements resolution =====

#[tokio::test]
async fn test_resolve_requirements_defaults_when_unconfigured() {
    let convention = TestConvention::new();
    let service = convention.service();

    let resolved = service
        .resolve_requirements(convention.event_id, "artist")
        .await;

    assert!(!resolved.requirements.requires_payment);
    assert_eq!(resolved.requirements.payment_amount, Decimal::ZERO);
    assert_eq!(resolved.requirements.profile_deadline_days, 30);
    assert!(!resolved.requirements.agreement_text.is_empty());
    assert_eq!(resolved.payment, PaymentSettingsView::default());
}

#[tokio::test]
async fn test_resolve_requirements_configured() {
    let convention = TestConvention::new();
    convention.store.insert_requirements(
        convention.event_id,
        "artist",
        RequirementsView {
            requires_payment: true,
            payment_amount: Decimal::new(15000, 2),
            agreement_text: "Artist terms for Inkfest London 2026".to_string(),
            profile_deadline_days: 14,
        },
    );
    convention.store.insert_payment_settings(
        convention.event_id,
        PaymentSettingsView {
            cash_enabled: true,
            bank_transfer_enabled: true,
            stripe_enabled: false,
            allow_installments: true,
        },
    );
    let service = convention.service();

    let resolved = service
        .resolve_requirements(convention.event_id, "artist")
        .await;

    assert!(resolved.requirements.requires_payment);
    assert_eq!(resolved.requirements.payment_amount, Decimal::new(15000, 2));
    assert_eq!(resolved.requirements.profile_deadline_days, 14);
    assert!(resolved.payment.cash_enabled);
    assert!(!resolved.payment.stripe_enabled);
    assert!(resolved.payment.allow_installments);
}

#[tokio::test]
async fn test_resolve_requirements_is_scoped_to_application_type() {
    let convention = TestConvention::new();
    convention.store.insert_requirements(
        convention.event_id,
        "trader",
        RequirementsView {
            requires_payment: true,
            payment_amount: Decimal::new(25000, 2),
            agreement_text: "Trader terms".to_string(),
            profile_deadline_days: 7,
        },
    );
    let service = convention.service();

    // The artist pair has no row, so defaults apply even though the
    // trader pair is configured for the same event.
    let resolved = service
        .resolve_requirements(convention.event_id, "artist")
        .await;

    assert!(!resolved.requirements.requires_payment);
    assert_eq!(resolved.requirements.profile_deadline_days, 30);
}

/// Requirements repository that fails every read
struct FailingRequirementsRepo;

#[async_trait::async_trait]
impl RequirementsRepository for FailingRequirementsRepo {
    async fn find_requirements(
        &self,
        _event_id: Uuid,
        _application_type: &str,
    ) -> anyhow::Result<Option<RequirementsView>> {
        anyhow::bail!("requirements table unavailable")
    }

    async fn find_payment_settings(
        &self,
        _event_id: Uuid,
    ) -> anyhow::Result<Option<PaymentSettingsView>> {
        anyhow::bail!("payment settings table unavailable")
    }
}

#[tokio::test]
async fn test_resolver_read_failures_fall_back_to_defaults() {
    // Registration must not be blocked by missing optional configuration;
    // a failing read resolves to the same defaults as an absent row.
    let convention = TestConvention::new();
    convention.mint_token("tok_resilient", Duration::hours(1));

    let repos = Repositories::in_memory(convention.store.clone());
    let service = Service::new(
        repos.tokens,
        Arc::new(FailingRequirementsRepo),
        repos.registrations,
        Arc::new(NoOpEventPublisher),
        RegistrationDefaults::default(),
    );

    let resolved = service
        .resolve_requirements(convention.event_id, "artist")
        .await;
    assert!(!resolved.requirements.requires_payment);
    assert_eq!(resolved.requirements.profile_deadline_days, 30);

    // The whole view path still succeeds.
    let (ctx, resolved) = service
        .registration_view("tok_resilient")
        .await
        .expect("view should resolve with defaults");
    assert_eq!(ctx.token.token, "tok_resilient");
    assert_eq!(resolved.payment, PaymentSettingsView::default());
}

// ===== View assembly =====

#[tokio::test]
async fn test_registration_view_merges_token_and_requirements() {
    let convention = TestConvention::new();
    convention.mint_token("tok_view", Duration::hours(2));
    convention.store.insert_requirements(
        convention.event_id,
        "artist",
        RequirementsView {
            requires_payment: true,
            payment_amount: Decimal::new(9900, 2),
            agreement_text: "Bring your own machine.".to_string(),
            profile_deadline_days: 21,
        },
    );
    let service = convention.service();

    let (ctx, resolved) = service
        .registration_view("tok_view")
        .await
        .expect("view should resolve");

    assert_eq!(ctx.application.event_name, "Inkfest London 2026");
    assert_eq!(ctx.application.applicant_name, "Robin Chase");
    assert_eq!(resolved.requirements.agreement_text, "Bring your own machine.");
    assert_eq!(resolved.requirements.profile_deadline_days, 21);
}

#[tokio::test]
async fn test_registration_view_rejects_expired_token_before_resolution() {
    let convention = TestConvention::new();
    convention.mint_token("tok_view_expired", Duration::minutes(-10));
    let service = convention.service();

    let result = service.registration_view("tok_view_expired").await;
    assert_eq!(result.unwrap_err(), RegistrationError::Expired);
}
