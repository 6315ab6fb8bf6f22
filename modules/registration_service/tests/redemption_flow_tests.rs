//! Integration tests for the redemption commit path

use chrono::{Duration, Utc};
use registration_service::contract::{
    ClientDetails, PaymentMethod, RegistrationError, RequirementsView,
};
use registration_service::infra::storage::memory::ApplicationRow;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

mod common;
use common::{accepted_registration_data, TestConvention};

#[tokio::test]
async fn test_complete_registration_happy_path() {
    let convention = TestConvention::new();
    convention.mint_token("tok_t1", Duration::hours(1));
    let service = convention.service();

    let receipt = service
        .complete_registration("tok_t1", accepted_registration_data())
        .await
        .expect("redemption should succeed");

    // Token is invalidated.
    let token = convention.store.token("tok_t1").expect("token row");
    assert!(token.used_at.is_some());

    // Exactly one submission, carrying the receipt's registration ID.
    let submissions = convention.store.submissions();
    assert_eq!(submissions.len(), 1);
    let submission = &submissions[0];
    assert_eq!(submission.id, receipt.registration_id);
    assert_eq!(submission.application_id, convention.application_id);
    assert_eq!(submission.client_id, Some(convention.user_id));
    assert!(submission.agreement_accepted);
    assert!(submission.agreement_accepted_at.is_some());
    assert_eq!(submission.payment_amount, Decimal::ZERO);

    // Exactly one active zero-priced ticket for the event.
    let tickets = convention.store.tickets();
    assert_eq!(tickets.len(), 1);
    let ticket = &tickets[0];
    assert_eq!(ticket.event_id, convention.event_id);
    assert_eq!(ticket.ticket_type, "artist");
    assert_eq!(ticket.price_gbp, Decimal::ZERO);
    assert_eq!(ticket.status, "active");

    // Client row was created from the confirmed details.
    let client = convention
        .store
        .client(convention.user_id)
        .expect("client row");
    assert_eq!(client.name, "Robin Chase");
    assert_eq!(client.allergies.as_deref(), Some("latex"));

    // Application is stamped as completed.
    let application = convention
        .store
        .application(convention.application_id)
        .expect("application row");
    assert!(application.registration_completed.is_some());
}

#[tokio::test]
async fn test_complete_requires_agreement() {
    let convention = TestConvention::new();
    convention.mint_token("tok_no_agreement", Duration::hours(1));
    let service = convention.service();

    let mut data = accepted_registration_data();
    data.agreement_accepted = false;

    let result = service.complete_registration("tok_no_agreement", data).await;
    assert!(matches!(
        result.unwrap_err(),
        RegistrationError::Validation { .. }
    ));

    // Nothing was written.
    let token = convention.store.token("tok_no_agreement").expect("token row");
    assert!(token.used_at.is_none());
    assert!(convention.store.submissions().is_empty());
    assert!(convention.store.tickets().is_empty());
}

#[tokio::test]
async fn test_complete_twice_issues_single_ticket() {
    let convention = TestConvention::new();
    convention.mint_token("tok_twice", Duration::hours(1));
    let service = convention.service();

    service
        .complete_registration("tok_twice", accepted_registration_data())
        .await
        .expect("first redemption should succeed");

    let second = service
        .complete_registration("tok_twice", accepted_registration_data())
        .await;
    assert_eq!(second.unwrap_err(), RegistrationError::AlreadyUsed);

    assert_eq!(convention.store.submissions().len(), 1);
    assert_eq!(convention.store.tickets().len(), 1);
}

#[tokio::test]
async fn test_complete_expired_token_writes_nothing() {
    let convention = TestConvention::new();
    convention.mint_token("tok_t2", Duration::hours(-1));
    let service = convention.service();

    let result = service
        .complete_registration("tok_t2", accepted_registration_data())
        .await;
    assert_eq!(result.unwrap_err(), RegistrationError::Expired);

    let token = convention.store.token("tok_t2").expect("token row");
    assert!(token.used_at.is_none());
    assert!(convention.store.submissions().is_empty());
    assert!(convention.store.tickets().is_empty());
    let application = convention
        .store
        .application(convention.application_id)
        .expect("application row");
    assert!(application.registration_completed.is_none());
}

#[tokio::test]
async fn test_complete_used_token_writes_nothing() {
    let convention = TestConvention::new();
    convention.mint_used_token("tok_spent", Duration::hours(1));
    let service = convention.service();

    let result = service
        .complete_registration("tok_spent", accepted_registration_data())
        .await;
    assert_eq!(result.unwrap_err(), RegistrationError::AlreadyUsed);

    assert!(convention.store.submissions().is_empty());
    assert!(convention.store.tickets().is_empty());
}

#[tokio::test]
async fn test_complete_unknown_token() {
    let convention = TestConvention::new();
    let service = convention.service();

    let result = service
        .complete_registration("tok_unknown", accepted_registration_data())
        .await;
    assert_eq!(result.unwrap_err(), RegistrationError::NotFound);
}

#[tokio::test]
async fn test_concurrent_completion_single_winner() {
    // N racing redemptions of one token: exactly one commit wins, the
    // rest observe AlreadyUsed, and exactly one ticket exists afterwards.
    let convention = TestConvention::new();
    convention.mint_token("tok_race", Duration::hours(1));
    let service = Arc::new(convention.service());

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service
                .complete_registration("tok_race", accepted_registration_data())
                .await
        }));
    }

    let mut successes = 0;
    let mut already_used = 0;
    for handle in handles {
        match handle.await.expect("task should not panic") {
            Ok(_) => successes += 1,
            Err(RegistrationError::AlreadyUsed) => already_used += 1,
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(already_used, 7);
    assert_eq!(convention.store.submissions().len(), 1);
    assert_eq!(convention.store.tickets().len(), 1);
}

#[tokio::test]
async fn test_client_upsert_overwrites_existing_row() {
    let convention = TestConvention::new();
    convention.mint_token("tok_upsert", Duration::hours(1));
    convention.store.insert_client(
        convention.user_id,
        ClientDetails {
            name: "R. Chase".to_string(),
            email: "old@example.com".to_string(),
            ..ClientDetails::default()
        },
    );
    let service = convention.service();

    service
        .complete_registration("tok_upsert", accepted_registration_data())
        .await
        .expect("redemption should succeed");

    // Overwritten, not duplicated.
    let client = convention
        .store
        .client(convention.user_id)
        .expect("client row");
    assert_eq!(client.name, "Robin Chase");
    assert_eq!(client.email, "robin@example.com");
}

#[tokio::test]
async fn test_no_client_row_without_user_identity() {
    let convention = TestConvention::new();
    let anonymous_application = Uuid::new_v4();
    convention.store.insert_application(ApplicationRow {
        id: anonymous_application,
        user_id: None,
        event_id: convention.event_id,
        application_type: "volunteer".to_string(),
        applicant_name: "Alex Doe".to_string(),
        applicant_email: "alex@example.com".to_string(),
        registration_completed: None,
    });
    convention.store.insert_token(registration_service::contract::TokenRecord {
        token: "tok_anon".to_string(),
        application_id: anonymous_application,
        expires_at: Utc::now() + Duration::hours(1),
        used_at: None,
        created_at: Utc::now(),
    });
    let service = convention.service();

    service
        .complete_registration("tok_anon", accepted_registration_data())
        .await
        .expect("redemption should succeed");

    let submissions = convention.store.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].client_id, None);

    let tickets = convention.store.tickets();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].client_id, None);
    assert_eq!(tickets[0].ticket_type, "volunteer");
}

#[tokio::test]
async fn test_profile_deadline_honors_configured_days() {
    let convention = TestConvention::new();
    convention.mint_token("tok_deadline", Duration::hours(1));
    convention.store.insert_requirements(
        convention.event_id,
        "artist",
        RequirementsView {
            requires_payment: false,
            payment_amount: Decimal::ZERO,
            agreement_text: "Artist terms".to_string(),
            profile_deadline_days: 10,
        },
    );
    let service = convention.service();

    let before = Utc::now();
    service
        .complete_registration("tok_deadline", accepted_registration_data())
        .await
        .expect("redemption should succeed");
    let after = Utc::now();

    let submissions = convention.store.submissions();
    assert_eq!(submissions.len(), 1);
    let deadline = submissions[0].profile_deadline;
    assert!(deadline >= before + Duration::days(10));
    assert!(deadline <= after + Duration::days(10));
}

#[tokio::test]
async fn test_default_deadline_is_thirty_days() {
    let convention = TestConvention::new();
    convention.mint_token("tok_default_deadline", Duration::hours(1));
    let service = convention.service();

    let before = Utc::now();
    service
        .complete_registration("tok_default_deadline", accepted_registration_data())
        .await
        .expect("redemption should succeed");
    let after = Utc::now();

    let deadline = convention.store.submissions()[0].profile_deadline;
    assert!(deadline >= before + Duration::days(30));
    assert!(deadline <= after + Duration::days(30));
}

#[tokio::test]
async fn test_payment_amount_recorded_when_required() {
    let convention = TestConvention::new();
    convention.mint_token("tok_paid", Duration::hours(1));
    convention.store.insert_requirements(
        convention.event_id,
        "artist",
        RequirementsView {
            requires_payment: true,
            payment_amount: Decimal::new(15000, 2),
            agreement_text: "Artist terms".to_string(),
            profile_deadline_days: 30,
        },
    );
    let service = convention.service();

    let mut data = accepted_registration_data();
    data.payment_method = Some(PaymentMethod::BankTransfer);

    service
        .complete_registration("tok_paid", data)
        .await
        .expect("redemption should succeed");

    let submissions = convention.store.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].payment_amount, Decimal::new(15000, 2));
    assert_eq!(
        submissions[0].payment_method,
        Some(PaymentMethod::BankTransfer)
    );

    // The ticket price stays zero: payment reconciliation is a deferred
    // integration point, not part of the redemption path.
    let tickets = convention.store.tickets();
    assert_eq!(tickets[0].price_gbp, Decimal::ZERO);
}
