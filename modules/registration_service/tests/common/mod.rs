//! Common test utilities and shared convention fixture

use chrono::{Duration, Utc};
use registration_service::contract::{ClientDetails, RegistrationData, TokenRecord};
use registration_service::domain::{NoOpEventPublisher, RegistrationDefaults, Service};
use registration_service::infra::storage::memory::{ApplicationRow, InMemoryStore};
use registration_service::infra::storage::Repositories;
use std::sync::Arc;
use uuid::Uuid;

/// A seeded convention: one event, one approved artist application
pub struct TestConvention {
    pub store: Arc<InMemoryStore>,
    pub event_id: Uuid,
    pub application_id: Uuid,
    pub user_id: Uuid,
}

impl TestConvention {
    /// Seed the store with an event and an approved application that
    /// carries a user identity
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let event_id = Uuid::new_v4();
        let application_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        store.insert_event(event_id, "Inkfest London 2026");
        store.insert_application(ApplicationRow {
            id: application_id,
            user_id: Some(user_id),
            event_id,
            application_type: "artist".to_string(),
            applicant_name: "Robin Chase".to_string(),
            applicant_email: "robin@example.com".to_string(),
            registration_completed: None,
        });

        Self {
            store,
            event_id,
            application_id,
            user_id,
        }
    }

    /// Mint a redeemable token for the fixture application, expiring
    /// `expires_in` from now (negative to mint an already-expired token)
    pub fn mint_token(&self, token: &str, expires_in: Duration) {
        self.store.insert_token(TokenRecord {
            token: token.to_string(),
            application_id: self.application_id,
            expires_at: Utc::now() + expires_in,
            used_at: None,
            created_at: Utc::now(),
        });
    }

    /// Mint a token that was already redeemed five minutes ago
    pub fn mint_used_token(&self, token: &str, expires_in: Duration) {
        self.store.insert_token(TokenRecord {
            token: token.to_string(),
            application_id: self.application_id,
            expires_at: Utc::now() + expires_in,
            used_at: Some(Utc::now() - Duration::minutes(5)),
            created_at: Utc::now() - Duration::hours(1),
        });
    }

    /// Build a service over the fixture store with default policy
    pub fn service(&self) -> Service {
        let repos = Repositories::in_memory(self.store.clone());
        Service::new(
            repos.tokens,
            repos.requirements,
            repos.registrations,
            Arc::new(NoOpEventPublisher),
            RegistrationDefaults::default(),
        )
    }
}

impl Default for TestConvention {
    fn default() -> Self {
        Self::new()
    }
}

/// A completion payload with the agreement accepted
pub fn accepted_registration_data() -> RegistrationData {
    RegistrationData {
        client: ClientDetails {
            name: "Robin Chase".to_string(),
            email: "robin@example.com".to_string(),
            emergency_contact_name: Some("Sam Chase".to_string()),
            emergency_contact_phone: Some("+44 7700 900123".to_string()),
            medical_conditions: None,
            allergies: Some("latex".to_string()),
            medications: None,
        },
        confirmed_details: serde_json::json!({"studio": "Black Lotus Tattoo"}),
        agreement_accepted: true,
        payment_method: None,
    }
}
