//! In-process storage backend
//!
//! A development stand-in for the database: typed tables behind one
//! `parking_lot` lock, selected at startup via `StorageConfig::Memory`. The
//! redemption commit holds the write lock for its whole duration, which
//! gives this backend the same at-most-once and no-partial-state guarantees
//! as the transactional SeaORM backend.

use crate::contract::{
    ApplicationSummary, ClientDetails, CommitReceipt, PaymentMethod, PaymentSettingsView,
    RegistrationCommit, RegistrationError, RequirementsView, TokenContext, TokenRecord,
};
use crate::domain::repository::{RegistrationRepository, RequirementsRepository, TokenRepository};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

/// Application row as stored in the in-memory table
#[derive(Debug, Clone)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub event_id: Uuid,
    pub application_type: String,
    pub applicant_name: String,
    pub applicant_email: String,
    pub registration_completed: Option<DateTime<Utc>>,
}

/// Registration submission row as stored in the in-memory table
#[derive(Debug, Clone)]
pub struct SubmissionRow {
    pub id: Uuid,
    pub application_id: Uuid,
    pub client_id: Option<Uuid>,
    pub confirmed_details: Value,
    pub agreement_accepted: bool,
    pub agreement_accepted_at: Option<DateTime<Utc>>,
    pub payment_method: Option<PaymentMethod>,
    pub payment_amount: Decimal,
    pub submitted_at: DateTime<Utc>,
    pub profile_deadline: DateTime<Utc>,
}

/// Ticket row as stored in the in-memory table
#[derive(Debug, Clone)]
pub struct TicketRow {
    pub id: Uuid,
    pub event_id: Uuid,
    pub client_id: Option<Uuid>,
    pub ticket_type: String,
    pub price_gbp: Decimal,
    pub purchase_date: DateTime<Utc>,
    pub status: String,
}

#[derive(Default)]
struct Tables {
    events: HashMap<Uuid, String>,
    applications: HashMap<Uuid, ApplicationRow>,
    tokens: HashMap<String, TokenRecord>,
    requirements: HashMap<(Uuid, String), RequirementsView>,
    payment_settings: HashMap<Uuid, PaymentSettingsView>,
    clients: HashMap<Uuid, ClientDetails>,
    submissions: HashMap<Uuid, SubmissionRow>,
    tickets: HashMap<Uuid, TicketRow>,
}

/// In-memory implementation of all repository traits
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Seeding =====

    pub fn insert_event(&self, id: Uuid, name: &str) {
        self.tables.write().events.insert(id, name.to_string());
    }

    pub fn insert_application(&self, row: ApplicationRow) {
        self.tables.write().applications.insert(row.id, row);
    }

    pub fn insert_token(&self, record: TokenRecord) {
        self.tables
            .write()
            .tokens
            .insert(record.token.clone(), record);
    }

    pub fn insert_requirements(
        &self,
        event_id: Uuid,
        application_type: &str,
        view: RequirementsView,
    ) {
        self.tables
            .write()
            .requirements
            .insert((event_id, application_type.to_string()), view);
    }

    pub fn insert_payment_settings(&self, event_id: Uuid, view: PaymentSettingsView) {
        self.tables.write().payment_settings.insert(event_id, view);
    }

    pub fn insert_client(&self, id: Uuid, details: ClientDetails) {
        self.tables.write().clients.insert(id, details);
    }

    // ===== Inspection =====

    pub fn token(&self, token: &str) -> Option<TokenRecord> {
        self.tables.read().tokens.get(token).cloned()
    }

    pub fn application(&self, id: Uuid) -> Option<ApplicationRow> {
        self.tables.read().applications.get(&id).cloned()
    }

    pub fn client(&self, id: Uuid) -> Option<ClientDetails> {
        self.tables.read().clients.get(&id).cloned()
    }

    pub fn submissions(&self) -> Vec<SubmissionRow> {
        self.tables.read().submissions.values().cloned().collect()
    }

    pub fn tickets(&self) -> Vec<TicketRow> {
        self.tables.read().tickets.values().cloned().collect()
    }
}

#[async_trait]
impl TokenRepository for InMemoryStore {
    async fn find_with_application(&self, token: &str) -> Result<Option<TokenContext>> {
        let tables = self.tables.read();

        let Some(record) = tables.tokens.get(token) else {
            return Ok(None);
        };
        let application = tables
            .applications
            .get(&record.application_id)
            .ok_or_else(|| {
                anyhow::anyhow!("token '{}' references a missing application", token)
            })?;
        let event_name = tables
            .events
            .get(&application.event_id)
            .cloned()
            .unwrap_or_default();

        Ok(Some(TokenContext {
            token: record.clone(),
            application: ApplicationSummary {
                id: application.id,
                user_id: application.user_id,
                event_id: application.event_id,
                event_name,
                application_type: application.application_type.clone(),
                applicant_name: application.applicant_name.clone(),
                applicant_email: application.applicant_email.clone(),
                registration_completed: application.registration_completed,
            },
        }))
    }
}

#[async_trait]
impl RequirementsRepository for InMemoryStore {
    async fn find_requirements(
        &self,
        event_id: Uuid,
        application_type: &str,
    ) -> Result<Option<RequirementsView>> {
        Ok(self
            .tables
            .read()
            .requirements
            .get(&(event_id, application_type.to_string()))
            .cloned())
    }

    async fn find_payment_settings(&self, event_id: Uuid) -> Result<Option<PaymentSettingsView>> {
        Ok(self.tables.read().payment_settings.get(&event_id).cloned())
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryStore {
    async fn commit(
        &self,
        commit: &RegistrationCommit,
    ) -> Result<CommitReceipt, RegistrationError> {
        let mut tables = self.tables.write();
        let now = Utc::now();

        // Checks first, writes after: a failed commit must leave no rows,
        // matching the transactional backend.
        match tables.tokens.get(&commit.token) {
            None => return Err(RegistrationError::NotFound),
            Some(record) if record.used_at.is_some() => {
                return Err(RegistrationError::AlreadyUsed)
            }
            Some(record) if now >= record.expires_at => return Err(RegistrationError::Expired),
            Some(_) => {}
        }
        if !tables.applications.contains_key(&commit.application_id) {
            return Err(RegistrationError::Commit {
                step: crate::contract::CommitStep::ApplicationUpdate,
                message: format!("application '{}' not found", commit.application_id),
            });
        }

        // Compare-and-set: the lock is held until every write lands, so
        // concurrent redemptions of the same token serialize here.
        if let Some(record) = tables.tokens.get_mut(&commit.token) {
            record.used_at = Some(now);
        }

        if let Some(client_id) = commit.client_id {
            tables.clients.insert(client_id, commit.client.clone());
        }

        tables.submissions.insert(
            commit.submission_id,
            SubmissionRow {
                id: commit.submission_id,
                application_id: commit.application_id,
                client_id: commit.client_id,
                confirmed_details: commit.confirmed_details.clone(),
                agreement_accepted: commit.agreement_accepted,
                agreement_accepted_at: commit.agreement_accepted_at,
                payment_method: commit.payment_method,
                payment_amount: commit.payment_amount,
                submitted_at: now,
                profile_deadline: commit.profile_deadline,
            },
        );

        tables.tickets.insert(
            commit.ticket_id,
            TicketRow {
                id: commit.ticket_id,
                event_id: commit.event_id,
                client_id: commit.client_id,
                ticket_type: commit.ticket_type.clone(),
                price_gbp: Decimal::ZERO,
                purchase_date: now,
                status: super::TICKET_STATUS_ACTIVE.to_string(),
            },
        );

        if let Some(application) = tables.applications.get_mut(&commit.application_id) {
            application.registration_completed = Some(now);
        }

        Ok(CommitReceipt {
            registration_id: commit.submission_id,
        })
    }
}
