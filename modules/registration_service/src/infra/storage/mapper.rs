//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity;
use crate::contract::{
    ApplicationSummary, PaymentSettingsView, RegistrationCommit, RequirementsView, TokenContext,
    TokenRecord,
};
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;

// ===== Token conversions =====

impl From<entity::token::Model> for TokenRecord {
    fn from(entity: entity::token::Model) -> Self {
        Self {
            token: entity.token,
            application_id: entity.application_id,
            expires_at: entity.expires_at,
            used_at: entity.used_at,
            created_at: entity.created_at,
        }
    }
}

/// Assemble the read-time join result from its table rows
pub fn token_context(
    token: entity::token::Model,
    application: entity::application::Model,
    event_name: String,
) -> TokenContext {
    TokenContext {
        token: token.into(),
        application: ApplicationSummary {
            id: application.id,
            user_id: application.user_id,
            event_id: application.event_id,
            event_name,
            application_type: application.application_type,
            applicant_name: application.applicant_name,
            applicant_email: application.applicant_email,
            registration_completed: application.registration_completed,
        },
    }
}

// ===== Reference data conversions =====

impl From<entity::requirements::Model> for RequirementsView {
    fn from(entity: entity::requirements::Model) -> Self {
        Self {
            requires_payment: entity.requires_payment,
            payment_amount: entity.payment_amount,
            agreement_text: entity.agreement_text,
            profile_deadline_days: entity.profile_deadline_days.into(),
        }
    }
}

impl From<entity::payment_settings::Model> for PaymentSettingsView {
    fn from(entity: entity::payment_settings::Model) -> Self {
        Self {
            cash_enabled: entity.cash_enabled,
            bank_transfer_enabled: entity.bank_transfer_enabled,
            stripe_enabled: entity.stripe_enabled,
            allow_installments: entity.allow_installments,
        }
    }
}

// ===== Write-set builders =====

/// Client row for the upsert step
pub fn client_active_model(
    commit: &RegistrationCommit,
    client_id: uuid::Uuid,
    now: DateTime<Utc>,
) -> entity::client::ActiveModel {
    entity::client::ActiveModel {
        id: Set(client_id),
        name: Set(commit.client.name.clone()),
        email: Set(commit.client.email.clone()),
        emergency_contact_name: Set(commit.client.emergency_contact_name.clone()),
        emergency_contact_phone: Set(commit.client.emergency_contact_phone.clone()),
        medical_conditions: Set(commit.client.medical_conditions.clone()),
        allergies: Set(commit.client.allergies.clone()),
        medications: Set(commit.client.medications.clone()),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

/// Submission row for the insert step
pub fn submission_active_model(
    commit: &RegistrationCommit,
    now: DateTime<Utc>,
) -> entity::submission::ActiveModel {
    entity::submission::ActiveModel {
        id: Set(commit.submission_id),
        application_id: Set(commit.application_id),
        client_id: Set(commit.client_id),
        confirmed_details: Set(commit.confirmed_details.clone()),
        agreement_accepted: Set(commit.agreement_accepted),
        agreement_accepted_at: Set(commit.agreement_accepted_at),
        payment_method: Set(commit
            .payment_method
            .map(|method| method.as_str().to_string())),
        payment_amount: Set(commit.payment_amount),
        submitted_at: Set(now),
        profile_deadline: Set(commit.profile_deadline),
    }
}

/// Ticket row for the insert step
pub fn ticket_active_model(
    commit: &RegistrationCommit,
    now: DateTime<Utc>,
) -> entity::ticket::ActiveModel {
    entity::ticket::ActiveModel {
        id: Set(commit.ticket_id),
        event_id: Set(commit.event_id),
        client_id: Set(commit.client_id),
        ticket_type: Set(commit.ticket_type.clone()),
        price_gbp: Set(rust_decimal::Decimal::ZERO),
        purchase_date: Set(now),
        status: Set(super::TICKET_STATUS_ACTIVE.to_string()),
    }
}
