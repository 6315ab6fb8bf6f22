//! REST DTOs with serde derives for HTTP API

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ===== Registration view DTOs (GET path) =====

/// Assembled registration view returned to the applicant
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegistrationViewDto {
    /// The validated token string
    pub token: String,

    /// When the token stops being redeemable
    pub expires_at: DateTime<Utc>,

    /// Application the token belongs to
    pub application: ApplicationDto,

    /// Requirements for this event/application-type pair
    pub requirements: RequirementsDto,

    /// Payment methods available for this event
    pub payment_settings: PaymentSettingsDto,
}

/// Application summary within the registration view
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicationDto {
    /// Application ID
    pub id: Uuid,

    /// Event ID
    pub event_id: Uuid,

    /// Event name
    #[schema(example = "Inkfest London 2026")]
    pub event_name: String,

    /// Application type
    #[schema(example = "artist")]
    pub application_type: String,

    /// Applicant display name
    pub applicant_name: String,

    /// Applicant contact email
    pub applicant_email: String,
}

/// Registration requirements, with defaults substituted when unconfigured
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RequirementsDto {
    /// Whether payment is required to register
    pub requires_payment: bool,

    /// Amount owed when payment is required
    pub payment_amount: Decimal,

    /// Agreement text the applicant must accept
    pub agreement_text: String,

    /// Days granted to complete the attendee profile
    pub profile_deadline_days: i64,
}

/// Payment method availability for the event
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentSettingsDto {
    /// Cash accepted on the door
    pub cash_enabled: bool,

    /// Bank transfer accepted
    pub bank_transfer_enabled: bool,

    /// Card payments via Stripe accepted
    pub stripe_enabled: bool,

    /// Whether paying in installments is allowed
    pub allow_installments: bool,
}

// ===== Completion DTOs (POST path) =====

/// Payment method chosen by the applicant
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodDto {
    Cash,
    BankTransfer,
    Stripe,
}

/// Details confirmed by the applicant at redemption
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegistrationDataDto {
    /// Applicant display name
    #[serde(default)]
    pub name: String,

    /// Applicant contact email
    #[serde(default)]
    pub email: String,

    /// Emergency contact name
    pub emergency_contact_name: Option<String>,

    /// Emergency contact phone number
    pub emergency_contact_phone: Option<String>,

    /// Free-text medical conditions
    pub medical_conditions: Option<String>,

    /// Free-text allergies
    pub allergies: Option<String>,

    /// Free-text medications
    pub medications: Option<String>,

    /// Opaque confirmed payload stored verbatim on the submission
    #[serde(default = "empty_object")]
    pub confirmed_details: serde_json::Value,

    /// Whether the event agreement was accepted
    #[serde(default)]
    pub agreement_accepted: bool,

    /// Chosen payment method, if any
    pub payment_method: Option<PaymentMethodDto>,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Request body for completing a registration
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CompleteRegistrationRequest {
    /// The registration token being redeemed
    pub token: String,

    /// Details confirmed by the applicant
    pub registration_data: RegistrationDataDto,
}

/// Response body for a completed registration
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompleteRegistrationResponse {
    /// Human-readable confirmation
    pub message: String,

    /// ID of the created registration submission
    pub registration_id: Uuid,
}

// Note: Conversion implementations live in mapper.rs
