//! Contract models for the registration service
//!
//! These models are transport-agnostic and used across the domain, storage
//! and REST layers. NO serde derives - these are pure domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// A single-use, time-limited registration token
///
/// Minted by the (out-of-scope) applications workflow when an application is
/// approved. Redeemable iff `used_at` is null and `now < expires_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    /// Opaque token string (primary key)
    pub token: String,
    /// Application this token belongs to
    pub application_id: Uuid,
    /// Expiry instant; the token is rejected from this instant on
    pub expires_at: DateTime<Utc>,
    /// Set exactly once when the token is redeemed
    pub used_at: Option<DateTime<Utc>>,
    /// Mint timestamp
    pub created_at: DateTime<Utc>,
}

impl TokenRecord {
    /// Whether the token can still be redeemed at `now`
    pub fn is_redeemable(&self, now: DateTime<Utc>) -> bool {
        self.used_at.is_none() && now < self.expires_at
    }
}

/// Denormalized application fields loaded together with a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationSummary {
    /// Application ID
    pub id: Uuid,
    /// Account of the applicant, when one exists
    pub user_id: Option<Uuid>,
    /// Event the application targets
    pub event_id: Uuid,
    /// Event name (read-time join)
    pub event_name: String,
    /// Application type ("artist", "trader", ...)
    pub application_type: String,
    /// Applicant display name
    pub applicant_name: String,
    /// Applicant contact email
    pub applicant_email: String,
    /// Set when the applicant has completed registration
    pub registration_completed: Option<DateTime<Utc>>,
}

/// Result of the token read path: the token plus its application context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenContext {
    pub token: TokenRecord,
    pub application: ApplicationSummary,
}

/// Registration requirements for one (event, application type) pair
///
/// Reference data; when no row exists the defaults apply (no payment, the
/// configured generic agreement text, 30-day profile deadline).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementsView {
    pub requires_payment: bool,
    pub payment_amount: Decimal,
    pub agreement_text: String,
    pub profile_deadline_days: i64,
}

/// Payment method availability for one event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaymentSettingsView {
    pub cash_enabled: bool,
    pub bank_transfer_enabled: bool,
    pub stripe_enabled: bool,
    pub allow_installments: bool,
}

/// Requirements and payment settings resolved for a token's event/type pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequirements {
    pub requirements: RequirementsView,
    pub payment: PaymentSettingsView,
}

/// How the applicant intends to pay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    BankTransfer,
    Stripe,
}

impl PaymentMethod {
    /// Stable wire/storage name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::BankTransfer => "bank_transfer",
            Self::Stripe => "stripe",
        }
    }

    /// Parse the stable wire/storage name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cash" => Some(Self::Cash),
            "bank_transfer" => Some(Self::BankTransfer),
            "stripe" => Some(Self::Stripe),
            _ => None,
        }
    }
}

/// Personal and medical details confirmed by the applicant at redemption
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientDetails {
    pub name: String,
    pub email: String,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub medical_conditions: Option<String>,
    pub allergies: Option<String>,
    pub medications: Option<String>,
}

/// Payload submitted on the completion path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationData {
    /// Applicant details used for the client upsert
    pub client: ClientDetails,
    /// Opaque confirmed payload captured verbatim on the submission
    pub confirmed_details: serde_json::Value,
    /// Whether the event agreement was accepted
    pub agreement_accepted: bool,
    /// Chosen payment method, if any
    pub payment_method: Option<PaymentMethod>,
}

/// Fully computed write set for one redemption
///
/// Built by the domain service; executed atomically by
/// `RegistrationRepository::commit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationCommit {
    pub token: String,
    pub application_id: Uuid,
    pub event_id: Uuid,
    /// Client identity, when the application carries one
    pub client_id: Option<Uuid>,
    pub client: ClientDetails,
    /// Pre-generated submission ID, returned as the registration ID
    pub submission_id: Uuid,
    pub confirmed_details: serde_json::Value,
    pub agreement_accepted: bool,
    pub agreement_accepted_at: Option<DateTime<Utc>>,
    pub payment_method: Option<PaymentMethod>,
    /// Amount owed per the resolved requirements; reconciliation is deferred
    pub payment_amount: Decimal,
    pub profile_deadline: DateTime<Utc>,
    /// Pre-generated ticket ID
    pub ticket_id: Uuid,
    /// Ticket type, mirrors the application type
    pub ticket_type: String,
}

/// Outcome of a successful redemption
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitReceipt {
    /// ID of the created registration submission
    pub registration_id: Uuid,
}
