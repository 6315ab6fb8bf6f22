//! Mapper implementations for converting between DTOs and contract models
//!
//! This is where the response view is assembled: the validated token
//! context and the resolved requirements are merged into the shape the
//! registration frontend consumes. All functions here are pure.

use super::dto::*;
use crate::contract;

/// Assemble the registration view from the validated token context and the
/// resolved requirements
pub fn registration_view(
    ctx: contract::TokenContext,
    resolved: contract::ResolvedRequirements,
) -> RegistrationViewDto {
    RegistrationViewDto {
        token: ctx.token.token,
        expires_at: ctx.token.expires_at,
        application: ctx.application.into(),
        requirements: resolved.requirements.into(),
        payment_settings: resolved.payment.into(),
    }
}

// ===== View conversions =====

impl From<contract::ApplicationSummary> for ApplicationDto {
    fn from(application: contract::ApplicationSummary) -> Self {
        Self {
            id: application.id,
            event_id: application.event_id,
            event_name: application.event_name,
            application_type: application.application_type,
            applicant_name: application.applicant_name,
            applicant_email: application.applicant_email,
        }
    }
}

impl From<contract::RequirementsView> for RequirementsDto {
    fn from(view: contract::RequirementsView) -> Self {
        Self {
            requires_payment: view.requires_payment,
            payment_amount: view.payment_amount,
            agreement_text: view.agreement_text,
            profile_deadline_days: view.profile_deadline_days,
        }
    }
}

impl From<contract::PaymentSettingsView> for PaymentSettingsDto {
    fn from(view: contract::PaymentSettingsView) -> Self {
        Self {
            cash_enabled: view.cash_enabled,
            bank_transfer_enabled: view.bank_transfer_enabled,
            stripe_enabled: view.stripe_enabled,
            allow_installments: view.allow_installments,
        }
    }
}

// ===== Completion conversions =====

impl From<PaymentMethodDto> for contract::PaymentMethod {
    fn from(dto: PaymentMethodDto) -> Self {
        match dto {
            PaymentMethodDto::Cash => Self::Cash,
            PaymentMethodDto::BankTransfer => Self::BankTransfer,
            PaymentMethodDto::Stripe => Self::Stripe,
        }
    }
}

impl From<RegistrationDataDto> for contract::RegistrationData {
    fn from(dto: RegistrationDataDto) -> Self {
        Self {
            client: contract::ClientDetails {
                name: dto.name,
                email: dto.email,
                emergency_contact_name: dto.emergency_contact_name,
                emergency_contact_phone: dto.emergency_contact_phone,
                medical_conditions: dto.medical_conditions,
                allergies: dto.allergies,
                medications: dto.medications,
            },
            confirmed_details: dto.confirmed_details,
            agreement_accepted: dto.agreement_accepted,
            payment_method: dto.payment_method.map(Into::into),
        }
    }
}
