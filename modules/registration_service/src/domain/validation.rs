//! Input validation for the redemption paths

use crate::contract::{RegistrationData, RegistrationError};

/// Longest token string accepted before we bother storage
const MAX_TOKEN_LEN: usize = 512;

/// Validate the opaque token string
///
/// Tokens have no format beyond being non-empty; the length cap only guards
/// against abuse of the lookup path.
pub fn validate_token(token: &str) -> Result<(), RegistrationError> {
    if token.trim().is_empty() {
        return Err(RegistrationError::validation("token must not be empty"));
    }
    if token.len() > MAX_TOKEN_LEN {
        return Err(RegistrationError::validation("token is too long"));
    }
    Ok(())
}

/// Validate a completion payload
///
/// The agreement must be accepted; an email, when supplied, must at least
/// look like one. Everything else in the payload is optional - the client
/// upsert simply stores what was confirmed.
pub fn validate_registration_data(data: &RegistrationData) -> Result<(), RegistrationError> {
    if !data.agreement_accepted {
        return Err(RegistrationError::validation(
            "the event agreement must be accepted",
        ));
    }

    let email = data.client.email.trim();
    if !email.is_empty() && !is_plausible_email(email) {
        return Err(RegistrationError::Validation {
            message: format!("'{}' is not a valid email address", email),
        });
    }

    Ok(())
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !email.contains(char::is_whitespace)
}
