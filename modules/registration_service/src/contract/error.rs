//! Contract error types for the registration service
//!
//! These errors are transport-agnostic; the REST layer maps them to
//! problem-details responses.

/// Which commit step failed inside the redemption transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitStep {
    /// Create-or-update of the client row
    ClientUpsert,
    /// Insert of the registration submission row
    SubmissionInsert,
    /// Insert of the ticket row
    TicketInsert,
    /// Compare-and-set on the token row
    TokenInvalidate,
    /// Stamping `registration_completed` on the application
    ApplicationUpdate,
}

impl CommitStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClientUpsert => "client upsert",
            Self::SubmissionInsert => "submission insert",
            Self::TicketInsert => "ticket insert",
            Self::TokenInvalidate => "token invalidate",
            Self::ApplicationUpdate => "application update",
        }
    }
}

/// Registration service domain errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// No token row matches the supplied token string
    NotFound,
    /// The token's expiry instant has passed
    Expired,
    /// The token was already redeemed
    AlreadyUsed,
    /// Malformed or incomplete registration data
    Validation {
        /// Validation error message
        message: String,
    },
    /// A storage read or write failed outside the commit sequence
    Storage {
        /// Underlying cause
        message: String,
    },
    /// A write inside the redemption transaction failed; the transaction
    /// was rolled back and the request may be retried
    Commit {
        /// The step that failed
        step: CommitStep,
        /// Underlying cause
        message: String,
    },
}

impl RegistrationError {
    /// Shorthand for wrapping a storage-layer failure
    pub fn storage(err: impl std::fmt::Display) -> Self {
        Self::Storage {
            message: err.to_string(),
        }
    }

    /// Shorthand for a validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => {
                write!(f, "Registration token not found")
            }
            Self::Expired => {
                write!(f, "Registration token has expired")
            }
            Self::AlreadyUsed => {
                write!(f, "Registration token has already been used")
            }
            Self::Validation { message } => {
                write!(f, "Validation error: {}", message)
            }
            Self::Storage { message } => {
                write!(f, "Storage error: {}", message)
            }
            Self::Commit { step, message } => {
                write!(
                    f,
                    "Registration commit failed at {}: {}",
                    step.as_str(),
                    message
                )
            }
        }
    }
}

impl std::error::Error for RegistrationError {}
