//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;

/// Every way a transfer submission can be refused.
///
/// The display text is exactly what the client sees in the `error` field.
/// Collaborator faults are not part of this set; they travel as
/// `StoreError` and end up at the generic fault handler.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// Path id is not an integer
    #[error("Id must be a number")]
    InvalidIdentifier,

    /// Authenticated caller is not the user named in the path
    #[error("Token doesn't match ID provided")]
    IdentityMismatch,

    /// Required field absent or null
    #[error("Missing {0} in request body")]
    MissingField(&'static str),

    /// Amount present but not coercible to an integer
    #[error("Amount should be a number")]
    InvalidAmount,

    /// Receiver present but neither a username nor an integer
    #[error("Receiver should be a username")]
    InvalidReceiver,

    /// Body is not a JSON object
    #[error("Request body must be a JSON object")]
    MalformedBody,

    /// Sender and receiver are the same user
    #[error("User and receiver cannot match")]
    SelfTransfer,

    /// Directory has no user with the given username
    #[error("Receiver not found")]
    ReceiverNotFound,

    /// Ledger store created no row
    #[error("Transfer not completed")]
    TransferNotCompleted,
}

/// Coarse classification used for status mapping and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Caller is not who the path says
    Unauthorized,
    /// Bad shape or type; resubmitting correctly will work
    ClientInput,
    /// Receiver absent
    NotFound,
    /// Store declined the insert
    WriteRejected,
}

impl TransferError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidIdentifier | Self::IdentityMismatch => ErrorClass::Unauthorized,
            Self::MissingField(_)
            | Self::InvalidAmount
            | Self::InvalidReceiver
            | Self::MalformedBody
            | Self::SelfTransfer => ErrorClass::ClientInput,
            Self::ReceiverNotFound => ErrorClass::NotFound,
            Self::TransferNotCompleted => ErrorClass::WriteRejected,
        }
    }

    /// True for request-shape failures, as opposed to lookup or write outcomes
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self.class(),
            ErrorClass::Unauthorized | ErrorClass::ClientInput
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = TransferError::MissingField("receiver");
        assert_eq!(err.to_string(), "Missing receiver in request body");
        assert_eq!(err.class(), ErrorClass::ClientInput);
    }

    #[test]
    fn test_identity_errors_are_unauthorized() {
        assert_eq!(TransferError::InvalidIdentifier.class(), ErrorClass::Unauthorized);
        assert_eq!(TransferError::IdentityMismatch.class(), ErrorClass::Unauthorized);
        assert_eq!(
            TransferError::IdentityMismatch.to_string(),
            "Token doesn't match ID provided"
        );
    }

    #[test]
    fn test_io_outcomes() {
        assert_eq!(TransferError::ReceiverNotFound.class(), ErrorClass::NotFound);
        assert_eq!(
            TransferError::TransferNotCompleted.class(),
            ErrorClass::WriteRejected
        );
        assert!(!TransferError::ReceiverNotFound.is_validation_error());
        assert!(!TransferError::TransferNotCompleted.is_validation_error());
        assert!(TransferError::InvalidAmount.is_validation_error());
    }
}
