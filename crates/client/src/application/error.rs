//! Service layer error types
//!
//! This module defines errors that can occur in the application service
//! layer, abstracting over the raw HTTP boundary.

use thiserror::Error;

use deiquest_domain::DomainError;

use crate::ports::outbound::ApiError;

/// Errors that can occur in service operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The HTTP boundary failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A domain rule refused the operation
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A form field failed local validation; no request was sent
    #[error("{0}")]
    Validation(String),

    /// Credentials were not accepted
    #[error("Login failed! Please try again.")]
    BadCredentials,

    /// An operation that needs an identity ran without one
    #[error("not signed in")]
    NotSignedIn,

    /// A response arrived but was not the expected shape
    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl ServiceError {
    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::Api(e) if e.is_not_found())
    }

    /// Check if this is an authorization error
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ServiceError::Api(e) if e.is_unauthorized())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ServiceError::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates_match_status_codes() {
        let not_found = ServiceError::Api(ApiError::Status {
            status: 404,
            message: String::new(),
        });
        assert!(not_found.is_not_found());
        assert!(!not_found.is_unauthorized());

        let unauthorized = ServiceError::Api(ApiError::Status {
            status: 401,
            message: String::new(),
        });
        assert!(unauthorized.is_unauthorized());
    }
}
