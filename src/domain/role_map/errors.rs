//! Role-map error types.
//!
//! Only failures surface here. Business no-ops (anonymous visitor, disallowed
//! role, malformed cart) are reported as handler outcomes instead.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Role-map specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleMapError {
    /// A referenced host record does not exist.
    NotFound { resource: String, id: String },

    /// Request input failed validation.
    ValidationFailed { field: String, message: String },

    /// The host platform failed.
    Infrastructure(String),
}

impl RoleMapError {
    pub fn not_found(resource: impl Into<String>, id: impl ToString) -> Self {
        RoleMapError::NotFound {
            resource: resource.into(),
            id: id.to_string(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        RoleMapError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        RoleMapError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            RoleMapError::NotFound { resource, .. } => match resource.as_str() {
                "user" => ErrorCode::UserNotFound,
                "product" => ErrorCode::ProductNotFound,
                "price_tier" => ErrorCode::PriceTierNotFound,
                "payment" => ErrorCode::PaymentNotFound,
                _ => ErrorCode::InternalError,
            },
            RoleMapError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            RoleMapError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            RoleMapError::NotFound { resource, id } => format!("{} not found: {}", resource, id),
            RoleMapError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            RoleMapError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for RoleMapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for RoleMapError {}

impl From<DomainError> for RoleMapError {
    fn from(err: DomainError) -> Self {
        let id = err.details.get("id").cloned().unwrap_or_default();
        match err.code {
            ErrorCode::UserNotFound => RoleMapError::not_found("user", id),
            ErrorCode::ProductNotFound => RoleMapError::not_found("product", id),
            ErrorCode::PriceTierNotFound => RoleMapError::not_found("price_tier", id),
            ErrorCode::PaymentNotFound => RoleMapError::not_found("payment", id),
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                let field = err.details.get("field").cloned().unwrap_or_default();
                RoleMapError::validation(field, err.message)
            }
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                RoleMapError::infrastructure(err.to_string())
            }
        }
    }
}

impl From<ValidationError> for RoleMapError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::EmptyField { ref field } => {
                RoleMapError::validation(field.clone(), err.to_string())
            }
            ValidationError::InvalidFormat { ref field, .. } => {
                RoleMapError::validation(field.clone(), err.to_string())
            }
        }
    }
}
