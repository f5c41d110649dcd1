//! # Error Types
//!
//! Domain-specific error types for dukkan-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  dukkan-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations (draft math, stock)   │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  dukkan-api errors (separate crate)                                    │
//! │  └── ApiError         - Transport, envelope and session failures       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → shell notification     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, available qty, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations caught client-side,
/// before any request is dispatched. They should be caught and translated
/// to user-friendly (Arabic) messages by the view layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Requested quantity exceeds the product's available stock.
    ///
    /// Carries the available quantity so the UI can show it to the user.
    /// The server re-validates stock at commit time; this is the instant
    /// client-side preview of the same rule.
    ///
    /// ## User Workflow
    /// ```text
    /// Add line (qty: 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { name: "سكر 1كجم", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// UI shows: "الكمية المتاحة: 3"
    /// ```
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Discount percentage outside the allowed [0, 100] range.
    #[error("Invalid discount percent: {value} (must be between 0 and 100)")]
    InvalidDiscount { value: f64 },

    /// Order draft has no lines; submission requires at least one.
    #[error("Order has no lines")]
    EmptyOrder,

    /// Draft already holds the maximum allowed lines; adding another is
    /// refused before any stock check runs.
    #[error("Order cannot have more than {max} lines")]
    OrderTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Asset cost/life edits are locked once depreciation has been posted.
    ///
    /// The server owns the depreciation ledger; after the first posting the
    /// client refuses cost and useful-life edits locally.
    #[error("Asset schedule is locked: depreciation already posted ({accumulated})")]
    DepreciationLocked { accumulated: f64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before any network dispatch.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid email, invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Upload exceeds the size limit. Sizes are in bytes.
    #[error("File is too large: {actual} bytes (limit {max})")]
    FileTooLarge { actual: usize, max: usize },

    /// Upload has a MIME type outside the accepted family.
    #[error("Unsupported file type: {mime} (expected image/*)")]
    UnsupportedFileType { mime: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            name: "Sugar 1kg".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Sugar 1kg: available 3, requested 5"
        );
    }

    #[test]
    fn test_discount_error_message() {
        let err = CoreError::InvalidDiscount { value: 120.0 };
        assert_eq!(
            err.to_string(),
            "Invalid discount percent: 120 (must be between 0 and 100)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::FileTooLarge {
            actual: 6_000_000,
            max: 5_242_880,
        };
        assert_eq!(
            err.to_string(),
            "File is too large: 6000000 bytes (limit 5242880)"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "purchaseCost".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
