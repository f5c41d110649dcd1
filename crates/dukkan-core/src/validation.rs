//! # Validation Module
//!
//! Input validation utilities for the dashboard client.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Rendering shell                                              │
//! │  ├── Input masks, disabled buttons                                     │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (before any dispatch)                            │
//! │  ├── Required fields, lengths, ranges                                  │
//! │  └── Upload size/MIME gates                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend (authoritative)                                      │
//! │  ├── Stock re-check at commit                                          │
//! │  └── Persistence constraints                                           │
//! │                                                                         │
//! │  A request that fails here is never sent over the wire.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use dukkan_core::validation::{validate_name, validate_quantity};
//!
//! // Validate a form name before building the request
//! validate_name("سكر 1كجم").unwrap();
//!
//! // Validate a quantity before drafting a line
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::{MAX_LINE_QUANTITY, MAX_NOTE_LENGTH, MAX_UPLOAD_BYTES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (product, customer, supplier, asset).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
///
/// ## Returns
/// The trimmed name.
///
/// ## Example
/// ```rust
/// use dukkan_core::validation::validate_name;
///
/// assert_eq!(validate_name("  Sugar 1kg ").unwrap(), "Sugar 1kg");
/// assert!(validate_name("").is_err());
/// assert!(validate_name(&"A".repeat(300)).is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(name.to_string())
}

/// Validates a search term before it is committed to a list query.
///
/// ## Rules
/// - Can be empty (an empty search returns the unfiltered list)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed term.
pub fn validate_search_term(term: &str) -> ValidationResult<String> {
    let term = term.trim();

    if term.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "search".to_string(),
            max: 100,
        });
    }

    Ok(term.to_string())
}

/// Validates note body text.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most [`MAX_NOTE_LENGTH`] characters
pub fn validate_note_content(content: &str) -> ValidationResult<String> {
    let content = content.trim();

    if content.is_empty() {
        return Err(ValidationError::Required {
            field: "content".to_string(),
        });
    }

    if content.chars().count() > MAX_NOTE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "content".to_string(),
            max: MAX_NOTE_LENGTH,
        });
    }

    Ok(content.to_string())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Must contain a single `@` with text on both sides, no whitespace
///
/// The backend performs the authoritative check; this only catches obvious
/// typos before a round trip.
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let well_formed = email.split('@').count() == 2
        && !email.starts_with('@')
        && !email.ends_with('@')
        && !email.contains(char::is_whitespace);
    if !well_formed {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain".to_string(),
        });
    }

    Ok(email.to_string())
}

/// Validates a password for the register/reset flows.
///
/// ## Rules
/// - At least 6 characters
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.chars().count() < 6 {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: 6,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_LINE_QUANTITY`]
///
/// Stock availability is checked separately by the order draft, which knows
/// the selected product.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price field.
///
/// ## Rules
/// - Must be a finite number
/// - Must be non-negative; zero is allowed (giveaway lines)
///
/// ## Example
/// ```rust
/// use dukkan_core::validation::validate_price;
///
/// assert!(validate_price(45.0).is_ok());
/// assert!(validate_price(0.0).is_ok());
/// assert!(validate_price(-1.0).is_err());
/// assert!(validate_price(f64::NAN).is_err());
/// ```
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a number".to_string(),
        });
    }

    if price < 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a strictly positive amount (expense amount, purchase cost).
pub fn validate_positive_amount(amount: f64, field: &str) -> ValidationResult<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates an asset's useful life in months.
///
/// ## Rules
/// - Must be positive; the depreciation preview divides by it
pub fn validate_useful_life_months(months: u32) -> ValidationResult<()> {
    if months == 0 {
        return Err(ValidationError::MustBePositive {
            field: "usefulLifeMonths".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Upload Validators
// =============================================================================

/// Validates an image upload before it is encoded as a multipart form part.
///
/// ## Rules
/// - At most [`MAX_UPLOAD_BYTES`] (5 MB)
/// - MIME type must be in the `image/*` family
///
/// ## Example
/// ```rust
/// use dukkan_core::validation::validate_image_upload;
///
/// assert!(validate_image_upload("logo.png", "image/png", 1024).is_ok());
/// assert!(validate_image_upload("doc.pdf", "application/pdf", 1024).is_err());
/// assert!(validate_image_upload("big.png", "image/png", 6 * 1024 * 1024).is_err());
/// ```
pub fn validate_image_upload(file_name: &str, mime: &str, size_bytes: usize) -> ValidationResult<()> {
    if file_name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "file name".to_string(),
        });
    }

    if !mime.starts_with("image/") {
        return Err(ValidationError::UnsupportedFileType {
            mime: mime.to_string(),
        });
    }

    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(ValidationError::FileTooLarge {
            actual: size_bytes,
            max: MAX_UPLOAD_BYTES,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("Sugar 1kg").unwrap(), "Sugar 1kg");
        assert_eq!(validate_name("  سكر  ").unwrap(), "سكر");

        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_search_term() {
        assert_eq!(validate_search_term("").unwrap(), "");
        assert_eq!(validate_search_term(" sugar ").unwrap(), "sugar");
        assert!(validate_search_term(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_note_content() {
        assert!(validate_note_content("follow up tomorrow").is_ok());
        assert!(validate_note_content("  ").is_err());
        assert!(validate_note_content(&"n".repeat(2001)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("owner@dukkan.app").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("two@@signs").is_err());
        assert!(validate_email("with space@x.com").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secret1").is_ok());
        assert!(validate_password("short").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(10.99).is_ok());
        assert!(validate_price(-0.01).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_positive_amount() {
        assert!(validate_positive_amount(120.5, "amount").is_ok());
        assert!(validate_positive_amount(0.0, "amount").is_err());
        assert!(validate_positive_amount(f64::NAN, "amount").is_err());
    }

    #[test]
    fn test_validate_useful_life_months() {
        assert!(validate_useful_life_months(24).is_ok());
        assert!(validate_useful_life_months(0).is_err());
    }

    #[test]
    fn test_validate_image_upload() {
        assert!(validate_image_upload("photo.jpg", "image/jpeg", 500_000).is_ok());
        assert!(validate_image_upload("photo.jpg", "image/jpeg", 5 * 1024 * 1024).is_ok());

        assert!(validate_image_upload("", "image/jpeg", 100).is_err());
        assert!(validate_image_upload("doc.pdf", "application/pdf", 100).is_err());
        assert!(validate_image_upload("big.png", "image/png", 5 * 1024 * 1024 + 1).is_err());
    }
}
