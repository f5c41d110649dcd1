//! # dukkan-core: Pure Business Logic for the Dukkan Dashboard
//!
//! This crate is the **heart** of the Dukkan client. It contains every
//! calculation the dashboard previews, as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Dukkan Client Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Rendering Shell (external)                     │   │
//! │  │    Lists ──► Dialogs ──► Dashboard ──► Login                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ subscribe / dispatch                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  dukkan-views (view-models)                     │   │
//! │  │    list state, query cache, invalidation, notifications        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  dukkan-api (REST gateway)                      │   │
//! │  │    bearer middleware, envelopes, credentials, session events   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ dukkan-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌──────────────┐  ┌─────────┐ │   │
//! │  │   │   types   │  │   order   │  │ depreciation │  │ format  │ │   │
//! │  │   │  Product  │  │OrderDraft │  │   preview    │  │ currency│ │   │
//! │  │   │   Order   │  │  totals   │  │  lock guard  │  │  dates  │ │   │
//! │  │   └───────────┘  └───────────┘  └──────────────┘  └─────────┘ │   │
//! │  │   ┌───────────┐  ┌───────────┐                                 │   │
//! │  │   │validation │  │   i18n    │                                 │   │
//! │  │   │   rules   │  │ ar table  │                                 │   │
//! │  │   └───────────┘  └───────────┘                                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO CLOCK LOOKUPS • PURE FUNCTIONS      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entity types mirroring the backend JSON (Product, Order, ...)
//! - [`order`] - Order draft engine (line totals, discount, profit preview)
//! - [`depreciation`] - Straight-line depreciation preview
//! - [`format`] - Arabic display formatting (currency, dates, digits)
//! - [`validation`] - Input validation rules
//! - [`i18n`] - English→Arabic backend-message table
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network, file system and clock access are FORBIDDEN here
//! 3. **Preview, Not Authority**: the server recomputes and persists every
//!    figure; this crate only makes the preview instant and consistent
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use dukkan_core::order::final_total;
//! use dukkan_core::format::format_currency;
//!
//! // A 45.00 subtotal with a 10% discount
//! let total = final_total(45.0, 10.0).unwrap();
//!
//! assert_eq!(format_currency(total), "40.50 ج.م");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod depreciation;
pub mod error;
pub mod format;
pub mod i18n;
pub mod order;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use dukkan_core::OrderDraft` instead of
// `use dukkan_core::order::OrderDraft`

pub use error::{CoreError, CoreResult, ValidationError};
pub use order::{OrderDraft, OrderLineDraft};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single order draft.
///
/// ## Business Reason
/// Prevents runaway drafts and keeps invoices printable on one page.
pub const MAX_ORDER_LINES: usize = 100;

/// Maximum quantity of a single line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Maximum note body length in characters.
pub const MAX_NOTE_LENGTH: usize = 2000;

/// Maximum upload size for product images and store logos (5 MB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
