//! # Depreciation Preview
//!
//! Straight-line depreciation figures for the fixed-asset entry form.
//!
//! ## Division of Responsibility
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Depreciation: Client vs Server                        │
//! │                                                                         │
//! │  CLIENT (this module)               SERVER (authoritative)             │
//! │  ─────────────────────              ───────────────────────            │
//! │  • monthly preview at entry time    • posts AssetDepreciation records  │
//! │  • years hint (months ÷ 12)         • accumulates depreciation         │
//! │  • refuses cost/life edits once     • enforces immutability once       │
//! │    any depreciation was posted        posting has begun                │
//! │                                                                         │
//! │  The client never computes or mutates accumulated depreciation.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use dukkan_core::depreciation::preview_monthly;
//!
//! // 12,000 over 24 months → 500 per month
//! let monthly = preview_monthly(12_000.0, 24).unwrap();
//! assert!((monthly - 500.0).abs() < 1e-9);
//! ```

use crate::error::CoreResult;
use crate::validation::{validate_positive_amount, validate_useful_life_months};

/// Computes the straight-line monthly depreciation preview.
///
/// ## Rules
/// - `purchase_cost` must be > 0
/// - `useful_life_months` must be > 0
/// - Formula: `purchase_cost / useful_life_months`, no rounding applied;
///   two-decimal truncation happens at render time only
pub fn preview_monthly(purchase_cost: f64, useful_life_months: u32) -> CoreResult<f64> {
    validate_positive_amount(purchase_cost, "purchaseCost")?;
    validate_useful_life_months(useful_life_months)?;

    Ok(purchase_cost / useful_life_months as f64)
}

/// Expresses a useful life in years for the "= X.X سنة" hint next to the
/// months input. Display-only.
#[inline]
pub fn useful_life_years(useful_life_months: u32) -> f64 {
    useful_life_months as f64 / 12.0
}

/// Whether the asset's cost/life inputs must be locked client-side.
///
/// True once the server reports any accumulated depreciation. This is a
/// UI guard; the server independently rejects such edits.
#[inline]
pub fn is_locked(accumulated_depreciation: f64) -> bool {
    accumulated_depreciation > 0.0
}

// =============================================================================
// Unit Tests
// =============================================================================
