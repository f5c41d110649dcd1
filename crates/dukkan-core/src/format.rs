//! # Display Formatting
//!
//! Localized display strings for amounts and dates.
//!
//! ## Formatting Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Arabic Display Rules                               │
//! │                                                                         │
//! │  Currency   45.0        →  "45.00 ج.م"     (ASCII digits, 2 decimals)  │
//! │  Date       2024-01-15  →  "١٥ يناير ٢٠٢٤"  (Arabic-Indic digits,      │
//! │                                              Egyptian month names)     │
//! │  Date+time  14:30       →  "١٥ يناير ٢٠٢٤، ٠٢:٣٠ م"  (12-hour ص/م)      │
//! │                                                                         │
//! │  Amounts keep ASCII digits so they line up in tables; dates follow      │
//! │  the ar-EG convention end to end.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rounding to two decimals happens HERE and only here. All arithmetic
//! upstream stays in full double precision.
//!
//! ## Example
//! ```rust
//! use dukkan_core::format::format_currency;
//!
//! assert_eq!(format_currency(40.5), "40.50 ج.م");
//! ```

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike};

/// Currency symbol used across the dashboard (Egyptian pound).
pub const DEFAULT_CURRENCY: &str = "ج.م";

/// Egyptian Arabic month names, January first.
const ARABIC_MONTHS: [&str; 12] = [
    "يناير",
    "فبراير",
    "مارس",
    "أبريل",
    "مايو",
    "يونيو",
    "يوليو",
    "أغسطس",
    "سبتمبر",
    "أكتوبر",
    "نوفمبر",
    "ديسمبر",
];

// =============================================================================
// Currency
// =============================================================================

/// Formats an amount with two decimals and the default currency symbol.
#[inline]
pub fn format_currency(amount: f64) -> String {
    format_currency_with(amount, DEFAULT_CURRENCY)
}

/// Formats an amount with two decimals and an explicit currency symbol.
///
/// ## Example
/// ```rust
/// use dukkan_core::format::format_currency_with;
///
/// assert_eq!(format_currency_with(1234.5, "ج.م"), "1234.50 ج.م");
/// assert_eq!(format_currency_with(0.0, "ر.س"), "0.00 ر.س");
/// ```
pub fn format_currency_with(amount: f64, symbol: &str) -> String {
    format!("{amount:.2} {symbol}")
}

// =============================================================================
// Digits
// =============================================================================

/// Replaces ASCII digits with Arabic-Indic digits (٠١٢٣٤٥٦٧٨٩).
///
/// Non-digit characters pass through untouched.
pub fn to_arabic_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '0'..='9' => {
                let offset = c as u32 - '0' as u32;
                // ٠ is U+0660; the ten digits are contiguous.
                char::from_u32(0x0660 + offset).unwrap_or(c)
            }
            _ => c,
        })
        .collect()
}

// =============================================================================
// Dates
// =============================================================================

/// Formats a date as `day month-name year` in Arabic.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use dukkan_core::format::format_date;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// assert_eq!(format_date(date), "١٥ يناير ٢٠٢٤");
/// ```
pub fn format_date(date: NaiveDate) -> String {
    let month = ARABIC_MONTHS[date.month0() as usize];
    to_arabic_digits(&format!("{} {} {}", date.day(), month, date.year()))
}

/// Formats a timestamp as date plus 12-hour time with ص/م period marks.
///
/// The timestamp is rendered in its own zone; callers convert to the
/// store's timezone before formatting (this crate performs no I/O and
/// carries no timezone database).
pub fn format_date_time<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    let date_part = format_date(dt.date_naive());

    let hour24 = dt.hour();
    let (hour12, period) = if hour24 < 12 {
        (if hour24 == 0 { 12 } else { hour24 }, "ص")
    } else {
        (if hour24 == 12 { 12 } else { hour24 - 12 }, "م")
    };
    let time_part = to_arabic_digits(&format!("{:02}:{:02}", hour12, dt.minute()));

    format!("{date_part}، {time_part} {period}")
}

// =============================================================================
// Profit Helpers
// =============================================================================

/// Profit for a quantity at the given prices: `(selling − buying) × qty`.
#[inline]
pub fn profit(selling_price: f64, buying_price: f64, quantity: i64) -> f64 {
    (selling_price - buying_price) * quantity as f64
}

/// Profit margin as a percentage of the buying price.
///
/// Returns 0 when the buying price is 0 (margin is undefined for free
/// acquisitions, and the dashboard shows 0% rather than an error).
pub fn profit_margin(selling_price: f64, buying_price: f64) -> f64 {
    if buying_price == 0.0 {
        return 0.0;
    }
    ((selling_price - buying_price) / buying_price) * 100.0
}

// =============================================================================
// Unit Tests
// =============================================================================
