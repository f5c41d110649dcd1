//! # Order Draft Engine
//!
//! Builds an order locally, line by line, and previews its totals before
//! submission. The same pure functions compute every figure the UI shows,
//! so the preview can never drift from itself across screens.
//!
//! ## Order Building Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Order Draft Operations                              │
//! │                                                                         │
//! │  User Action              Draft Change              Derived Values      │
//! │  ───────────              ────────────              ──────────────      │
//! │                                                                         │
//! │  Pick product ──────────► add_line() ─────────────► subtotal()          │
//! │                           (stock checked,           expected_profit()   │
//! │                            prices snapshotted)                          │
//! │                                                                         │
//! │  Change qty ────────────► set_quantity() ─────────► subtotal()          │
//! │                                                                         │
//! │  Remove row ────────────► remove_line()                                 │
//! │                                                                         │
//! │  Set discount % ────────► set_discount() ─────────► final_total()       │
//! │                                                                         │
//! │  Submit ────────────────► to_request() ───────────► POST /Order/...     │
//! │                                                                         │
//! │  The server recomputes and persists authoritative totals; everything    │
//! │  here is an instant preview of the same arithmetic.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use dukkan_core::order::final_total;
//!
//! // 45.00 with a 10% discount
//! let total = final_total(45.0, 10.0).unwrap();
//! assert!((total - 40.5).abs() < 1e-9);
//!
//! // Discounts outside [0, 100] are rejected
//! assert!(final_total(45.0, 120.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::types::Product;
use crate::validation::{validate_price, validate_quantity};
use crate::{MAX_LINE_QUANTITY, MAX_ORDER_LINES};

// =============================================================================
// Pure Calculation Functions
// =============================================================================
// Free functions first: the draft methods below delegate to these, and any
// other caller (tests, a future server-side check) can use them directly.

/// Computes one line's total: `effective_price × quantity`.
#[inline]
pub fn line_total(effective_price: f64, quantity: i64) -> f64 {
    effective_price * quantity as f64
}

/// Sums the line totals of a draft.
///
/// Plain IEEE-754 double addition; no rounding correction is applied.
/// Rounding to two decimals happens only at display time.
pub fn order_subtotal(lines: &[OrderLineDraft]) -> f64 {
    lines.iter().map(|line| line.line_total()).sum()
}

/// Checks a discount percentage against the allowed [0, 100] range.
pub fn validate_discount(percent: f64) -> CoreResult<()> {
    if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
        return Err(CoreError::InvalidDiscount { value: percent });
    }
    Ok(())
}

/// Applies a percentage discount to a subtotal.
///
/// ## Rules
/// - `discount_percent` must be within [0, 100], else
///   [`CoreError::InvalidDiscount`]
/// - Result is `subtotal × (1 − discount/100)`; never exceeds the subtotal
///
/// ## Example
/// ```rust
/// use dukkan_core::order::final_total;
///
/// let total = final_total(200.0, 25.0).unwrap();
/// assert!((total - 150.0).abs() < 1e-9);
/// ```
pub fn final_total(subtotal: f64, discount_percent: f64) -> CoreResult<f64> {
    validate_discount(discount_percent)?;
    Ok(subtotal * (1.0 - discount_percent / 100.0))
}

/// Sums the expected profit of a draft: `Σ (effective − buying) × qty`.
///
/// This is a preview. The server snapshots buying prices at commit time and
/// its persisted profit wins; the client never reconciles the two.
pub fn expected_profit(lines: &[OrderLineDraft]) -> f64 {
    lines.iter().map(|line| line.line_profit()).sum()
}

// =============================================================================
// Order Line Draft
// =============================================================================

/// One product/quantity/price entry within a draft order.
///
/// ## Price Freezing
/// Catalog prices are captured when the line is added. If the product is
/// edited afterwards the draft keeps displaying consistent figures; the
/// server re-snapshots everything at commit anyway.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineDraft {
    /// Client-generated id used to address the line in the dialog.
    pub line_id: String,

    /// Product this line sells.
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub product_name: String,

    /// Catalog selling price at time of adding (frozen).
    pub selling_price: f64,

    /// Catalog buying price at time of adding (frozen); profit preview input.
    pub buying_price: f64,

    /// Units sold on this line.
    pub quantity: i64,

    /// Per-line override of the selling price, if the user set one.
    pub custom_price: Option<f64>,
}

impl OrderLineDraft {
    /// Creates a line from a product, freezing its prices.
    pub fn from_product(product: &Product, quantity: i64, custom_price: Option<f64>) -> Self {
        OrderLineDraft {
            line_id: Uuid::new_v4().to_string(),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            selling_price: product.selling_price,
            buying_price: product.buying_price,
            quantity,
            custom_price,
        }
    }

    /// The price this line actually charges: the override if set, else the
    /// frozen catalog selling price.
    #[inline]
    pub fn effective_price(&self) -> f64 {
        self.custom_price.unwrap_or(self.selling_price)
    }

    /// This line's total: `effective_price × quantity`.
    #[inline]
    pub fn line_total(&self) -> f64 {
        line_total(self.effective_price(), self.quantity)
    }

    /// This line's expected profit: `(effective − buying) × quantity`.
    #[inline]
    pub fn line_profit(&self) -> f64 {
        (self.effective_price() - self.buying_price) * self.quantity as f64
    }
}

// =============================================================================
// Order Draft
// =============================================================================

/// A draft order under construction in the order dialog.
///
/// ## Invariants
/// - Line order is entry order; it matters for display only
/// - Lines without a custom price are unique by `product_id` (adding the
///   same product again merges quantities); overridden lines stay separate
/// - Quantities are positive and within the product's stock at add time
/// - `discount_percent` is kept within [0, 100] by `set_discount`; it is
///   re-checked at submission
/// - Maximum lines: [`crate::MAX_ORDER_LINES`]
///
/// The draft is transient: it is discarded when the dialog closes and is
/// replaced wholesale by the server's response after a successful submit.
#[derive(Debug, Clone, Serialize, Deserialize, Default, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    /// Customer the order belongs to; `None` means a walk-in sale.
    pub customer_id: Option<String>,

    /// Lines in entry order.
    pub lines: Vec<OrderLineDraft>,

    /// Percentage discount applied to the subtotal.
    pub discount_percent: f64,

    /// Optional free-text note stored with the order.
    pub notes: Option<String>,
}

impl OrderDraft {
    /// Creates a new empty draft (walk-in, no discount).
    pub fn new() -> Self {
        OrderDraft::default()
    }

    /// Adds a product as a new line, or merges into an existing line.
    ///
    /// ## Behavior
    /// - quantity must be positive and within stock, else
    ///   [`CoreError::InsufficientStock`] carrying the available quantity
    /// - same product with no custom price: quantities merge, re-checked
    ///   against stock and [`MAX_LINE_QUANTITY`]
    /// - a custom price always gets its own line
    /// - a draft already at [`crate::MAX_ORDER_LINES`] refuses a new line
    ///   with [`CoreError::OrderTooLarge`]
    /// - on any error the draft is left unchanged (no partial append)
    ///
    /// ## Returns
    /// The affected line (new or merged).
    pub fn add_line(
        &mut self,
        product: &Product,
        quantity: i64,
        custom_price: Option<f64>,
    ) -> CoreResult<&OrderLineDraft> {
        validate_quantity(quantity)?;
        if let Some(price) = custom_price {
            validate_price(price)?;
        }

        // Merge path: same product, both sides at catalog price.
        if custom_price.is_none() {
            if let Some(idx) = self
                .lines
                .iter()
                .position(|l| l.product_id == product.id && l.custom_price.is_none())
            {
                let merged = self.lines[idx].quantity + quantity;
                if merged > MAX_LINE_QUANTITY {
                    return Err(CoreError::QuantityTooLarge {
                        requested: merged,
                        max: MAX_LINE_QUANTITY,
                    });
                }
                if !product.has_stock(merged) {
                    return Err(CoreError::InsufficientStock {
                        name: product.name.clone(),
                        available: product.stock,
                        requested: merged,
                    });
                }
                self.lines[idx].quantity = merged;
                return Ok(&self.lines[idx]);
            }
        }

        if self.lines.len() >= MAX_ORDER_LINES {
            return Err(CoreError::OrderTooLarge {
                max: MAX_ORDER_LINES,
            });
        }
        if !product.has_stock(quantity) {
            return Err(CoreError::InsufficientStock {
                name: product.name.clone(),
                available: product.stock,
                requested: quantity,
            });
        }

        self.lines
            .push(OrderLineDraft::from_product(product, quantity, custom_price));
        Ok(&self.lines[self.lines.len() - 1])
    }

    /// Removes a line by id. No-op when the id is not present.
    pub fn remove_line(&mut self, line_id: &str) {
        self.lines.retain(|l| l.line_id != line_id);
    }

    /// Updates a line's quantity against the currently known stock.
    ///
    /// ## Behavior
    /// - quantity 0 removes the line
    /// - quantity above `available_stock` fails with
    ///   [`CoreError::InsufficientStock`], line unchanged
    /// - an unknown `line_id` is a no-op (the row was already removed)
    pub fn set_quantity(
        &mut self,
        line_id: &str,
        quantity: i64,
        available_stock: i64,
    ) -> CoreResult<()> {
        if quantity == 0 {
            self.remove_line(line_id);
            return Ok(());
        }
        validate_quantity(quantity)?;

        if let Some(line) = self.lines.iter_mut().find(|l| l.line_id == line_id) {
            if quantity > available_stock {
                return Err(CoreError::InsufficientStock {
                    name: line.product_name.clone(),
                    available: available_stock,
                    requested: quantity,
                });
            }
            line.quantity = quantity;
        }
        Ok(())
    }

    /// Sets the discount percentage, rejecting values outside [0, 100].
    pub fn set_discount(&mut self, percent: f64) -> CoreResult<()> {
        validate_discount(percent)?;
        self.discount_percent = percent;
        Ok(())
    }

    /// Attaches or clears the customer. `None` marks a walk-in sale.
    pub fn set_customer(&mut self, customer_id: Option<String>) {
        self.customer_id = customer_id;
    }

    /// Subtotal across all lines.
    pub fn subtotal(&self) -> f64 {
        order_subtotal(&self.lines)
    }

    /// Final payable amount after the discount.
    pub fn final_total(&self) -> CoreResult<f64> {
        final_total(self.subtotal(), self.discount_percent)
    }

    /// Expected profit preview across all lines. Server wins at commit.
    pub fn expected_profit(&self) -> f64 {
        expected_profit(&self.lines)
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Checks if the draft has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Discards all lines and resets discount, customer and notes.
    pub fn clear(&mut self) {
        *self = OrderDraft::default();
    }

    /// Checks the draft is submittable: at least one line, discount in range.
    pub fn validate_for_submit(&self) -> CoreResult<()> {
        if self.is_empty() {
            return Err(CoreError::EmptyOrder);
        }
        validate_discount(self.discount_percent)?;
        Ok(())
    }

    /// Builds the wire payload for `POST /Order/createorder`.
    ///
    /// A zero discount is omitted, matching how the dialog submits.
    pub fn to_request(&self) -> CreateOrderRequest {
        CreateOrderRequest {
            customer_id: self.customer_id.clone(),
            discount: if self.discount_percent > 0.0 {
                Some(self.discount_percent)
            } else {
                None
            },
            notes: self.notes.clone(),
            order_items: self
                .lines
                .iter()
                .map(|line| CreateOrderItem {
                    product_id: line.product_id.clone(),
                    quantity: line.quantity,
                    custom_item_price: line.custom_price,
                })
                .collect(),
        }
    }
}

// =============================================================================
// Wire Payloads
// =============================================================================

/// One item of [`CreateOrderRequest`].
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderItem {
    pub product_id: String,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_item_price: Option<f64>,
}

/// The payload `POST /Order/createorder` expects.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub order_items: Vec<CreateOrderItem>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_product(id: &str, selling: f64, buying: f64, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            buying_price: buying,
            selling_price: selling,
            stock,
            image_url: None,
            description: None,
            supplier_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_line_and_subtotal() {
        let mut draft = OrderDraft::new();
        let product = test_product("a", 10.0, 7.0, 100);

        draft.add_line(&product, 2, None).unwrap();

        assert_eq!(draft.line_count(), 1);
        assert_eq!(draft.total_quantity(), 2);
        assert!((draft.subtotal() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_mixed_price_lines_with_discount() {
        // Lines [(A, qty=2, selling=10), (B, qty=1, custom=25)], discount 10%
        let mut draft = OrderDraft::new();
        let a = test_product("a", 10.0, 6.0, 100);
        let b = test_product("b", 30.0, 20.0, 100);

        draft.add_line(&a, 2, None).unwrap();
        draft.add_line(&b, 1, Some(25.0)).unwrap();
        draft.set_discount(10.0).unwrap();

        assert!((draft.subtotal() - 45.0).abs() < 1e-9);
        assert!((draft.final_total().unwrap() - 40.5).abs() < 1e-9);
    }

    #[test]
    fn test_subtotal_commutative() {
        let a = test_product("a", 10.0, 6.0, 100);
        let b = test_product("b", 25.0, 20.0, 100);
        let c = test_product("c", 12.5, 9.0, 100);

        let mut forward = OrderDraft::new();
        forward.add_line(&a, 2, None).unwrap();
        forward.add_line(&b, 1, None).unwrap();
        forward.add_line(&c, 4, None).unwrap();

        let mut backward = OrderDraft::new();
        backward.add_line(&c, 4, None).unwrap();
        backward.add_line(&b, 1, None).unwrap();
        backward.add_line(&a, 2, None).unwrap();

        assert_eq!(forward.subtotal(), backward.subtotal());
    }

    #[test]
    fn test_insufficient_stock_leaves_draft_unchanged() {
        let mut draft = OrderDraft::new();
        let product = test_product("a", 10.0, 7.0, 3);

        let err = draft.add_line(&product, 5, None).unwrap_err();
        match err {
            CoreError::InsufficientStock {
                available,
                requested,
                ..
            } => {
                assert_eq!(available, 3);
                assert_eq!(requested, 5);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(draft.is_empty());
    }

    #[test]
    fn test_merge_same_product_rechecks_stock() {
        let mut draft = OrderDraft::new();
        let product = test_product("a", 10.0, 7.0, 3);

        draft.add_line(&product, 2, None).unwrap();
        // 2 + 2 = 4 > stock 3
        assert!(draft.add_line(&product, 2, None).is_err());
        assert_eq!(draft.total_quantity(), 2);

        // 2 + 1 = 3 fits exactly
        draft.add_line(&product, 1, None).unwrap();
        assert_eq!(draft.line_count(), 1);
        assert_eq!(draft.total_quantity(), 3);
    }

    #[test]
    fn test_custom_price_keeps_separate_line() {
        let mut draft = OrderDraft::new();
        let product = test_product("a", 10.0, 7.0, 100);

        draft.add_line(&product, 1, None).unwrap();
        draft.add_line(&product, 1, Some(8.0)).unwrap();

        assert_eq!(draft.line_count(), 2);
        assert!((draft.subtotal() - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_full_draft_refuses_another_line() {
        use crate::MAX_ORDER_LINES;

        let mut draft = OrderDraft::new();
        for i in 0..MAX_ORDER_LINES {
            let product = test_product(&format!("p-{i}"), 10.0, 7.0, 100);
            draft.add_line(&product, 1, None).unwrap();
        }
        assert_eq!(draft.line_count(), MAX_ORDER_LINES);

        let extra = test_product("one-too-many", 10.0, 7.0, 100);
        let err = draft.add_line(&extra, 1, None).unwrap_err();
        assert!(matches!(
            err,
            CoreError::OrderTooLarge {
                max: MAX_ORDER_LINES
            }
        ));
        assert_eq!(draft.line_count(), MAX_ORDER_LINES);

        // Merging into an existing line is still allowed at the cap
        let first = test_product("p-0", 10.0, 7.0, 100);
        draft.add_line(&first, 1, None).unwrap();
        assert_eq!(draft.line_count(), MAX_ORDER_LINES);
    }

    #[test]
    fn test_remove_line_noop_when_absent() {
        let mut draft = OrderDraft::new();
        let product = test_product("a", 10.0, 7.0, 100);
        draft.add_line(&product, 1, None).unwrap();

        draft.remove_line("not-a-line");
        assert_eq!(draft.line_count(), 1);

        let id = draft.lines[0].line_id.clone();
        draft.remove_line(&id);
        assert!(draft.is_empty());
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut draft = OrderDraft::new();
        let product = test_product("a", 10.0, 7.0, 100);
        draft.add_line(&product, 2, None).unwrap();
        let id = draft.lines[0].line_id.clone();

        draft.set_quantity(&id, 0, 100).unwrap();
        assert!(draft.is_empty());
    }

    #[test]
    fn test_set_quantity_respects_stock() {
        let mut draft = OrderDraft::new();
        let product = test_product("a", 10.0, 7.0, 5);
        draft.add_line(&product, 2, None).unwrap();
        let id = draft.lines[0].line_id.clone();

        assert!(draft.set_quantity(&id, 6, 5).is_err());
        assert_eq!(draft.lines[0].quantity, 2);

        draft.set_quantity(&id, 5, 5).unwrap();
        assert_eq!(draft.lines[0].quantity, 5);
    }

    #[test]
    fn test_discount_bounds() {
        assert!(validate_discount(0.0).is_ok());
        assert!(validate_discount(100.0).is_ok());
        assert!(validate_discount(-0.5).is_err());
        assert!(validate_discount(100.5).is_err());
        assert!(validate_discount(f64::NAN).is_err());

        let mut draft = OrderDraft::new();
        assert!(draft.set_discount(120.0).is_err());
        assert!((draft.discount_percent - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_final_total_never_exceeds_subtotal() {
        for discount in [0.0, 1.0, 33.3, 50.0, 99.9, 100.0] {
            let total = final_total(45.0, discount).unwrap();
            assert!(total <= 45.0);
            if discount == 0.0 {
                assert_eq!(total, 45.0);
            } else {
                assert!(total < 45.0);
            }
        }
    }

    #[test]
    fn test_expected_profit() {
        let mut draft = OrderDraft::new();
        let a = test_product("a", 10.0, 6.0, 100);
        let b = test_product("b", 30.0, 20.0, 100);

        draft.add_line(&a, 2, None).unwrap();
        draft.add_line(&b, 1, Some(25.0)).unwrap();

        // (10-6)*2 + (25-20)*1 = 13
        assert!((draft.expected_profit() - 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_validate_for_submit() {
        let mut draft = OrderDraft::new();
        assert!(matches!(
            draft.validate_for_submit(),
            Err(CoreError::EmptyOrder)
        ));

        let product = test_product("a", 10.0, 7.0, 100);
        draft.add_line(&product, 1, None).unwrap();
        assert!(draft.validate_for_submit().is_ok());
    }

    #[test]
    fn test_to_request_wire_shape() {
        let mut draft = OrderDraft::new();
        let product = test_product("a", 10.0, 7.0, 100);
        draft.add_line(&product, 2, Some(9.5)).unwrap();
        draft.set_customer(Some("c-1".to_string()));
        draft.set_discount(5.0).unwrap();

        let json = serde_json::to_value(draft.to_request()).unwrap();
        assert_eq!(json["customerId"], "c-1");
        assert_eq!(json["discount"], 5.0);
        assert_eq!(json["orderItems"][0]["productId"], "a");
        assert_eq!(json["orderItems"][0]["quantity"], 2);
        assert_eq!(json["orderItems"][0]["customItemPrice"], 9.5);
    }

    #[test]
    fn test_to_request_omits_zero_discount() {
        let mut draft = OrderDraft::new();
        let product = test_product("a", 10.0, 7.0, 100);
        draft.add_line(&product, 1, None).unwrap();

        let json = serde_json::to_value(draft.to_request()).unwrap();
        assert!(json.get("discount").is_none());
        assert!(json.get("customerId").is_none());
        assert!(json["orderItems"][0].get("customItemPrice").is_none());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut draft = OrderDraft::new();
        let product = test_product("a", 10.0, 7.0, 100);
        draft.add_line(&product, 1, None).unwrap();
        draft.set_discount(10.0).unwrap();
        draft.set_customer(Some("c-1".to_string()));

        draft.clear();
        assert!(draft.is_empty());
        assert_eq!(draft.discount_percent, 0.0);
        assert!(draft.customer_id.is_none());
    }
}
