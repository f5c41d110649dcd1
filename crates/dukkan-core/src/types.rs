//! # Domain Types
//!
//! Entity types mirroring the backend's JSON shapes, shared by every layer.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Order       │   │  StockMovement  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  buyingPrice    │   │  orderNumber    │   │  movementType   │       │
//! │  │  sellingPrice   │   │  items[]        │   │  quantity       │       │
//! │  │  stock          │   │  total / profit │   │  invoiceNumber  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   FilterType    │   │   OrderStatus   │   │  MovementType   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Today = 0      │   │  Pending        │   │  In             │       │
//! │  │  ThisWeek = 1   │   │  Completed      │   │  Out            │       │
//! │  │  ThisMonth = 2  │   │  Cancelled      │   │  Adjustment     │       │
//! │  │  Custom = 3     │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format Rules
//! - Field names serialize in camelCase (the backend's JSON convention)
//! - Timestamps are RFC 3339 strings, date-only fields are `YYYY-MM-DD`
//! - Monetary amounts are plain JSON numbers (IEEE-754 doubles); rounding
//!   happens only at display time in [`crate::format`]

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Filter Type
// =============================================================================

/// Date-range shortcut shared by the date-scoped list screens.
///
/// ## Wire Format
/// The backend expects the integer value, not the name:
/// Today=0, ThisWeek=1, ThisMonth=2, Custom=3.
/// Start/end dates accompany the query only when `Custom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum FilterType {
    Today,
    ThisWeek,
    ThisMonth,
    Custom,
}

impl FilterType {
    /// Returns the backend's integer encoding.
    #[inline]
    pub const fn as_u8(&self) -> u8 {
        match self {
            FilterType::Today => 0,
            FilterType::ThisWeek => 1,
            FilterType::ThisMonth => 2,
            FilterType::Custom => 3,
        }
    }
}

impl Default for FilterType {
    /// The movement ledger opens on the current month.
    fn default() -> Self {
        FilterType::ThisMonth
    }
}

impl From<FilterType> for u8 {
    fn from(f: FilterType) -> u8 {
        f.as_u8()
    }
}

impl TryFrom<u8> for FilterType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(FilterType::Today),
            1 => Ok(FilterType::ThisWeek),
            2 => Ok(FilterType::ThisMonth),
            3 => Ok(FilterType::Custom),
            other => Err(format!("unknown filter type: {other}")),
        }
    }
}

// =============================================================================
// List Query
// =============================================================================

/// Default page number for list queries.
pub const DEFAULT_PAGE_NUM: u32 = 1;

/// Default page size for list queries.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// The full parameter tuple sent to every paginated list endpoint.
///
/// This type doubles as the fetch-memoization key: two queries with equal
/// fields are the same request and must not hit the network twice.
///
/// ## Rules
/// - `page_num` is 1-based
/// - `search_term` is the committed search, never the staged input buffer
/// - `filter_type`/`start_date`/`end_date` apply only to date-scoped lists;
///   dates travel only when the filter is [`FilterType::Custom`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page_num: u32,
    pub page_size: u32,
    pub search_term: Option<String>,
    pub filter_type: Option<FilterType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Default for ListQuery {
    fn default() -> Self {
        ListQuery {
            page_num: DEFAULT_PAGE_NUM,
            page_size: DEFAULT_PAGE_SIZE,
            search_term: None,
            filter_type: None,
            start_date: None,
            end_date: None,
        }
    }
}

impl ListQuery {
    /// Builds a plain page request with no search or filter.
    pub fn page(page_num: u32, page_size: u32) -> Self {
        ListQuery {
            page_num,
            page_size,
            ..ListQuery::default()
        }
    }

    /// Renders the query-string pairs the backend expects.
    ///
    /// Parameter names follow the backend contract exactly: `pagenum`,
    /// `pagesize`, `SearchTerm`, `FilterType`, `StartDate`, `EndDate`.
    /// Empty search terms and absent filters are omitted.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("pagenum", self.page_num.to_string()),
            ("pagesize", self.page_size.to_string()),
        ];

        if let Some(term) = &self.search_term {
            if !term.is_empty() {
                pairs.push(("SearchTerm", term.clone()));
            }
        }
        if let Some(filter) = self.filter_type {
            pairs.push(("FilterType", filter.as_u8().to_string()));
            if filter == FilterType::Custom {
                if let Some(start) = self.start_date {
                    pairs.push(("StartDate", start.format("%Y-%m-%d").to_string()));
                }
                if let Some(end) = self.end_date {
                    pairs.push(("EndDate", end.format("%Y-%m-%d").to_string()));
                }
            }
        }

        pairs
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the store's catalog.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier assigned by the backend.
    pub id: String,

    /// Display name shown in lists and on invoices.
    pub name: String,

    /// Acquisition cost per unit. Used for profit previews.
    pub buying_price: f64,

    /// Sale price per unit. Order lines may override it per line.
    pub selling_price: f64,

    /// Current stock level (non-negative; the server owns the ledger).
    pub stock: i64,

    /// Optional product photo served by the backend.
    pub image_url: Option<String>,

    /// Optional free-text description.
    pub description: Option<String>,

    /// Supplier this product is purchased from, if recorded.
    pub supplier_id: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Checks whether `quantity` units can be drafted against current stock.
    #[inline]
    pub fn has_stock(&self, quantity: i64) -> bool {
        quantity <= self.stock
    }

    /// Profit earned per unit at the catalog selling price.
    #[inline]
    pub fn unit_profit(&self) -> f64 {
        self.selling_price - self.buying_price
    }
}

// =============================================================================
// Customer & Supplier
// =============================================================================

/// A customer record. Orders may also be walk-in (no customer attached).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    /// Lifetime spend, aggregated server-side.
    pub total_spent: f64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// A supplier the store purchases from.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Order
// =============================================================================

/// The lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

/// A line item inside a persisted order.
/// Prices are snapshots taken by the server at commit time.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub buying_price: f64,
    pub selling_price: f64,
    pub total: f64,
    pub profit: f64,
}

/// A persisted order as returned by the backend.
///
/// All totals here are authoritative; the client's draft arithmetic in
/// [`crate::order`] only previews them before submission.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub order_number: String,
    /// Absent for walk-in sales.
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub items: Vec<OrderItem>,
    pub subtotal: f64,
    pub tax: f64,
    /// Discount percentage applied at creation.
    pub discount: f64,
    pub total: f64,
    pub profit: f64,
    pub status: OrderStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Expense
// =============================================================================

/// A recorded business expense.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub title: String,
    pub category: Option<String>,
    pub amount: f64,
    pub description: Option<String>,
    /// The day the expense applies to (not the creation instant).
    #[ts(as = "String")]
    pub date: NaiveDate,
    /// Set when the expense restocks a specific product.
    pub linked_product_id: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Note
// =============================================================================

/// A free-form note, optionally pinned to a customer, with a done flag.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    /// Body text, at most [`crate::MAX_NOTE_LENGTH`] characters.
    pub content: String,
    pub customer_id: Option<String>,
    pub is_completed: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Fixed Asset
// =============================================================================

/// A fixed asset with a straight-line depreciation schedule.
///
/// `monthly_depreciation` and `accumulated_depreciation` are computed and
/// posted server-side; the client only previews the monthly figure at entry
/// time (see [`crate::depreciation`]).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FixedAsset {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub purchase_cost: f64,
    #[ts(as = "String")]
    pub purchase_date: NaiveDate,
    pub useful_life_months: u32,
    pub monthly_depreciation: f64,
    /// Total depreciation posted so far. Once positive, cost and life
    /// become immutable and the client disables those inputs.
    pub accumulated_depreciation: f64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl FixedAsset {
    /// True once the server has posted any depreciation.
    #[inline]
    pub fn schedule_locked(&self) -> bool {
        self.accumulated_depreciation > 0.0
    }
}

// =============================================================================
// Stock Movement
// =============================================================================

/// Direction of a stock ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementType {
    /// Stock received (purchase, return).
    In,
    /// Stock sold or consumed.
    Out,
    /// Manual correction.
    Adjustment,
}

/// One entry in the server-maintained stock ledger.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub movement_type: MovementType,
    pub quantity: i64,
    /// The order that caused an OUT movement, when applicable.
    pub related_order_id: Option<String>,
    pub invoice_number: Option<i64>,
    pub note: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Dashboard
// =============================================================================

/// Headline counters shown on the dashboard cards.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_sales: f64,
    pub net_profit: f64,
    pub products_count: i64,
    pub customers_count: i64,
    pub low_stock_products: i64,
}

/// The cash/COGS financial summary block.
/// Every figure is aggregated server-side; the client only displays them.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub initial_cash: f64,
    pub current_cash: f64,
    pub total_expenses: f64,
    pub cost_of_goods_sold: f64,
    pub gross_profit: f64,
    pub net_profit: f64,
}

/// The single payload backing the dashboard screen.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub metrics: DashboardMetrics,
    pub summary: FinancialSummary,
}

// =============================================================================
// Reports
// =============================================================================

/// The profit-and-loss summary backing the reports screen.
/// All five figures arrive aggregated from `/reports/summary`; the margin
/// is server-computed too, not derived from the other four client-side.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub total_revenue: f64,
    pub total_profit: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    /// Net profit over revenue, as a percentage.
    pub profit_margin: f64,
}

// =============================================================================
// User & Store Profile
// =============================================================================

/// The authenticated user as returned by the auth endpoints.
/// The embedded token is what the gateway attaches as a bearer credential.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub token: String,
    pub roles: Vec<String>,
}

/// Store identity shown on invoices and the settings screen.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StoreProfile {
    pub store_name: String,
    pub owner_email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub logo_url: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_type_wire_integers() {
        assert_eq!(FilterType::Today.as_u8(), 0);
        assert_eq!(FilterType::ThisWeek.as_u8(), 1);
        assert_eq!(FilterType::ThisMonth.as_u8(), 2);
        assert_eq!(FilterType::Custom.as_u8(), 3);

        let json = serde_json::to_string(&FilterType::Custom).unwrap();
        assert_eq!(json, "3");
        let parsed: FilterType = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, FilterType::ThisWeek);
        assert!(serde_json::from_str::<FilterType>("9").is_err());
    }

    #[test]
    fn test_list_query_defaults() {
        let q = ListQuery::default();
        assert_eq!(q.page_num, 1);
        assert_eq!(q.page_size, 50);
        assert!(q.search_term.is_none());
    }

    #[test]
    fn test_query_pairs_basic() {
        let q = ListQuery::page(2, 20);
        let pairs = q.to_query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("pagenum", "2".to_string()),
                ("pagesize", "20".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_pairs_skip_empty_search() {
        let mut q = ListQuery::default();
        q.search_term = Some(String::new());
        assert!(!q
            .to_query_pairs()
            .iter()
            .any(|(name, _)| *name == "SearchTerm"));

        q.search_term = Some("sugar".to_string());
        assert!(q
            .to_query_pairs()
            .contains(&("SearchTerm", "sugar".to_string())));
    }

    #[test]
    fn test_query_pairs_dates_only_when_custom() {
        let mut q = ListQuery::default();
        q.filter_type = Some(FilterType::ThisWeek);
        q.start_date = NaiveDate::from_ymd_opt(2024, 1, 1);
        q.end_date = NaiveDate::from_ymd_opt(2024, 1, 31);

        let pairs = q.to_query_pairs();
        assert!(pairs.contains(&("FilterType", "1".to_string())));
        assert!(!pairs.iter().any(|(name, _)| *name == "StartDate"));

        q.filter_type = Some(FilterType::Custom);
        let pairs = q.to_query_pairs();
        assert!(pairs.contains(&("FilterType", "3".to_string())));
        assert!(pairs.contains(&("StartDate", "2024-01-01".to_string())));
        assert!(pairs.contains(&("EndDate", "2024-01-31".to_string())));
    }

    #[test]
    fn test_product_stock_check() {
        let product = sample_product();
        assert!(product.has_stock(3));
        assert!(product.has_stock(5));
        assert!(!product.has_stock(6));
    }

    #[test]
    fn test_camel_case_wire_names() {
        let product = sample_product();
        let json = serde_json::to_value(&product).unwrap();
        assert!(json.get("buyingPrice").is_some());
        assert!(json.get("sellingPrice").is_some());
        assert!(json.get("imageUrl").is_some());
        assert!(json.get("buying_price").is_none());
    }

    #[test]
    fn test_report_data_wire_names() {
        let report: ReportData = serde_json::from_value(serde_json::json!({
            "totalRevenue": 1500.0,
            "totalProfit": 560.0,
            "totalExpenses": 240.0,
            "netProfit": 320.0,
            "profitMargin": 21.33,
        }))
        .unwrap();
        assert!((report.total_revenue - 1500.0).abs() < 1e-9);
        assert!((report.profit_margin - 21.33).abs() < 1e-9);
    }

    #[test]
    fn test_movement_type_wire_names() {
        assert_eq!(serde_json::to_string(&MovementType::In).unwrap(), "\"IN\"");
        assert_eq!(
            serde_json::to_string(&MovementType::Adjustment).unwrap(),
            "\"ADJUSTMENT\""
        );
        let parsed: MovementType = serde_json::from_str("\"OUT\"").unwrap();
        assert_eq!(parsed, MovementType::Out);
    }

    #[test]
    fn test_order_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Completed).unwrap(),
            "\"completed\""
        );
        let parsed: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, OrderStatus::Cancelled);
    }

    fn sample_product() -> Product {
        Product {
            id: "p-1".to_string(),
            name: "Sugar 1kg".to_string(),
            buying_price: 38.0,
            selling_price: 45.0,
            stock: 5,
            image_url: None,
            description: None,
            supplier_id: None,
            created_at: Utc::now(),
        }
    }
}
