//! # dukkan-views: Observable View-Models for the Dukkan Dashboard
//!
//! Rendering-independent screen state. A shell (web, desktop, TUI) renders
//! whatever these view-models hold and calls their actions; it never talks
//! to the network or recomputes a total itself.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Rendering Shell                              │
//! │          subscribe ▲ │ actions (search, page, add, submit)          │
//! ├────────────────────┼─▼─────────────────────────────────────────────┤
//! │              ★ dukkan-views (THIS CRATE) ★                          │
//! │                                                                     │
//! │   ┌─────────┐ ┌───────────┐ ┌────────────┐ ┌──────────────────┐   │
//! │   │  Store  │ │ ListState │ │ QueryCache │ │ InvalidationBus  │   │
//! │   │ observe │ │   pure    │ │ memoize +  │ │ + Notifier       │   │
//! │   │         │ │ reducers  │ │ keep stale │ │   broadcast      │   │
//! │   └────┬────┘ └─────┬─────┘ └─────┬──────┘ └────────┬─────────┘   │
//! │        └────────────┴──────┬──────┴──────────────────┘             │
//! │                     ┌──────▼──────┐                                 │
//! │                     │ ListScreen  │  products, customers, orders,  │
//! │                     │ + forms     │  suppliers, expenses, notes,   │
//! │                     │ + dashboard │  assets, stock, reports,       │
//! │                     │ + session   │  profile, forms, session       │
//! │                     └──────┬──────┘                                 │
//! ├────────────────────────────┼────────────────────────────────────────┤
//! │                       dukkan-api ──► backend                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! ### Plumbing
//! - [`store`] - `get_state` / `subscribe` / `update` state container
//! - [`list_state`] - pure pagination, search and filter machine
//! - [`cache`] - tuple-keyed fetch memoization with stale-while-revalidate
//! - [`invalidation`] - cross-screen staleness broadcast
//! - [`notify`] - toast notices, localized before they are sent
//!
//! ### Screens
//! - [`list_screen`] - generic paginated table driving every list below
//! - [`products`], [`customers`], [`suppliers`], [`expenses`], [`notes`],
//!   [`orders`], [`assets`], [`stock`] - one module per table screen
//! - [`order_form`], [`asset_form`] - dialog drafts with instant previews
//! - [`dashboard`] - metrics and the financial summary
//! - [`reports`] - the profit-and-loss summary
//! - [`profile`] - store identity and logo
//! - [`session_view`] - login, registration, password flows, sign-out
//!
//! ## Design Principles
//!
//! 1. **Server Authority**: every figure a screen shows either came from
//!    the server or is labeled a preview; nothing is reconciled client-side
//! 2. **Explicit Fetches**: invalidation only marks data stale; a fetch
//!    happens when a screen's `refresh` is called, never on its own
//! 3. **Rejected Actions Change Nothing**: bad page numbers, over-long
//!    searches and blocked draft edits leave state untouched and toast
//! 4. **Arabic First**: all user-facing strings leave this crate already
//!    localized through [`dukkan_core::i18n`]
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use dukkan_api::{ApiGateway, ClientConfig, CredentialStore};
//! use dukkan_views::{InvalidationBus, Notifier, ProductsScreen, SessionView};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::load_or_default(None);
//! let gateway = ApiGateway::new(&config, CredentialStore::new())?;
//!
//! let invalidations = InvalidationBus::new();
//! let notifier = Notifier::new();
//! let _toasts = notifier.subscribe();
//!
//! let session = SessionView::new(gateway.clone(), notifier.clone());
//! if !session.restore().await {
//!     session.login("owner@dukkan.app", "secret1").await;
//! }
//!
//! let products = ProductsScreen::new(gateway, invalidations, notifier);
//! let _sub = products.list().subscribe(|state| {
//!     // hand the rows to the renderer
//!     let _ = &state.items;
//! });
//! products.list().refresh().await;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

// Plumbing
pub mod cache;
pub mod invalidation;
pub mod list_state;
pub mod notify;
pub mod store;

// Screens
pub mod asset_form;
pub mod assets;
pub mod customers;
pub mod dashboard;
pub mod expenses;
pub mod list_screen;
pub mod notes;
pub mod order_form;
pub mod orders;
pub mod products;
pub mod profile;
pub mod reports;
pub mod session_view;
pub mod stock;
pub mod suppliers;

// =============================================================================
// Re-exports
// =============================================================================

// Plumbing
pub use cache::QueryCache;
pub use invalidation::{InvalidationBus, Scope};
pub use list_state::ListState;
pub use notify::{Notice, NoticeLevel, Notifier};
pub use store::{Store, Subscription};

// Screens
pub use asset_form::{AssetDraft, AssetFormView};
pub use assets::AssetsScreen;
pub use customers::CustomersScreen;
pub use dashboard::{DashboardScreen, DashboardState};
pub use expenses::ExpensesScreen;
pub use list_screen::{ListScreen, ListScreenState, PageFetcher, PageFuture};
pub use notes::NotesScreen;
pub use order_form::OrderFormView;
pub use orders::OrdersScreen;
pub use products::ProductsScreen;
pub use profile::{ProfileState, ProfileView};
pub use reports::{ReportsScreen, ReportsState};
pub use session_view::{SessionState, SessionView};
pub use stock::StockScreen;
pub use suppliers::SuppliersScreen;
