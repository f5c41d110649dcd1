//! # dukkan-api: REST Client for the Dukkan Dashboard
//!
//! This crate is the only place that talks to the backend. It owns the
//! HTTP stack, the response-envelope decoding, credential persistence,
//! and one typed wrapper per backend controller.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       HTTP Client Architecture                      │
//! │                                                                     │
//! │  view models (dukkan-views)                                         │
//! │        │                                                            │
//! │        ▼                                                            │
//! │  ┌───────────────┐  ┌───────────────┐  ┌────────────────────────┐   │
//! │  │ ProductsApi   │  │ OrdersApi     │  │ AuthApi, NotesApi, ... │   │
//! │  │ CustomersApi  │  │ ExpensesApi   │  │ (one per controller)   │   │
//! │  └───────┬───────┘  └───────┬───────┘  └───────────┬────────────┘   │
//! │          └──────────────────┼──────────────────────┘                │
//! │                             ▼                                       │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                         ApiGateway                            │  │
//! │  │                                                               │  │
//! │  │  with_bearer ─► send ─► guard_session ─► decode ApiEnvelope   │  │
//! │  └──────┬─────────────────────────────────────────────┬──────────┘  │
//! │         ▼                                             ▼             │
//! │  ┌─────────────────┐                        ┌──────────────────┐    │
//! │  │ CredentialStore │                        │   SessionWatch   │    │
//! │  │ (7-day TOML     │                        │ (broadcast of    │    │
//! │  │  session file)  │                        │  session events) │    │
//! │  └─────────────────┘                        └──────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every response rides the backend envelope `{isSuccess, message, data,
//! errors}`; `isSuccess` is authoritative even on HTTP 200. A 401 anywhere
//! wipes the stored credentials and broadcasts [`SessionEvent::Expired`]
//! so the UI can drop to the login screen.
//!
//! ## Module Organization
//!
//! ### Transport
//! - [`client`] - `ApiGateway`, the bearer/401 middleware pair, multipart uploads
//! - [`envelope`] - `ApiEnvelope` / `Page` decoding
//! - [`error`] - `ApiError` and the Arabic user-message mapping
//! - [`config`] - client configuration (TOML file + env overrides)
//! - [`credentials`] - persisted session with 7-day expiry
//! - [`session`] - sign-in/sign-out/expiry event broadcast
//!
//! ### Endpoints (one module per backend controller)
//! - [`auth`] - login, register, password reset, logout
//! - [`products`] - catalog CRUD over multipart
//! - [`customers`], [`suppliers`], [`expenses`], [`notes`], [`assets`] - JSON CRUD
//! - [`orders`] - order list/create/delete (totals are server-owned)
//! - [`stock`] - read-only stock ledger
//! - [`dashboard`] - aggregated metrics fetch
//! - [`reports`] - profit-and-loss summary fetch
//! - [`profile`] - store profile get/update
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dukkan_api::{ApiGateway, ClientConfig, CredentialStore};
//! use dukkan_api::products::ProductsApi;
//! use dukkan_core::types::ListQuery;
//!
//! let config = ClientConfig::load_or_default(None);
//! let credentials = CredentialStore::new();
//! credentials.load().await?;
//!
//! let gateway = ApiGateway::new(&config, credentials)?;
//! let products = ProductsApi::new(gateway.clone());
//! let page = products.list(&ListQuery::page(1, 50)).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

// Transport plumbing
pub mod client;
pub mod config;
pub mod credentials;
pub mod envelope;
pub mod error;
pub mod session;

// Backend controllers
pub mod assets;
pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod expenses;
pub mod notes;
pub mod orders;
pub mod products;
pub mod profile;
pub mod reports;
pub mod stock;
pub mod suppliers;

// =============================================================================
// Re-exports
// =============================================================================

// Transport types
pub use client::{guard_session, with_bearer, ApiGateway, ImageUpload};
pub use config::ClientConfig;
pub use credentials::{CredentialStore, Session, SESSION_TTL_DAYS};
pub use envelope::{ApiEnvelope, Page};
pub use error::{ApiError, ApiResult};
pub use session::{SessionEvent, SessionWatch};

// Endpoint wrappers and their form inputs
pub use assets::{AssetInput, FixedAssetsApi};
pub use auth::{AuthApi, RegisterInput, ResetPasswordInput};
pub use customers::{CustomerInput, CustomersApi};
pub use dashboard::DashboardApi;
pub use expenses::{ExpenseInput, ExpensesApi};
pub use notes::NotesApi;
pub use orders::OrdersApi;
pub use products::{ProductInput, ProductsApi};
pub use profile::{ProfileApi, ProfileInput};
pub use reports::ReportsApi;
pub use stock::StockApi;
pub use suppliers::{SupplierInput, SuppliersApi};
