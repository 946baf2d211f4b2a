//! # pantry-core: Pure Business Logic for Pantry
//!
//! This crate is the **heart** of Pantry, an inventory and billing tool for a
//! small food-service kitchen. It contains all business logic as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Pantry Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/cli (`pantry` binary)                      │   │
//! │  │   dashboard ── list ── billing ── history ── orders ── forecast │   │
//! │  └──────────────┬──────────────────────────────────┬───────────────┘   │
//! │                 │ Command                          │ prompt            │
//! │  ┌──────────────▼──────────────────────┐  ┌────────▼───────────────┐   │
//! │  │   ★ pantry-core (THIS CRATE) ★      │  │    pantry-forecast     │   │
//! │  │                                     │  │  Forecaster (reqwest)  │   │
//! │  │  types   money   quantity   stock   │  └────────────────────────┘   │
//! │  │  filter  billing import  purchase_  │                               │
//! │  │  state   ids     report  order      │                               │
//! │  │  catalog validation                 │                               │
//! │  │                                     │                               │
//! │  │ NO I/O • NO GLOBALS • PURE FUNCTIONS│                               │
//! │  └─────────────────────────────────────┘                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (InventoryItem, Transaction, Supplier, PurchaseOrder)
//! - [`money`] / [`quantity`] - Fixed-point value types (no floating point)
//! - [`stock`] - Inwards/outwards/billing arithmetic
//! - [`filter`] / [`billing`] - Inventory and history queries, FIFO billing order
//! - [`import`] - Bulk import with column mapping and per-row errors
//! - [`purchase_order`] - Order creation and the status state machine
//! - [`state`] - `StoreState` and the pure `apply` transition
//! - [`ids`] - Injectable id generators and clocks
//! - [`report`] - Dashboard, category distribution, forecast prompt
//! - [`catalog`] - Categories, units and the demo pantry
//! - [`validation`] - Business rule validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use pantry_core::ids::{Clock, Context, FixedClock, SequentialIds};
//! use pantry_core::state::{Command, StoreState};
//! use pantry_core::{Money, NewItem, Quantity};
//!
//! let clock = FixedClock::on(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
//! let mut ids = SequentialIds::new();
//! let mut ctx = Context::new(&mut ids, &clock);
//!
//! let item = NewItem {
//!     name: "Basmati Rice".to_string(),
//!     category: "Grains & Flours".to_string(),
//!     quantity: Quantity::from_units(10),
//!     unit: "kg".to_string(),
//!     purchase_price: Money::from_major(100),
//!     purchase_date: clock.today(),
//!     expiry_date: None,
//!     low_stock_threshold: Quantity::from_units(2),
//! };
//!
//! let state = StoreState::default();
//! let added = state.apply(Command::AddItem(item), &mut ctx).unwrap();
//! let id = added.created_id.unwrap();
//!
//! let received = added
//!     .state
//!     .apply(
//!         Command::ReceiveStock {
//!             id,
//!             quantity: Quantity::from_units(10),
//!             price: Money::from_major(200),
//!             expiry_date: None,
//!         },
//!         &mut ctx,
//!     )
//!     .unwrap();
//!
//! let rice = received.state.item(id).unwrap();
//! assert_eq!(rice.quantity, Quantity::from_units(20));
//! assert_eq!(rice.purchase_price, Money::from_major(150));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod catalog;
pub mod error;
pub mod filter;
pub mod ids;
pub mod import;
pub mod money;
pub mod purchase_order;
pub mod quantity;
pub mod report;
pub mod state;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use pantry_core::Money` instead of
// `use pantry_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use quantity::Quantity;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Days ahead of today that count as "expiring soon" (inclusive).
pub const EXPIRING_SOON_DAYS: i64 = 7;

/// Number of items plotted on the dashboard stock chart.
pub const DASHBOARD_CHART_ITEMS: usize = 10;

/// Maximum length of an item or supplier name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Note attached to edit transactions when none is given.
pub const MANUAL_EDIT_NOTE: &str = "Manual edit from form";

/// Date format used everywhere dates are typed in or printed.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
