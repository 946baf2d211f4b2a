//! # Error Types
//!
//! Domain-specific error types for pantry-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pantry-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  pantry-forecast errors (separate crate)                               │
//! │  └── ForecastError    - HTTP / decode failures (never shown raw)       │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the session prints inline                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → inline message         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every `CoreError` returned from a state transition means "nothing
//! happened": the caller keeps the previous state.

use thiserror::Error;

use crate::types::OrderStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Inventory item cannot be found.
    #[error("Item not found: {0}")]
    ItemNotFound(u64),

    /// Supplier cannot be found.
    #[error("Supplier not found: {0}")]
    SupplierNotFound(u64),

    /// Purchase order cannot be found.
    #[error("Purchase order not found: {0}")]
    OrderNotFound(u64),

    /// Expired stock cannot be billed.
    ///
    /// ## User Workflow
    /// ```text
    /// Billing list (FIFO order)
    ///      │
    ///      ▼
    /// Click "Paneer" (expired 2024-03-01)
    ///      │
    ///      ▼
    /// ItemExpired { name: "Paneer", expiry: "2024-03-01" }
    ///      │
    ///      ▼
    /// Quantity untouched, no transaction logged
    /// ```
    #[error("{name} expired on {expiry} and cannot be used")]
    ItemExpired { name: String, expiry: String },

    /// Billing an item that has nothing left.
    #[error("{name} is out of stock")]
    OutOfStock { name: String },

    /// Order already reached Delivered or Cancelled.
    #[error("Purchase order {id} is {status} and can no longer change")]
    OrderFinalized { id: u64, status: OrderStatus },

    /// Status change that would move an order backwards.
    #[error("Purchase order cannot move from {from} to {to}")]
    InvalidStatusTransition { from: OrderStatus, to: OrderStatus },

    /// Supplier still referenced by open orders.
    #[error("Supplier {id} has {open_orders} open purchase order(s)")]
    SupplierHasOpenOrders { id: u64, open_orders: usize },

    /// Purchase order without any usable line.
    #[error("Purchase order needs at least one item with a positive quantity")]
    EmptyOrder,

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
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Text that does not parse as a number.
    #[error("invalid number for {field}: \"{value}\"")]
    InvalidNumber { field: String, value: String },

    /// Text that is not a `YYYY-MM-DD` calendar date.
    #[error("invalid date for {field}: \"{value}\" (use YYYY-MM-DD)")]
    InvalidDate { field: String, value: String },

    /// Invalid format (e.g. an email without `@`).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Above the largest amount the store tracks.
    #[error("{field} cannot exceed {max}")]
    TooLarge { field: String, max: String },

    /// Removing more than is on hand.
    #[error("cannot remove more than available: {available} {unit}")]
    ExceedsAvailable { available: String, unit: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
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
        let err = CoreError::ItemExpired {
            name: "Paneer".to_string(),
            expiry: "2024-03-01".to_string(),
        };
        assert_eq!(err.to_string(), "Paneer expired on 2024-03-01 and cannot be used");

        let err = CoreError::OrderFinalized {
            id: 7,
            status: OrderStatus::Delivered,
        };
        assert_eq!(
            err.to_string(),
            "Purchase order 7 is Delivered and can no longer change"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::InvalidNumber {
            field: "Quantity".to_string(),
            value: "ten".to_string(),
        };
        assert_eq!(err.to_string(), "invalid number for Quantity: \"ten\"");

        let err = ValidationError::TooLarge {
            field: "quantity".to_string(),
            max: "1000000000".to_string(),
        };
        assert_eq!(err.to_string(), "quantity cannot exceed 1000000000");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
