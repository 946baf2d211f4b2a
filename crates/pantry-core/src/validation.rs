//! # Validation Module
//!
//! Input validation utilities for Pantry.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI argument parsing (clap)                                  │
//! │  ├── Missing flags, wrong shapes                                       │
//! │  └── Text → Money / Quantity / NaiveDate via the parsers below         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Form rules (THIS MODULE)                                     │
//! │  ├── Required names, non-negative amounts                              │
//! │  └── Outwards cannot exceed what is on hand                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: State transition (state::StoreState::apply)                  │
//! │  ├── Referenced records exist                                          │
//! │  └── Billing and order-status rules                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pantry_core::validation::{parse_date, validate_item_name};
//!
//! validate_item_name("Basmati Rice").unwrap();
//! assert!(parse_date("Expiry Date", "2025-02-30").is_err());
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;
use crate::quantity::Quantity;
use crate::types::{NewItem, NewSupplier};
use crate::{DATE_FORMAT, MAX_NAME_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an inventory item name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    validate_required("name", name)?;

    if name.trim().chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Rejects empty or whitespace-only text.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Email is optional, but when present it must at least look like one.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Ok(());
    }

    if !email.contains('@') {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must contain '@'".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

fn validate_max_quantity(field: &str, quantity: Quantity) -> ValidationResult<()> {
    if quantity > Quantity::MAX {
        return Err(ValidationError::TooLarge {
            field: field.to_string(),
            max: Quantity::MAX.to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_negative(field: &str, quantity: Quantity) -> ValidationResult<()> {
    if quantity.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    validate_max_quantity(field, quantity)
}

pub fn validate_positive(field: &str, quantity: Quantity) -> ValidationResult<()> {
    if !quantity.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    validate_max_quantity(field, quantity)
}

/// Prices may be zero (free samples) but never negative.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "purchase price".to_string(),
        });
    }
    if price > Money::MAX {
        return Err(ValidationError::TooLarge {
            field: "purchase price".to_string(),
            max: Money::MAX.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Form Validators
// =============================================================================

/// Validates the add/edit item form.
pub fn validate_new_item(item: &NewItem) -> ValidationResult<()> {
    validate_item_name(&item.name)?;
    validate_required("category", &item.category)?;
    validate_required("unit", &item.unit)?;
    validate_non_negative("quantity", item.quantity)?;
    validate_non_negative("low stock threshold", item.low_stock_threshold)?;
    validate_price(item.purchase_price)?;
    Ok(())
}

/// Validates the supplier form.
pub fn validate_new_supplier(supplier: &NewSupplier) -> ValidationResult<()> {
    validate_required("supplier name", &supplier.name)?;

    if supplier.name.trim().chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "supplier name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    if let Some(email) = &supplier.email {
        validate_email(email)?;
    }

    Ok(())
}

// =============================================================================
// Text Parsers
// =============================================================================

/// Parses a strict `YYYY-MM-DD` calendar date.
///
/// The shape is checked before the calendar, so `2024-1-5` is rejected even
/// though chrono alone would accept it.
///
/// ## Example
/// ```rust
/// use pantry_core::validation::parse_date;
///
/// assert!(parse_date("expiry", "2025-12-31").is_ok());
/// assert!(parse_date("expiry", "2024-1-5").is_err());
/// assert!(parse_date("expiry", "2023-02-29").is_err());
/// ```
pub fn parse_date(field: &str, text: &str) -> ValidationResult<NaiveDate> {
    let text = text.trim();
    let invalid = || ValidationError::InvalidDate {
        field: field.to_string(),
        value: text.to_string(),
    };

    if !has_date_shape(text) {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| invalid())
}

/// `dddd-dd-dd`
fn has_date_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Parses a quantity, reporting failures against `field`.
pub fn parse_quantity(field: &str, text: &str) -> ValidationResult<Quantity> {
    text.parse::<Quantity>().map_err(|_| ValidationError::InvalidNumber {
        field: field.to_string(),
        value: text.trim().to_string(),
    })
}

/// Parses a money amount, reporting failures against `field`.
pub fn parse_money(field: &str, text: &str) -> ValidationResult<Money> {
    text.parse::<Money>().map_err(|_| ValidationError::InvalidNumber {
        field: field.to_string(),
        value: text.trim().to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
