//! # Error Types
//!
//! Domain-specific error types for quill-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  quill-core errors (this file)                                          │
//! │  ├── CoreError        - Billing-domain rule violations                  │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  quill-store errors (separate crate)                                    │
//! │  └── StoreError       - Persistence failures (wraps CoreError)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → caller                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item code, amounts, etc.)
//! 3. Errors are enum variants, never String
//! 4. Every billing-domain error is recoverable: the attempted mutation is
//!    rejected whole, state stays untouched, the user corrects and retries

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-facing messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Customer cannot be found.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Requested line quantity exceeds available stock.
    ///
    /// ## When This Occurs
    /// - Adding a product to the draft bill beyond what is on hand
    /// - Raising a line's quantity past current stock
    ///
    /// ## User Workflow
    /// ```text
    /// Add to bill (qty: 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { item_code: "KB001", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// UI shows: "Only 3 KB001 in stock" and the line is left unchanged
    /// ```
    #[error("Insufficient stock for {item_code}: available {available}, requested {requested}")]
    InsufficientStock {
        item_code: String,
        available: i64,
        requested: i64,
    },

    /// Finalize called without the preconditions a bill needs.
    ///
    /// ## When This Occurs
    /// - No customer selected for the draft
    /// - Draft has no line items
    /// - Cart was opened for a different customer than the one submitted
    #[error("Invalid bill request: {reason}")]
    InvalidBillRequest { reason: String },

    /// Finalizing this bill would push the customer past their credit limit.
    ///
    /// Soft condition: the caller may proceed by passing an explicit
    /// override confirmation. Absent the override, the bill is not created.
    #[error(
        "Credit limit exceeded: outstanding {outstanding_cents} + due {due_cents} \
         exceeds limit {limit_cents}"
    )]
    CreditLimitExceeded {
        outstanding_cents: i64,
        due_cents: i64,
        limit_cents: i64,
    },

    /// Payment amount is invalid (negative, or overpaying a credit bill).
    #[error("Invalid payment amount: {reason}")]
    InvalidPaymentAmount { reason: String },

    /// Draft bill has exceeded maximum allowed line items.
    #[error("Bill cannot have more than {max} line items")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

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
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., bad characters in an item code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate item code).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
