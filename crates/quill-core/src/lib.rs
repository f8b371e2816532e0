//! # quill-core: Pure Business Logic for Quill POS
//!
//! This crate is the **heart** of Quill POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Quill POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                    UI / Caller Layer                            │    │
//! │  │    billing screen ──► inventory ──► customers ──► reports       │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │               ★ quill-core (THIS CRATE) ★                       │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐    │    │
//! │  │   │   types   │  │   money   │  │   cart    │  │  billing  │    │    │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  totals   │    │    │
//! │  │   │ Bill, ... │  │ Discount  │  │ CartLine  │  │  split    │    │    │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘    │    │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                   │    │
//! │  │   │  reports  │  │validation │  │  receipt  │                   │    │
//! │  │   └───────────┘  └───────────┘  └───────────┘                   │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO CLOCK • NO NETWORK • PURE FUNCTIONS               │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │                 quill-store (Persistence Layer)                 │    │
//! │  │        JSON collections, repositories, ledger side effects      │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Customer, Bill, Payment, User)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The mutable draft bill
//! - [`billing`] - Totals, payment split, finalize preparation
//! - [`reports`] - Read-side projections (sales, monthly series, aging)
//! - [`receipt`] - Plain-text invoice rendering
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input =
//!    same output. Even "today" is a parameter, never a clock read.
//! 2. **No I/O**: Persistence, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64)
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod cart;
pub mod error;
pub mod money;
pub mod receipt;
pub mod reports;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use quill_core::Money` instead of
// `use quill_core::money::Money`

pub use cart::{Cart, CartLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{DiscountRate, Money};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum unique line items allowed on a single draft bill
///
/// ## Business Reason
/// Prevents runaway drafts and ensures reasonable invoice sizes.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line item
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10)
pub const MAX_ITEM_QUANTITY: i64 = 999;
