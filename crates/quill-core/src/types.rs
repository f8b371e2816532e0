//! # Domain Types
//!
//! Core domain types used throughout Quill POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │    Product      │   │    Customer     │   │      Bill       │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │        │
//! │  │  item_code      │   │  customer_type  │   │  bill_number    │        │
//! │  │  stock          │   │  credit_limit   │   │  items[]        │        │
//! │  │  retail/whole-  │   │  outstanding_   │   │  totals + split │        │
//! │  │  sale prices    │   │  balance        │   │  (immutable)    │        │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘        │
//! │                                                                         │
//! │  Product and Customer are mutable master records.                       │
//! │  Bill and Payment are append-only facts of record: once written they    │
//! │  are never edited, and they carry snapshots (name, rate, customer       │
//! │  type) so later master-record edits cannot rewrite history.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Entities have:
//! - `id`: UUID v4 - immutable, used for cross-collection references
//! - Business ID where one exists: `item_code` on Product, `bill_number` on
//!   Bill - human-readable, shown on documents
//!
//! ## Serialization
//! Every persisted entity renames to `camelCase` so the on-disk collections
//! keep the key-value layout the application has always used.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::{DiscountRate, Money};

// =============================================================================
// Customer Type
// =============================================================================

/// Whether a customer buys at retail or wholesale rates.
///
/// The type picks which of the product's two prices a bill line freezes,
/// and it is snapshotted onto every Bill for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerType {
    Retail,
    Wholesale,
}

impl Default for CustomerType {
    fn default() -> Self {
        CustomerType::Retail
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a bill is settled at finalize time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Full settlement at the counter. Amount paid is forced to the grand
    /// total and nothing goes on the customer's account.
    Cash,
    /// Partial (possibly zero) settlement; the remainder becomes amount due
    /// and is added to the customer's outstanding balance.
    Credit,
}

// =============================================================================
// User & Roles
// =============================================================================

/// Application role, gating which sections a signed-in user can view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    #[serde(rename = "Billing Staff")]
    Staff,
}

/// Top-level application sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Billing,
    Inventory,
    Customers,
    Reports,
}

impl UserRole {
    /// Role-based view gating: Admin sees everything, Billing Staff sees the
    /// billing screen only. This is a data-level rule; enforcement stays a
    /// UI concern (there is no server to enforce it).
    pub fn can_view(&self, section: Section) -> bool {
        match self {
            UserRole::Admin => true,
            UserRole::Staff => section == Section::Billing,
        }
    }
}

/// A signed-in user. Persisted as the single optional `currentUser` record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub role: UserRole,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Business identifier shown on documents and used for lookup.
    pub item_code: String,

    /// Display name shown on the billing screen and on invoices.
    pub name: String,

    /// Units on hand. Never negative after a finalized bill: every line is
    /// stock-checked before the decrement is committed.
    pub stock: i64,

    /// Price in cents charged to retail customers.
    pub retail_price_cents: i64,

    /// Price in cents charged to wholesale customers.
    pub wholesale_price_cents: i64,

    /// Optional marketing description (may be AI-generated).
    pub description: Option<String>,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the retail price as a Money type.
    #[inline]
    pub fn retail_price(&self) -> Money {
        Money::from_cents(self.retail_price_cents)
    }

    /// Returns the wholesale price as a Money type.
    #[inline]
    pub fn wholesale_price(&self) -> Money {
        Money::from_cents(self.wholesale_price_cents)
    }

    /// Returns the price a given customer type pays.
    ///
    /// This is the rate a bill line freezes at add time; later price edits
    /// never reach an open draft or a finalized bill.
    pub fn price_for(&self, customer_type: CustomerType) -> Money {
        match customer_type {
            CustomerType::Retail => self.retail_price(),
            CustomerType::Wholesale => self.wholesale_price(),
        }
    }

    /// Checks whether `quantity` units can be sold from current stock.
    pub fn can_sell(&self, quantity: i64) -> bool {
        quantity <= self.stock
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer master record with its running credit position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Retail or wholesale; picks the rate side of every bill line.
    #[serde(rename = "type")]
    pub customer_type: CustomerType,

    /// Contact phone number.
    pub phone: String,

    /// Soft ceiling on the outstanding balance, in cents. Exceeding it
    /// requires an explicit override at finalize time.
    pub credit_limit_cents: i64,

    /// Cumulative unpaid amount across all bills, in cents. Raised by bill
    /// finalization (amount due), lowered by payment recording.
    pub outstanding_balance_cents: i64,

    /// When the customer was created.
    pub created_at: DateTime<Utc>,

    /// When the customer was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Returns the credit limit as Money.
    #[inline]
    pub fn credit_limit(&self) -> Money {
        Money::from_cents(self.credit_limit_cents)
    }

    /// Returns the outstanding balance as Money.
    #[inline]
    pub fn outstanding_balance(&self) -> Money {
        Money::from_cents(self.outstanding_balance_cents)
    }

    /// Checks whether taking on `due` more debt stays within the credit
    /// limit. The limit is soft: a failing check can still be overridden
    /// with explicit confirmation.
    pub fn within_credit_limit(&self, due: Money) -> bool {
        self.outstanding_balance_cents + due.cents() <= self.credit_limit_cents
    }
}

// =============================================================================
// Bill Item
// =============================================================================

/// A line item on a bill.
/// Uses the snapshot pattern to freeze product data at bill time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillItem {
    /// Reference to the product (weak: the product may be edited or deleted
    /// later; this line is unaffected).
    pub product_id: String,

    /// Product name at bill time (frozen).
    pub name: String,

    /// Quantity billed. Always ≥ 1.
    pub quantity: i64,

    /// Unit rate in cents at bill time (frozen). Retail or wholesale price
    /// depending on the customer the bill was drafted for.
    pub rate_cents: i64,

    /// Line total in cents. Always rate × quantity, recomputed, never set
    /// independently.
    pub total_cents: i64,
}

impl BillItem {
    /// Returns the unit rate as Money.
    #[inline]
    pub fn rate(&self) -> Money {
        Money::from_cents(self.rate_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Bill
// =============================================================================

/// A finalized, immutable invoice record.
///
/// Created atomically by the billing service; appended to the bill history
/// and never mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Human-facing invoice number, unique across the history.
    pub bill_number: String,

    /// When the bill was finalized.
    pub date: DateTime<Utc>,

    /// The customer billed (weak reference).
    pub customer_id: String,

    /// Customer name at bill time (frozen).
    pub customer_name: String,

    /// Customer type at bill time (frozen). Reporting groups by this
    /// snapshot, not by the customer's current type.
    pub customer_type: CustomerType,

    /// Ordered line items.
    pub items: Vec<BillItem>,

    /// Σ item.total, in cents.
    pub sub_total_cents: i64,

    /// Discount applied to the subtotal, in basis points.
    pub discount_bps: u32,

    /// sub_total × discount, in cents.
    pub discount_amount_cents: i64,

    /// sub_total − discount_amount, in cents.
    pub grand_total_cents: i64,

    /// How the bill was settled.
    pub payment_method: PaymentMethod,

    /// Amount settled at finalize time, in cents.
    pub amount_paid_cents: i64,

    /// grand_total − amount_paid, in cents. Zero for cash bills; never
    /// negative (overpayment is rejected before a bill is built).
    pub amount_due_cents: i64,
}

impl Bill {
    /// Returns the subtotal as Money.
    #[inline]
    pub fn sub_total(&self) -> Money {
        Money::from_cents(self.sub_total_cents)
    }

    /// Returns the discount rate.
    #[inline]
    pub fn discount(&self) -> DiscountRate {
        // Stored bps always came from a validated DiscountRate.
        DiscountRate::from_bps(self.discount_bps).unwrap_or_else(|_| DiscountRate::zero())
    }

    /// Returns the discount amount as Money.
    #[inline]
    pub fn discount_amount(&self) -> Money {
        Money::from_cents(self.discount_amount_cents)
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn grand_total(&self) -> Money {
        Money::from_cents(self.grand_total_cents)
    }

    /// Returns the amount paid as Money.
    #[inline]
    pub fn amount_paid(&self) -> Money {
        Money::from_cents(self.amount_paid_cents)
    }

    /// Returns the amount due as Money.
    #[inline]
    pub fn amount_due(&self) -> Money {
        Money::from_cents(self.amount_due_cents)
    }

    /// Whether any part of this bill went on the customer's account.
    #[inline]
    pub fn has_amount_due(&self) -> bool {
        self.amount_due_cents > 0
    }
}

// =============================================================================
// Payment
// =============================================================================

/// A payment against a customer's outstanding balance.
/// Append-only fact of record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The paying customer (weak reference).
    pub customer_id: String,

    /// When the payment was recorded.
    pub date: DateTime<Utc>,

    /// Amount paid, in cents. Always > 0.
    pub amount_cents: i64,

    /// Optional link to a specific bill.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_id: Option<String>,
}

impl Payment {
    /// Returns the payment amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
