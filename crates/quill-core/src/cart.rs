//! # Cart Module
//!
//! The mutable draft bill: line items collected for one customer before
//! finalize.
//!
//! ## Price Freezing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Rate Selection & Freezing                            │
//! │                                                                         │
//! │  Select customer (Retail / Wholesale)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  add_line(product) ──► rate = product.price_for(customer_type)          │
//! │       │                        (frozen at this moment)                  │
//! │       ▼                                                                 │
//! │  Catalog price edited later? ──► open carts and finalized bills         │
//! │                                  keep the frozen rate                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by `product_id` (adding the same product again merges
//!   into the existing line by incrementing quantity)
//! - Quantity on every line is ≥ 1 and never exceeds the product's stock at
//!   the time the line was last touched
//! - Maximum unique lines: 100; maximum quantity per line: 999

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::{DiscountRate, Money};
use crate::types::{Customer, CustomerType, Product};
use crate::validation::{validate_cart_size, validate_quantity};

// =============================================================================
// Cart Line
// =============================================================================

/// A draft line item.
///
/// ## Design Notes
/// - `product_id`: reference for stock lookups and merging
/// - `name` / `rate_cents`: frozen copies of product data at add time, so
///   the draft displays consistent figures even if the catalog changes
///   underneath it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product ID (UUID).
    pub product_id: String,

    /// Product name at add time (frozen).
    pub name: String,

    /// Unit rate in cents at add time (frozen). Chosen by the cart's
    /// customer type: wholesale price for wholesale customers, retail
    /// price otherwise.
    pub rate_cents: i64,

    /// Quantity on this line.
    pub quantity: i64,
}

impl CartLine {
    fn from_product(product: &Product, customer_type: CustomerType, quantity: i64) -> Self {
        CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            rate_cents: product.price_for(customer_type).cents(),
            quantity,
        }
    }

    /// Line total: rate × quantity. Always derived, never stored.
    #[inline]
    pub fn total_cents(&self) -> i64 {
        self.rate_cents * self.quantity
    }

    /// Returns the unit rate as Money.
    #[inline]
    pub fn rate(&self) -> Money {
        Money::from_cents(self.rate_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents())
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The draft bill for one customer.
///
/// A cart is opened for a specific customer because the customer's type
/// decides which price a line freezes. Finalizing against a different
/// customer is rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    customer_id: String,
    customer_type: CustomerType,
    lines: Vec<CartLine>,
}

impl Cart {
    /// Opens an empty draft for a customer.
    pub fn for_customer(customer: &Customer) -> Self {
        Cart {
            customer_id: customer.id.clone(),
            customer_type: customer.customer_type,
            lines: Vec::new(),
        }
    }

    /// The customer this draft was opened for.
    #[inline]
    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// The rate side this draft freezes prices on.
    #[inline]
    pub fn customer_type(&self) -> CustomerType {
        self.customer_type
    }

    /// The draft's line items, in the order they were added.
    #[inline]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Adds a product to the draft, or merges into its existing line.
    ///
    /// ## Behavior
    /// - Product already on the bill: increments that line's quantity
    /// - New product: appends a line with the rate frozen now
    /// - The resulting quantity is checked against current stock; on
    ///   `InsufficientStock` nothing is mutated
    pub fn add_line(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            let new_qty = line.quantity + quantity;
            validate_quantity(new_qty).map_err(|_| CoreError::QuantityTooLarge {
                requested: new_qty,
                max: crate::MAX_ITEM_QUANTITY,
            })?;
            if !product.can_sell(new_qty) {
                return Err(CoreError::InsufficientStock {
                    item_code: product.item_code.clone(),
                    available: product.stock,
                    requested: new_qty,
                });
            }
            line.quantity = new_qty;
            return Ok(());
        }

        validate_cart_size(self.lines.len())?;

        if !product.can_sell(quantity) {
            return Err(CoreError::InsufficientStock {
                item_code: product.item_code.clone(),
                available: product.stock,
                requested: quantity,
            });
        }

        self.lines
            .push(CartLine::from_product(product, self.customer_type, quantity));
        Ok(())
    }

    /// Sets the quantity of an existing line.
    ///
    /// ## Behavior
    /// - Quantity below 1 is rejected and the line is left unchanged
    /// - Quantity above current stock rejects with `InsufficientStock`
    /// - Otherwise the line total is recomputed from the frozen rate
    pub fn set_quantity(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;

        if !product.can_sell(quantity) {
            return Err(CoreError::InsufficientStock {
                item_code: product.item_code.clone(),
                available: product.stock,
                requested: quantity,
            });
        }

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product.id)
            .ok_or_else(|| CoreError::ProductNotFound(product.id.clone()))?;

        line.quantity = quantity;
        Ok(())
    }

    /// Removes a line unconditionally. Removing a product that is not on
    /// the bill is a no-op.
    pub fn remove_line(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Checks if the draft has no lines.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of unique lines.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Subtotal: Σ line totals.
    pub fn sub_total(&self) -> Money {
        Money::from_cents(self.lines.iter().map(|l| l.total_cents()).sum())
    }

    /// Computes the draft's totals under a discount. Pure.
    pub fn totals(&self, discount: DiscountRate) -> crate::billing::BillTotals {
        crate::billing::compute_totals(self.sub_total(), discount)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
