//! # Billing Service
//!
//! Applies a finalized bill's financial side effects to the store, and
//! records payments against customer balances.
//!
//! ## The Three-Way Commit
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    finalize_bill                                        │
//! │                                                                         │
//! │  1. Load customer + products fresh                                      │
//! │  2. Re-check every line against current stock                           │
//! │  3. prepare_bill (totals, split, credit-limit policy)  ← may reject     │
//! │  4. Stamp id, bill number, date                                         │
//! │  5. Apply in memory:   stock −= qty   balance += due   history + bill   │
//! │  6. Persist: products, customers, bills (bill enters history LAST)      │
//! │                                                                         │
//! │  Steps 1-4 touch nothing. By step 5 every check has passed, so the      │
//! │  three mutations land together; a rejection can never leave partial     │
//! │  state. The bill file is written last so an I/O failure cannot          │
//! │  produce a recorded bill whose stock and balance effects are missing.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::repository::{BillRepository, CustomerRepository, PaymentRepository, ProductRepository};
use crate::storage::{keys, JsonStore};
use quill_core::billing::{prepare_bill, BillRequest};
use quill_core::validation::validate_payment_amount;
use quill_core::{
    Bill, Cart, CoreError, Customer, DiscountRate, Money, Payment, PaymentMethod, Product,
};

/// Caller choices for finalizing a draft.
#[derive(Debug, Clone, Copy)]
pub struct FinalizeOptions {
    pub discount: DiscountRate,
    pub payment_method: PaymentMethod,
    /// Settlement amount for credit bills; ignored for cash.
    pub amount_paid: Money,
    /// Explicit confirmation to proceed past the customer's credit limit.
    pub credit_limit_override: bool,
}

impl FinalizeOptions {
    /// Cash settlement with no discount.
    pub fn cash() -> Self {
        FinalizeOptions {
            discount: DiscountRate::zero(),
            payment_method: PaymentMethod::Cash,
            amount_paid: Money::zero(),
            credit_limit_override: false,
        }
    }

    /// Credit settlement of `amount_paid` (possibly zero) with no discount.
    pub fn credit(amount_paid: Money) -> Self {
        FinalizeOptions {
            discount: DiscountRate::zero(),
            payment_method: PaymentMethod::Credit,
            amount_paid,
            credit_limit_override: false,
        }
    }

    /// Sets the discount.
    pub fn with_discount(mut self, discount: DiscountRate) -> Self {
        self.discount = discount;
        self
    }

    /// Confirms proceeding past the credit limit.
    pub fn with_credit_limit_override(mut self) -> Self {
        self.credit_limit_override = true;
        self
    }
}

/// The billing service. The only writer of the bill and payment histories,
/// and the only code that touches stock levels and outstanding balances.
#[derive(Debug, Clone)]
pub struct BillingService {
    kv: JsonStore,
}

impl BillingService {
    /// Creates a new BillingService.
    pub fn new(kv: JsonStore) -> Self {
        BillingService { kv }
    }

    fn products(&self) -> ProductRepository {
        ProductRepository::new(self.kv.clone())
    }

    fn customers(&self) -> CustomerRepository {
        CustomerRepository::new(self.kv.clone())
    }

    fn bills(&self) -> BillRepository {
        BillRepository::new(self.kv.clone())
    }

    fn payments(&self) -> PaymentRepository {
        PaymentRepository::new(self.kv.clone())
    }

    /// Finalizes a draft into an immutable bill and applies its side
    /// effects together.
    ///
    /// ## Side Effects (all or none)
    /// - the bill is appended to the history
    /// - every line's product stock is decremented by the billed quantity
    /// - iff the split leaves an amount due, the customer's outstanding
    ///   balance rises by exactly that amount
    ///
    /// ## Errors
    /// - `InvalidBillRequest`: empty cart or customer mismatch
    /// - `InsufficientStock`: a line exceeds freshly loaded stock (carts
    ///   can sit open while other bills drain the shelf)
    /// - `CreditLimitExceeded`: soft, unless the override is set
    /// - `InvalidPaymentAmount`: negative or overpaying credit input
    ///
    /// On any rejection nothing has been written.
    pub fn finalize_bill(&self, cart: &Cart, options: FinalizeOptions) -> StoreResult<Bill> {
        debug!(
            customer_id = %cart.customer_id(),
            lines = cart.line_count(),
            method = ?options.payment_method,
            "finalize_bill"
        );

        let mut customers: Vec<Customer> = self.kv.load(keys::CUSTOMERS);
        let customer = customers
            .iter()
            .find(|c| c.id == cart.customer_id())
            .cloned()
            .ok_or_else(|| CoreError::CustomerNotFound(cart.customer_id().to_string()))?;

        let mut products: Vec<Product> = self.kv.load(keys::PRODUCTS);
        for line in cart.lines() {
            let product = products
                .iter()
                .find(|p| p.id == line.product_id)
                .ok_or_else(|| CoreError::ProductNotFound(line.product_id.clone()))?;
            if !product.can_sell(line.quantity) {
                return Err(CoreError::InsufficientStock {
                    item_code: product.item_code.clone(),
                    available: product.stock,
                    requested: line.quantity,
                }
                .into());
            }
        }

        let prepared = prepare_bill(BillRequest {
            cart,
            customer: &customer,
            discount: options.discount,
            payment_method: options.payment_method,
            amount_paid: options.amount_paid,
            credit_limit_override: options.credit_limit_override,
        })?;

        let now = Utc::now();
        let bill = prepared.into_bill(
            Uuid::new_v4().to_string(),
            generate_bill_number(now),
            now,
        );

        // Every check has passed; apply all three effects in memory.
        for item in &bill.items {
            if let Some(product) = products.iter_mut().find(|p| p.id == item.product_id) {
                product.stock -= item.quantity;
                product.updated_at = now;
            }
        }
        if bill.has_amount_due() {
            if let Some(c) = customers.iter_mut().find(|c| c.id == bill.customer_id) {
                c.outstanding_balance_cents += bill.amount_due_cents;
                c.updated_at = now;
            }
        }

        // Persist; the bill enters history last.
        self.products().replace_all(&products)?;
        self.customers().replace_all(&customers)?;
        self.bills().append(&bill)?;

        info!(
            bill_number = %bill.bill_number,
            customer = %bill.customer_name,
            grand_total_cents = bill.grand_total_cents,
            amount_due_cents = bill.amount_due_cents,
            items = bill.items.len(),
            "Bill finalized"
        );
        Ok(bill)
    }

    /// Records a payment against a customer's outstanding balance.
    ///
    /// The amount must be positive and is clamped to the current
    /// outstanding balance: a customer cannot end up owed money by
    /// overpaying at this counter. Exactly one Payment is appended and the
    /// balance drops by exactly the recorded amount.
    pub fn record_payment(
        &self,
        customer_id: &str,
        amount: Money,
        bill_id: Option<String>,
    ) -> StoreResult<Payment> {
        debug!(customer_id = %customer_id, amount_cents = amount.cents(), "record_payment");
        validate_payment_amount(amount.cents()).map_err(CoreError::from)?;

        let mut customers: Vec<Customer> = self.kv.load(keys::CUSTOMERS);
        let customer = customers
            .iter_mut()
            .find(|c| c.id == customer_id)
            .ok_or_else(|| StoreError::not_found("Customer", customer_id))?;

        if customer.outstanding_balance_cents <= 0 {
            return Err(CoreError::InvalidPaymentAmount {
                reason: "customer has no outstanding balance".to_string(),
            }
            .into());
        }

        // Call-site clamp: never record more than is owed.
        let recorded_cents = amount.cents().min(customer.outstanding_balance_cents);
        let now = Utc::now();
        customer.outstanding_balance_cents -= recorded_cents;
        customer.updated_at = now;
        let remaining_cents = customer.outstanding_balance_cents;
        let customer_name = customer.name.clone();

        let payment = Payment {
            id: Uuid::new_v4().to_string(),
            customer_id: customer_id.to_string(),
            date: now,
            amount_cents: recorded_cents,
            bill_id,
        };

        // Persist; the payment enters history last.
        self.customers().replace_all(&customers)?;
        self.payments().append(&payment)?;

        info!(
            customer = %customer_name,
            amount_cents = recorded_cents,
            remaining_cents = remaining_cents,
            "Payment recorded"
        );
        Ok(payment)
    }
}

/// Generates a unique, human-facing invoice number.
///
/// Date prefix for legibility, UUID-derived suffix for uniqueness: two
/// bills finalized within the same clock tick still get distinct numbers.
fn generate_bill_number(date: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("INV-{}-{}", date.format("%y%m%d"), &suffix[..6])
}

// =============================================================================
// Unit Tests
// =============================================================================
