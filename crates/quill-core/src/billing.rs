//! # Billing Module
//!
//! Turns a draft cart plus a chosen customer into a finalized,
//! internally-consistent bill.
//!
//! ## Finalize Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Bill Finalization                                  │
//! │                                                                         │
//! │  Cart + Customer + Discount + Payment                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  compute_totals ──► subTotal, discountAmount, grandTotal                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  derive_payment_split ──► amountPaid, amountDue                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  credit-limit policy ──► CreditLimitExceeded unless overridden          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PreparedBill (pure) ──► store layer stamps id / number / date and      │
//! │                          applies the side effects together              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything in this module is pure: no clock, no ids, no persistence.
//! The store layer owns those, which keeps every branch here testable
//! with plain values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::{DiscountRate, Money};
use crate::types::{Bill, BillItem, Customer, PaymentMethod};

// =============================================================================
// Totals
// =============================================================================

/// The three derived totals of a bill.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillTotals {
    pub sub_total: Money,
    pub discount_amount: Money,
    pub grand_total: Money,
}

/// Computes `{subTotal, discountAmount, grandTotal}` for a subtotal under a
/// discount. Pure function.
///
/// `discount_amount = sub_total × bps / 10_000` (rounded half up),
/// `grand_total = sub_total − discount_amount`. `DiscountRate` is bounded to
/// 100% at construction, so the grand total cannot go negative here.
pub fn compute_totals(sub_total: Money, discount: DiscountRate) -> BillTotals {
    let discount_amount = sub_total.discount_amount(discount);
    BillTotals {
        sub_total,
        discount_amount,
        grand_total: sub_total - discount_amount,
    }
}

// =============================================================================
// Payment Split
// =============================================================================

/// How a bill's grand total splits between settled and owed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSplit {
    pub amount_paid: Money,
    pub amount_due: Money,
}

/// Derives the payment split for a grand total.
///
/// ## Behavior
/// - **Cash**: full settlement is forced. `amount_paid = grand_total`,
///   `amount_due = 0`, whatever the caller passed as input.
/// - **Credit**: the caller's amount (possibly zero) is taken as paid and
///   `amount_due = grand_total − amount_paid`. Negative input and
///   overpayment are rejected: an amount due below zero has no meaning in
///   this ledger.
pub fn derive_payment_split(
    grand_total: Money,
    method: PaymentMethod,
    amount_paid_input: Money,
) -> CoreResult<PaymentSplit> {
    match method {
        PaymentMethod::Cash => Ok(PaymentSplit {
            amount_paid: grand_total,
            amount_due: Money::zero(),
        }),
        PaymentMethod::Credit => {
            if amount_paid_input.is_negative() {
                return Err(CoreError::InvalidPaymentAmount {
                    reason: "amount paid cannot be negative".to_string(),
                });
            }
            if amount_paid_input > grand_total {
                return Err(CoreError::InvalidPaymentAmount {
                    reason: format!(
                        "amount paid {} exceeds grand total {}",
                        amount_paid_input, grand_total
                    ),
                });
            }
            Ok(PaymentSplit {
                amount_paid: amount_paid_input,
                amount_due: grand_total - amount_paid_input,
            })
        }
    }
}

// =============================================================================
// Bill Request & Prepared Bill
// =============================================================================

/// Everything the engine needs to finalize a draft.
#[derive(Debug, Clone, Copy)]
pub struct BillRequest<'a> {
    pub cart: &'a Cart,
    pub customer: &'a Customer,
    pub discount: DiscountRate,
    pub payment_method: PaymentMethod,
    /// Caller-supplied settlement amount. Ignored for cash (forced to the
    /// grand total).
    pub amount_paid: Money,
    /// Explicit confirmation to proceed past the customer's credit limit.
    pub credit_limit_override: bool,
}

/// A bill that has passed every check and is ready to be stamped and
/// committed. Produced only by [`prepare_bill`].
#[derive(Debug, Clone)]
pub struct PreparedBill {
    customer_id: String,
    customer_name: String,
    customer_type: crate::types::CustomerType,
    items: Vec<BillItem>,
    totals: BillTotals,
    discount: DiscountRate,
    payment_method: PaymentMethod,
    split: PaymentSplit,
}

impl PreparedBill {
    /// The amount that will be added to the customer's outstanding balance.
    #[inline]
    pub fn amount_due(&self) -> Money {
        self.split.amount_due
    }

    /// The computed totals.
    #[inline]
    pub fn totals(&self) -> BillTotals {
        self.totals
    }

    /// The line items that will be billed.
    #[inline]
    pub fn items(&self) -> &[BillItem] {
        &self.items
    }

    /// Stamps identity and time onto the prepared bill, producing the
    /// immutable record. The store layer supplies all three: the engine
    /// itself never touches a clock or an id generator.
    pub fn into_bill(self, id: String, bill_number: String, date: DateTime<Utc>) -> Bill {
        Bill {
            id,
            bill_number,
            date,
            customer_id: self.customer_id,
            customer_name: self.customer_name,
            customer_type: self.customer_type,
            items: self.items,
            sub_total_cents: self.totals.sub_total.cents(),
            discount_bps: self.discount.bps(),
            discount_amount_cents: self.totals.discount_amount.cents(),
            grand_total_cents: self.totals.grand_total.cents(),
            payment_method: self.payment_method,
            amount_paid_cents: self.split.amount_paid.cents(),
            amount_due_cents: self.split.amount_due.cents(),
        }
    }
}

/// Validates a finalize request and computes the complete bill.
///
/// ## Preconditions
/// - The cart must have at least one line (`InvalidBillRequest`)
/// - The submitted customer must be the one the cart was opened for
///   (`InvalidBillRequest`)
///
/// ## Credit-Limit Policy
/// If the split leaves an amount due and
/// `outstanding + due > credit_limit`, the request fails with
/// `CreditLimitExceeded` unless `credit_limit_override` is set. The limit
/// is soft: with the override the bill proceeds and the balance is allowed
/// past the limit.
///
/// No state is touched here; callers commit the result or drop it.
pub fn prepare_bill(req: BillRequest<'_>) -> CoreResult<PreparedBill> {
    if req.cart.is_empty() {
        return Err(CoreError::InvalidBillRequest {
            reason: "bill has no line items".to_string(),
        });
    }
    if req.cart.customer_id() != req.customer.id {
        return Err(CoreError::InvalidBillRequest {
            reason: format!(
                "cart was opened for customer {}, not {}",
                req.cart.customer_id(),
                req.customer.id
            ),
        });
    }

    let items: Vec<BillItem> = req
        .cart
        .lines()
        .iter()
        .map(|line| BillItem {
            product_id: line.product_id.clone(),
            name: line.name.clone(),
            quantity: line.quantity,
            rate_cents: line.rate_cents,
            total_cents: line.total_cents(),
        })
        .collect();

    let totals = compute_totals(req.cart.sub_total(), req.discount);
    let split = derive_payment_split(totals.grand_total, req.payment_method, req.amount_paid)?;

    if split.amount_due.is_positive()
        && !req.customer.within_credit_limit(split.amount_due)
        && !req.credit_limit_override
    {
        return Err(CoreError::CreditLimitExceeded {
            outstanding_cents: req.customer.outstanding_balance_cents,
            due_cents: split.amount_due.cents(),
            limit_cents: req.customer.credit_limit_cents,
        });
    }

    Ok(PreparedBill {
        customer_id: req.customer.id.clone(),
        customer_name: req.customer.name.clone(),
        customer_type: req.customer.customer_type,
        items,
        totals,
        discount: req.discount,
        payment_method: req.payment_method,
        split,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CustomerType;
    use chrono::Utc;

    fn product(id: &str, stock: i64, retail_cents: i64) -> crate::types::Product {
        crate::types::Product {
            id: id.to_string(),
            item_code: format!("IT-{}", id),
            name: format!("Product {}", id),
            stock,
            retail_price_cents: retail_cents,
            wholesale_price_cents: retail_cents - 500,
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn customer(
        customer_type: CustomerType,
        credit_limit_cents: i64,
        outstanding_cents: i64,
    ) -> Customer {
        Customer {
            id: "c1".to_string(),
            name: "Test Customer".to_string(),
            customer_type,
            phone: String::new(),
            credit_limit_cents,
            outstanding_balance_cents: outstanding_cents,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_compute_totals() {
        // $90.00 at 10%: discount $9.00, grand total $81.00
        let totals = compute_totals(
            Money::from_cents(9000),
            DiscountRate::from_bps(1000).unwrap(),
        );
        assert_eq!(totals.sub_total.cents(), 9000);
        assert_eq!(totals.discount_amount.cents(), 900);
        assert_eq!(totals.grand_total.cents(), 8100);
    }

    #[test]
    fn test_compute_totals_zero_discount() {
        let totals = compute_totals(Money::from_cents(9000), DiscountRate::zero());
        assert_eq!(totals.discount_amount.cents(), 0);
        assert_eq!(totals.grand_total.cents(), 9000);
    }

    #[test]
    fn test_cash_split_forces_full_settlement() {
        // Input is ignored for cash
        let split = derive_payment_split(
            Money::from_cents(8100),
            PaymentMethod::Cash,
            Money::from_cents(1),
        )
        .unwrap();
        assert_eq!(split.amount_paid.cents(), 8100);
        assert_eq!(split.amount_due.cents(), 0);
    }

    #[test]
    fn test_credit_split() {
        let split = derive_payment_split(
            Money::from_cents(15_000),
            PaymentMethod::Credit,
            Money::from_cents(5_000),
        )
        .unwrap();
        assert_eq!(split.amount_paid.cents(), 5_000);
        assert_eq!(split.amount_due.cents(), 10_000);
    }

    #[test]
    fn test_credit_split_zero_paid() {
        let split =
            derive_payment_split(Money::from_cents(15_000), PaymentMethod::Credit, Money::zero())
                .unwrap();
        assert_eq!(split.amount_due.cents(), 15_000);
    }

    #[test]
    fn test_credit_overpayment_rejected() {
        let err = derive_payment_split(
            Money::from_cents(1000),
            PaymentMethod::Credit,
            Money::from_cents(1001),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidPaymentAmount { .. }));

        let err = derive_payment_split(
            Money::from_cents(1000),
            PaymentMethod::Credit,
            Money::from_cents(-1),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidPaymentAmount { .. }));
    }

    /// The worked retail scenario: stock 50, retail $45.00, two units,
    /// 10% discount, cash.
    #[test]
    fn test_prepare_retail_cash_bill() {
        let cust = customer(CustomerType::Retail, 0, 0);
        let mut cart = Cart::for_customer(&cust);
        cart.add_line(&product("1", 50, 4500), 2).unwrap();

        let prepared = prepare_bill(BillRequest {
            cart: &cart,
            customer: &cust,
            discount: DiscountRate::from_bps(1000).unwrap(),
            payment_method: PaymentMethod::Cash,
            amount_paid: Money::zero(),
            credit_limit_override: false,
        })
        .unwrap();

        let totals = prepared.totals();
        assert_eq!(totals.sub_total.cents(), 9000);
        assert_eq!(totals.discount_amount.cents(), 900);
        assert_eq!(totals.grand_total.cents(), 8100);
        assert_eq!(prepared.amount_due().cents(), 0);

        let bill = prepared.into_bill("b1".to_string(), "INV-1".to_string(), Utc::now());
        assert_eq!(bill.amount_paid_cents, 8100);
        assert_eq!(bill.amount_due_cents, 0);
        assert_eq!(bill.items.len(), 1);
        assert_eq!(bill.items[0].total_cents, 9000);

        // subTotal == Σ item.total and item.total == rate × quantity
        let item_sum: i64 = bill.items.iter().map(|i| i.total_cents).sum();
        assert_eq!(bill.sub_total_cents, item_sum);
        for item in &bill.items {
            assert_eq!(item.total_cents, item.rate_cents * item.quantity);
        }
    }

    #[test]
    fn test_empty_cart_rejected() {
        let cust = customer(CustomerType::Retail, 0, 0);
        let cart = Cart::for_customer(&cust);

        let err = prepare_bill(BillRequest {
            cart: &cart,
            customer: &cust,
            discount: DiscountRate::zero(),
            payment_method: PaymentMethod::Cash,
            amount_paid: Money::zero(),
            credit_limit_override: false,
        })
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidBillRequest { .. }));
    }

    #[test]
    fn test_customer_mismatch_rejected() {
        let cust = customer(CustomerType::Retail, 0, 0);
        let mut cart = Cart::for_customer(&cust);
        cart.add_line(&product("1", 50, 4500), 1).unwrap();

        let other = Customer {
            id: "c2".to_string(),
            ..customer(CustomerType::Retail, 0, 0)
        };
        let err = prepare_bill(BillRequest {
            cart: &cart,
            customer: &other,
            discount: DiscountRate::zero(),
            payment_method: PaymentMethod::Cash,
            amount_paid: Money::zero(),
            credit_limit_override: false,
        })
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidBillRequest { .. }));
    }

    /// The worked credit scenario: limit $5000.00, outstanding $4900.00,
    /// $150.00 due pushes past the limit.
    #[test]
    fn test_credit_limit_soft_override() {
        let cust = customer(CustomerType::Wholesale, 500_000, 490_000);
        let mut cart = Cart::for_customer(&cust);
        cart.add_line(&product("1", 50, 15_500), 1).unwrap(); // wholesale rate 15_000

        let request = |override_flag: bool| BillRequest {
            cart: &cart,
            customer: &cust,
            discount: DiscountRate::zero(),
            payment_method: PaymentMethod::Credit,
            amount_paid: Money::zero(),
            credit_limit_override: override_flag,
        };

        // 490_000 + 15_000 > 500_000: rejected without the override
        let err = prepare_bill(request(false)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::CreditLimitExceeded {
                outstanding_cents: 490_000,
                due_cents: 15_000,
                limit_cents: 500_000,
            }
        ));

        // ...and proceeds with it
        let prepared = prepare_bill(request(true)).unwrap();
        assert_eq!(prepared.amount_due().cents(), 15_000);
    }

    #[test]
    fn test_credit_within_limit_needs_no_override() {
        let cust = customer(CustomerType::Wholesale, 500_000, 100_000);
        let mut cart = Cart::for_customer(&cust);
        cart.add_line(&product("1", 50, 15_500), 1).unwrap();

        let prepared = prepare_bill(BillRequest {
            cart: &cart,
            customer: &cust,
            discount: DiscountRate::zero(),
            payment_method: PaymentMethod::Credit,
            amount_paid: Money::zero(),
            credit_limit_override: false,
        })
        .unwrap();
        assert_eq!(prepared.amount_due().cents(), 15_000);
    }
}
