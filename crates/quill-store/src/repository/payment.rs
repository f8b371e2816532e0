//! # Payment Repository
//!
//! Read side of the append-only `payments` collection. Payments enter only
//! through the billing service's `record_payment`, paired with the balance
//! decrement.

use crate::error::StoreResult;
use crate::storage::{keys, JsonStore};
use quill_core::types::Payment;

/// Repository for the payment history.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    kv: JsonStore,
}

impl PaymentRepository {
    /// Creates a new PaymentRepository.
    pub fn new(kv: JsonStore) -> Self {
        PaymentRepository { kv }
    }

    /// The full history in recording order.
    pub fn list(&self) -> Vec<Payment> {
        self.kv.load(keys::PAYMENTS)
    }

    /// A customer's payments, in recording order (the history view).
    pub fn for_customer(&self, customer_id: &str) -> Vec<Payment> {
        self.list()
            .into_iter()
            .filter(|p| p.customer_id == customer_id)
            .collect()
    }

    /// Counts payments (for diagnostics).
    pub fn count(&self) -> usize {
        self.list().len()
    }

    /// Appends a recorded payment. Only the billing service calls this, as
    /// part of the payment commit.
    pub(crate) fn append(&self, payment: &Payment) -> StoreResult<()> {
        let mut payments = self.list();
        payments.push(payment.clone());
        self.kv.save(keys::PAYMENTS, &payments)
    }
}
