//! # Bill Repository
//!
//! Read side of the append-only `bills` collection. New bills enter the
//! history only through the billing service's finalize, which pairs the
//! append with the stock and balance side effects.

use crate::error::StoreResult;
use crate::storage::{keys, JsonStore};
use quill_core::types::Bill;

/// Repository for the bill history.
#[derive(Debug, Clone)]
pub struct BillRepository {
    kv: JsonStore,
}

impl BillRepository {
    /// Creates a new BillRepository.
    pub fn new(kv: JsonStore) -> Self {
        BillRepository { kv }
    }

    /// The full history in finalize order.
    pub fn list(&self) -> Vec<Bill> {
        self.kv.load(keys::BILLS)
    }

    /// Gets a bill by its ID.
    pub fn get_by_id(&self, id: &str) -> Option<Bill> {
        self.list().into_iter().find(|b| b.id == id)
    }

    /// Gets a bill by its invoice number.
    pub fn get_by_number(&self, bill_number: &str) -> Option<Bill> {
        self.list()
            .into_iter()
            .find(|b| b.bill_number == bill_number)
    }

    /// A customer's bills, in finalize order (the history view).
    pub fn for_customer(&self, customer_id: &str) -> Vec<Bill> {
        self.list()
            .into_iter()
            .filter(|b| b.customer_id == customer_id)
            .collect()
    }

    /// Counts bills (for diagnostics).
    pub fn count(&self) -> usize {
        self.list().len()
    }

    /// Appends a finalized bill. Only the billing service calls this, as
    /// part of the three-way commit.
    pub(crate) fn append(&self, bill: &Bill) -> StoreResult<()> {
        let mut bills = self.list();
        bills.push(bill.clone());
        self.kv.save(keys::BILLS, &bills)
    }
}
