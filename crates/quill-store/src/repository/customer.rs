//! # Customer Repository
//!
//! Master-record operations over the `customers` collection.
//!
//! The outstanding balance is owned by the ledger: nothing here mutates it
//! except the opening balance stamped once at insert. Bills raise it and
//! payments lower it through the billing service.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::storage::{keys, JsonStore};
use quill_core::types::{Customer, CustomerType};
use quill_core::validation::{validate_credit_limit_cents, validate_name, validate_phone};

/// Draft fields for creating or editing a customer.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub customer_type: CustomerType,
    pub phone: String,
    pub credit_limit_cents: i64,
    /// Applied only on insert (an opening ledger position, e.g. when
    /// migrating an existing book of customers). Updates ignore it: after
    /// creation the balance moves only through bills and payments.
    #[serde(default)]
    pub opening_balance_cents: i64,
}

impl CustomerDraft {
    fn validate(&self) -> StoreResult<()> {
        validate_name(&self.name)?;
        validate_phone(&self.phone)?;
        validate_credit_limit_cents(self.credit_limit_cents)?;
        Ok(())
    }
}

/// Repository for customer master records.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    kv: JsonStore,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(kv: JsonStore) -> Self {
        CustomerRepository { kv }
    }

    /// Lists customers in insertion order.
    pub fn list(&self) -> Vec<Customer> {
        self.kv.load(keys::CUSTOMERS)
    }

    /// Gets a customer by ID.
    pub fn get_by_id(&self, id: &str) -> Option<Customer> {
        self.list().into_iter().find(|c| c.id == id)
    }

    /// Inserts a new customer.
    pub fn insert(&self, draft: CustomerDraft) -> StoreResult<Customer> {
        draft.validate()?;

        let now = Utc::now();
        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: draft.name.trim().to_string(),
            customer_type: draft.customer_type,
            phone: draft.phone.trim().to_string(),
            credit_limit_cents: draft.credit_limit_cents,
            outstanding_balance_cents: draft.opening_balance_cents,
            created_at: now,
            updated_at: now,
        };

        let mut customers = self.list();
        customers.push(customer.clone());
        self.kv.save(keys::CUSTOMERS, &customers)?;

        info!(name = %customer.name, id = %customer.id, "Customer created");
        Ok(customer)
    }

    /// Updates a customer's master fields. The outstanding balance is left
    /// exactly as the ledger last set it.
    pub fn update(&self, id: &str, draft: CustomerDraft) -> StoreResult<Customer> {
        draft.validate()?;

        let mut customers = self.list();
        let customer = customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::not_found("Customer", id))?;

        customer.name = draft.name.trim().to_string();
        customer.customer_type = draft.customer_type;
        customer.phone = draft.phone.trim().to_string();
        customer.credit_limit_cents = draft.credit_limit_cents;
        customer.updated_at = Utc::now();
        let updated = customer.clone();

        self.kv.save(keys::CUSTOMERS, &customers)?;

        info!(name = %updated.name, id = %updated.id, "Customer updated");
        Ok(updated)
    }

    /// Counts customers (for diagnostics).
    pub fn count(&self) -> usize {
        self.list().len()
    }

    /// Replaces the whole collection. Reserved for the billing service's
    /// balance changes, which must land together with their bill or payment.
    pub(crate) fn replace_all(&self, customers: &[Customer]) -> StoreResult<()> {
        self.kv.save(keys::CUSTOMERS, customers)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> (tempfile::TempDir, CustomerRepository) {
        let dir = tempfile::tempdir().unwrap();
        let kv = JsonStore::open(dir.path()).unwrap();
        (dir, CustomerRepository::new(kv))
    }

    fn draft(name: &str, customer_type: CustomerType) -> CustomerDraft {
        CustomerDraft {
            name: name.to_string(),
            customer_type,
            phone: "555-555-5555".to_string(),
            credit_limit_cents: 500_000,
            opening_balance_cents: 0,
        }
    }

    #[test]
    fn test_insert_and_get() {
        let (_dir, repo) = repo();
        let customer = repo
            .insert(draft("Tech Solutions Inc", CustomerType::Wholesale))
            .unwrap();

        assert_eq!(repo.count(), 1);
        let loaded = repo.get_by_id(&customer.id).unwrap();
        assert_eq!(loaded.name, "Tech Solutions Inc");
        assert_eq!(loaded.customer_type, CustomerType::Wholesale);
        assert_eq!(loaded.outstanding_balance_cents, 0);
    }

    #[test]
    fn test_opening_balance_applied_on_insert_only() {
        let (_dir, repo) = repo();
        let mut d = draft("Jane Smith", CustomerType::Retail);
        d.opening_balance_cents = 7_520;
        let customer = repo.insert(d).unwrap();
        assert_eq!(customer.outstanding_balance_cents, 7_520);

        // An edit keeps the ledger's balance
        let mut edit = draft("Jane A. Smith", CustomerType::Retail);
        edit.opening_balance_cents = 0;
        let updated = repo.update(&customer.id, edit).unwrap();
        assert_eq!(updated.name, "Jane A. Smith");
        assert_eq!(updated.outstanding_balance_cents, 7_520);
    }

    #[test]
    fn test_update_missing_customer() {
        let (_dir, repo) = repo();
        let err = repo
            .update("nope", draft("X", CustomerType::Retail))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_invalid_draft_rejected() {
        let (_dir, repo) = repo();

        assert!(repo.insert(draft("", CustomerType::Retail)).is_err());

        let mut bad_limit = draft("Jane", CustomerType::Retail);
        bad_limit.credit_limit_cents = -1;
        assert!(repo.insert(bad_limit).is_err());

        let mut bad_phone = draft("Jane", CustomerType::Retail);
        bad_phone.phone = "not a phone".to_string();
        assert!(repo.insert(bad_phone).is_err());

        assert_eq!(repo.count(), 0);
    }
}
