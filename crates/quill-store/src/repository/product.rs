//! # Product Repository
//!
//! Catalog operations over the `products` collection.
//!
//! ## Key Operations
//! - Substring search across name and item code (the billing screen lookup)
//! - CRUD with a unique item-code business key
//!
//! Stock decrements are deliberately absent: they happen only inside the
//! billing service, together with the bill append and the balance change.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::storage::{keys, JsonStore};
use quill_core::types::Product;
use quill_core::validation::{
    validate_item_code, validate_name, validate_price_cents, validate_search_query, validate_stock,
};

/// Draft fields for creating or editing a product.
///
/// A distinct draft type (rather than a partially-filled `Product`) keeps
/// half-built records out of the entity type: identity and timestamps are
/// stamped by the repository once the draft validates.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub item_code: String,
    pub name: String,
    pub stock: i64,
    pub retail_price_cents: i64,
    pub wholesale_price_cents: i64,
    pub description: Option<String>,
}

impl ProductDraft {
    fn validate(&self) -> StoreResult<()> {
        validate_item_code(&self.item_code)?;
        validate_name(&self.name)?;
        validate_stock(self.stock)?;
        validate_price_cents(self.retail_price_cents)?;
        validate_price_cents(self.wholesale_price_cents)?;
        Ok(())
    }
}

/// Repository for catalog operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = store.products();
///
/// // Search products for the billing screen
/// let hits = repo.search("keyb", 5)?;
///
/// // Create a product
/// let product = repo.insert(draft)?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    kv: JsonStore,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(kv: JsonStore) -> Self {
        ProductRepository { kv }
    }

    /// Lists the catalog in insertion order.
    pub fn list(&self) -> Vec<Product> {
        self.kv.load(keys::PRODUCTS)
    }

    /// Gets a product by its ID.
    pub fn get_by_id(&self, id: &str) -> Option<Product> {
        self.list().into_iter().find(|p| p.id == id)
    }

    /// Gets a product by its item code.
    pub fn get_by_item_code(&self, item_code: &str) -> Option<Product> {
        let wanted = item_code.trim();
        self.list()
            .into_iter()
            .find(|p| p.item_code.eq_ignore_ascii_case(wanted))
    }

    /// Searches products by substring across name and item code,
    /// case-insensitively.
    ///
    /// An empty query returns the catalog (up to `limit`), name-sorted, so
    /// the caller has something to show before the operator starts typing.
    pub fn search(&self, query: &str, limit: usize) -> StoreResult<Vec<Product>> {
        let query = validate_search_query(query)?;
        debug!(query = %query, limit = limit, "Searching products");

        let mut products = self.list();
        if query.is_empty() {
            products.sort_by(|a, b| a.name.cmp(&b.name));
            products.truncate(limit);
            return Ok(products);
        }

        let needle = query.to_lowercase();
        let hits: Vec<Product> = products
            .into_iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.item_code.to_lowercase().contains(&needle)
            })
            .take(limit)
            .collect();

        debug!(count = hits.len(), "Search returned products");
        Ok(hits)
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - the stored record with generated id and timestamps
    /// * `Err(StoreError::Duplicate)` - item code already exists
    pub fn insert(&self, draft: ProductDraft) -> StoreResult<Product> {
        draft.validate()?;

        let mut products = self.list();
        if products
            .iter()
            .any(|p| p.item_code.eq_ignore_ascii_case(draft.item_code.trim()))
        {
            return Err(StoreError::duplicate("itemCode", draft.item_code.trim()));
        }

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            item_code: draft.item_code.trim().to_string(),
            name: draft.name.trim().to_string(),
            stock: draft.stock,
            retail_price_cents: draft.retail_price_cents,
            wholesale_price_cents: draft.wholesale_price_cents,
            description: draft.description,
            created_at: now,
            updated_at: now,
        };

        products.push(product.clone());
        self.kv.save(keys::PRODUCTS, &products)?;

        info!(item_code = %product.item_code, id = %product.id, "Product created");
        Ok(product)
    }

    /// Updates an existing product from a draft.
    ///
    /// ## Returns
    /// * `Ok(Product)` - the updated record
    /// * `Err(StoreError::NotFound)` - product doesn't exist
    /// * `Err(StoreError::Duplicate)` - item code taken by another product
    pub fn update(&self, id: &str, draft: ProductDraft) -> StoreResult<Product> {
        draft.validate()?;

        let mut products = self.list();
        if products
            .iter()
            .any(|p| p.id != id && p.item_code.eq_ignore_ascii_case(draft.item_code.trim()))
        {
            return Err(StoreError::duplicate("itemCode", draft.item_code.trim()));
        }

        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        product.item_code = draft.item_code.trim().to_string();
        product.name = draft.name.trim().to_string();
        product.stock = draft.stock;
        product.retail_price_cents = draft.retail_price_cents;
        product.wholesale_price_cents = draft.wholesale_price_cents;
        product.description = draft.description;
        product.updated_at = Utc::now();
        let updated = product.clone();

        self.kv.save(keys::PRODUCTS, &products)?;

        info!(item_code = %updated.item_code, id = %updated.id, "Product updated");
        Ok(updated)
    }

    /// Deletes a product.
    ///
    /// Historical bills referencing it are untouched: they carry their own
    /// name and rate snapshots, so the weak reference going stale is fine.
    pub fn delete(&self, id: &str) -> StoreResult<()> {
        let mut products = self.list();
        let before = products.len();
        products.retain(|p| p.id != id);

        if products.len() == before {
            return Err(StoreError::not_found("Product", id));
        }

        self.kv.save(keys::PRODUCTS, &products)?;
        info!(id = %id, "Product deleted");
        Ok(())
    }

    /// Counts products (for diagnostics).
    pub fn count(&self) -> usize {
        self.list().len()
    }

    /// Replaces the whole collection. Reserved for the billing service's
    /// stock decrements, which must land together with the bill append.
    pub(crate) fn replace_all(&self, products: &[Product]) -> StoreResult<()> {
        self.kv.save(keys::PRODUCTS, products)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
