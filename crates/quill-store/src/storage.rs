//! # Storage Module
//!
//! The JSON key-value store behind every collection, and the `Store` facade
//! that hands out repositories.
//!
//! ## Persistence Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Collection Layout on Disk                            │
//! │                                                                         │
//! │  <data dir>/                                                            │
//! │  ├── products.json      ordered sequence of Product                     │
//! │  ├── customers.json     ordered sequence of Customer                    │
//! │  ├── bills.json         append-only sequence of Bill                    │
//! │  ├── payments.json      append-only sequence of Payment                 │
//! │  └── currentUser.json   single optional User record                     │
//! │                                                                         │
//! │  READ:  missing file → default (empty) collection                       │
//! │         corrupt file → default (empty) collection, logged               │
//! │  WRITE: every mutation rewrites the whole collection, via a             │
//! │         temp file + rename so a half-written file is never read back    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why No Database?
//! The collections are small, the writer is a single synchronous user, and
//! the contract is key-value text round-trips. A JSON file per collection
//! keeps the store inspectable with any text editor and trivially portable.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::StoreResult;

// =============================================================================
// Collection Keys
// =============================================================================

/// Keys of the persisted collections. Each key is one file: `<key>.json`.
pub mod keys {
    pub const PRODUCTS: &str = "products";
    pub const CUSTOMERS: &str = "customers";
    pub const BILLS: &str = "bills";
    pub const PAYMENTS: &str = "payments";
    pub const CURRENT_USER: &str = "currentUser";
}

// =============================================================================
// JsonStore
// =============================================================================

/// A directory of JSON-serialized collections, one file per key.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Opens (and creates if needed) a store directory.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "Opened JSON store");
        Ok(JsonStore { dir })
    }

    /// The directory backing this store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Loads a collection, falling back to its default when the file is
    /// missing or does not parse.
    ///
    /// A corrupt file is deliberately NOT an error: the application must
    /// keep working from an empty collection, exactly as it would on first
    /// run. The condition is logged so the operator can recover the file.
    pub fn load<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let path = self.path(key);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return T::default();
            }
            Err(err) => {
                warn!(key = %key, error = %err, "Failed to read collection, using default");
                return T::default();
            }
        };

        match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(err) => {
                warn!(key = %key, error = %err, "Corrupt collection file, using default");
                T::default()
            }
        }
    }

    /// Persists a collection, replacing the previous contents.
    ///
    /// Writes go to a sibling temp file first and are renamed into place,
    /// so a crash mid-write leaves the old contents readable rather than a
    /// truncated file.
    pub fn save<T>(&self, key: &str, value: &T) -> StoreResult<()>
    where
        T: Serialize + ?Sized,
    {
        let text = serde_json::to_string_pretty(value)?;
        let path = self.path(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &path)?;
        debug!(key = %key, "Saved collection");
        Ok(())
    }
}

// =============================================================================
// Store Facade
// =============================================================================

/// The application store: one handle that hands out per-collection
/// repositories and the billing service.
///
/// ## Usage
/// ```rust,ignore
/// let store = Store::open("~/.local/share/quill-pos")?;
///
/// let products = store.products().list();
/// let bill = store.billing().finalize_bill(&cart, options)?;
/// ```
#[derive(Debug, Clone)]
pub struct Store {
    kv: JsonStore,
}

impl Store {
    /// Opens the store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        Ok(Store {
            kv: JsonStore::open(dir)?,
        })
    }

    /// Raw key-value access (collection-level load/save).
    pub fn kv(&self) -> &JsonStore {
        &self.kv
    }

    /// Product catalog repository.
    pub fn products(&self) -> crate::repository::ProductRepository {
        crate::repository::ProductRepository::new(self.kv.clone())
    }

    /// Customer master-record repository.
    pub fn customers(&self) -> crate::repository::CustomerRepository {
        crate::repository::CustomerRepository::new(self.kv.clone())
    }

    /// Bill history repository (read side; appends go through billing).
    pub fn bills(&self) -> crate::repository::BillRepository {
        crate::repository::BillRepository::new(self.kv.clone())
    }

    /// Payment history repository (read side; appends go through billing).
    pub fn payments(&self) -> crate::repository::PaymentRepository {
        crate::repository::PaymentRepository::new(self.kv.clone())
    }

    /// Login session repository.
    pub fn session(&self) -> crate::repository::SessionRepository {
        crate::repository::SessionRepository::new(self.kv.clone())
    }

    /// The billing service: bill finalization and payment recording.
    pub fn billing(&self) -> crate::billing::BillingService {
        crate::billing::BillingService::new(self.kv.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::types::Product;

    fn test_product() -> Product {
        Product {
            id: "p1".to_string(),
            item_code: "KB001".to_string(),
            name: "Wireless Keyboard".to_string(),
            stock: 50,
            retail_price_cents: 4500,
            wholesale_price_cents: 3500,
            description: Some("A sleek and silent wireless keyboard.".to_string()),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_missing_collection_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let kv = JsonStore::open(dir.path()).unwrap();

        let products: Vec<Product> = kv.load(keys::PRODUCTS);
        assert!(products.is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let kv = JsonStore::open(dir.path()).unwrap();

        kv.save(keys::PRODUCTS, &vec![test_product()]).unwrap();
        let loaded: Vec<Product> = kv.load(keys::PRODUCTS);

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].item_code, "KB001");
        assert_eq!(loaded[0].retail_price_cents, 4500);
    }

    #[test]
    fn test_corrupt_collection_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let kv = JsonStore::open(dir.path()).unwrap();

        std::fs::write(dir.path().join("products.json"), "{ not json ]").unwrap();
        let products: Vec<Product> = kv.load(keys::PRODUCTS);
        assert!(products.is_empty());

        // The store still works after the corruption: a save round-trips.
        kv.save(keys::PRODUCTS, &vec![test_product()]).unwrap();
        let loaded: Vec<Product> = kv.load(keys::PRODUCTS);
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn test_collections_are_independent_files() {
        let dir = tempfile::tempdir().unwrap();
        let kv = JsonStore::open(dir.path()).unwrap();

        kv.save(keys::PRODUCTS, &vec![test_product()]).unwrap();

        assert!(dir.path().join("products.json").exists());
        assert!(!dir.path().join("customers.json").exists());
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let kv = JsonStore::open(dir.path()).unwrap();

        kv.save(keys::PRODUCTS, &vec![test_product()]).unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
