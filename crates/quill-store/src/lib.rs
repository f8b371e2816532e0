//! # quill-store: Persistence Layer for Quill POS
//!
//! This crate provides persistence for the Quill POS system: a JSON-file
//! key-value store with one file per logical collection, repository types
//! per collection, and the billing service that applies ledger side effects
//! together.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Quill POS Data Flow                              │
//! │                                                                         │
//! │  Caller (billing screen, inventory, customers, reports)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                     quill-store (THIS CRATE)                    │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐    │    │
//! │  │   │     Store     │    │  Repositories │    │   Billing    │    │    │
//! │  │   │ (storage.rs)  │    │ (product.rs,  │    │   Service    │    │    │
//! │  │   │               │    │  customer.rs, │    │ (three-way   │    │    │
//! │  │   │ JsonStore     │◄───│  bill.rs ...) │◄───│  commit)     │    │    │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘    │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │   <data dir>/products.json, customers.json, bills.json,         │    │
//! │  │              payments.json, currentUser.json                    │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`storage`] - The JSON key-value store and the `Store` facade
//! - [`repository`] - Repository implementations (product, customer, ...)
//! - [`billing`] - Bill finalization and payment recording
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quill_store::Store;
//!
//! let store = Store::open("./data")?;
//!
//! // Catalog lookups
//! let hits = store.products().search("keyboard", 5)?;
//!
//! // Finalize a bill (applies stock and balance effects together)
//! let bill = store.billing().finalize_bill(&cart, options)?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod error;
pub mod repository;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use billing::{BillingService, FinalizeOptions};
pub use error::{StoreError, StoreResult};
pub use storage::{JsonStore, Store};

// Repository re-exports for convenience
pub use repository::{
    BillRepository, CustomerDraft, CustomerRepository, PaymentRepository, ProductDraft,
    ProductRepository, SessionRepository,
};
