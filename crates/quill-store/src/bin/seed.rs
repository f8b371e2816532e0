//! # Seed Data Loader
//!
//! Populates a fresh store with the demo catalog and customer book for
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed the default directory (./quill_data)
//! cargo run -p quill-store --bin seed
//!
//! # Specify a store directory
//! cargo run -p quill-store --bin seed -- --dir ./data
//! ```
//!
//! Seeding is idempotent: a store that already has products or customers is
//! left alone.

use std::env;

use quill_core::CustomerType;
use quill_store::{CustomerDraft, ProductDraft, Store};
use tracing_subscriber::EnvFilter;

/// Demo catalog: (item code, name, stock, retail cents, wholesale cents, description).
const DEMO_PRODUCTS: &[(&str, &str, i64, i64, i64, &str)] = &[
    (
        "KB001",
        "Wireless Keyboard",
        50,
        4500,
        3500,
        "A sleek and silent wireless keyboard.",
    ),
    (
        "MS002",
        "Ergonomic Mouse",
        75,
        3000,
        2200,
        "A comfortable mouse for all-day use.",
    ),
    (
        "MN003",
        "27-inch 4K Monitor",
        20,
        35_000,
        30_000,
        "Crystal clear 4K resolution monitor.",
    ),
    (
        "WC004",
        "1080p Webcam",
        40,
        6000,
        4800,
        "High-definition webcam for video calls.",
    ),
    (
        "HS005",
        "Noise-Cancelling Headphones",
        30,
        12_000,
        9_500,
        "Immersive sound with active noise cancellation.",
    ),
    (
        "LP006",
        "Laptop Stand",
        100,
        2500,
        1800,
        "Adjustable aluminum laptop stand.",
    ),
];

/// Demo customer book: (name, type, phone, credit limit cents, opening balance cents).
const DEMO_CUSTOMERS: &[(&str, CustomerType, &str, i64, i64)] = &[
    ("John Doe (Retail)", CustomerType::Retail, "123-456-7890", 0, 0),
    (
        "Tech Solutions Inc (Wholesale)",
        CustomerType::Wholesale,
        "987-654-3210",
        500_000,
        125_050,
    ),
    (
        "Jane Smith (Retail)",
        CustomerType::Retail,
        "555-555-5555",
        50_000,
        7_520,
    ),
    (
        "Gadget World (Wholesale)",
        CustomerType::Wholesale,
        "111-222-3333",
        1_000_000,
        0,
    ),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut dir = String::from("./quill_data");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--dir" | "-d" => {
                if i + 1 < args.len() {
                    dir = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Quill POS Seed Data Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --dir <PATH>   Store directory (default: ./quill_data)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Quill POS Seed Data Loader");
    println!("=============================");
    println!("Store: {}", dir);
    println!();

    let store = Store::open(&dir)?;
    println!("✓ Opened store");

    // Idempotence: a non-empty store is left alone
    let existing_products = store.products().count();
    let existing_customers = store.customers().count();
    if existing_products > 0 || existing_customers > 0 {
        println!(
            "⚠ Store already has {} products and {} customers",
            existing_products, existing_customers
        );
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the store directory to regenerate.");
        return Ok(());
    }

    println!();
    println!("Loading demo catalog...");
    for (item_code, name, stock, retail_cents, wholesale_cents, description) in DEMO_PRODUCTS {
        let product = store.products().insert(ProductDraft {
            item_code: item_code.to_string(),
            name: name.to_string(),
            stock: *stock,
            retail_price_cents: *retail_cents,
            wholesale_price_cents: *wholesale_cents,
            description: Some(description.to_string()),
        })?;
        println!("  + {} ({})", product.name, product.item_code);
    }

    println!();
    println!("Loading demo customer book...");
    for (name, customer_type, phone, credit_limit_cents, opening_balance_cents) in DEMO_CUSTOMERS {
        let customer = store.customers().insert(CustomerDraft {
            name: name.to_string(),
            customer_type: *customer_type,
            phone: phone.to_string(),
            credit_limit_cents: *credit_limit_cents,
            opening_balance_cents: *opening_balance_cents,
        })?;
        println!("  + {}", customer.name);
    }

    println!();
    println!(
        "✓ Seed complete: {} products, {} customers",
        store.products().count(),
        store.customers().count()
    );

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=quill=trace` - Show trace for quill crates only
/// - Default: INFO level
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,quill=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
