//! # Receipt Module
//!
//! Plain-text rendering of a finalized bill: the textual core of the
//! printable invoice. Rasterizing this into a paginated PDF is an external
//! concern and lives outside this crate.

use std::fmt::Write;

use crate::money::Money;
use crate::types::{Bill, CustomerType};

/// Width of the rendered document in characters.
const WIDTH: usize = 72;

/// Renders a finalized bill as a fixed-width text document.
///
/// Layout follows the printed invoice: header with the invoice kind (retail
/// or wholesale), billed-to block, numbered line-item table, then the
/// totals column. The amount-due row appears only when something actually
/// went on the customer's account.
///
/// ## Example
/// ```rust,ignore
/// let doc = receipt::render(&bill);
/// std::fs::write(format!("invoice-{}.txt", bill.bill_number), doc)?;
/// ```
pub fn render(bill: &Bill) -> String {
    let title = match bill.customer_type {
        CustomerType::Retail => "Retail Invoice",
        CustomerType::Wholesale => "Wholesale Invoice",
    };
    let rate_header = match bill.customer_type {
        CustomerType::Retail => "Retail Rate",
        CustomerType::Wholesale => "Wholesale Rate",
    };

    let mut out = String::new();

    // Infallible: writing to a String cannot error.
    let _ = writeln!(out, "{:^WIDTH$}", "QUILL POS");
    let _ = writeln!(out, "{:^WIDTH$}", title);
    let _ = writeln!(out);
    let _ = writeln!(out, "Billed To: {}", bill.customer_name);
    let _ = writeln!(out, "Bill No:   {}", bill.bill_number);
    let _ = writeln!(out, "Date:      {}", bill.date.format("%Y-%m-%d"));
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "{:>3}  {:<30} {:>5} {:>14} {:>12}",
        "#", "Item Name", "Qty", rate_header, "Total"
    );
    let _ = writeln!(out, "{}", "=".repeat(WIDTH));
    for (index, item) in bill.items.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:<30} {:>5} {:>14} {:>12}",
            index + 1,
            truncate(&item.name, 30),
            item.quantity,
            item.rate().to_string(),
            item.total().to_string(),
        );
    }
    let _ = writeln!(out, "{}", "-".repeat(WIDTH));

    totals_row(&mut out, "Subtotal:", bill.sub_total());
    totals_row(
        &mut out,
        &format!("Discount ({}%):", bill.discount().percentage()),
        bill.discount_amount(),
    );
    totals_row(&mut out, "Grand Total:", bill.grand_total());
    totals_row(&mut out, "Amount Paid:", bill.amount_paid());
    if bill.has_amount_due() {
        totals_row(&mut out, "Amount Due:", bill.amount_due());
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{:^WIDTH$}", "Thank you for your business!");
    let _ = writeln!(out, "{:^WIDTH$}", "Quill POS - Your Business Partner");

    out
}

fn totals_row(out: &mut String, label: &str, amount: Money) {
    let _ = writeln!(out, "{:>width$} {:>12}", label, amount.to_string(), width = WIDTH - 13);
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max.saturating_sub(1)).collect::<String>() + "…"
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BillItem, PaymentMethod};
    use chrono::{TimeZone, Utc};

    fn bill(amount_due_cents: i64) -> Bill {
        Bill {
            id: "b1".to_string(),
            bill_number: "INV-260305-ab12cd".to_string(),
            date: Utc.with_ymd_and_hms(2026, 3, 5, 10, 30, 0).unwrap(),
            customer_id: "c1".to_string(),
            customer_name: "Jane Smith".to_string(),
            customer_type: CustomerType::Retail,
            items: vec![BillItem {
                product_id: "p1".to_string(),
                name: "Wireless Keyboard".to_string(),
                quantity: 2,
                rate_cents: 4500,
                total_cents: 9000,
            }],
            sub_total_cents: 9000,
            discount_bps: 1000,
            discount_amount_cents: 900,
            grand_total_cents: 8100,
            payment_method: if amount_due_cents > 0 {
                PaymentMethod::Credit
            } else {
                PaymentMethod::Cash
            },
            amount_paid_cents: 8100 - amount_due_cents,
            amount_due_cents,
        }
    }

    #[test]
    fn test_render_contains_document_fields() {
        let doc = render(&bill(0));

        assert!(doc.contains("Retail Invoice"));
        assert!(doc.contains("Retail Rate"));
        assert!(doc.contains("Jane Smith"));
        assert!(doc.contains("INV-260305-ab12cd"));
        assert!(doc.contains("2026-03-05"));
        assert!(doc.contains("Wireless Keyboard"));
        assert!(doc.contains("$45.00"));
        assert!(doc.contains("$90.00"));
        assert!(doc.contains("Discount (10%):"));
        assert!(doc.contains("$81.00"));
    }

    #[test]
    fn test_amount_due_row_only_when_owed() {
        let settled = render(&bill(0));
        assert!(!settled.contains("Amount Due:"));

        let owing = render(&bill(2100));
        assert!(owing.contains("Amount Due:"));
        assert!(owing.contains("$21.00"));
    }

    #[test]
    fn test_wholesale_headers() {
        let mut b = bill(0);
        b.customer_type = CustomerType::Wholesale;
        let doc = render(&b);
        assert!(doc.contains("Wholesale Invoice"));
        assert!(doc.contains("Wholesale Rate"));
    }
}
