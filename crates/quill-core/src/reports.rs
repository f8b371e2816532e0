//! # Reports Module
//!
//! Read-side projections over the bill, customer and payment collections.
//!
//! ## Design
//! Every function here is a pure derivation: no stored report state, no
//! caching, no side effects. Callers pass the collections in and get a
//! freshly computed projection back; computing the same projection twice
//! over unchanged inputs yields identical results.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Reporting Projections                               │
//! │                                                                         │
//! │  Bills ─────┬──► sales_totals      (total / retail / wholesale)         │
//! │             ├──► monthly_sales     (grand total per calendar month)     │
//! │             ├──► aged_receivables  (amount due per age band)            │
//! │             └──► sales_digest      (per-bill rows for the AI prompt)    │
//! │                                                                         │
//! │  Customers ─────► total outstanding (current ledger state, NOT a        │
//! │                   derivation from bill history)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::money::Money;
use crate::types::{Bill, Customer, CustomerType};

// =============================================================================
// Sales Totals
// =============================================================================

/// Headline sales figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesTotals {
    /// Σ grandTotal over all bills, in cents.
    pub total_cents: i64,
    /// Σ grandTotal over bills whose customer-type snapshot is Retail.
    pub retail_cents: i64,
    /// Σ grandTotal over bills whose customer-type snapshot is Wholesale.
    pub wholesale_cents: i64,
    /// Σ outstandingBalance over all customers. Reflects the current ledger
    /// state (bills raised it, payments lowered it), not a sum over bills.
    pub outstanding_cents: i64,
}

impl SalesTotals {
    /// Returns the all-sales total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Returns the outstanding total as Money.
    #[inline]
    pub fn outstanding(&self) -> Money {
        Money::from_cents(self.outstanding_cents)
    }
}

/// Computes the headline figures. Grouping uses the customer-type snapshot
/// frozen on each bill, so retyping a customer later does not rewrite past
/// sales.
pub fn sales_totals(bills: &[Bill], customers: &[Customer]) -> SalesTotals {
    let mut totals = SalesTotals::default();
    for bill in bills {
        totals.total_cents += bill.grand_total_cents;
        match bill.customer_type {
            CustomerType::Retail => totals.retail_cents += bill.grand_total_cents,
            CustomerType::Wholesale => totals.wholesale_cents += bill.grand_total_cents,
        }
    }
    totals.outstanding_cents = customers.iter().map(|c| c.outstanding_balance_cents).sum();
    totals
}

// =============================================================================
// Monthly Sales Series
// =============================================================================

/// One month's sales in the chronological series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySales {
    pub year: i32,
    /// 1-based calendar month.
    pub month: u32,
    pub total_cents: i64,
}

impl MonthlySales {
    /// Short label for charts and tables, e.g. "2026-03".
    pub fn label(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}

/// Groups bills by the (year, month) of their date and sums grand totals,
/// ordered chronologically. Months with no bills are absent, not zero.
pub fn monthly_sales(bills: &[Bill]) -> Vec<MonthlySales> {
    // BTreeMap keeps (year, month) keys sorted, which IS the chronology.
    let mut by_month: BTreeMap<(i32, u32), i64> = BTreeMap::new();
    for bill in bills {
        *by_month
            .entry((bill.date.year(), bill.date.month()))
            .or_insert(0) += bill.grand_total_cents;
    }
    by_month
        .into_iter()
        .map(|((year, month), total_cents)| MonthlySales {
            year,
            month,
            total_cents,
        })
        .collect()
}

// =============================================================================
// Aged Receivables
// =============================================================================

/// Receivables bucketed by whole days since the bill date.
///
/// Ages by *bill date*: an unpaid bill keeps aging against the date it was
/// issued, regardless of partial payments recorded since. Buckets are
/// recomputed fresh at every call, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgedReceivables {
    /// 0-30 days, in cents.
    pub days_0_30_cents: i64,
    /// 31-60 days, in cents.
    pub days_31_60_cents: i64,
    /// 61-90 days, in cents.
    pub days_61_90_cents: i64,
    /// Over 90 days, in cents.
    pub over_90_cents: i64,
}

impl AgedReceivables {
    /// The four bands as (label, cents) rows, oldest last.
    pub fn rows(&self) -> [(&'static str, i64); 4] {
        [
            ("0-30", self.days_0_30_cents),
            ("31-60", self.days_31_60_cents),
            ("61-90", self.days_61_90_cents),
            ("90+", self.over_90_cents),
        ]
    }
}

/// Buckets every bill with an amount due by its age in days at `today`.
pub fn aged_receivables(bills: &[Bill], today: DateTime<Utc>) -> AgedReceivables {
    let mut aged = AgedReceivables::default();
    for bill in bills.iter().filter(|b| b.has_amount_due()) {
        let age_days = (today - bill.date).num_days();
        if age_days <= 30 {
            aged.days_0_30_cents += bill.amount_due_cents;
        } else if age_days <= 60 {
            aged.days_31_60_cents += bill.amount_due_cents;
        } else if age_days <= 90 {
            aged.days_61_90_cents += bill.amount_due_cents;
        } else {
            aged.over_90_cents += bill.amount_due_cents;
        }
    }
    aged
}

// =============================================================================
// Sales Digest (AI insights input)
// =============================================================================

/// One bill's row in the digest handed to the insights prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesDigestRow {
    pub date: DateTime<Utc>,
    pub total_cents: i64,
    #[serde(rename = "type")]
    pub customer_type: CustomerType,
    /// Comma-joined "name (xQty)" list.
    pub items: String,
}

/// Builds the per-bill digest the AI insights call consumes.
pub fn sales_digest(bills: &[Bill]) -> Vec<SalesDigestRow> {
    bills
        .iter()
        .map(|bill| SalesDigestRow {
            date: bill.date,
            total_cents: bill.grand_total_cents,
            customer_type: bill.customer_type,
            items: bill
                .items
                .iter()
                .map(|i| format!("{} (x{})", i.name, i.quantity))
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect()
}

/// The digest serialized to JSON, ready for the insights prompt.
pub fn sales_digest_json(bills: &[Bill]) -> String {
    // A Vec of plain serializable rows cannot fail to serialize.
    serde_json::to_string(&sales_digest(bills)).unwrap_or_default()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BillItem, PaymentMethod};
    use chrono::TimeZone;

    fn bill(
        date: DateTime<Utc>,
        customer_type: CustomerType,
        grand_total_cents: i64,
        amount_due_cents: i64,
    ) -> Bill {
        Bill {
            id: "b".to_string(),
            bill_number: "INV-TEST".to_string(),
            date,
            customer_id: "c1".to_string(),
            customer_name: "Customer".to_string(),
            customer_type,
            items: vec![BillItem {
                product_id: "p1".to_string(),
                name: "Wireless Keyboard".to_string(),
                quantity: 2,
                rate_cents: grand_total_cents / 2,
                total_cents: grand_total_cents,
            }],
            sub_total_cents: grand_total_cents,
            discount_bps: 0,
            discount_amount_cents: 0,
            grand_total_cents,
            payment_method: if amount_due_cents > 0 {
                PaymentMethod::Credit
            } else {
                PaymentMethod::Cash
            },
            amount_paid_cents: grand_total_cents - amount_due_cents,
            amount_due_cents,
        }
    }

    fn customer(outstanding_cents: i64) -> Customer {
        Customer {
            id: "c1".to_string(),
            name: "Customer".to_string(),
            customer_type: CustomerType::Retail,
            phone: String::new(),
            credit_limit_cents: 0,
            outstanding_balance_cents: outstanding_cents,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_sales_totals_group_by_snapshot_type() {
        let bills = vec![
            bill(date(2026, 1, 5), CustomerType::Retail, 8100, 0),
            bill(date(2026, 1, 9), CustomerType::Wholesale, 20_000, 5_000),
            bill(date(2026, 2, 1), CustomerType::Retail, 1_900, 0),
        ];
        let customers = vec![customer(5_000), customer(1_250)];

        let totals = sales_totals(&bills, &customers);
        assert_eq!(totals.total_cents, 30_000);
        assert_eq!(totals.retail_cents, 10_000);
        assert_eq!(totals.wholesale_cents, 20_000);
        // Outstanding comes from customer balances, not bill history
        assert_eq!(totals.outstanding_cents, 6_250);
    }

    #[test]
    fn test_monthly_sales_chronological_across_years() {
        let bills = vec![
            bill(date(2026, 1, 5), CustomerType::Retail, 100, 0),
            bill(date(2025, 12, 20), CustomerType::Retail, 200, 0),
            bill(date(2026, 1, 9), CustomerType::Retail, 300, 0),
        ];

        let series = monthly_sales(&bills);
        assert_eq!(series.len(), 2);
        assert_eq!((series[0].year, series[0].month), (2025, 12));
        assert_eq!(series[0].total_cents, 200);
        assert_eq!((series[1].year, series[1].month), (2026, 1));
        assert_eq!(series[1].total_cents, 400);
        assert_eq!(series[1].label(), "2026-01");
    }

    #[test]
    fn test_aged_receivables_band_boundaries() {
        let today = date(2026, 8, 1);
        let bills = vec![
            bill(today - chrono::Duration::days(30), CustomerType::Retail, 0, 100),
            bill(today - chrono::Duration::days(31), CustomerType::Retail, 0, 200),
            bill(today - chrono::Duration::days(60), CustomerType::Retail, 0, 400),
            bill(today - chrono::Duration::days(61), CustomerType::Retail, 0, 800),
            bill(today - chrono::Duration::days(90), CustomerType::Retail, 0, 1_600),
            bill(today - chrono::Duration::days(91), CustomerType::Retail, 0, 3_200),
        ];

        let aged = aged_receivables(&bills, today);
        assert_eq!(aged.days_0_30_cents, 100);
        assert_eq!(aged.days_31_60_cents, 600);
        assert_eq!(aged.days_61_90_cents, 2_400);
        assert_eq!(aged.over_90_cents, 3_200);
    }

    #[test]
    fn test_aged_receivables_skips_settled_bills() {
        let today = date(2026, 8, 1);
        let bills = vec![
            bill(today - chrono::Duration::days(45), CustomerType::Retail, 5_000, 0),
            bill(today - chrono::Duration::days(45), CustomerType::Retail, 5_000, 700),
        ];

        let aged = aged_receivables(&bills, today);
        assert_eq!(aged.days_31_60_cents, 700);
        assert_eq!(
            aged.rows().iter().map(|(_, c)| c).sum::<i64>(),
            700
        );
    }

    #[test]
    fn test_projections_are_idempotent() {
        let today = date(2026, 8, 1);
        let bills = vec![
            bill(date(2026, 3, 5), CustomerType::Retail, 8100, 0),
            bill(date(2026, 4, 9), CustomerType::Wholesale, 20_000, 5_000),
        ];
        let customers = vec![customer(5_000)];

        assert_eq!(
            sales_totals(&bills, &customers),
            sales_totals(&bills, &customers)
        );
        assert_eq!(monthly_sales(&bills), monthly_sales(&bills));
        assert_eq!(
            aged_receivables(&bills, today),
            aged_receivables(&bills, today)
        );
        assert_eq!(sales_digest(&bills), sales_digest(&bills));
    }

    #[test]
    fn test_sales_digest_rows() {
        let bills = vec![bill(date(2026, 3, 5), CustomerType::Retail, 9000, 0)];
        let digest = sales_digest(&bills);

        assert_eq!(digest.len(), 1);
        assert_eq!(digest[0].items, "Wireless Keyboard (x2)");
        assert_eq!(digest[0].total_cents, 9000);

        let json = sales_digest_json(&bills);
        assert!(json.contains("\"type\":\"Retail\""));
        assert!(json.contains("Wireless Keyboard (x2)"));
    }

    #[test]
    fn test_empty_collections() {
        let totals = sales_totals(&[], &[]);
        assert_eq!(totals, SalesTotals::default());
        assert!(monthly_sales(&[]).is_empty());
        assert_eq!(
            aged_receivables(&[], Utc::now()),
            AgedReceivables::default()
        );
    }
}
