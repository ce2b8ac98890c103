// 🔗 Joiner - denormalizes sale lines with their header and customer
//
// Left-join policy: every sale line yields exactly one merged row. A line
// whose sale is unknown carries no header; a header whose customer is
// unknown carries no customer. Neither case is an error.

use crate::entities::{Customer, CustomerId, ProductId, SaleHeader, SaleId, SaleLine};
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

// ============================================================================
// MERGED ROW
// ============================================================================

/// Header-side fields joined onto a line
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderPart {
    pub date: NaiveDate,
    pub customer_id: CustomerId,
    pub payment_method: String,
}

/// Customer-side fields joined onto a line.
///
/// Kept apart from the header part so customer columns never shadow
/// header columns with the same meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerPart {
    pub customer_id: CustomerId,
    pub name: String,
    pub signup_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergedRow {
    pub sale_id: SaleId,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub amount: f64,
    pub header: Option<HeaderPart>,
    pub customer: Option<CustomerPart>,
}

impl MergedRow {
    /// Calendar month of the sale, if the header joined
    pub fn month(&self) -> Option<u32> {
        self.header.as_ref().map(|h| h.date.month())
    }
}

// ============================================================================
// MERGED VIEW
// ============================================================================

/// One merged row per sale line, in sale-line order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedView {
    rows: Vec<MergedRow>,
}

impl MergedView {
    pub fn rows(&self) -> &[MergedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Lines whose sale_id matched no header
    pub fn unmatched_headers(&self) -> usize {
        self.rows.iter().filter(|r| r.header.is_none()).count()
    }

    /// Lines with a header whose customer_id matched no customer
    pub fn unmatched_customers(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.header.is_some() && r.customer.is_none())
            .count()
    }
}

/// Left-join lines → headers (on sale_id) → customers (on customer_id).
pub fn build_merged_view(
    lines: &[SaleLine],
    headers: &[SaleHeader],
    customers: &[Customer],
) -> MergedView {
    let headers_by_id: HashMap<SaleId, &SaleHeader> =
        headers.iter().map(|h| (h.sale_id, h)).collect();
    let customers_by_id: HashMap<CustomerId, &Customer> =
        customers.iter().map(|c| (c.customer_id, c)).collect();

    let rows = lines
        .iter()
        .map(|line| {
            let header = headers_by_id.get(&line.sale_id).copied();
            let customer = header.and_then(|h| customers_by_id.get(&h.customer_id).copied());

            MergedRow {
                sale_id: line.sale_id,
                product_id: line.product_id,
                product_name: line.product_name.clone(),
                quantity: line.quantity,
                amount: line.amount,
                header: header.map(|h| HeaderPart {
                    date: h.date,
                    customer_id: h.customer_id,
                    payment_method: h.payment_method.clone(),
                }),
                customer: customer.map(|c| CustomerPart {
                    customer_id: c.customer_id,
                    name: c.name.clone(),
                    signup_date: c.signup_date,
                }),
            }
        })
        .collect();

    MergedView { rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_merge_full_match() {
        let headers = vec![SaleHeader::new(1, date(2024, 1, 5), 10, "cash")];
        let customers = vec![Customer::new(10, "Ana", date(2023, 6, 1))];
        let lines = vec![
            SaleLine::new(1, 100, "Pen", 3, 9.0),
            SaleLine::new(1, 200, "Pad", 1, 5.0),
        ];

        let view = build_merged_view(&lines, &headers, &customers);

        assert_eq!(view.len(), 2);
        assert_eq!(view.unmatched_headers(), 0);
        assert_eq!(view.unmatched_customers(), 0);

        let row = &view.rows()[1];
        assert_eq!(row.product_name, "Pad");
        assert_eq!(row.month(), Some(1));
        assert_eq!(row.header.as_ref().unwrap().payment_method, "cash");
        assert_eq!(row.customer.as_ref().unwrap().name, "Ana");
    }

    #[test]
    fn test_merge_keeps_unmatched_lines() {
        let headers = vec![SaleHeader::new(1, date(2024, 1, 5), 99, "cash")];
        let customers = vec![Customer::new(10, "Ana", date(2023, 6, 1))];
        let lines = vec![
            SaleLine::new(1, 100, "Pen", 3, 9.0),
            SaleLine::new(7, 100, "Pen", 1, 3.0),
        ];

        let view = build_merged_view(&lines, &headers, &customers);

        // Left join: both lines survive
        assert_eq!(view.len(), 2);

        // Line 1: header found, customer 99 unknown
        assert!(view.rows()[0].header.is_some());
        assert!(view.rows()[0].customer.is_none());

        // Line 2: sale 7 unknown, so no customer either
        assert!(view.rows()[1].header.is_none());
        assert!(view.rows()[1].customer.is_none());
        assert_eq!(view.rows()[1].month(), None);

        assert_eq!(view.unmatched_headers(), 1);
        assert_eq!(view.unmatched_customers(), 1);
    }

    #[test]
    fn test_merge_preserves_line_order() {
        let headers = vec![
            SaleHeader::new(2, date(2024, 2, 1), 10, "card"),
            SaleHeader::new(1, date(2024, 1, 1), 10, "cash"),
        ];
        let lines = vec![
            SaleLine::new(1, 100, "A", 1, 1.0),
            SaleLine::new(2, 100, "B", 1, 1.0),
            SaleLine::new(1, 100, "C", 1, 1.0),
        ];

        let view = build_merged_view(&lines, &headers, &[]);
        let names: Vec<&str> = view.rows().iter().map(|r| r.product_name.as_str()).collect();

        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_merge_empty() {
        let view = build_merged_view(&[], &[], &[]);
        assert!(view.is_empty());
    }
}
