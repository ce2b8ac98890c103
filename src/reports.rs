// 📊 Reporters - six read-only aggregations over a loaded snapshot
//
// Every reporter takes &Ready, so "data not loaded" cannot reach this
// module. Each returns a plain report value; Display renders it as the
// console table.

use crate::entities::{CustomerId, ProductId, SaleId};
use crate::format::{currency, money, percent, truncate};
use crate::loader::Ready;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

pub const DEFAULT_TOP_N: usize = 10;

const RULE_WIDTH: usize = 50;

// ============================================================================
// TOP-N
// ============================================================================

/// How many rows a ranking report keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopN(usize);

impl TopN {
    pub fn new(n: usize) -> Self {
        TopN(n)
    }

    /// Parse user input; empty or non-numeric input falls back to the
    /// default without complaint.
    pub fn parse(input: &str) -> Self {
        input
            .trim()
            .parse::<usize>()
            .map(TopN)
            .unwrap_or_default()
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for TopN {
    fn default() -> Self {
        TopN(DEFAULT_TOP_N)
    }
}

impl fmt::Display for TopN {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// REPORT KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Overview,
    TopProducts(TopN),
    ByCategory,
    TopCustomers(TopN),
    PaymentMethods,
    ByMonth,
}

impl ReportKind {
    /// The complete analysis, in presentation order
    pub fn full_analysis() -> [ReportKind; 6] {
        [
            ReportKind::Overview,
            ReportKind::ByMonth,
            ReportKind::TopProducts(TopN::default()),
            ReportKind::ByCategory,
            ReportKind::TopCustomers(TopN::default()),
            ReportKind::PaymentMethods,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Overview => "Sales overview",
            ReportKind::TopProducts(_) => "Best-selling products",
            ReportKind::ByCategory => "Sales by category",
            ReportKind::TopCustomers(_) => "Most active customers",
            ReportKind::PaymentMethods => "Payment methods",
            ReportKind::ByMonth => "Sales by month",
        }
    }
}

/// Run one reporter and render its table
pub fn render(ready: &Ready, kind: ReportKind) -> String {
    match kind {
        ReportKind::Overview => overview(ready).to_string(),
        ReportKind::TopProducts(n) => top_products(ready, n).to_string(),
        ReportKind::ByCategory => by_category(ready).to_string(),
        ReportKind::TopCustomers(n) => top_customers(ready, n).to_string(),
        ReportKind::PaymentMethods => payment_methods(ready).to_string(),
        ReportKind::ByMonth => by_month(ready).to_string(),
    }
}

/// Render every report of the complete analysis, one after another
pub fn render_full_analysis(ready: &Ready) -> String {
    ReportKind::full_analysis()
        .iter()
        .map(|kind| render(ready, *kind))
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// SHARED HELPERS
// ============================================================================

/// Name of a calendar month; the dataset covers January to June
pub fn month_label(month: u32) -> String {
    match month {
        1 => "January".to_string(),
        2 => "February".to_string(),
        3 => "March".to_string(),
        4 => "April".to_string(),
        5 => "May".to_string(),
        6 => "June".to_string(),
        other => format!("Month {}", other),
    }
}

fn write_banner(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(f)?;
    writeln!(f, "{}", rule)?;
    writeln!(f, "{}", format!("{:^width$}", title, width = RULE_WIDTH).trim_end())?;
    writeln!(f, "{}", rule)
}

/// Groups that remember the order keys were first seen in
struct OrderedGroups<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K: Eq + Hash + Clone, V: Default> OrderedGroups<K, V> {
    fn new() -> Self {
        OrderedGroups {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    fn entry(&mut self, key: &K) -> &mut V {
        let slot = match self.index.get(key) {
            Some(slot) => *slot,
            None => {
                self.entries.push((key.clone(), V::default()));
                self.index.insert(key.clone(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[slot].1
    }

    fn into_entries(self) -> Vec<(K, V)> {
        self.entries
    }
}

#[derive(Default)]
struct Totals {
    quantity: u64,
    amount: f64,
    sales: HashSet<SaleId>,
}

// ============================================================================
// OVERVIEW
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub sales: usize,
    pub customers: usize,
    pub products: usize,
    pub total_amount: f64,
    /// First and last sale date
    pub period: Option<(NaiveDate, NaiveDate)>,
    pub sales_per_month: BTreeMap<u32, usize>,
    /// Lines that matched no sale header
    pub unmatched_lines: usize,
}

pub fn overview(ready: &Ready) -> Overview {
    let headers = ready.headers();

    let first = headers.iter().map(|h| h.date).min();
    let last = headers.iter().map(|h| h.date).max();

    let mut sales_per_month = BTreeMap::new();
    for header in headers {
        *sales_per_month.entry(header.month()).or_insert(0) += 1;
    }

    Overview {
        sales: headers.len(),
        customers: ready.customers().len(),
        products: ready.products().len(),
        total_amount: ready.lines().iter().map(|l| l.amount).sum(),
        period: first.zip(last),
        sales_per_month,
        unmatched_lines: ready.merged().unmatched_headers(),
    }
}

impl fmt::Display for Overview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_banner(f, "SALES OVERVIEW")?;

        writeln!(f, "• Registered sales: {}", self.sales)?;
        writeln!(f, "• Customers: {}", self.customers)?;
        writeln!(f, "• Products: {}", self.products)?;
        writeln!(f, "• Total amount sold: {}", currency(self.total_amount))?;

        match self.period {
            Some((first, last)) => writeln!(
                f,
                "• Period analyzed: {} - {}",
                first.format("%d/%m/%Y"),
                last.format("%d/%m/%Y")
            )?,
            None => writeln!(f, "• Period analyzed: no sales")?,
        }

        let per_month: Vec<String> = self
            .sales_per_month
            .iter()
            .map(|(month, count)| format!("{}: {}", month_label(*month), count))
            .collect();
        writeln!(f, "• Sales per month: {}", per_month.join(", "))?;

        if self.unmatched_lines > 0 {
            writeln!(f, "• Lines without a matching sale: {}", self.unmatched_lines)?;
        }

        Ok(())
    }
}

// ============================================================================
// TOP PRODUCTS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub name: String,
    pub quantity: u64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopProducts {
    pub n: TopN,
    pub rows: Vec<ProductRow>,
}

/// Products by units sold, descending; ties keep first-seen order
pub fn top_products(ready: &Ready, n: TopN) -> TopProducts {
    let mut groups: OrderedGroups<String, Totals> = OrderedGroups::new();
    for line in ready.lines() {
        let totals = groups.entry(&line.product_name);
        totals.quantity += u64::from(line.quantity);
        totals.amount += line.amount;
    }

    let mut rows: Vec<ProductRow> = groups
        .into_entries()
        .into_iter()
        .map(|(name, totals)| ProductRow {
            name,
            quantity: totals.quantity,
            amount: totals.amount,
        })
        .collect();

    rows.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    rows.truncate(n.get());

    TopProducts { n, rows }
}

impl fmt::Display for TopProducts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_banner(f, &format!("TOP {} BEST-SELLING PRODUCTS", self.n))?;

        if self.rows.is_empty() {
            return writeln!(f, "  (no sales)");
        }

        for (i, row) in self.rows.iter().enumerate() {
            writeln!(
                f,
                "{:>2}. {:<30} | Quantity: {:>4} | Total: ${:>10}",
                i + 1,
                truncate(&row.name, 30),
                row.quantity,
                money(row.amount)
            )?;
        }
        Ok(())
    }
}

// ============================================================================
// BY CATEGORY
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRow {
    pub category: String,
    /// Distinct sales containing the category
    pub sales: usize,
    pub quantity: u64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ByCategory {
    /// Ascending by category name
    pub rows: Vec<CategoryRow>,
    /// Lines whose product is missing from the catalog
    pub uncategorized: Option<CategoryRow>,
}

pub const UNCATEGORIZED: &str = "(uncategorized)";

pub fn by_category(ready: &Ready) -> ByCategory {
    let categories: HashMap<ProductId, &str> = ready
        .products()
        .iter()
        .map(|p| (p.product_id, p.category.as_str()))
        .collect();

    let mut groups: BTreeMap<&str, Totals> = BTreeMap::new();
    let mut unmatched: Option<Totals> = None;

    for line in ready.lines() {
        let totals = match categories.get(&line.product_id) {
            Some(category) => groups.entry(*category).or_default(),
            None => unmatched.get_or_insert_with(Totals::default),
        };
        totals.quantity += u64::from(line.quantity);
        totals.amount += line.amount;
        totals.sales.insert(line.sale_id);
    }

    let to_row = |category: &str, totals: Totals| CategoryRow {
        category: category.to_string(),
        sales: totals.sales.len(),
        quantity: totals.quantity,
        amount: totals.amount,
    };

    ByCategory {
        rows: groups
            .into_iter()
            .map(|(category, totals)| to_row(category, totals))
            .collect(),
        uncategorized: unmatched.map(|totals| to_row(UNCATEGORIZED, totals)),
    }
}

impl fmt::Display for ByCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_banner(f, "SALES BY CATEGORY")?;

        if self.rows.is_empty() && self.uncategorized.is_none() {
            return writeln!(f, "  (no sales)");
        }

        for row in self.rows.iter().chain(self.uncategorized.iter()) {
            writeln!(f, "• {}:", row.category)?;
            writeln!(f, "  - Sales: {}", row.sales)?;
            writeln!(f, "  - Units: {}", row.quantity)?;
            writeln!(f, "  - Amount: {}", currency(row.amount))?;
            writeln!(f)?;
        }
        Ok(())
    }
}

// ============================================================================
// TOP CUSTOMERS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRow {
    pub customer_id: CustomerId,
    pub name: String,
    /// Distinct sales
    pub purchases: usize,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopCustomers {
    pub n: TopN,
    pub rows: Vec<CustomerRow>,
}

/// Customers by amount spent, descending. Only merged rows with a known
/// customer take part.
pub fn top_customers(ready: &Ready, n: TopN) -> TopCustomers {
    let mut groups: OrderedGroups<(CustomerId, String), Totals> = OrderedGroups::new();
    for row in ready.merged().rows() {
        let Some(customer) = &row.customer else {
            continue;
        };
        let totals = groups.entry(&(customer.customer_id, customer.name.clone()));
        totals.amount += row.amount;
        totals.sales.insert(row.sale_id);
    }

    let mut rows: Vec<CustomerRow> = groups
        .into_entries()
        .into_iter()
        .map(|((customer_id, name), totals)| CustomerRow {
            customer_id,
            name,
            purchases: totals.sales.len(),
            amount: totals.amount,
        })
        .collect();

    rows.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    rows.truncate(n.get());

    TopCustomers { n, rows }
}

impl fmt::Display for TopCustomers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_banner(f, &format!("TOP {} MOST ACTIVE CUSTOMERS", self.n))?;

        if self.rows.is_empty() {
            return writeln!(f, "  (no sales)");
        }

        for (i, row) in self.rows.iter().enumerate() {
            writeln!(
                f,
                "{:>2}. {:<25} | Purchases: {:>2} | Total: ${:>10}",
                i + 1,
                truncate(&row.name, 25),
                row.purchases,
                money(row.amount)
            )?;
        }
        Ok(())
    }
}

// ============================================================================
// PAYMENT METHODS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRow {
    pub method: String,
    pub sales: usize,
    pub customers: usize,
    /// Share of all sales, 0-100
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentMethods {
    pub total_sales: usize,
    pub rows: Vec<PaymentRow>,
}

pub fn payment_methods(ready: &Ready) -> PaymentMethods {
    #[derive(Default)]
    struct Usage {
        sales: usize,
        customers: HashSet<CustomerId>,
    }

    let mut groups: OrderedGroups<String, Usage> = OrderedGroups::new();
    for header in ready.headers() {
        let usage = groups.entry(&header.payment_method);
        usage.sales += 1;
        usage.customers.insert(header.customer_id);
    }

    let total_sales = ready.headers().len();
    let mut rows: Vec<PaymentRow> = groups
        .into_entries()
        .into_iter()
        .map(|(method, usage)| PaymentRow {
            method,
            sales: usage.sales,
            customers: usage.customers.len(),
            percent: usage.sales as f64 / total_sales as f64 * 100.0,
        })
        .collect();

    rows.sort_by(|a, b| b.sales.cmp(&a.sales));

    PaymentMethods { total_sales, rows }
}

impl fmt::Display for PaymentMethods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_banner(f, "MOST POPULAR PAYMENT METHODS")?;

        if self.rows.is_empty() {
            return writeln!(f, "  (no sales)");
        }

        for row in &self.rows {
            writeln!(
                f,
                "• {:<15}: {:>3} sales ({}) | {} unique customers",
                row.method,
                row.sales,
                percent(row.percent),
                row.customers
            )?;
        }
        Ok(())
    }
}

// ============================================================================
// BY MONTH
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct MonthRow {
    /// Calendar month, 1-12
    pub month: u32,
    pub sales: usize,
    pub amount: f64,
    pub quantity: u64,
}

impl MonthRow {
    pub fn label(&self) -> String {
        month_label(self.month)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ByMonth {
    /// Ascending by month
    pub rows: Vec<MonthRow>,
}

/// Monthly totals over the merged view. Lines without a sale header have
/// no date and are left out.
pub fn by_month(ready: &Ready) -> ByMonth {
    let mut groups: BTreeMap<u32, Totals> = BTreeMap::new();
    for row in ready.merged().rows() {
        let Some(month) = row.month() else {
            continue;
        };
        let totals = groups.entry(month).or_default();
        totals.amount += row.amount;
        totals.quantity += u64::from(row.quantity);
        totals.sales.insert(row.sale_id);
    }

    ByMonth {
        rows: groups
            .into_iter()
            .map(|(month, totals)| MonthRow {
                month,
                sales: totals.sales.len(),
                amount: totals.amount,
                quantity: totals.quantity,
            })
            .collect(),
    }
}

impl fmt::Display for ByMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_banner(f, "SALES BY MONTH")?;

        if self.rows.is_empty() {
            return writeln!(f, "  (no sales)");
        }

        for row in &self.rows {
            writeln!(
                f,
                "• {:<10}: {:>2} sales | ${:>10} | {:>3} units",
                row.label(),
                row.sales,
                money(row.amount),
                row.quantity
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Customer, Product, SaleHeader, SaleLine};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// One cash sale in January: 3 pens for 9.00 and a pad for 5.00
    fn create_single_sale() -> Ready {
        Ready::from_tables(
            vec![SaleHeader::new(1, date(2024, 1, 5), 10, "cash")],
            vec![
                SaleLine::new(1, 100, "Pen", 3, 9.0).with_unit_price(3.0),
                SaleLine::new(1, 200, "Pad", 1, 5.0).with_unit_price(5.0),
            ],
            vec![
                Product::new(100, "Stationery").with_name("Pen"),
                Product::new(200, "Stationery").with_name("Pad"),
            ],
            vec![
                Customer::new(10, "Ana Ruiz", date(2023, 6, 1)),
                Customer::new(11, "Luis Paz", date(2023, 7, 1)),
            ],
        )
        .unwrap()
    }

    /// Several sales across months, methods, and customers.
    /// Headers are deliberately out of date order.
    fn create_test_ready() -> Ready {
        Ready::from_tables(
            vec![
                SaleHeader::new(3, date(2024, 3, 2), 11, "card"),
                SaleHeader::new(1, date(2024, 1, 5), 10, "cash"),
                SaleHeader::new(2, date(2024, 1, 20), 11, "card"),
                SaleHeader::new(4, date(2024, 8, 9), 12, "transfer"),
            ],
            vec![
                SaleLine::new(1, 100, "Pen", 3, 9.0),
                SaleLine::new(1, 200, "Pad", 1, 5.0),
                SaleLine::new(2, 300, "Ink", 3, 30.0),
                SaleLine::new(3, 200, "Pad", 4, 20.0),
                SaleLine::new(4, 999, "Mystery", 1, 1.0),
                SaleLine::new(9, 100, "Pen", 1, 3.0),
            ],
            vec![
                Product::new(100, "Stationery"),
                Product::new(200, "Stationery"),
                Product::new(300, "Consumables"),
            ],
            vec![
                Customer::new(10, "Ana Ruiz", date(2023, 6, 1)),
                Customer::new(11, "Luis Paz", date(2023, 7, 1)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_top_n_parse() {
        assert_eq!(TopN::parse("5"), TopN::new(5));
        assert_eq!(TopN::parse(" 3 "), TopN::new(3));
        assert_eq!(TopN::parse(""), TopN::new(DEFAULT_TOP_N));
        assert_eq!(TopN::parse("many"), TopN::new(DEFAULT_TOP_N));
        assert_eq!(TopN::parse("-2"), TopN::new(DEFAULT_TOP_N));
        assert_eq!(TopN::parse("2.5"), TopN::new(DEFAULT_TOP_N));
    }

    #[test]
    fn test_overview_single_sale() {
        let report = overview(&create_single_sale());

        assert_eq!(report.sales, 1);
        assert_eq!(report.customers, 2);
        assert_eq!(report.products, 2);
        assert_eq!(report.total_amount, 14.0);
        assert_eq!(report.period, Some((date(2024, 1, 5), date(2024, 1, 5))));
        assert_eq!(report.sales_per_month.get(&1), Some(&1));
        assert_eq!(report.unmatched_lines, 0);

        let text = report.to_string();
        assert!(text.contains("• Total amount sold: $14.00"));
        assert!(text.contains("• Registered sales: 1"));
        assert!(text.contains("• Period analyzed: 05/01/2024 - 05/01/2024"));
        assert!(text.contains("• Sales per month: January: 1"));
        assert!(!text.contains("without a matching sale"));
    }

    #[test]
    fn test_overview_flags_unmatched_lines() {
        let report = overview(&create_test_ready());

        assert_eq!(report.sales, 4);
        assert_eq!(report.total_amount, 68.0);
        assert_eq!(report.period, Some((date(2024, 1, 5), date(2024, 8, 9))));
        assert_eq!(report.unmatched_lines, 1);
        assert!(report
            .to_string()
            .contains("• Sales per month: January: 2, March: 1, Month 8: 1"));
        assert!(report.to_string().contains("• Lines without a matching sale: 1"));
    }

    #[test]
    fn test_overview_empty() {
        let ready = Ready::from_tables(vec![], vec![], vec![], vec![]).unwrap();
        let report = overview(&ready);

        assert_eq!(report.period, None);
        assert_eq!(report.total_amount, 0.0);
        assert!(report.to_string().contains("• Period analyzed: no sales"));
    }

    #[test]
    fn test_by_month_single_sale() {
        let report = by_month(&create_single_sale());

        assert_eq!(report.rows.len(), 1);
        let january = &report.rows[0];
        assert_eq!(january.label(), "January");
        assert_eq!(january.sales, 1);
        assert_eq!(january.amount, 14.0);
        assert_eq!(january.quantity, 4);
    }

    #[test]
    fn test_by_month_ascending_and_skips_orphans() {
        let report = by_month(&create_test_ready());
        let months: Vec<u32> = report.rows.iter().map(|r| r.month).collect();

        assert_eq!(months, vec![1, 3, 8]);

        // January: sales 1 and 2
        assert_eq!(report.rows[0].sales, 2);
        assert_eq!(report.rows[0].amount, 44.0);
        assert_eq!(report.rows[0].quantity, 7);

        // Orphan line (sale 9) has no date
        let total: f64 = report.rows.iter().map(|r| r.amount).sum();
        assert_eq!(total, 65.0);

        assert!(report.to_string().contains("• Month 8   :  1 sales"));
    }

    #[test]
    fn test_by_month_ascending_with_lines_out_of_order() {
        let ready = Ready::from_tables(
            vec![
                SaleHeader::new(1, date(2024, 9, 3), 10, "cash"),
                SaleHeader::new(2, date(2024, 5, 14), 10, "card"),
                SaleHeader::new(3, date(2024, 2, 27), 10, "cash"),
            ],
            vec![
                SaleLine::new(1, 100, "Pen", 1, 3.0),
                SaleLine::new(2, 100, "Pen", 2, 6.0),
                SaleLine::new(3, 200, "Pad", 4, 20.0),
                SaleLine::new(1, 200, "Pad", 1, 5.0),
            ],
            vec![],
            vec![],
        )
        .unwrap();

        let report = by_month(&ready);
        let months: Vec<u32> = report.rows.iter().map(|r| r.month).collect();

        assert_eq!(months, vec![2, 5, 9]);
        assert_eq!(report.rows[2].amount, 8.0);
        assert_eq!(report.rows[2].quantity, 2);
        assert_eq!(report.rows[2].sales, 1);
    }

    #[test]
    fn test_top_products_order_and_truncation() {
        let ready = create_test_ready();
        let report = top_products(&ready, TopN::new(2));

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].name, "Pad");
        assert_eq!(report.rows[0].quantity, 5);
        assert_eq!(report.rows[0].amount, 25.0);

        // Pen: 3 + 1 units, ahead of Ink with 3
        assert_eq!(report.rows[1].name, "Pen");
        assert_eq!(report.rows[1].quantity, 4);
    }

    #[test]
    fn test_top_products_ties_keep_input_order() {
        let ready = Ready::from_tables(
            vec![SaleHeader::new(1, date(2024, 2, 1), 10, "cash")],
            vec![
                SaleLine::new(1, 1, "Zeta", 2, 2.0),
                SaleLine::new(1, 2, "Alfa", 2, 2.0),
                SaleLine::new(1, 3, "Beta", 5, 5.0),
                SaleLine::new(1, 4, "Gama", 2, 2.0),
            ],
            vec![],
            vec![],
        )
        .unwrap();

        let report = top_products(&ready, TopN::default());
        let names: Vec<&str> = report.rows.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names, vec!["Beta", "Zeta", "Alfa", "Gama"]);
    }

    #[test]
    fn test_top_products_default_from_bad_input() {
        let lines: Vec<SaleLine> = (0..15u64)
            .map(|i| SaleLine::new(1, i, &format!("Product {}", i), 1, 1.0))
            .collect();
        let ready = Ready::from_tables(vec![], lines, vec![], vec![]).unwrap();

        let report = top_products(&ready, TopN::parse("lots"));

        assert_eq!(report.rows.len(), DEFAULT_TOP_N);
        assert!(report.to_string().contains("TOP 10 BEST-SELLING PRODUCTS"));
    }

    #[test]
    fn test_top_products_render() {
        let text = top_products(&create_single_sale(), TopN::default()).to_string();

        assert!(text.contains(&format!(
            " 1. {:<30} | Quantity:    3 | Total: $      9.00",
            "Pen"
        )));
    }

    #[test]
    fn test_by_category() {
        let report = by_category(&create_test_ready());

        let names: Vec<&str> = report.rows.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(names, vec!["Consumables", "Stationery"]);

        let stationery = &report.rows[1];
        // Sales 1, 3 and orphan 9
        assert_eq!(stationery.sales, 3);
        assert_eq!(stationery.quantity, 9);
        assert_eq!(stationery.amount, 37.0);

        let uncategorized = report.uncategorized.as_ref().unwrap();
        assert_eq!(uncategorized.category, UNCATEGORIZED);
        assert_eq!(uncategorized.quantity, 1);
        assert_eq!(uncategorized.sales, 1);

        let text = report.to_string();
        assert!(text.contains("• Stationery:\n  - Sales: 3\n  - Units: 9\n  - Amount: $37.00"));
        assert!(text.contains("• (uncategorized):"));
    }

    #[test]
    fn test_by_category_all_known() {
        let report = by_category(&create_single_sale());

        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].sales, 1);
        assert_eq!(report.rows[0].quantity, 4);
        assert!(report.uncategorized.is_none());
    }

    #[test]
    fn test_top_customers_keeps_biggest_spender() {
        let ready = Ready::from_tables(
            vec![
                SaleHeader::new(1, date(2024, 1, 5), 10, "cash"),
                SaleHeader::new(2, date(2024, 1, 6), 11, "card"),
            ],
            vec![
                SaleLine::new(1, 100, "Pen", 3, 9.0),
                SaleLine::new(1, 200, "Pad", 1, 5.0),
                SaleLine::new(2, 300, "Ink", 5, 50.0),
            ],
            vec![],
            vec![
                Customer::new(10, "Ana Ruiz", date(2023, 6, 1)),
                Customer::new(11, "Luis Paz", date(2023, 7, 1)),
            ],
        )
        .unwrap();

        let report = top_customers(&ready, TopN::new(1));

        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].customer_id, 11);
        assert_eq!(report.rows[0].amount, 50.0);
        assert_eq!(report.rows[0].purchases, 1);
    }

    #[test]
    fn test_top_customers_counts_distinct_sales() {
        let report = top_customers(&create_test_ready(), TopN::default());

        // Customer 12 is unknown and orphan line 9 has no header
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].name, "Luis Paz");
        assert_eq!(report.rows[0].purchases, 2);
        assert_eq!(report.rows[0].amount, 50.0);
        assert_eq!(report.rows[1].name, "Ana Ruiz");
        assert_eq!(report.rows[1].purchases, 1);
        assert_eq!(report.rows[1].amount, 14.0);
    }

    #[test]
    fn test_payment_methods() {
        let report = payment_methods(&create_test_ready());

        assert_eq!(report.total_sales, 4);
        assert_eq!(report.rows[0].method, "card");
        assert_eq!(report.rows[0].sales, 2);
        assert_eq!(report.rows[0].customers, 1);
        assert_eq!(report.rows[0].percent, 50.0);

        // Ties (cash, transfer) keep first-seen order
        assert_eq!(report.rows[1].method, "cash");
        assert_eq!(report.rows[2].method, "transfer");

        let total: f64 = report.rows.iter().map(|r| r.percent).sum();
        assert!((total - 100.0).abs() < 1e-9);

        assert!(report
            .to_string()
            .contains("• card           :   2 sales (50.0%) | 1 unique customers"));
    }

    #[test]
    fn test_payment_methods_percentages_sum_to_hundred() {
        let headers: Vec<SaleHeader> = (0..7u64)
            .map(|i| {
                let method = ["cash", "card", "qr"][(i % 3) as usize];
                SaleHeader::new(i, date(2024, 5, 1), i, method)
            })
            .collect();
        let ready = Ready::from_tables(headers, vec![], vec![], vec![]).unwrap();

        let report = payment_methods(&ready);
        let total: f64 = report.rows.iter().map(|r| r.percent).sum();

        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_reports_are_idempotent() {
        let ready = create_test_ready();

        for kind in ReportKind::full_analysis() {
            assert_eq!(render(&ready, kind), render(&ready, kind));
        }
    }

    #[test]
    fn test_full_analysis_order() {
        let text = render_full_analysis(&create_single_sale());

        let positions: Vec<usize> = [
            "SALES OVERVIEW",
            "SALES BY MONTH",
            "TOP 10 BEST-SELLING PRODUCTS",
            "SALES BY CATEGORY",
            "TOP 10 MOST ACTIVE CUSTOMERS",
            "MOST POPULAR PAYMENT METHODS",
        ]
        .iter()
        .map(|title| text.find(title).unwrap())
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_reports_render() {
        let ready = Ready::from_tables(vec![], vec![], vec![], vec![]).unwrap();

        assert!(payment_methods(&ready).rows.is_empty());
        assert!(by_month(&ready).to_string().contains("(no sales)"));
        assert!(by_category(&ready).to_string().contains("(no sales)"));
    }
}
