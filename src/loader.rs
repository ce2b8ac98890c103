// 📂 Loader - reads the four sales tables into an immutable snapshot
//
// load() is all-or-nothing: it either returns a fully joined Ready snapshot
// or a LoadError, never a half-filled session.

use crate::entities::{Customer, Product, SaleHeader, SaleLine};
use crate::error::LoadError;
use crate::merge::{build_merged_view, MergedView};
use serde::de::DeserializeOwned;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

// ============================================================================
// TABLES
// ============================================================================

/// Logical name of one of the four input tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Sales,
    Products,
    SaleLines,
    Customers,
}

impl Table {
    /// Load order: every table is read before any join happens
    pub const ALL: [Table; 4] = [
        Table::Sales,
        Table::Products,
        Table::SaleLines,
        Table::Customers,
    ];

    /// Human-readable name for messages
    pub fn name(&self) -> &'static str {
        match self {
            Table::Sales => "sales",
            Table::Products => "products",
            Table::SaleLines => "sale-lines",
            Table::Customers => "customers",
        }
    }

    /// File name inside a data directory
    pub fn file_name(&self) -> &'static str {
        match self {
            Table::Sales => "ventas.csv",
            Table::Products => "productos.csv",
            Table::SaleLines => "detalle_ventas.csv",
            Table::Customers => "clientes.csv",
        }
    }

    /// Required columns as (header, alias) pairs
    pub fn required_columns(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Table::Sales => SaleHeader::COLUMNS,
            Table::Products => Product::COLUMNS,
            Table::SaleLines => SaleLine::COLUMNS,
            Table::Customers => Customer::COLUMNS,
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// SOURCES
// ============================================================================

/// Where table contents come from.
///
/// The loader only needs a byte stream per logical table; file layout and
/// format conversion (e.g. spreadsheet export) stay outside the crate.
pub trait TableSource {
    /// Open the CSV contents of a table
    fn open(&self, table: Table) -> Result<Box<dyn Read + '_>, LoadError>;

    /// Describe where a table is read from (for logs)
    fn describe(&self, table: Table) -> String {
        table.file_name().to_string()
    }
}

/// A directory holding ventas.csv, productos.csv, detalle_ventas.csv and
/// clientes.csv
#[derive(Debug, Clone)]
pub struct CsvDirectory {
    root: PathBuf,
}

impl CsvDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        CsvDirectory { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, table: Table) -> PathBuf {
        self.root.join(table.file_name())
    }
}

impl TableSource for CsvDirectory {
    fn open(&self, table: Table) -> Result<Box<dyn Read + '_>, LoadError> {
        let path = self.path_for(table);
        let file = File::open(&path).map_err(|source| LoadError::Unreadable {
            table,
            path: path.clone(),
            source,
        })?;
        Ok(Box::new(file))
    }

    fn describe(&self, table: Table) -> String {
        self.path_for(table).display().to_string()
    }
}

/// In-memory CSV text per table, for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    tables: HashMap<Table, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        MemorySource::default()
    }

    /// Builder pattern: add CSV text for a table
    pub fn with_table(mut self, table: Table, csv: &str) -> Self {
        self.tables.insert(table, csv.to_string());
        self
    }
}

impl TableSource for MemorySource {
    fn open(&self, table: Table) -> Result<Box<dyn Read + '_>, LoadError> {
        match self.tables.get(&table) {
            Some(text) => Ok(Box::new(text.as_bytes())),
            None => Err(LoadError::Unreadable {
                table,
                path: PathBuf::from(table.file_name()),
                source: io::Error::new(io::ErrorKind::NotFound, "table not provided"),
            }),
        }
    }

    fn describe(&self, table: Table) -> String {
        format!("memory:{}", table.file_name())
    }
}

// ============================================================================
// READY SNAPSHOT
// ============================================================================

/// The four loaded tables plus their merged view.
///
/// Holding a `Ready` is the proof that a load succeeded; every reporter
/// takes one by reference.
#[derive(Debug, Clone)]
pub struct Ready {
    headers: Vec<SaleHeader>,
    lines: Vec<SaleLine>,
    products: Vec<Product>,
    customers: Vec<Customer>,
    merged: MergedView,
}

impl Ready {
    /// Assemble a snapshot from already-parsed tables.
    ///
    /// Checks key uniqueness and builds the merged view.
    pub fn from_tables(
        headers: Vec<SaleHeader>,
        lines: Vec<SaleLine>,
        products: Vec<Product>,
        customers: Vec<Customer>,
    ) -> Result<Self, LoadError> {
        ensure_unique(Table::Sales, headers.iter().map(|h| h.sale_id))?;
        ensure_unique(Table::Products, products.iter().map(|p| p.product_id))?;
        ensure_unique(Table::Customers, customers.iter().map(|c| c.customer_id))?;

        let merged = build_merged_view(&lines, &headers, &customers);

        Ok(Ready {
            headers,
            lines,
            products,
            customers,
            merged,
        })
    }

    pub fn headers(&self) -> &[SaleHeader] {
        &self.headers
    }

    pub fn lines(&self) -> &[SaleLine] {
        &self.lines
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn merged(&self) -> &MergedView {
        &self.merged
    }
}

fn ensure_unique(table: Table, keys: impl Iterator<Item = u64>) -> Result<(), LoadError> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(LoadError::DuplicateKey { table, key });
        }
    }
    Ok(())
}

// ============================================================================
// LOAD
// ============================================================================

/// Load all four tables from a source and join them.
pub fn load(source: &dyn TableSource) -> Result<Ready, LoadError> {
    let headers: Vec<SaleHeader> = read_table(source, Table::Sales)?;
    let products: Vec<Product> = read_table(source, Table::Products)?;
    let lines: Vec<SaleLine> = read_table(source, Table::SaleLines)?;
    let customers: Vec<Customer> = read_table(source, Table::Customers)?;

    let ready = Ready::from_tables(headers, lines, products, customers)?;

    let merged = ready.merged();
    if merged.unmatched_headers() > 0 {
        warn!(
            lines = merged.unmatched_headers(),
            "sale lines reference unknown sales"
        );
    }
    if merged.unmatched_customers() > 0 {
        warn!(
            lines = merged.unmatched_customers(),
            "sale lines belong to unknown customers"
        );
    }

    info!(
        sales = ready.headers().len(),
        lines = ready.lines().len(),
        products = ready.products().len(),
        customers = ready.customers().len(),
        "sales data loaded"
    );

    Ok(ready)
}

fn read_table<T: DeserializeOwned>(
    source: &dyn TableSource,
    table: Table,
) -> Result<Vec<T>, LoadError> {
    let reader = source.open(table)?;

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(|e| malformed(table, e))?.clone();
    for (column, alias) in table.required_columns() {
        if !headers.iter().any(|h| h == *column || h == *alias) {
            return Err(LoadError::MissingColumn {
                table,
                column: column.to_string(),
            });
        }
    }

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: T = result.map_err(|e| malformed(table, e))?;
        rows.push(row);
    }

    debug!(table = %table, source = %source.describe(table), rows = rows.len(), "table read");
    Ok(rows)
}

fn malformed(table: Table, source: csv::Error) -> LoadError {
    let row = source.position().map(|p| p.line());
    LoadError::Malformed { table, row, source }
}
