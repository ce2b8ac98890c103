// Sales Report Builder - Core Library
// Exposes the load → join → report pipeline for the CLI and tests

pub mod entities;
pub mod error;
pub mod format;
pub mod loader;
pub mod merge;
pub mod reports;
pub mod session;

// Re-export commonly used types
pub use entities::{
    parse_date, Customer, CustomerId, Product, ProductId, SaleHeader, SaleId, SaleLine,
};
pub use error::{LoadError, PreconditionNotMet};
pub use loader::{load, CsvDirectory, MemorySource, Ready, Table, TableSource};
pub use merge::{build_merged_view, CustomerPart, HeaderPart, MergedRow, MergedView};
pub use reports::{
    by_category, by_month, overview, payment_methods, render, render_full_analysis,
    top_customers, top_products, ByCategory, ByMonth, CategoryRow, CustomerRow, MonthRow,
    Overview, PaymentMethods, PaymentRow, ProductRow, ReportKind, TopCustomers, TopN,
    TopProducts, DEFAULT_TOP_N,
};
pub use session::Session;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
