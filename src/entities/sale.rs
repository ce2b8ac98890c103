// 🧾 Sale Entities - headers (one per sale) and line items (many per sale)

use super::{deserialize_amount, deserialize_date, CustomerId, ProductId, SaleId};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

// ============================================================================
// SALE HEADER
// ============================================================================

/// One row of `ventas.csv`: who bought, when, and how they paid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SaleHeader {
    #[serde(rename = "id_venta", alias = "sale_id")]
    pub sale_id: SaleId,

    #[serde(rename = "fecha", alias = "date", deserialize_with = "deserialize_date")]
    pub date: NaiveDate,

    #[serde(rename = "id_cliente", alias = "customer_id")]
    pub customer_id: CustomerId,

    #[serde(rename = "medio_pago", alias = "payment_method")]
    pub payment_method: String,
}

impl SaleHeader {
    /// Required CSV columns as (header, alias) pairs
    pub const COLUMNS: &'static [(&'static str, &'static str)] = &[
        ("id_venta", "sale_id"),
        ("fecha", "date"),
        ("id_cliente", "customer_id"),
        ("medio_pago", "payment_method"),
    ];

    pub fn new(
        sale_id: SaleId,
        date: NaiveDate,
        customer_id: CustomerId,
        payment_method: &str,
    ) -> Self {
        SaleHeader {
            sale_id,
            date,
            customer_id,
            payment_method: payment_method.to_string(),
        }
    }

    /// Calendar month (1-12) of the sale
    pub fn month(&self) -> u32 {
        self.date.month()
    }
}

// ============================================================================
// SALE LINE
// ============================================================================

/// One row of `detalle_ventas.csv`: a product sold within a sale.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SaleLine {
    #[serde(rename = "id_venta", alias = "sale_id")]
    pub sale_id: SaleId,

    #[serde(rename = "id_producto", alias = "product_id")]
    pub product_id: ProductId,

    #[serde(rename = "nombre_producto", alias = "product_name")]
    pub product_name: String,

    #[serde(rename = "cantidad", alias = "quantity")]
    pub quantity: u32,

    #[serde(rename = "importe", alias = "amount", deserialize_with = "deserialize_amount")]
    pub amount: f64,

    #[serde(rename = "precio_unitario", alias = "unit_price", default)]
    pub unit_price: Option<f64>,
}

impl SaleLine {
    pub const COLUMNS: &'static [(&'static str, &'static str)] = &[
        ("id_venta", "sale_id"),
        ("id_producto", "product_id"),
        ("nombre_producto", "product_name"),
        ("cantidad", "quantity"),
        ("importe", "amount"),
    ];

    pub fn new(
        sale_id: SaleId,
        product_id: ProductId,
        product_name: &str,
        quantity: u32,
        amount: f64,
    ) -> Self {
        SaleLine {
            sale_id,
            product_id,
            product_name: product_name.to_string(),
            quantity,
            amount,
            unit_price: None,
        }
    }

    /// Builder pattern: add unit price
    pub fn with_unit_price(mut self, unit_price: f64) -> Self {
        self.unit_price = Some(unit_price);
        self
    }
}
