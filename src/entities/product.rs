// 📦 Product Entity - catalog row used to resolve categories

use super::ProductId;
use serde::Deserialize;

/// One row of `productos.csv`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    #[serde(rename = "id_producto", alias = "product_id")]
    pub product_id: ProductId,

    #[serde(rename = "categoria", alias = "category")]
    pub category: String,

    #[serde(rename = "nombre_producto", alias = "name", default)]
    pub name: Option<String>,

    #[serde(rename = "precio_unitario", alias = "unit_price", default)]
    pub unit_price: Option<f64>,
}

impl Product {
    pub const COLUMNS: &'static [(&'static str, &'static str)] =
        &[("id_producto", "product_id"), ("categoria", "category")];

    pub fn new(product_id: ProductId, category: &str) -> Self {
        Product {
            product_id,
            category: category.to_string(),
            name: None,
            unit_price: None,
        }
    }

    /// Builder pattern: add catalog name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }
}
