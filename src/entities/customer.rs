// 👤 Customer Entity

use super::{deserialize_date, CustomerId};
use chrono::NaiveDate;
use serde::Deserialize;

/// One row of `clientes.csv`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Customer {
    #[serde(rename = "id_cliente", alias = "customer_id")]
    pub customer_id: CustomerId,

    #[serde(rename = "nombre_cliente", alias = "name")]
    pub name: String,

    #[serde(rename = "fecha_alta", alias = "signup_date", deserialize_with = "deserialize_date")]
    pub signup_date: NaiveDate,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(rename = "ciudad", alias = "city", default)]
    pub city: Option<String>,
}

impl Customer {
    pub const COLUMNS: &'static [(&'static str, &'static str)] = &[
        ("id_cliente", "customer_id"),
        ("nombre_cliente", "name"),
        ("fecha_alta", "signup_date"),
    ];

    pub fn new(customer_id: CustomerId, name: &str, signup_date: NaiveDate) -> Self {
        Customer {
            customer_id,
            name: name.to_string(),
            signup_date,
            email: None,
            city: None,
        }
    }
}
