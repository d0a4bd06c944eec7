//! # Catalog Wire Format
//!
//! The catalog answers `GET /products` with a JSON array:
//!
//! ```text
//! [
//!   { "barcode": "4760001234567", "name": "Water 0.5L", "price": 1.5 },
//!   { "barcode": "123",           "name": "Bread",      "price": "0.80" },
//!   ...
//! ]
//! ```
//!
//! ## Rules
//! - `price` may be a JSON number or a decimal string
//! - Prices are converted to integer cents via [`Money::parse_decimal`]
//! - Extra fields (`_id`, `category`, ...) are ignored
//! - An entry that fails to decode is skipped, not fatal

use serde::Deserialize;
use scanpos_core::{Money, Product};

/// Price as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WirePrice {
    Number(serde_json::Number),
    Text(String),
}

impl WirePrice {
    /// Converts to Money, rejecting negative amounts.
    pub fn to_money(&self) -> Result<Money, String> {
        let text = match self {
            WirePrice::Number(n) => n.to_string(),
            WirePrice::Text(s) => s.clone(),
        };
        let money = Money::parse_decimal(&text).map_err(|e| e.to_string())?;
        if money.is_negative() {
            return Err(format!("negative price {}", money));
        }
        Ok(money)
    }
}

/// One catalog entry as received.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogProductDto {
    pub barcode: String,
    pub name: String,
    pub price: WirePrice,
}

impl CatalogProductDto {
    /// Converts a wire entry into a domain product.
    pub fn into_product(self) -> Result<Product, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("empty name".to_string());
        }
        let price = self.price.to_money()?;
        Ok(Product {
            barcode: self.barcode,
            name: name.to_string(),
            price,
        })
    }
}

/// Decodes a single array element into a product.
pub fn decode_entry(value: &serde_json::Value) -> Result<Product, String> {
    let dto = CatalogProductDto::deserialize(value).map_err(|e| e.to_string())?;
    dto.into_product()
}
