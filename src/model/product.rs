use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::model::error::ProcessorError;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Product {
    pub title: String,
    pub price: Value,
}

/// Unit prices keyed by lowercased product title. Prices are kept as given;
/// a non-numeric one only matters to the sales that reference it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceCatalog {
    prices: HashMap<String, Value>,
}

impl PriceCatalog {
    /// Builds the catalog from raw product records.
    ///
    /// Every record must carry a string `title` and some `price`; the first
    /// one that doesn't fails the whole catalog. Titles that fold to
    /// the same key are resolved last-write-wins: the later record's price
    /// replaces the earlier one.
    pub fn from_records(records: &[Value]) -> Result<Self, ProcessorError> {
        let mut catalog = PriceCatalog::default();

        for (index, record) in records.iter().enumerate() {
            let product = Product::deserialize(record)
                .map_err(|source| ProcessorError::CatalogRecord { index, source })?;

            if let Some(previous) = catalog.insert(&product) {
                tracing::warn!(
                    title = %product.title,
                    %previous,
                    price = %product.price,
                    "catalog title repeated, later price wins"
                );
            }
        }

        if catalog.is_empty() {
            tracing::warn!("catalog has no products, every sale will be rejected");
        }
        tracing::info!(products = catalog.len(), "catalog normalized");
        Ok(catalog)
    }

    /// Inserts under the folded title, returning the price it replaced.
    pub fn insert(&mut self, product: &Product) -> Option<Value> {
        self.prices
            .insert(product.title.to_lowercase(), product.price.clone())
    }

    /// Looks up an already lowercased name.
    pub fn price_of(&self, name: &str) -> Option<&Value> {
        self.prices.get(name)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
