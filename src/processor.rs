use serde_json::Value;

use crate::model::error::{SaleError, SaleFault};
use crate::model::product::PriceCatalog;
use crate::model::record;
use crate::model::sale::SaleEntry;

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    pub total_cost: f64,
    pub errors: Vec<SaleError>,
}

impl Reconciliation {
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

pub struct SalesProcessor<'a> {
    catalog: &'a PriceCatalog,
}

impl<'a> SalesProcessor<'a> {
    pub fn new(catalog: &'a PriceCatalog) -> Self {
        SalesProcessor { catalog }
    }

    /// Prices every sale against the catalog in input order.
    ///
    /// A bad line adds one error and nothing to the total; it never stops
    /// the pass.
    pub fn reconcile(&self, sales: &[Value]) -> Reconciliation {
        let mut result = Reconciliation::default();

        for raw in sales {
            match self.price_sale(raw) {
                Ok(amount) => result.total_cost += amount,
                Err(error) => {
                    tracing::debug!(%error, "sale rejected");
                    result.errors.push(error);
                }
            }
        }

        tracing::info!(
            sales = sales.len(),
            rejected = result.errors.len(),
            total_cost = result.total_cost,
            "sales reconciled"
        );
        result
    }

    fn price_sale(&self, raw: &Value) -> Result<f64, SaleError> {
        let processing = |fault| SaleError::Processing {
            entry: record::render(raw),
            fault,
        };

        let entry = SaleEntry::from_record(raw).map_err(processing)?;

        let Some(name) = entry.product_name().map_err(processing)? else {
            return Err(SaleError::MissingProduct {
                entry: record::render(raw),
            });
        };

        let name = name.to_lowercase();
        let Some(unit_price) = self.catalog.price_of(&name) else {
            return Err(SaleError::InvalidProduct { name });
        };

        let unit_price = numeric_price(unit_price).map_err(processing)?;
        let quantity = entry.quantity().map_err(processing)?;
        Ok(unit_price * quantity)
    }
}

fn numeric_price(price: &Value) -> Result<f64, SaleFault> {
    match price {
        Value::Number(n) => n.as_f64().ok_or(SaleFault::NonNumericPrice("number")),
        other => Err(SaleFault::NonNumericPrice(record::kind(other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn apple_catalog() -> PriceCatalog {
        PriceCatalog::from_records(&[json!({"title": "Apple", "price": 1.5})]).unwrap()
    }

    #[test]
    fn known_product_is_priced() {
        let catalog = apple_catalog();
        let result = SalesProcessor::new(&catalog)
            .reconcile(&[json!({"Product": "apple", "Quantity": 4})]);

        assert_eq!(result.total_cost, 6.0);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn unknown_product_is_reported_lowercased() {
        let catalog = apple_catalog();
        let result = SalesProcessor::new(&catalog)
            .reconcile(&[json!({"Product": "Banana", "Quantity": 2})]);

        assert_eq!(result.total_cost, 0.0);
        assert_eq!(result.error_messages(), vec!["Invalid product: banana"]);
    }

    #[test]
    fn missing_product_is_reported_with_raw_entry() {
        let catalog = apple_catalog();
        let result = SalesProcessor::new(&catalog).reconcile(&[json!({"Quantity": 3})]);

        assert_eq!(result.total_cost, 0.0);
        assert_eq!(
            result.error_messages(),
            vec!["Missing product name in sale entry: {'Quantity': 3}"]
        );
    }

    #[test]
    fn absent_quantity_contributes_nothing() {
        let catalog = apple_catalog();
        let result = SalesProcessor::new(&catalog).reconcile(&[json!({"Product": "Apple"})]);

        assert_eq!(result.total_cost, 0.0);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn bad_quantity_skips_entry_and_continues() {
        let catalog = apple_catalog();
        let result = SalesProcessor::new(&catalog).reconcile(&[
            json!({"Product": "Apple", "Quantity": "four"}),
            json!({"Product": "Apple", "Quantity": 2}),
        ]);

        assert_eq!(result.total_cost, 3.0);
        assert_eq!(
            result.errors,
            vec![SaleError::Processing {
                entry: "{'Product': 'Apple', 'Quantity': 'four'}".to_string(),
                fault: SaleFault::NonNumericQuantity("string"),
            }]
        );
    }

    #[test]
    fn unknown_product_wins_over_bad_quantity() {
        let catalog = apple_catalog();
        let result =
            SalesProcessor::new(&catalog).reconcile(&[json!({"Product": "Kiwi", "Quantity": "x"})]);

        assert_eq!(result.error_messages(), vec!["Invalid product: kiwi"]);
    }

    #[test]
    fn non_record_entries_are_processing_errors() {
        let catalog = apple_catalog();
        let result = SalesProcessor::new(&catalog).reconcile(&[json!(7), json!({"Product": 7})]);

        assert_eq!(
            result.error_messages(),
            vec![
                "Error processing sale 7: sale entry must be an object, found number",
                "Error processing sale {'Product': 7}: product name must be a string, found number",
            ]
        );
    }

    #[test]
    fn mixed_batch_keeps_input_order() {
        let catalog = PriceCatalog::from_records(&[
            json!({"title": "Apple", "price": 1.5}),
            json!({"title": "Bread", "price": 2.25}),
        ])
        .unwrap();

        let result = SalesProcessor::new(&catalog).reconcile(&[
            json!({"Product": "Bread", "Quantity": 2}),
            json!({"Product": "Cheese", "Quantity": 1}),
            json!({"Product": "", "Quantity": 1}),
            json!({"Product": "APPLE", "Quantity": 2}),
            json!({"Product": "Milk", "Quantity": 1}),
        ]);

        assert_eq!(result.total_cost, 7.5);
        assert_eq!(
            result.error_messages(),
            vec![
                "Invalid product: cheese",
                "Missing product name in sale entry: {'Product': '', 'Quantity': 1}",
                "Invalid product: milk",
            ]
        );
    }

    #[test]
    fn unpriced_product_is_harmless_until_sold() {
        let catalog = PriceCatalog::from_records(&[
            json!({"title": "Apple", "price": 1.5}),
            json!({"title": "Pear", "price": null}),
        ])
        .unwrap();

        let result =
            SalesProcessor::new(&catalog).reconcile(&[json!({"Product": "Apple", "Quantity": 2})]);
        assert_eq!(result.total_cost, 3.0);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn unpriced_product_sale_is_a_processing_error() {
        let catalog = PriceCatalog::from_records(&[
            json!({"title": "Apple", "price": 1.5}),
            json!({"title": "Pear", "price": null}),
            json!({"title": "Plum", "price": "0.75"}),
        ])
        .unwrap();

        let result = SalesProcessor::new(&catalog).reconcile(&[
            json!({"Product": "Pear", "Quantity": 1}),
            json!({"Product": "Apple", "Quantity": 2}),
            json!({"Product": "plum", "Quantity": 4}),
        ]);

        assert_eq!(result.total_cost, 3.0);
        assert_eq!(
            result.error_messages(),
            vec![
                "Error processing sale {'Product': 'Pear', 'Quantity': 1}: unit price must be a number, found null",
                "Error processing sale {'Product': 'plum', 'Quantity': 4}: unit price must be a number, found string",
            ]
        );
    }

    #[test]
    fn empty_sales_yield_zero() {
        let catalog = apple_catalog();
        let result = SalesProcessor::new(&catalog).reconcile(&[]);
        assert_eq!(result, Reconciliation::default());
    }

    proptest! {
        #[test]
        fn valid_sales_sum_to_price_times_quantity(
            prices in prop::collection::vec(0.0f64..500.0, 1..8),
            picks in prop::collection::vec((any::<prop::sample::Index>(), 0u32..50), 0..40)
        ) {
            let records: Vec<Value> = prices
                .iter()
                .enumerate()
                .map(|(i, price)| json!({"title": format!("Item{i}"), "price": price}))
                .collect();
            let catalog = PriceCatalog::from_records(&records).unwrap();

            let mut expected = 0.0;
            let sales: Vec<Value> = picks
                .iter()
                .map(|(index, quantity)| {
                    let i = index.index(prices.len());
                    expected += prices[i] * f64::from(*quantity);
                    json!({"Product": format!("item{i}"), "Quantity": quantity})
                })
                .collect();

            let result = SalesProcessor::new(&catalog).reconcile(&sales);
            prop_assert!(result.errors.is_empty());
            prop_assert_eq!(result.total_cost, expected);
        }

        #[test]
        fn unknown_products_error_in_input_order(
            names in prop::collection::vec("[a-z]{3,8}", 0..20)
        ) {
            let catalog = PriceCatalog::default();
            let sales: Vec<Value> = names
                .iter()
                .map(|name| json!({"Product": name.to_uppercase(), "Quantity": 1}))
                .collect();

            let result = SalesProcessor::new(&catalog).reconcile(&sales);
            let expected: Vec<String> =
                names.iter().map(|name| format!("Invalid product: {name}")).collect();

            prop_assert_eq!(result.total_cost, 0.0);
            prop_assert_eq!(result.error_messages(), expected);
        }
    }
}
