use serde::Deserialize;
use serde_json::Value;

use crate::model::error::SaleFault;
use crate::model::record;

/// One sales line. Both fields keep their raw value so that a present-but-null
/// field stays distinguishable from an absent one.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SaleEntry {
    #[serde(rename = "Product", default, deserialize_with = "deserialize_present")]
    pub product: Option<Value>,
    #[serde(rename = "Quantity", default, deserialize_with = "deserialize_present")]
    pub quantity: Option<Value>,
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl SaleEntry {
    pub fn from_record(raw: &Value) -> Result<Self, SaleFault> {
        if !raw.is_object() {
            return Err(SaleFault::NotARecord(record::kind(raw)));
        }

        SaleEntry::deserialize(raw).map_err(|_| SaleFault::NotARecord(record::kind(raw)))
    }

    /// The product name, or `None` when the field is absent or falsy.
    pub fn product_name(&self) -> Result<Option<&str>, SaleFault> {
        match &self.product {
            None => Ok(None),
            Some(value) if record::is_falsy(value) => Ok(None),
            Some(Value::String(name)) => Ok(Some(name.as_str())),
            Some(other) => Err(SaleFault::ProductNotText(record::kind(other))),
        }
    }

    /// Quantity, resolved to zero when absent.
    pub fn quantity(&self) -> Result<f64, SaleFault> {
        match &self.quantity {
            None => Ok(0.0),
            Some(Value::Number(n)) => n
                .as_f64()
                .ok_or(SaleFault::NonNumericQuantity("number")),
            Some(other) => Err(SaleFault::NonNumericQuantity(record::kind(other))),
        }
    }
}
