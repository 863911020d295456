use serde::{Deserialize, Serialize};

use super::{FormInput, Identified};
use crate::validation::{self, FieldErrors};

pub const INVENTORY_CATEGORIES: &[&str] = &[
    "FOOD",
    "CLOTHING",
    "MEDICAL",
    "EDUCATION",
    "HYGIENE",
    "FURNITURE",
    "BEDDING",
    "TOYS",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub fn as_key(&self) -> &'static str {
        match self {
            StockStatus::InStock => "IN_STOCK",
            StockStatus::LowStock => "LOW_STOCK",
            StockStatus::OutOfStock => "OUT_OF_STOCK",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            StockStatus::InStock => "badge badge-success",
            StockStatus::LowStock => "badge badge-warning",
            StockStatus::OutOfStock => "badge badge-danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub public_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub unit: String,
    /// Quantity at or below which the item counts as low stock
    #[serde(default, alias = "minimumStock")]
    pub min_threshold: u32,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub branch_id: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl InventoryItem {
    pub fn stock_status(&self) -> StockStatus {
        if self.quantity == 0 {
            StockStatus::OutOfStock
        } else if self.quantity <= self.min_threshold {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    pub fn total_value(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }

    pub fn apply(&mut self, request: &InventoryItemRequest) {
        self.name = request.name.clone();
        self.category = request.category.clone();
        self.quantity = request.quantity;
        self.unit = request.unit.clone();
        self.min_threshold = request.min_threshold;
        self.unit_price = request.unit_price;
    }
}

impl Identified for InventoryItem {
    fn public_id(&self) -> &str {
        &self.public_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemRequest {
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub unit: String,
    pub min_threshold: u32,
    pub unit_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryForm {
    pub name: String,
    pub category: String,
    pub quantity: String,
    pub unit: String,
    pub min_threshold: String,
    pub unit_price: String,
    pub branch_id: String,
}

impl InventoryForm {
    pub fn from_item(item: &InventoryItem) -> Self {
        Self {
            name: item.name.clone(),
            category: item.category.clone(),
            quantity: item.quantity.to_string(),
            unit: item.unit.clone(),
            min_threshold: item.min_threshold.to_string(),
            unit_price: format!("{:.2}", item.unit_price),
            branch_id: item.branch_id.clone().unwrap_or_default(),
        }
    }
}

impl FormInput for InventoryForm {
    type Request = InventoryItemRequest;

    fn validate(&self) -> Result<InventoryItemRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = errors.check("name", validation::required("Item name", &self.name));
        let category = errors.check("category", validation::required("Category", &self.category));
        let quantity = errors.check("quantity", validation::non_negative_count("Quantity", &self.quantity));
        let unit = errors.check("unit", validation::required("Unit", &self.unit));
        let min_threshold = if self.min_threshold.trim().is_empty() {
            Some(0)
        } else {
            errors.check(
                "min_threshold",
                validation::non_negative_count("Minimum stock", &self.min_threshold),
            )
        };
        let unit_price = errors.check("unit_price", validation::non_negative_amount("Unit price", &self.unit_price));

        match (name, category, quantity, unit, min_threshold, unit_price) {
            (Some(name), Some(category), Some(quantity), Some(unit), Some(min_threshold), Some(unit_price)) => {
                Ok(InventoryItemRequest {
                    name,
                    category,
                    quantity,
                    unit,
                    min_threshold,
                    unit_price,
                    branch_id: validation::optional(&self.branch_id),
                })
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: u32, min_threshold: u32) -> InventoryItem {
        InventoryItem {
            public_id: "inv-1".into(),
            name: "Rice".into(),
            category: "FOOD".into(),
            quantity,
            unit: "kg".into(),
            min_threshold,
            unit_price: 2.5,
            branch_id: None,
            last_updated: None,
        }
    }

    #[test]
    fn test_stock_status() {
        assert_eq!(item(0, 10).stock_status(), StockStatus::OutOfStock);
        assert_eq!(item(10, 10).stock_status(), StockStatus::LowStock);
        assert_eq!(item(11, 10).stock_status(), StockStatus::InStock);
        assert_eq!(item(4, 0).stock_status(), StockStatus::InStock);
    }

    #[test]
    fn test_total_value() {
        assert_eq!(item(4, 0).total_value(), 10.0);
    }

    #[test]
    fn test_minimum_stock_alias() {
        let parsed: InventoryItem =
            serde_json::from_str(r#"{"publicId":"x","name":"Soap","quantity":3,"minimumStock":5}"#).unwrap();
        assert_eq!(parsed.min_threshold, 5);
        assert_eq!(parsed.stock_status(), StockStatus::LowStock);
    }

    #[test]
    fn test_form_roundtrip_through_request() {
        let form = InventoryForm::from_item(&item(12, 3));
        let request = form.validate().unwrap();
        assert_eq!(request.quantity, 12);
        assert_eq!(request.unit_price, 2.5);

        let mut edited = item(0, 0);
        edited.apply(&request);
        assert_eq!(edited.quantity, 12);
        assert_eq!(edited.min_threshold, 3);
    }

    #[test]
    fn test_form_rejects_negative_quantity() {
        let form = InventoryForm {
            name: "Milk".into(),
            category: "FOOD".into(),
            quantity: "-4".into(),
            unit: "l".into(),
            unit_price: "abc".into(),
            ..InventoryForm::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.get("quantity").is_some());
        assert!(errors.get("unit_price").is_some());
    }
}
