use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// Persisted product record.
pub type Product = models::product::Model;

/// Creation payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub price: f64,
}

impl CreateProduct {
    pub fn validate(&self) -> Result<(), ServiceError> {
        models::product::validate_name(&self.name)?;
        models::product::validate_price(self.price)?;
        Ok(())
    }
}

/// Partial update payload. An embedded `id` is accepted on the wire but never applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateProduct {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl UpdateProduct {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some(name) = &self.name { models::product::validate_name(name)?; }
        if let Some(price) = self.price { models::product::validate_price(price)?; }
        Ok(())
    }

    /// Column changes to apply; drops the embedded id.
    pub fn into_changes(self) -> ProductChanges {
        ProductChanges { name: self.name, price: self.price, available: None }
    }
}

/// Column-level changes handed to the repository.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub available: Option<bool>,
}

impl ProductChanges {
    pub fn soft_delete() -> Self {
        Self { available: Some(false), ..Default::default() }
    }
}
