use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Id;

/// Listing lifecycle status, owned by the remote catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Active,
    Pending,
    Sold,
    Hidden,
}

/// A marketplace listing. Immutable from the core's perspective; every field
/// beyond the identity/price/status block is optional because sellers tag
/// inventory loosely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Id,
    pub brand: String,
    pub model: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessory_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spare_part_type: Option<String>,
    /// Free text naming the vehicles this part/accessory fits,
    /// e.g. "Honda Wave Alpha 2019, Honda Future".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_compatible: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mileage: Option<u32>,
    #[serde(default)]
    pub is_verified: bool,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Minimal constructor used by seeds and tests; optional attributes start
    /// empty and are filled in with the builder-style `with_*` methods.
    pub fn new(id: impl Into<Id>, brand: impl Into<String>, model: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            brand: brand.into(),
            model: model.into(),
            price,
            color: None,
            engine_capacity: None,
            condition: None,
            location: None,
            accessory_type: None,
            spare_part_type: None,
            vehicle_compatible: None,
            size: None,
            year: None,
            mileage: None,
            is_verified: false,
            status: ProductStatus::Active,
            created_at: Utc::now(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn with_engine_capacity(mut self, cc: u32) -> Self {
        self.engine_capacity = Some(cc);
        self
    }

    pub fn with_accessory_type(mut self, kind: impl Into<String>) -> Self {
        self.accessory_type = Some(kind.into());
        self
    }

    pub fn with_spare_part_type(mut self, kind: impl Into<String>) -> Self {
        self.spare_part_type = Some(kind.into());
        self
    }

    pub fn with_vehicle_compatible(mut self, text: impl Into<String>) -> Self {
        self.vehicle_compatible = Some(text.into());
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_mileage(mut self, mileage: u32) -> Self {
        self.mileage = Some(mileage);
        self
    }
}
