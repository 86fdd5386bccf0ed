//! Billboard domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use catalog_admin_core::{BillboardId, StoreId};

use super::validation::{ValidationError, required_text};

/// A hero banner shown at the top of a category page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Billboard {
    pub id: BillboardId,
    pub store_id: StoreId,
    pub label: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or updating a billboard.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillboardInput {
    pub label: Option<String>,
    pub image_url: Option<String>,
}

/// Validated billboard fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillboardFields {
    pub label: String,
    pub image_url: String,
}

impl BillboardInput {
    /// Check required fields in declaration order.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first missing field.
    pub fn validate(self) -> Result<BillboardFields, ValidationError> {
        Ok(BillboardFields {
            label: required_text(self.label, "label", "Label")?,
            image_url: required_text(self.image_url, "imageUrl", "Image URL")?,
        })
    }
}
