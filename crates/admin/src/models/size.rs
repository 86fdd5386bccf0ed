//! Size domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use catalog_admin_core::{SizeId, StoreId};

use super::validation::{ValidationError, required_text};

/// A product size (e.g. name `Small`, value `S`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    pub id: SizeId,
    pub store_id: StoreId,
    pub name: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or updating a size.
#[derive(Debug, Default, Deserialize)]
pub struct SizeInput {
    pub name: Option<String>,
    pub value: Option<String>,
}

/// Validated size fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeFields {
    pub name: String,
    pub value: String,
}

impl SizeInput {
    /// Check required fields in declaration order.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first missing field.
    pub fn validate(self) -> Result<SizeFields, ValidationError> {
        Ok(SizeFields {
            name: required_text(self.name, "name", "Name")?,
            value: required_text(self.value, "value", "Value")?,
        })
    }
}
