//! Color domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use catalog_admin_core::{ColorId, StoreId};

use super::validation::{ValidationError, required_text};

/// A product color. `value` is a hex code such as `#FF0000`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub id: ColorId,
    pub store_id: StoreId,
    pub name: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or updating a color.
#[derive(Debug, Default, Deserialize)]
pub struct ColorInput {
    pub name: Option<String>,
    pub value: Option<String>,
}

/// Validated color fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorFields {
    pub name: String,
    pub value: String,
}

impl ColorInput {
    /// Check required fields in declaration order, then the hex format of `value`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first missing or malformed field.
    pub fn validate(self) -> Result<ColorFields, ValidationError> {
        let name = required_text(self.name, "name", "Name")?;
        let value = required_text(self.value, "value", "Value")?;

        if !value.starts_with('#') || value.chars().count() < 4 {
            return Err(ValidationError::invalid(
                "value",
                "Value must be a valid hex code",
            ));
        }

        Ok(ColorFields { name, value })
    }
}
