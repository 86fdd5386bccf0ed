//! Category domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use catalog_admin_core::{BillboardId, CategoryId, StoreId};

use super::billboard::Billboard;
use super::validation::{ValidationError, required_id, required_text};

/// A product category. Each category points at the billboard shown on its page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub store_id: StoreId,
    pub billboard_id: BillboardId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category with its billboard embedded, as returned by read endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithBillboard {
    #[serde(flatten)]
    pub category: Category,
    pub billboard: Billboard,
}

/// Request body for creating or updating a category.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: Option<String>,
    pub billboard_id: Option<String>,
}

/// Validated category fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFields {
    pub name: String,
    pub billboard_id: BillboardId,
}

impl CategoryInput {
    /// Check required fields in declaration order.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first missing or malformed field.
    pub fn validate(self) -> Result<CategoryFields, ValidationError> {
        Ok(CategoryFields {
            name: required_text(self.name, "name", "Name")?,
            billboard_id: required_id(self.billboard_id, "billboardId", "Billboard id")?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_name_checked_before_billboard_id() {
        let err = CategoryInput {
            name: None,
            billboard_id: Some("not-a-uuid".to_string()),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.field, "name");

        let err = CategoryInput {
            name: Some("Shirts".to_string()),
            billboard_id: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.message, "Billboard id is required");
    }

    #[test]
    fn test_with_billboard_flattens_category_fields() {
        let store_id = StoreId::generate();
        let billboard = Billboard {
            id: BillboardId::generate(),
            store_id,
            label: "Summer".to_string(),
            image_url: "https://img/summer.png".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let view = CategoryWithBillboard {
            category: Category {
                id: CategoryId::generate(),
                store_id,
                billboard_id: billboard.id,
                name: "Shirts".to_string(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            billboard,
        };

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["name"], "Shirts");
        assert_eq!(json["billboard"]["label"], "Summer");
    }
}
