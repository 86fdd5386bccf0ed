//! Store (tenant) domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use catalog_admin_core::{StoreId, UserId};

use super::validation::{ValidationError, required_text};

/// A store. Every other catalog row is scoped to exactly one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    /// Identity provider subject that owns this store.
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or renaming a store.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreInput {
    pub name: Option<String>,
}

/// Validated store fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreFields {
    pub name: String,
}

impl StoreInput {
    /// Check required fields.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first missing field.
    pub fn validate(self) -> Result<StoreFields, ValidationError> {
        Ok(StoreFields {
            name: required_text(self.name, "name", "Name")?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_store_input_requires_name() {
        let err = StoreInput::default().validate().unwrap_err();
        assert_eq!(err.message, "Name is required");
    }

    #[test]
    fn test_store_serializes_camel_case() {
        let store = Store {
            id: StoreId::generate(),
            name: "Main".to_string(),
            user_id: UserId::parse("user_1").unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json["userId"], "user_1");
        assert!(json.get("createdAt").is_some());
    }
}
