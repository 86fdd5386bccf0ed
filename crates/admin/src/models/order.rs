//! Order domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use catalog_admin_core::{OrderId, OrderItemId, ProductId, StoreId};

use super::product::Product;
use super::validation::{ValidationError, optional_text};

/// A customer order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub store_id: StoreId,
    pub is_paid: bool,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One line of an order. Quantity is always one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
}

/// Order item with its product embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDetails {
    #[serde(flatten)]
    pub item: OrderItem,
    pub product: Product,
}

/// Order with its items and their products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    #[serde(flatten)]
    pub order: Order,
    pub order_items: Vec<OrderItemDetails>,
}

/// Request body for creating an order.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    pub product_ids: Option<Vec<String>>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Validated order creation fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFields {
    pub product_ids: Vec<ProductId>,
    pub phone: String,
    pub address: String,
}

impl OrderInput {
    /// Require at least one well-formed product id.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for a missing, empty or malformed id list.
    pub fn validate(self) -> Result<OrderFields, ValidationError> {
        let raw = match self.product_ids {
            Some(ids) if !ids.is_empty() => ids,
            _ => {
                return Err(ValidationError::invalid(
                    "productIds",
                    "Product ids are required",
                ));
            }
        };

        let product_ids = raw
            .iter()
            .map(|id| {
                id.trim()
                    .parse()
                    .map_err(|_| ValidationError::invalid("productIds", "Product id is invalid"))
            })
            .collect::<Result<Vec<ProductId>, _>>()?;

        Ok(OrderFields {
            product_ids,
            phone: optional_text(self.phone).unwrap_or_default(),
            address: optional_text(self.address).unwrap_or_default(),
        })
    }
}

/// Request body for updating an order. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdateInput {
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_paid: Option<bool>,
}

/// Validated partial order update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderUpdate {
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_paid: Option<bool>,
}

impl OrderUpdateInput {
    /// Trim provided strings. Every field is optional.
    #[must_use]
    pub fn validate(self) -> OrderUpdate {
        OrderUpdate {
            phone: self.phone.map(|p| p.trim().to_owned()),
            address: self.address.map(|a| a.trim().to_owned()),
            is_paid: self.is_paid,
        }
    }
}

impl OrderUpdate {
    /// Apply the provided fields to an order.
    pub fn apply(&self, order: &mut Order) {
        if let Some(phone) = &self.phone {
            order.phone.clone_from(phone);
        }
        if let Some(address) = &self.address {
            order.address.clone_from(address);
        }
        if let Some(is_paid) = self.is_paid {
            order.is_paid = is_paid;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_ids_required() {
        let err = OrderInput::default().validate().unwrap_err();
        assert_eq!(err.field, "productIds");
        assert_eq!(err.message, "Product ids are required");

        let err = OrderInput {
            product_ids: Some(Vec::new()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.message, "Product ids are required");
    }

    #[test]
    fn test_malformed_product_id() {
        let err = OrderInput {
            product_ids: Some(vec!["abc".to_string()]),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.message, "Product id is invalid");
    }

    #[test]
    fn test_phone_and_address_default_empty() {
        let fields = OrderInput {
            product_ids: Some(vec![ProductId::generate().to_string()]),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(fields.phone, "");
        assert_eq!(fields.address, "");
    }

    #[test]
    fn test_update_applies_only_present_fields() {
        let mut order = Order {
            id: OrderId::generate(),
            store_id: StoreId::generate(),
            is_paid: false,
            phone: "555".to_string(),
            address: "1 Main St".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        OrderUpdateInput {
            is_paid: Some(true),
            ..Default::default()
        }
        .validate()
        .apply(&mut order);

        assert!(order.is_paid);
        assert_eq!(order.phone, "555");
        assert_eq!(order.address, "1 Main St");
    }
}
