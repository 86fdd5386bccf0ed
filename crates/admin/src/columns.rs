//! Row shapes for the dashboard list views.
//!
//! Each column struct flattens relations to display strings and formats
//! dates and prices with the core formatters.

use serde::Serialize;

use catalog_admin_core::{
    BillboardId, CategoryId, ColorId, CurrencyCode, OrderId, Price, ProductId, SizeId, format_date,
};

use crate::models::{Billboard, CategoryWithBillboard, Color, OrderDetails, ProductDetails, Size};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillboardColumn {
    pub id: BillboardId,
    pub label: String,
    pub created_at: String,
}

impl From<&Billboard> for BillboardColumn {
    fn from(b: &Billboard) -> Self {
        Self {
            id: b.id,
            label: b.label.clone(),
            created_at: format_date(&b.created_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryColumn {
    pub id: CategoryId,
    pub name: String,
    pub billboard_label: String,
    pub created_at: String,
}

impl From<&CategoryWithBillboard> for CategoryColumn {
    fn from(c: &CategoryWithBillboard) -> Self {
        Self {
            id: c.category.id,
            name: c.category.name.clone(),
            billboard_label: c.billboard.label.clone(),
            created_at: format_date(&c.category.created_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeColumn {
    pub id: SizeId,
    pub name: String,
    pub value: String,
    pub created_at: String,
}

impl From<&Size> for SizeColumn {
    fn from(s: &Size) -> Self {
        Self {
            id: s.id,
            name: s.name.clone(),
            value: s.value.clone(),
            created_at: format_date(&s.created_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorColumn {
    pub id: ColorId,
    pub name: String,
    pub value: String,
    pub created_at: String,
}

impl From<&Color> for ColorColumn {
    fn from(c: &Color) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            value: c.value.clone(),
            created_at: format_date(&c.created_at),
        }
    }
}

/// Product row; `category`, `size` and `color` are the related names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductColumn {
    pub id: ProductId,
    pub name: String,
    pub is_featured: bool,
    pub is_archived: bool,
    pub price: String,
    pub category: String,
    pub size: String,
    pub color: String,
    pub created_at: String,
}

impl From<&ProductDetails> for ProductColumn {
    fn from(p: &ProductDetails) -> Self {
        Self {
            id: p.product.id,
            name: p.product.name.clone(),
            is_featured: p.product.is_featured,
            is_archived: p.product.is_archived,
            price: Price::usd(p.product.price).display(),
            category: p.category.name.clone(),
            size: p.size.name.clone(),
            color: p.color.name.clone(),
            created_at: format_date(&p.product.created_at),
        }
    }
}

/// Order row; `products` lists product names joined with `", "`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderColumn {
    pub id: OrderId,
    pub phone: String,
    pub address: String,
    pub is_paid: bool,
    pub products: String,
    pub total_price: String,
    pub created_at: String,
}

impl From<&OrderDetails> for OrderColumn {
    fn from(o: &OrderDetails) -> Self {
        let products = o
            .order_items
            .iter()
            .map(|item| item.product.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            id: o.order.id,
            phone: o.order.phone.clone(),
            address: o.order.address.clone(),
            is_paid: o.order.is_paid,
            products,
            total_price: order_total(o).display(),
            created_at: format_date(&o.order.created_at),
        }
    }
}

/// Sum of item product prices, one unit per item.
#[must_use]
pub fn order_total(order: &OrderDetails) -> Price {
    Price::total(
        order.order_items.iter().map(|item| item.product.price),
        CurrencyCode::USD,
    )
}

/// Map a slice of records into dashboard columns.
pub fn columns<'a, T, C>(rows: &'a [T]) -> Vec<C>
where
    C: From<&'a T>,
{
    rows.iter().map(C::from).collect()
}
