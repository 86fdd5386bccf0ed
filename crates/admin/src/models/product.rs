//! Product domain types.
//!
//! A product belongs to one category, size and color of the same store and
//! owns an ordered set of images. Archived products stay visible in the
//! dashboard but are never listed by the public endpoint.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use catalog_admin_core::{CategoryId, ColorId, ProductId, ProductImageId, SizeId, StoreId};

use super::category::Category;
use super::color::Color;
use super::size::Size;
use super::validation::{ValidationError, required_id, required_text};

/// Largest price the `NUMERIC(12, 2)` column holds.
pub const MAX_PRICE: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// A sellable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub store_id: StoreId,
    pub category_id: CategoryId,
    pub size_id: SizeId,
    pub color_id: ColorId,
    pub name: String,
    /// Unit price with two fraction digits.
    pub price: Decimal,
    pub is_featured: bool,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An image attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub id: ProductImageId,
    pub product_id: ProductId,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product with images and display relations embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    #[serde(flatten)]
    pub product: Product,
    pub images: Vec<ProductImage>,
    pub category: Category,
    pub size: Size,
    pub color: Color,
}

/// One image entry in a product request body.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ImageInput {
    pub url: Option<String>,
}

/// Request body for creating or updating a product.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub category_id: Option<String>,
    pub color_id: Option<String>,
    pub size_id: Option<String>,
    pub images: Option<Vec<ImageInput>>,
    pub is_featured: Option<bool>,
    pub is_archived: Option<bool>,
}

/// Validated product fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFields {
    pub name: String,
    pub price: Decimal,
    pub category_id: CategoryId,
    pub color_id: ColorId,
    pub size_id: SizeId,
    /// Image URLs in request order.
    pub images: Vec<String>,
    pub is_featured: bool,
    pub is_archived: bool,
}

impl ProductInput {
    /// Check required fields in declaration order.
    ///
    /// The price is rounded to two fraction digits.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first missing or malformed field.
    pub fn validate(self) -> Result<ProductFields, ValidationError> {
        let name = required_text(self.name, "name", "Name")?;

        let mut price = self
            .price
            .ok_or_else(|| ValidationError::required("price", "Price"))?;
        if price.is_sign_negative() && !price.is_zero() {
            return Err(ValidationError::invalid(
                "price",
                "Price must not be negative",
            ));
        }
        price = price.round_dp(2);
        price.rescale(2);
        // A zero price counts as missing, like a blank string.
        if price.is_zero() {
            return Err(ValidationError::required("price", "Price"));
        }
        if price > MAX_PRICE {
            return Err(ValidationError::invalid("price", "Price is too large"));
        }

        let category_id = required_id(self.category_id, "categoryId", "Category id")?;
        let color_id = required_id(self.color_id, "colorId", "Color id")?;
        let size_id = required_id(self.size_id, "sizeId", "Size id")?;

        let images = match self.images {
            Some(images) if !images.is_empty() => images
                .into_iter()
                .map(|image| required_text(image.url, "images", "Image URL"))
                .collect::<Result<Vec<_>, _>>()?,
            _ => return Err(ValidationError::invalid("images", "Images are required")),
        };

        Ok(ProductFields {
            name,
            price,
            category_id,
            color_id,
            size_id,
            images,
            is_featured: self.is_featured.unwrap_or(false),
            is_archived: self.is_archived.unwrap_or(false),
        })
    }
}

/// Storage-level filter for product listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category_id: Option<CategoryId>,
    pub color_id: Option<ColorId>,
    pub size_id: Option<SizeId>,
    /// Only featured products when set.
    pub featured_only: bool,
    /// Dashboard listings include archived products; public listings never do.
    pub include_archived: bool,
}

impl ProductFilter {
    /// Whether a product passes this filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        (self.include_archived || !product.is_archived)
            && (!self.featured_only || product.is_featured)
            && self.category_id.is_none_or(|id| product.category_id == id)
            && self.color_id.is_none_or(|id| product.color_id == id)
            && self.size_id.is_none_or(|id| product.size_id == id)
    }
}

/// Query string accepted by the public product listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    pub category_id: Option<String>,
    pub color_id: Option<String>,
    pub size_id: Option<String>,
    pub is_featured: Option<String>,
}

impl ProductListQuery {
    /// Convert into a storage filter. Archived products are always excluded.
    ///
    /// `isFeatured=true` restricts to featured products; any other value is
    /// treated as "no filter".
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when an id filter is not a valid id.
    pub fn into_filter(self) -> Result<ProductFilter, ValidationError> {
        fn parse<T: core::str::FromStr>(
            value: Option<String>,
            field: &'static str,
            label: &str,
        ) -> Result<Option<T>, ValidationError> {
            value
                .filter(|v| !v.trim().is_empty())
                .map(|v| {
                    v.trim()
                        .parse()
                        .map_err(|_| ValidationError::invalid(field, format!("{label} is invalid")))
                })
                .transpose()
        }

        Ok(ProductFilter {
            category_id: parse(self.category_id, "categoryId", "Category id")?,
            color_id: parse(self.color_id, "colorId", "Color id")?,
            size_id: parse(self.size_id, "sizeId", "Size id")?,
            featured_only: self
                .is_featured
                .is_some_and(|v| v.trim().eq_ignore_ascii_case("true")),
            include_archived: false,
        })
    }
}
