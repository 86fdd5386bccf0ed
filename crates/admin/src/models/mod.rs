//! Domain models for the catalog.
//!
//! Each resource module holds the stored record type (serialized camelCase),
//! the request body type with every field optional, and the validated field
//! struct the storage layer accepts.

pub mod billboard;
pub mod category;
pub mod color;
pub mod order;
pub mod product;
pub mod size;
pub mod store;
pub mod validation;

pub use billboard::{Billboard, BillboardFields, BillboardInput};
pub use category::{Category, CategoryFields, CategoryInput, CategoryWithBillboard};
pub use color::{Color, ColorFields, ColorInput};
pub use order::{
    Order, OrderDetails, OrderFields, OrderInput, OrderItem, OrderItemDetails, OrderUpdate,
    OrderUpdateInput,
};
pub use product::{
    ImageInput, Product, ProductDetails, ProductFields, ProductFilter, ProductImage, ProductInput,
    ProductListQuery,
};
pub use size::{Size, SizeFields, SizeInput};
pub use store::{Store, StoreFields, StoreInput};
pub use validation::ValidationError;
