//! Seed the catalog from a YAML file.
//!
//! Rows go through the same validation as API request bodies. Categories
//! name their billboard by label, and products name their category, size
//! and color by name; these are resolved within the store being seeded.
//!
//! ```yaml
//! owner: user_2NNEqL2nrIRdJ194ndJqAHwEfxC
//! stores:
//!   - name: Summer Shop
//!     billboards:
//!       - label: Summer
//!         imageUrl: https://images.example.test/summer.png
//!     categories:
//!       - name: Shirts
//!         billboard: Summer
//!     sizes:
//!       - { name: Small, value: S }
//!     colors:
//!       - { name: Red, value: "#FF0000" }
//!     products:
//!       - name: Tee
//!         price: "19.99"
//!         category: Shirts
//!         size: Small
//!         color: Red
//!         images: [https://images.example.test/tee.png]
//! ```

use std::collections::HashMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use catalog_admin::config::get_database_url;
use catalog_admin::db::{self, CatalogStore, PgCatalog, RepositoryError};
use catalog_admin::models::{
    BillboardInput, CategoryInput, ColorInput, ImageInput, ProductInput, SizeInput, StoreInput,
    ValidationError,
};
use catalog_admin_core::{UserId, UserIdError};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("invalid owner: {0}")]
    Owner(#[from] UserIdError),

    #[error("{context}: {source}")]
    Validation {
        context: String,
        source: ValidationError,
    },

    #[error("{context}: unknown {kind} '{name}'")]
    UnknownReference {
        context: String,
        kind: &'static str,
        name: String,
    },

    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Top-level seed document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedFile {
    pub owner: String,
    #[serde(default)]
    pub stores: Vec<SeedStore>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedStore {
    pub name: String,
    #[serde(default)]
    pub billboards: Vec<BillboardInput>,
    #[serde(default)]
    pub categories: Vec<SeedCategory>,
    #[serde(default)]
    pub sizes: Vec<SizeInput>,
    #[serde(default)]
    pub colors: Vec<ColorInput>,
    #[serde(default)]
    pub products: Vec<SeedProduct>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedCategory {
    pub name: String,
    /// Billboard label.
    pub billboard: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedProduct {
    pub name: String,
    pub price: Decimal,
    pub category: String,
    pub size: String,
    pub color: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub archived: bool,
}

/// Row counts written by a seed run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub stores: usize,
    pub billboards: usize,
    pub categories: usize,
    pub sizes: usize,
    pub colors: usize,
    pub products: usize,
}

/// Seed from a YAML file into the configured database.
///
/// The file is parsed and the owner checked before connecting.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, the database URL is
/// missing, or any row fails validation or storage.
pub async fn run(file_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading seed file");
    let content = tokio::fs::read_to_string(path).await?;
    let seed: SeedFile = serde_yaml::from_str(&content)?;
    UserId::parse(&seed.owner)?;
    info!(stores = seed.stores.len(), "Parsed seed file");

    let database_url = get_database_url("ADMIN_DATABASE_URL")?;
    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let catalog = PgCatalog::new(pool);
    let summary = seed_catalog(&catalog, seed).await?;

    info!("Seeding complete!");
    info!("  Stores: {}", summary.stores);
    info!("  Billboards: {}", summary.billboards);
    info!("  Categories: {}", summary.categories);
    info!("  Sizes: {}", summary.sizes);
    info!("  Colors: {}", summary.colors);
    info!("  Products: {}", summary.products);
    Ok(())
}

/// Write every store in `seed` and its rows, in dependency order.
///
/// # Errors
///
/// Stops at the first row that fails validation, names an unknown
/// reference, or fails to store. Rows written before the failure remain.
pub async fn seed_catalog(
    catalog: &dyn CatalogStore,
    seed: SeedFile,
) -> Result<SeedSummary, SeedError> {
    let owner = UserId::parse(&seed.owner)?;
    let mut summary = SeedSummary::default();

    for store in seed.stores {
        seed_store(catalog, &owner, store, &mut summary).await?;
    }
    Ok(summary)
}

async fn seed_store(
    catalog: &dyn CatalogStore,
    owner: &UserId,
    seed: SeedStore,
    summary: &mut SeedSummary,
) -> Result<(), SeedError> {
    let context = format!("store '{}'", seed.name);
    let fields = StoreInput {
        name: Some(seed.name),
    }
    .validate()
    .map_err(|source| invalid(&context, source))?;
    let store = catalog.create_store(owner, fields).await?;
    summary.stores += 1;

    let mut billboards = HashMap::new();
    for input in seed.billboards {
        let fields = input.validate().map_err(|s| invalid(&context, s))?;
        let billboard = catalog.create_billboard(store.id, fields).await?;
        billboards.insert(billboard.label.clone(), billboard.id);
        summary.billboards += 1;
    }

    let mut categories = HashMap::new();
    for category in seed.categories {
        let billboard_id = lookup(&billboards, &context, "billboard", &category.billboard)?;
        let fields = CategoryInput {
            name: Some(category.name),
            billboard_id: Some(billboard_id.to_string()),
        }
        .validate()
        .map_err(|s| invalid(&context, s))?;
        let created = catalog.create_category(store.id, fields).await?;
        categories.insert(created.name.clone(), created.id);
        summary.categories += 1;
    }

    let mut sizes = HashMap::new();
    for input in seed.sizes {
        let fields = input.validate().map_err(|s| invalid(&context, s))?;
        let size = catalog.create_size(store.id, fields).await?;
        sizes.insert(size.name.clone(), size.id);
        summary.sizes += 1;
    }

    let mut colors = HashMap::new();
    for input in seed.colors {
        let fields = input.validate().map_err(|s| invalid(&context, s))?;
        let color = catalog.create_color(store.id, fields).await?;
        colors.insert(color.name.clone(), color.id);
        summary.colors += 1;
    }

    for product in seed.products {
        let product_context = format!("{context}, product '{}'", product.name);
        let category_id = lookup(&categories, &product_context, "category", &product.category)?;
        let size_id = lookup(&sizes, &product_context, "size", &product.size)?;
        let color_id = lookup(&colors, &product_context, "color", &product.color)?;

        let fields = ProductInput {
            name: Some(product.name),
            price: Some(product.price),
            category_id: Some(category_id.to_string()),
            color_id: Some(color_id.to_string()),
            size_id: Some(size_id.to_string()),
            images: Some(
                product
                    .images
                    .into_iter()
                    .map(|url| ImageInput { url: Some(url) })
                    .collect(),
            ),
            is_featured: Some(product.featured),
            is_archived: Some(product.archived),
        }
        .validate()
        .map_err(|s| invalid(&product_context, s))?;
        catalog.create_product(store.id, fields).await?;
        summary.products += 1;
    }

    info!(store_id = %store.id, name = %store.name, "Seeded store");
    Ok(())
}

fn invalid(context: &str, source: ValidationError) -> SeedError {
    SeedError::Validation {
        context: context.to_owned(),
        source,
    }
}

fn lookup<T: Copy>(
    rows: &HashMap<String, T>,
    context: &str,
    kind: &'static str,
    name: &str,
) -> Result<T, SeedError> {
    rows.get(name)
        .copied()
        .ok_or_else(|| SeedError::UnknownReference {
            context: context.to_owned(),
            kind,
            name: name.to_owned(),
        })
}
