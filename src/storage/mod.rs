//! Storage
//!
//! Catalog and cart files hold a flat list of records. Files ending in `.yml` or
//! `.yaml` are YAML, anything else is JSON.
//!
//! The `read_*` functions report what went wrong; the `load_*` functions treat any
//! failure as empty state.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use rusty_money::iso::Currency;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    cart::{Cart, CartItem},
    catalog::Catalog,
    pricing::PriceError,
    storage::records::{CartRecord, ProductRecord},
};

pub mod records;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error reading or writing a file
    #[error("Failed to access {path}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// JSON parsing or encoding error
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing or encoding error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price in a product record
    #[error("Invalid price: {0}")]
    Price(#[from] PriceError),

    /// A variant-specific field is missing from a product record
    #[error("Product {product_id} is missing field `{field}`")]
    MissingField {
        /// Product id
        product_id: String,
        /// Missing field name
        field: &'static str,
    },
}

/// File format, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// JSON array of records
    Json,

    /// YAML sequence of records
    Yaml,
}

impl Format {
    /// Pick the format for a path.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml") => {
                Format::Yaml
            }
            _ => Format::Json,
        }
    }
}

/// Read a list of records. Returns `Ok(None)` if the file does not exist.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Option<Vec<T>>, StorageError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StorageError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let records = match Format::from_path(path) {
        Format::Json => serde_json::from_str(&contents)?,
        Format::Yaml => serde_norway::from_str(&contents)?,
    };

    Ok(Some(records))
}

/// Write a list of records, replacing the file.
///
/// # Errors
///
/// Returns an error if the records cannot be encoded or the file cannot be written.
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), StorageError> {
    let contents = match Format::from_path(path) {
        Format::Json => serde_json::to_string_pretty(records)?,
        Format::Yaml => serde_norway::to_string(records)?,
    };

    fs::write(path, contents).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a catalog. Returns `Ok(None)` if the file does not exist.
///
/// # Errors
///
/// Returns an error if the file cannot be read or any record is invalid.
pub fn read_catalog(
    path: &Path,
    currency: &'static Currency,
) -> Result<Option<Catalog>, StorageError> {
    let Some(records) = read_records::<ProductRecord>(path)? else {
        return Ok(None);
    };

    let products = records
        .into_iter()
        .map(|record| record.into_product(currency))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(Catalog::with_products(products, currency)))
}

/// Load a catalog, falling back to an empty one on any failure.
pub fn load_catalog(path: &Path, currency: &'static Currency) -> Catalog {
    match read_catalog(path, currency) {
        Ok(Some(catalog)) => {
            info!(path = %path.display(), products = catalog.len(), "loaded catalog");

            catalog
        }
        Ok(None) => {
            warn!(path = %path.display(), "catalog file not found, starting with an empty catalog");

            Catalog::new(currency)
        }
        Err(error) => {
            warn!(path = %path.display(), %error, "could not load catalog, starting with an empty catalog");

            Catalog::new(currency)
        }
    }
}

/// Save every product in the catalog.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_catalog(path: &Path, catalog: &Catalog) -> Result<(), StorageError> {
    let records: Vec<ProductRecord> = catalog.iter().map(ProductRecord::from).collect();

    write_records(path, &records)?;

    debug!(path = %path.display(), products = records.len(), "saved catalog");

    Ok(())
}

/// Read a cart, keeping only entries for products in `catalog` with a non-zero
/// quantity. Catalog stock is not touched. Returns `Ok(None)` if the file does not exist.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn read_cart(path: &Path, catalog: &Catalog) -> Result<Option<Cart>, StorageError> {
    let Some(records) = read_records::<CartRecord>(path)? else {
        return Ok(None);
    };

    let items = records.into_iter().filter_map(|record| {
        if !catalog.contains(&record.product_id) {
            warn!(product_id = %record.product_id, "skipping cart entry for unknown product");

            return None;
        }

        if record.quantity == 0 {
            warn!(product_id = %record.product_id, "skipping cart entry with zero quantity");

            return None;
        }

        Some(CartItem::new(record.product_id, record.quantity))
    });

    Ok(Some(Cart::restore(items)))
}

/// Load a cart, falling back to an empty one on any failure.
pub fn load_cart(path: &Path, catalog: &Catalog) -> Cart {
    match read_cart(path, catalog) {
        Ok(Some(cart)) => {
            info!(path = %path.display(), items = cart.len(), "loaded cart");

            cart
        }
        Ok(None) => {
            debug!(path = %path.display(), "cart file not found, starting with an empty cart");

            Cart::new()
        }
        Err(error) => {
            warn!(path = %path.display(), %error, "could not load cart, starting with an empty cart");

            Cart::new()
        }
    }
}

/// Save the cart contents.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_cart(path: &Path, cart: &Cart) -> Result<(), StorageError> {
    let records: Vec<CartRecord> = cart.items().iter().map(CartRecord::from).collect();

    write_records(path, &records)?;

    debug!(path = %path.display(), items = records.len(), "saved cart");

    Ok(())
}
