//! Catalog

use std::io;

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use slotmap::SlotMap;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;
use tracing::debug;

use crate::products::{Product, ProductKey};

/// Errors from stock bookkeeping.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// No product with this id
    #[error("product not found: {0}")]
    ProductNotFound(String),

    /// Reservations must be for at least one unit
    #[error("quantity must be greater than zero")]
    ZeroQuantity,

    /// Not enough stock to cover a reservation
    #[error("insufficient stock for {id}: requested {requested}, available {available}")]
    InsufficientStock {
        /// Product id
        id: String,
        /// Units requested
        requested: u32,
        /// Units in stock
        available: u32,
    },
}

/// Product catalog with stock counts.
///
/// Products keep the order in which they were inserted.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: SlotMap<ProductKey, Product>,
    keys: FxHashMap<String, ProductKey>,
    currency: &'static Currency,
}

impl Catalog {
    /// Create an empty catalog priced in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            products: SlotMap::with_key(),
            keys: FxHashMap::default(),
            currency,
        }
    }

    /// Create a catalog from a list of products.
    pub fn with_products(
        products: impl IntoIterator<Item = Product>,
        currency: &'static Currency,
    ) -> Self {
        let mut catalog = Self::new(currency);

        for product in products {
            catalog.insert(product);
        }

        catalog
    }

    /// Insert a product, replacing any existing product with the same id in place.
    pub fn insert(&mut self, product: Product) -> ProductKey {
        if let Some(&key) = self.keys.get(&product.id)
            && let Some(existing) = self.products.get_mut(key)
        {
            debug!(product_id = %product.id, "replacing duplicate catalog entry");

            *existing = product;

            return key;
        }

        let id = product.id.clone();
        let key = self.products.insert(product);

        self.keys.insert(id, key);

        key
    }

    /// Look up a product by id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.keys
            .get(id)
            .and_then(|&key| self.products.get(key))
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Product, CatalogError> {
        self.keys
            .get(id)
            .and_then(|&key| self.products.get_mut(key))
            .ok_or_else(|| CatalogError::ProductNotFound(id.to_string()))
    }

    /// Whether a product with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.keys.contains_key(id)
    }

    /// Units in stock for a product, if it exists.
    pub fn stock(&self, id: &str) -> Option<u32> {
        self.get(id).map(Product::quantity_available)
    }

    /// Reserve `amount` units of a product, taking them out of stock.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::ProductNotFound`]: the id is unknown.
    /// - [`CatalogError::ZeroQuantity`]: `amount` is zero.
    /// - [`CatalogError::InsufficientStock`]: `amount` exceeds the available stock.
    pub fn reserve(&mut self, id: &str, amount: u32) -> Result<(), CatalogError> {
        let product = self.get_mut(id)?;

        if amount == 0 {
            return Err(CatalogError::ZeroQuantity);
        }

        let available = product.quantity_available();

        if !product.decrease_quantity(amount) {
            return Err(CatalogError::InsufficientStock {
                id: id.to_string(),
                requested: amount,
                available,
            });
        }

        debug!(product_id = id, amount, remaining = available - amount, "reserved stock");

        Ok(())
    }

    /// Return `amount` units of a product to stock. Releasing zero units is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] if the id is unknown.
    pub fn release(&mut self, id: &str, amount: u32) -> Result<(), CatalogError> {
        let product = self.get_mut(id)?;

        product.increase_quantity(amount);

        debug!(
            product_id = id,
            amount,
            available = product.quantity_available(),
            "released stock"
        );

        Ok(())
    }

    /// Iterate over products in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Currency all prices are expressed in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Writes the product listing as a table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> io::Result<()> {
        if self.is_empty() {
            return writeln!(out, "No products available.");
        }

        let mut builder = Builder::default();

        builder.push_record(["ID", "Name", "Price", "Stock", "Details"]);

        for product in self.iter() {
            builder.push_record([
                product.id.clone(),
                product.name.clone(),
                product.price.to_string(),
                product.quantity_available().to_string(),
                product.details(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(2..4), Alignment::right());

        writeln!(out, "{table}")
    }
}
