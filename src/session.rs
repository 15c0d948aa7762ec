//! Shopping session
//!
//! Owns the catalog, the cart and the files they live in. Every successful cart
//! change is written to the cart file straight away; the catalog file is only
//! written when `persist_catalog` is enabled.

use std::path::PathBuf;

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{info, instrument};

use crate::{
    cart::{Cart, CartError},
    catalog::Catalog,
    receipt::Receipt,
    storage::{self, StorageError},
};

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// The cart operation was rejected; nothing changed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The operation succeeded in memory but could not be saved.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Where a session keeps its state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPaths {
    /// Catalog file
    pub catalog: PathBuf,

    /// Cart file
    pub cart: PathBuf,

    /// Save the catalog after every cart change
    pub persist_catalog: bool,
}

/// A completed sale and whether the emptied cart reached disk.
#[derive(Debug)]
pub struct Checkout {
    /// What was bought
    pub receipt: Receipt,

    /// Set when the sale went through but the cart file still holds the old cart
    pub save_error: Option<StorageError>,
}

/// Catalog and cart for one run of the program.
#[derive(Debug)]
pub struct Session {
    paths: SessionPaths,
    catalog: Catalog,
    cart: Cart,
}

impl Session {
    /// Load the catalog and cart from disk. Missing or unreadable files give empty state.
    pub fn open(paths: SessionPaths, currency: &'static Currency) -> Self {
        let catalog = storage::load_catalog(&paths.catalog, currency);
        let cart = storage::load_cart(&paths.cart, &catalog);

        Self::with_state(paths, catalog, cart)
    }

    /// Create a session from state that is already in memory.
    pub fn with_state(paths: SessionPaths, catalog: Catalog, cart: Cart) -> Self {
        Self {
            paths,
            catalog,
            cart,
        }
    }

    /// The catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The cart
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// File locations
    pub fn paths(&self) -> &SessionPaths {
        &self.paths
    }

    /// Add units of a product to the cart, then save.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Cart`] if the add is rejected, or
    /// [`SessionError::Storage`] if it succeeded but could not be saved.
    #[instrument(skip(self))]
    pub fn add(&mut self, product_id: &str, quantity: u32) -> Result<(), SessionError> {
        self.cart.add(&mut self.catalog, product_id, quantity)?;

        Ok(self.persist()?)
    }

    /// Set the cart quantity of a product, then save. Zero removes it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Cart`] if the update is rejected, or
    /// [`SessionError::Storage`] if it succeeded but could not be saved.
    #[instrument(skip(self))]
    pub fn update(&mut self, product_id: &str, quantity: u32) -> Result<(), SessionError> {
        self.cart.update(&mut self.catalog, product_id, quantity)?;

        Ok(self.persist()?)
    }

    /// Remove a product from the cart, then save.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Cart`] if the product is not in the cart, or
    /// [`SessionError::Storage`] if it was removed but could not be saved.
    #[instrument(skip(self))]
    pub fn remove(&mut self, product_id: &str) -> Result<(), SessionError> {
        self.cart.remove(&mut self.catalog, product_id)?;

        Ok(self.persist()?)
    }

    /// Current cart total.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the total cannot be computed.
    pub fn total(&self) -> Result<Money<'static, Currency>, CartError> {
        self.cart.total(&self.catalog)
    }

    /// Itemised view of the cart without changing it.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if a line cannot be priced.
    pub fn receipt(&self) -> Result<Receipt, CartError> {
        Receipt::from_cart(&self.cart, &self.catalog)
    }

    /// Check out the cart and save the now empty cart.
    ///
    /// A save failure after a successful checkout comes back in
    /// [`Checkout::save_error`] alongside the receipt.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Cart`] if the cart is empty or cannot be priced.
    #[instrument(skip(self))]
    pub fn checkout(&mut self) -> Result<Checkout, SessionError> {
        let receipt = self.cart.checkout(&self.catalog)?;

        info!(lines = receipt.lines().len(), total = %receipt.total(), "checked out");

        Ok(Checkout {
            receipt,
            save_error: self.persist().err(),
        })
    }

    /// Write the cart, and the catalog when enabled, to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be written.
    pub fn persist(&self) -> Result<(), StorageError> {
        storage::save_cart(&self.paths.cart, &self.cart)?;

        if self.paths.persist_catalog {
            storage::save_catalog(&self.paths.catalog, &self.catalog)?;
        }

        Ok(())
    }
}
