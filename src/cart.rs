//! Cart

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{Catalog, CatalogError},
    pricing::PriceError,
    receipt::Receipt,
};

/// Errors from cart operations.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// The product is not in the cart
    #[error("product not in cart: {0}")]
    NotInCart(String),

    /// Checkout was requested with nothing in the cart
    #[error("cart is empty")]
    Empty,

    /// The cart quantity would no longer fit in a `u32`
    #[error("quantity overflow for product {0}")]
    QuantityOverflow(String),

    /// Stock bookkeeping failed
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Price arithmetic failed
    #[error(transparent)]
    Price(#[from] PriceError),
}

/// A product in the cart with the quantity reserved for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    product_id: String,
    quantity: u32,
}

impl CartItem {
    /// Create a cart entry.
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }

    /// Id of the catalog product this entry refers to.
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// Units reserved for this entry.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Cart contents, in the order products were first added.
///
/// Every unit held by the cart has been reserved from the catalog passed to the
/// mutating operations, so the catalog must be the same one on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from saved entries without touching catalog stock.
    ///
    /// A later entry for the same product replaces an earlier one.
    pub fn restore(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut cart = Self::new();

        for item in items {
            match cart.position(&item.product_id) {
                Some(idx) => {
                    if let Some(existing) = cart.items.get_mut(idx) {
                        *existing = item;
                    }
                }
                None => cart.items.push(item),
            }
        }

        cart
    }

    /// Cart entries.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds nothing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Quantity held for a product, if it is in the cart.
    pub fn quantity(&self, product_id: &str) -> Option<u32> {
        self.items
            .iter()
            .find(|item| item.product_id == product_id)
            .map(CartItem::quantity)
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.product_id == product_id)
    }

    /// Add `quantity` units of a product, merging with an existing entry.
    ///
    /// # Errors
    ///
    /// - [`CartError::Catalog`]: the product is unknown, `quantity` is zero or exceeds
    ///   the available stock.
    /// - [`CartError::QuantityOverflow`]: the merged entry would overflow.
    ///
    /// Cart and catalog are unchanged on error.
    pub fn add(
        &mut self,
        catalog: &mut Catalog,
        product_id: &str,
        quantity: u32,
    ) -> Result<(), CartError> {
        let idx = self.position(product_id);

        let merged = match idx.and_then(|idx| self.items.get(idx)) {
            Some(item) => item
                .quantity
                .checked_add(quantity)
                .ok_or_else(|| CartError::QuantityOverflow(product_id.to_string()))?,
            None => quantity,
        };

        catalog.reserve(product_id, quantity)?;

        match idx.and_then(|idx| self.items.get_mut(idx)) {
            Some(item) => item.quantity = merged,
            None => self.items.push(CartItem::new(product_id, quantity)),
        }

        debug!(product_id, quantity, "added to cart");

        Ok(())
    }

    /// Set the quantity of a product already in the cart, reserving or releasing
    /// the difference. A quantity of zero removes the entry.
    ///
    /// # Errors
    ///
    /// - [`CartError::NotInCart`]: the product is not in the cart.
    /// - [`CartError::Catalog`]: the increase cannot be covered by stock.
    pub fn update(
        &mut self,
        catalog: &mut Catalog,
        product_id: &str,
        quantity: u32,
    ) -> Result<(), CartError> {
        let idx = self
            .position(product_id)
            .ok_or_else(|| CartError::NotInCart(product_id.to_string()))?;

        let current = self
            .items
            .get(idx)
            .map(CartItem::quantity)
            .ok_or_else(|| CartError::NotInCart(product_id.to_string()))?;

        if quantity > current {
            catalog.reserve(product_id, quantity - current)?;
        } else {
            catalog.release(product_id, current - quantity)?;
        }

        if quantity == 0 {
            self.items.remove(idx);
        } else if let Some(item) = self.items.get_mut(idx) {
            item.quantity = quantity;
        }

        debug!(product_id, from = current, to = quantity, "updated cart quantity");

        Ok(())
    }

    /// Remove a product from the cart and return its units to stock.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotInCart`] if the product is not in the cart.
    pub fn remove(
        &mut self,
        catalog: &mut Catalog,
        product_id: &str,
    ) -> Result<CartItem, CartError> {
        let idx = self
            .position(product_id)
            .ok_or_else(|| CartError::NotInCart(product_id.to_string()))?;

        let quantity = self
            .items
            .get(idx)
            .map(CartItem::quantity)
            .ok_or_else(|| CartError::NotInCart(product_id.to_string()))?;

        catalog.release(product_id, quantity)?;

        debug!(product_id, quantity, "removed from cart");

        Ok(self.items.remove(idx))
    }

    /// Sum of quantity × price over all entries, zero for an empty cart.
    ///
    /// # Errors
    ///
    /// - [`CartError::Catalog`]: an entry refers to a product missing from the catalog.
    /// - [`CartError::Price`]: price arithmetic overflowed.
    pub fn total(&self, catalog: &Catalog) -> Result<Money<'static, Currency>, CartError> {
        Receipt::from_cart(self, catalog).map(|receipt| receipt.total())
    }

    /// Finalise the sale: build a receipt and empty the cart. Reserved stock is not
    /// returned to the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Empty`] if there is nothing to check out, or any error
    /// from building the receipt. The cart is unchanged on error.
    pub fn checkout(&mut self, catalog: &Catalog) -> Result<Receipt, CartError> {
        if self.is_empty() {
            return Err(CartError::Empty);
        }

        let receipt = Receipt::from_cart(self, catalog)?;

        self.items.clear();

        Ok(receipt)
    }
}
