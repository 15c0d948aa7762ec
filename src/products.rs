//! Products

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Variant-specific product data
#[derive(Debug, Clone, PartialEq)]
pub enum ProductKind {
    /// A product with no extra attributes
    Generic,

    /// A shipped product
    Physical {
        /// Weight in kilograms
        weight: Decimal,
    },

    /// A downloadable product
    Digital {
        /// Where the purchased file can be fetched from
        download_link: String,
    },
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product id, unique within a catalog
    pub id: String,

    /// Product name
    pub name: String,

    /// Product price
    pub price: Money<'static, Currency>,

    /// Variant payload
    pub kind: ProductKind,

    quantity_available: u32,
}

impl Product {
    /// Create a new product.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money<'static, Currency>,
        quantity_available: u32,
        kind: ProductKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            kind,
            quantity_available,
        }
    }

    /// Units currently in stock.
    pub fn quantity_available(&self) -> u32 {
        self.quantity_available
    }

    /// Take `amount` units out of stock.
    ///
    /// Returns `false` and leaves stock untouched unless `0 < amount <= stock`.
    pub fn decrease_quantity(&mut self, amount: u32) -> bool {
        if amount == 0 || amount > self.quantity_available {
            return false;
        }

        self.quantity_available -= amount;

        true
    }

    /// Put `amount` units back into stock.
    pub fn increase_quantity(&mut self, amount: u32) {
        self.quantity_available = self.quantity_available.saturating_add(amount);
    }

    /// Variant-specific details for display, empty for generic products.
    pub fn details(&self) -> String {
        match &self.kind {
            ProductKind::Generic => String::new(),
            ProductKind::Physical { weight } => format!("Weight: {weight}kg"),
            ProductKind::Digital { download_link } => format!("Link: {download_link}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::INR;

    use super::*;

    fn laptop() -> Product {
        Product::new(
            "P1",
            "Laptop",
            Money::from_minor(10_000, INR),
            5,
            ProductKind::Physical {
                weight: Decimal::new(15, 1),
            },
        )
    }

    #[test]
    fn decrease_quantity_takes_stock() {
        let mut product = laptop();

        assert!(product.decrease_quantity(3), "3 of 5 should be reservable");
        assert_eq!(product.quantity_available(), 2);
    }

    #[test]
    fn decrease_quantity_rejects_zero_and_excess() {
        let mut product = laptop();

        assert!(!product.decrease_quantity(0), "zero is not a reservation");
        assert!(!product.decrease_quantity(6), "6 exceeds the stock of 5");
        assert_eq!(product.quantity_available(), 5);
    }

    #[test]
    fn increase_quantity_has_no_upper_bound() {
        let mut product = laptop();

        product.increase_quantity(10);

        assert_eq!(product.quantity_available(), 15);
    }

    #[test]
    fn details_depend_on_kind() {
        let ebook = Product::new(
            "D1",
            "E-book",
            Money::from_minor(500, INR),
            100,
            ProductKind::Digital {
                download_link: "https://example.com/book".to_string(),
            },
        );

        assert_eq!(laptop().details(), "Weight: 1.5kg");
        assert_eq!(ebook.details(), "Link: https://example.com/book");
    }
}
